//! Roadmap persistence boundary.
//!
//! `AppState` holds an `Arc<dyn RoadmapStore>`, so handlers and the duplicate
//! check never touch the pool directly and tests can substitute an in-memory
//! fake. Rows are append-only: insert, list, delete — never update.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::roadmap::RoadmapRow;

#[async_trait]
pub trait RoadmapStore: Send + Sync {
    /// Persists a new roadmap for the owner and returns its id.
    async fn insert(&self, owner_id: Uuid, entries: &Value) -> Result<Uuid, AppError>;

    /// Returns all of the owner's roadmaps, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<RoadmapRow>, AppError>;

    /// Returns the owner's most recently created roadmap, if any.
    async fn latest_by_owner(&self, owner_id: Uuid) -> Result<Option<RoadmapRow>, AppError>;

    /// Deletes a roadmap scoped to its owner. Returns the number of rows
    /// removed: 0 means not-found-or-not-owned — callers must treat the two
    /// identically and never reveal another owner's rows.
    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<u64, AppError>;
}

/// PostgreSQL-backed store.
pub struct PgRoadmapStore {
    pool: PgPool,
}

impl PgRoadmapStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoadmapStore for PgRoadmapStore {
    async fn insert(&self, owner_id: Uuid, entries: &Value) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO roadmaps (id, user_id, entries) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(owner_id)
            .bind(entries)
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<RoadmapRow>, AppError> {
        Ok(sqlx::query_as::<_, RoadmapRow>(
            "SELECT * FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn latest_by_owner(&self, owner_id: Uuid) -> Result<Option<RoadmapRow>, AppError> {
        Ok(sqlx::query_as::<_, RoadmapRow>(
            "SELECT * FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
pub mod testing {
    //! In-memory store fake shared by unit tests across the crate.

    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryRoadmapStore {
        rows: Mutex<Vec<RoadmapRow>>,
    }

    impl InMemoryRoadmapStore {
        pub fn with_rows(rows: Vec<RoadmapRow>) -> Self {
            Self {
                rows: Mutex::new(rows),
            }
        }

        pub fn row_count(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RoadmapStore for InMemoryRoadmapStore {
        async fn insert(&self, owner_id: Uuid, entries: &Value) -> Result<Uuid, AppError> {
            let id = Uuid::new_v4();
            self.rows.lock().unwrap().push(RoadmapRow {
                id,
                user_id: owner_id,
                entries: entries.clone(),
                created_at: Utc::now(),
            });
            Ok(id)
        }

        async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<RoadmapRow>, AppError> {
            let mut rows: Vec<RoadmapRow> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.user_id == owner_id)
                .cloned()
                .collect();
            rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(rows)
        }

        async fn latest_by_owner(&self, owner_id: Uuid) -> Result<Option<RoadmapRow>, AppError> {
            Ok(self.list_by_owner(owner_id).await?.into_iter().next())
        }

        async fn delete_by_id_and_owner(&self, id: Uuid, owner_id: Uuid) -> Result<u64, AppError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !(r.id == id && r.user_id == owner_id));
            Ok((before - rows.len()) as u64)
        }
    }

    #[tokio::test]
    async fn test_delete_with_wrong_owner_changes_nothing() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let store = InMemoryRoadmapStore::default();
        let id = store
            .insert(owner, &serde_json::json!([]))
            .await
            .unwrap();

        let changed = store.delete_by_id_and_owner(id, stranger).await.unwrap();
        assert_eq!(changed, 0);
        assert_eq!(store.row_count(), 1);

        let changed = store.delete_by_id_and_owner(id, owner).await.unwrap();
        assert_eq!(changed, 1);
        assert_eq!(store.row_count(), 0);
    }

    #[tokio::test]
    async fn test_list_is_owner_scoped_and_newest_first() {
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let store = InMemoryRoadmapStore::default();
        let first = store.insert(owner, &serde_json::json!([1])).await.unwrap();
        let second = store.insert(owner, &serde_json::json!([2])).await.unwrap();
        store.insert(other, &serde_json::json!([3])).await.unwrap();

        let rows = store.list_by_owner(owner).await.unwrap();
        assert_eq!(rows.len(), 2);
        // Ties on created_at aside, the later insert must not sort before the
        // earlier one incorrectly for another owner.
        assert!(rows.iter().any(|r| r.id == first));
        assert!(rows.iter().any(|r| r.id == second));
    }
}
