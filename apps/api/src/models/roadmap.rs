use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One learning-roadmap entry for a single skill.
///
/// `youtube` and `coursera` hold derived search links, not model output —
/// the model supplies keywords, the server builds the URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapEntry {
    pub skill: String,
    pub steps: Vec<String>,
    pub youtube: Vec<String>,
    pub coursera: Vec<String>,
}

/// A persisted roadmap. `entries` is the canonical JSON encoding of
/// `Vec<RoadmapEntry>`; the store never interprets it.
///
/// Rows are owned exclusively by `user_id`: created on synthesis, never
/// updated in place, deleted only by their owner.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RoadmapRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entries: Value,
    pub created_at: DateTime<Utc>,
}
