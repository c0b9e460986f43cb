//! Duplicate-request suppression for roadmap generation.
//!
//! Protects against duplicate submissions (double-click, client retry)
//! re-invoking a costly, non-deterministic completion and inserting duplicate
//! rows. This is a derived check, not a cache: it re-reads the owner's most
//! recently persisted roadmap at call time, so it cannot drift from stored
//! truth. Only the newest roadmap is compared — the lookup stays O(1), and
//! alternating skill sets inside the window intentionally miss.
//!
//! Two racing requests for the same owner may both miss and both synthesize;
//! the result is an acceptable duplicate row, not corruption.

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::skills::normalize;
use crate::errors::AppError;
use crate::models::roadmap::RoadmapEntry;
use crate::roadmap::store::RoadmapStore;

/// Returns the previously persisted entries when the owner's newest roadmap
/// was created inside `window` and covers exactly the same skill set
/// (compared sorted and normalized — order and case do not matter).
///
/// A stored record that fails to parse is a miss, never an error: synthesis
/// proceeds and the bad record is logged.
pub async fn find_recent_duplicate(
    store: &dyn RoadmapStore,
    owner_id: Uuid,
    requested_skills: &[String],
    now: DateTime<Utc>,
    window: Duration,
) -> Result<Option<Vec<RoadmapEntry>>, AppError> {
    let last = match store.latest_by_owner(owner_id).await? {
        Some(row) => row,
        None => return Ok(None),
    };

    if now.signed_duration_since(last.created_at) >= window {
        return Ok(None);
    }

    let entries: Vec<RoadmapEntry> = match serde_json::from_value(last.entries.clone()) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(
                "Stored roadmap {} is not parseable ({e}) — skipping duplicate check",
                last.id
            );
            return Ok(None);
        }
    };

    let last_key = sorted_skill_key(entries.iter().map(|e| e.skill.as_str()));
    let requested_key = sorted_skill_key(requested_skills.iter().map(String::as_str));

    if last_key == requested_key {
        info!(
            "Duplicate roadmap request for owner {owner_id} within the window — \
             serving roadmap {} without a new LLM call",
            last.id
        );
        Ok(Some(entries))
    } else {
        Ok(None)
    }
}

/// Normalized, sorted skill list. Full-set equality is required for a hit —
/// no subset or superset tolerance.
fn sorted_skill_key<'a>(skills: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut key: Vec<String> = skills.map(normalize).collect();
    key.sort();
    key
}
