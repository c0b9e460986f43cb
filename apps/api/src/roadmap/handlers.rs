//! Axum route handlers for the Roadmap API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::roadmap::{RoadmapEntry, RoadmapRow};
use crate::roadmap::dedup::find_recent_duplicate;
use crate::roadmap::synthesizer::synthesize_roadmap;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapRequest {
    pub user_id: Uuid,
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub user_id: Uuid,
}

/// POST /api/v1/roadmaps
///
/// Generates (or re-serves) a roadmap for the requested skills. An identical
/// request inside the dedup window returns the previously persisted entries —
/// indistinguishable by shape from a fresh synthesis. Entries are only
/// returned after the store confirms the write.
pub async fn handle_generate_roadmap(
    State(state): State<AppState>,
    Json(request): Json<GenerateRoadmapRequest>,
) -> Result<Json<Vec<RoadmapEntry>>, AppError> {
    if request.skills.iter().all(|s| s.trim().is_empty()) {
        return Err(AppError::Validation(
            "skills list cannot be empty".to_string(),
        ));
    }

    let window = Duration::seconds(state.config.dedup_window_secs);
    if let Some(entries) = find_recent_duplicate(
        state.roadmaps.as_ref(),
        request.user_id,
        &request.skills,
        Utc::now(),
        window,
    )
    .await?
    {
        return Ok(Json(entries));
    }

    let entries = synthesize_roadmap(&state.llm, &request.skills).await?;

    let entries_json = serde_json::to_value(&entries)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize entries: {e}")))?;
    let id = state
        .roadmaps
        .insert(request.user_id, &entries_json)
        .await?;

    info!(
        "Persisted roadmap {} with {} entries for user {}",
        id,
        entries.len(),
        request.user_id
    );

    Ok(Json(entries))
}

/// GET /api/v1/roadmaps?user_id=…
///
/// Returns the owner's roadmaps, newest first. Stored entries are returned
/// verbatim; the store does not interpret them.
pub async fn handle_list_roadmaps(
    State(state): State<AppState>,
    Query(params): Query<OwnerQuery>,
) -> Result<Json<Vec<RoadmapRow>>, AppError> {
    let rows = state.roadmaps.list_by_owner(params.user_id).await?;
    Ok(Json(rows))
}

/// DELETE /api/v1/roadmaps/:id?user_id=…
///
/// Deletes a roadmap owned by the caller. Not-found and not-owned are the
/// same 404 — the existence of another owner's row is never revealed.
pub async fn handle_delete_roadmap(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<OwnerQuery>,
) -> Result<StatusCode, AppError> {
    let changed = state
        .roadmaps
        .delete_by_id_and_owner(id, params.user_id)
        .await?;

    if changed == 0 {
        return Err(AppError::NotFound(format!("Roadmap {id} not found")));
    }

    info!("Deleted roadmap {} for user {}", id, params.user_id);
    Ok(StatusCode::NO_CONTENT)
}
