//! Axum route handlers for the Analysis API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::analyzer::analyze_resume;
use crate::analysis::matcher::MatchReport;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Plain text — binary-to-text conversion happens upstream.
    pub resume_text: String,
    pub job_description: String,
}

/// POST /api/v1/analyze
///
/// Extracts skills from the résumé text, scores them against the job
/// description, and returns the match report. Both inputs are required;
/// missing input is rejected before any LLM call.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<MatchReport>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let report = analyze_resume(&state.llm, &request.resume_text, &request.job_description).await?;
    Ok(Json(report))
}
