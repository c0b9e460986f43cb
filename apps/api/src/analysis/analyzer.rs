//! Analysis pipeline — orchestrates skill extraction and matching.
//!
//! Flow: tokenize JD → LLM skill extraction → parse completion →
//!       normalize résumé skills → score match → report.

use tracing::{debug, info};

use crate::analysis::matcher::{score_match, MatchReport};
use crate::analysis::prompts::{SKILL_EXTRACT_PROMPT_TEMPLATE, SKILL_EXTRACT_SYSTEM};
use crate::analysis::skills::{normalize, tokenize_job_description};
use crate::errors::AppError;
use crate::extraction;
use crate::llm_client::{LlmClient, TEMPERATURE_EXTRACTION};

/// Runs the full analysis pipeline for one résumé / JD pair.
///
/// The JD is tokenized before the LLM call: a JD with no skill tokens is
/// rejected without spending a completion.
pub async fn analyze_resume(
    llm: &LlmClient,
    resume_text: &str,
    job_description: &str,
) -> Result<MatchReport, AppError> {
    let job_skills = tokenize_job_description(job_description);
    if job_skills.is_empty() {
        return Err(AppError::Validation(
            "job_description contains no skill tokens".to_string(),
        ));
    }

    let prompt = SKILL_EXTRACT_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    let completion = llm
        .complete(&prompt, SKILL_EXTRACT_SYSTEM, TEMPERATURE_EXTRACTION)
        .await?;

    debug!(
        "Skill extraction completion prefix: {:?}",
        completion.chars().take(200).collect::<String>()
    );

    let extracted = extraction::parse_skills(&completion)?;
    let resume_skills: Vec<String> = extracted.skills.iter().map(|s| normalize(s)).collect();

    let report = score_match(&job_skills, resume_skills)?;
    info!(
        "Analysis complete: score={}/100, matched={}, missing={}",
        report.match_score,
        report.matched_skills.len(),
        report.missing_skills.len()
    );

    Ok(report)
}
