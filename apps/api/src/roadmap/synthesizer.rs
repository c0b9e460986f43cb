//! Roadmap synthesis — one LLM call per request, strict parsing, derived
//! resource links.
//!
//! Flow: build prompt (explicit cardinality) → LLM completion → parse →
//!       cardinality check (logged, non-fatal) → derive search links.
//!
//! Persistence is the caller's job; this module never writes to the store.

use tracing::{debug, warn};

use crate::analysis::skills::normalize;
use crate::errors::AppError;
use crate::extraction::{self, RawRoadmapItem};
use crate::llm_client::{LlmClient, TEMPERATURE_SYNTHESIS};
use crate::models::roadmap::RoadmapEntry;
use crate::roadmap::prompts::{ROADMAP_PROMPT_TEMPLATE, ROADMAP_SYSTEM};

const YOUTUBE_SEARCH_URL: &str = "https://www.youtube.com/results?search_query=";
const COURSERA_SEARCH_URL: &str = "https://www.coursera.org/search?query=";

/// Synthesizes one roadmap entry per requested skill.
///
/// A completion covering fewer (or different) skills than requested still
/// succeeds with whatever parsed — the discrepancy is logged so prompting can
/// be tuned, never hidden and never auto-retried.
pub async fn synthesize_roadmap(
    llm: &LlmClient,
    skills: &[String],
) -> Result<Vec<RoadmapEntry>, AppError> {
    if skills.is_empty() {
        return Err(AppError::Validation(
            "skills list cannot be empty".to_string(),
        ));
    }

    let prompt = build_synthesis_prompt(skills);
    let completion = llm
        .complete(&prompt, ROADMAP_SYSTEM, TEMPERATURE_SYNTHESIS)
        .await?;

    debug!(
        "Roadmap completion prefix: {:?}",
        completion.chars().take(200).collect::<String>()
    );

    let items = extraction::parse_roadmap(&completion)?;
    Ok(assemble_entries(items, skills))
}

fn build_synthesis_prompt(skills: &[String]) -> String {
    ROADMAP_PROMPT_TEMPLATE
        .replace("{skills_list}", &skills.join(", "))
        .replace("{skill_count}", &skills.len().to_string())
}

/// Converts parsed items into final entries with derived search links.
///
/// Cardinality and skill-name drift are observed here and logged at `warn`;
/// entries are returned as parsed, with no renaming or fuzzy re-matching back
/// to the request.
fn assemble_entries(items: Vec<RawRoadmapItem>, requested: &[String]) -> Vec<RoadmapEntry> {
    if items.len() != requested.len() {
        warn!(
            "Expected {} roadmap entries but the model returned {} (requested: {:?}, received: {:?})",
            requested.len(),
            items.len(),
            requested,
            items.iter().map(|i| i.skill.as_str()).collect::<Vec<_>>()
        );
    }

    for item in &items {
        if !requested.iter().any(|r| normalize(r) == normalize(&item.skill)) {
            warn!(
                "Roadmap entry {:?} does not correspond to any requested skill",
                item.skill
            );
        }
    }

    items
        .into_iter()
        .map(|item| RoadmapEntry {
            skill: item.skill,
            steps: item.steps,
            youtube: item
                .youtube_keywords
                .iter()
                .map(|k| search_link(YOUTUBE_SEARCH_URL, k))
                .collect(),
            coursera: item
                .coursera_keywords
                .iter()
                .map(|k| search_link(COURSERA_SEARCH_URL, k))
                .collect(),
        })
        .collect()
}

fn search_link(base: &str, keyword: &str) -> String {
    format!("{base}{}", urlencoding::encode(keyword))
}
