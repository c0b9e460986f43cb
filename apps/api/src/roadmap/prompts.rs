// All LLM prompt constants for the Roadmap module.

/// System prompt for roadmap synthesis — enforces JSON-only output.
pub const ROADMAP_SYSTEM: &str =
    "You are an expert learning-path designer creating study roadmaps for \
    technical skills. \
    You MUST respond with a valid JSON array only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Roadmap synthesis prompt template.
/// Replace `{skills_list}` and `{skill_count}` before sending.
///
/// The cardinality is stated explicitly to bias the model toward covering
/// every skill; there is no mechanical guarantee it will, and the caller
/// checks the count after parsing.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r#"You must create a learning roadmap for EVERY skill listed below. Do not skip any skills.

Skills to create roadmaps for: {skills_list}

IMPORTANT: Generate one roadmap entry for EACH of the {skill_count} skills listed above.

Return ONLY a valid JSON array with NO additional text, explanation, or markdown formatting.

Required format (one object per skill):
[
  {
    "skill": "exact skill name from list",
    "steps": ["step 1", "step 2", "step 3"],
    "youtube_keywords": ["keyword 1", "keyword 2"],
    "coursera_keywords": ["keyword 1", "keyword 2"]
  }
]

Generate the JSON now:"#;
