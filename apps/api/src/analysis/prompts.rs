// All LLM prompt constants for the Analysis module.

/// System prompt for skill extraction — enforces JSON-only output.
pub const SKILL_EXTRACT_SYSTEM: &str =
    "You are an expert technical recruiter analyzing resumes. \
    Extract skill keywords exactly as they appear — do not infer skills that \
    are not stated. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Skill extraction prompt template. Replace `{resume_text}` before sending.
pub const SKILL_EXTRACT_PROMPT_TEMPLATE: &str = r#"Extract ONLY hard skill keywords from the resume below.

Return a JSON object with this EXACT schema (no extra fields):
{"skills": ["skill 1", "skill 2"]}

Rules:
- Include programming languages, frameworks, tools, databases, and platforms.
- Do NOT include soft skills, job titles, or company names.
- Do NOT invent skills that are not present in the resume.

RESUME:
{resume_text}"#;
