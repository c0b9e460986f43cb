//! Completion decoding — turns free-form model output into validated payloads.
//!
//! The model has full control over formatting: completions arrive wrapped in
//! markdown fences, preceded by chatty preambles, or followed by commentary.
//! Decoding is two-phase: cheap textual cleanup first, then location of the
//! smallest plausible JSON fragment for the expected shape, a strict decode,
//! and field-by-field shape validation. There is no best-effort mode — a
//! completion without a valid payload is a typed failure, never a partially
//! filled structure.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// How much of the raw completion is kept inside error values for diagnostics.
const DIAGNOSTIC_PREFIX_CHARS: usize = 200;

static FENCE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json\s*").expect("static regex must compile"));
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```\s*").expect("static regex must compile"));

/// Smallest object carrying a `skills` array. Non-greedy so trailing prose
/// after the payload is ignored.
static SKILLS_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\s*"skills"\s*:\s*\[[\s\S]*?\]\s*\}"#).expect("static regex must compile")
});

/// Smallest array of objects. Non-greedy up to the first `}]`, which for a
/// flat array of objects is the closing bracket of the array itself.
static ROADMAP_ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\s*\{[\s\S]*?\}\s*\]").expect("static regex must compile"));

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("no JSON payload found in completion (prefix: {prefix:?})")]
    NoPayloadFound { prefix: String },

    #[error("malformed JSON in completion: {reason} (fragment: {fragment:?})")]
    MalformedJson { fragment: String, reason: String },

    #[error("completion JSON does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

/// Skills extracted from a résumé-analysis completion.
///
/// A successful parse always carries at least one skill — an empty `skills`
/// array is a shape violation, not an empty result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedSkills {
    pub skills: Vec<String>,
}

/// One roadmap object as the model returns it. The keyword lists are turned
/// into search links downstream; they are not URLs here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRoadmapItem {
    pub skill: String,
    pub steps: Vec<String>,
    pub youtube_keywords: Vec<String>,
    pub coursera_keywords: Vec<String>,
}

/// Parses a skill-extraction completion into `ExtractedSkills`.
pub fn parse_skills(raw: &str) -> Result<ExtractedSkills, ExtractionError> {
    let cleaned = strip_code_fences(raw);
    let fragment = locate_payload(&cleaned, &SKILLS_OBJECT_RE, raw)?;
    let value = decode_fragment(fragment)?;

    let skills = string_array(&value, "skills")?;
    if skills.is_empty() {
        return Err(ExtractionError::SchemaMismatch(
            "'skills' array is empty".to_string(),
        ));
    }

    Ok(ExtractedSkills { skills })
}

/// Parses a roadmap-synthesis completion into a list of `RawRoadmapItem`s.
pub fn parse_roadmap(raw: &str) -> Result<Vec<RawRoadmapItem>, ExtractionError> {
    let cleaned = strip_code_fences(raw);
    let fragment = locate_payload(&cleaned, &ROADMAP_ARRAY_RE, raw)?;
    let value = decode_fragment(fragment)?;

    let items = value.as_array().ok_or_else(|| {
        ExtractionError::SchemaMismatch("top-level payload is not an array".to_string())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let skill = item
                .get("skill")
                .and_then(|v| v.as_str())
                .ok_or_else(|| {
                    ExtractionError::SchemaMismatch(format!("entry {i}: 'skill' is not a string"))
                })?
                .to_string();
            Ok(RawRoadmapItem {
                skill,
                steps: string_array(item, "steps")
                    .map_err(|e| prefix_entry_error(i, e))?,
                youtube_keywords: string_array(item, "youtube_keywords")
                    .map_err(|e| prefix_entry_error(i, e))?,
                coursera_keywords: string_array(item, "coursera_keywords")
                    .map_err(|e| prefix_entry_error(i, e))?,
            })
        })
        .collect()
}

/// Strips ```json and ``` fence markers anywhere in the completion.
/// Textual cleanup only — no JSON awareness.
fn strip_code_fences(raw: &str) -> String {
    let without_open = FENCE_OPEN_RE.replace_all(raw, "");
    FENCE_RE.replace_all(&without_open, "").into_owned()
}

/// Locates the payload fragment in the cleaned text, or fails with a prefix
/// of the original completion for diagnostics.
fn locate_payload<'a>(
    cleaned: &'a str,
    pattern: &Regex,
    raw: &str,
) -> Result<&'a str, ExtractionError> {
    pattern
        .find(cleaned)
        .map(|m| m.as_str())
        .ok_or_else(|| ExtractionError::NoPayloadFound {
            prefix: completion_prefix(raw),
        })
}

/// Strict JSON decode of a located fragment. The offending fragment is kept
/// in the error — never silently swallowed.
fn decode_fragment(fragment: &str) -> Result<serde_json::Value, ExtractionError> {
    serde_json::from_str(fragment).map_err(|e| ExtractionError::MalformedJson {
        fragment: fragment.to_string(),
        reason: e.to_string(),
    })
}

/// Reads `field` as an array of strings, naming the field on mismatch.
fn string_array(value: &serde_json::Value, field: &str) -> Result<Vec<String>, ExtractionError> {
    let items = value
        .get(field)
        .and_then(|v| v.as_array())
        .ok_or_else(|| {
            ExtractionError::SchemaMismatch(format!("'{field}' is missing or not an array"))
        })?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(String::from).ok_or_else(|| {
                ExtractionError::SchemaMismatch(format!("'{field}' contains a non-string element"))
            })
        })
        .collect()
}

fn prefix_entry_error(index: usize, err: ExtractionError) -> ExtractionError {
    match err {
        ExtractionError::SchemaMismatch(msg) => {
            ExtractionError::SchemaMismatch(format!("entry {index}: {msg}"))
        }
        other => other,
    }
}

fn completion_prefix(raw: &str) -> String {
    raw.chars().take(DIAGNOSTIC_PREFIX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_skills_object() {
        let extracted = parse_skills(r#"{"skills": ["rust", "sql"]}"#).unwrap();
        assert_eq!(extracted.skills, vec!["rust", "sql"]);
    }

    #[test]
    fn test_parses_skills_wrapped_in_fences_and_prose() {
        let raw = "Sure! Here are the skills I found:\n```json\n{\"skills\": [\"react\", \"node.js\"]}\n```\nLet me know if you need anything else.";
        let extracted = parse_skills(raw).unwrap();
        assert_eq!(extracted.skills, vec!["react", "node.js"]);
    }

    #[test]
    fn test_skills_round_trip_through_noise() {
        let payload = ExtractedSkills {
            skills: vec!["python".to_string(), "docker".to_string()],
        };
        let encoded = serde_json::to_string(&payload).unwrap();
        let noisy = format!("Preamble text.\n```\n{encoded}\n```\nTrailing commentary.");
        let recovered = parse_skills(&noisy).unwrap();
        assert_eq!(recovered.skills, payload.skills);
    }

    #[test]
    fn test_missing_payload_is_no_payload_found() {
        let err = parse_skills("I could not find any skills in this resume.").unwrap_err();
        match err {
            ExtractionError::NoPayloadFound { prefix } => {
                assert!(prefix.starts_with("I could not"));
            }
            other => panic!("expected NoPayloadFound, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_keeps_fragment() {
        // Located by the pattern but not strictly decodable: trailing comma.
        let raw = r#"{"skills": ["rust",]}"#;
        let err = parse_skills(raw).unwrap_err();
        match err {
            ExtractionError::MalformedJson { fragment, .. } => {
                assert!(fragment.contains("rust"));
            }
            other => panic!("expected MalformedJson, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_skill_is_schema_mismatch() {
        let err = parse_skills(r#"{"skills": ["rust", 42]}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::SchemaMismatch(_)));
    }

    #[test]
    fn test_empty_skills_array_is_schema_mismatch() {
        let err = parse_skills(r#"{"skills": []}"#).unwrap_err();
        assert!(matches!(err, ExtractionError::SchemaMismatch(_)));
    }

    #[test]
    fn test_parses_roadmap_array_with_trailing_commentary() {
        let raw = r#"Here is your roadmap:
[
  {
    "skill": "go",
    "steps": ["Install the toolchain", "Write a CLI"],
    "youtube_keywords": ["go tutorial"],
    "coursera_keywords": ["golang course"]
  },
  {
    "skill": "rust",
    "steps": ["Read the book"],
    "youtube_keywords": ["rust tutorial"],
    "coursera_keywords": ["rust course"]
  }
]
Hope this helps!"#;
        let items = parse_roadmap(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].skill, "go");
        assert_eq!(items[1].steps, vec!["Read the book"]);
    }

    #[test]
    fn test_roadmap_entry_missing_steps_is_schema_mismatch() {
        let raw = r#"[{"skill": "go", "youtube_keywords": [], "coursera_keywords": []}]"#;
        let err = parse_roadmap(raw).unwrap_err();
        match err {
            ExtractionError::SchemaMismatch(msg) => {
                assert!(msg.contains("steps"), "message was: {msg}");
            }
            other => panic!("expected SchemaMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_roadmap_entry_without_skill_is_schema_mismatch() {
        let raw = r#"[{"steps": ["a"], "youtube_keywords": [], "coursera_keywords": []}]"#;
        let err = parse_roadmap(raw).unwrap_err();
        assert!(matches!(err, ExtractionError::SchemaMismatch(_)));
    }

    #[test]
    fn test_roadmap_without_array_is_no_payload_found() {
        let err = parse_roadmap("no roadmap today").unwrap_err();
        assert!(matches!(err, ExtractionError::NoPayloadFound { .. }));
    }

    #[test]
    fn test_fence_stripping_is_textual_only() {
        assert_eq!(
            strip_code_fences("```json\n{\"a\": 1}\n```"),
            "{\"a\": 1}\n"
        );
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }
}
