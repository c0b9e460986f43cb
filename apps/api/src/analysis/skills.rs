//! Skill normalization. Applied to both résumé-derived and JD-derived skills
//! before any comparison, so matching is case- and whitespace-insensitive.

/// Canonicalizes a skill string: trims surrounding whitespace and lowercases.
pub fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Splits a job description into normalized skill tokens.
/// Splits on comma, newline, or hyphen; empty tokens are discarded.
pub fn tokenize_job_description(text: &str) -> Vec<String> {
    text.split(['\n', ',', '-'])
        .map(normalize)
        .filter(|token| !token.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_trims() {
        assert_eq!(normalize("  Node.js "), "node.js");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["  React ", "RUST", "kubernetes", " C++\t", ""] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_tokenize_splits_on_comma_newline_and_hyphen() {
        let tokens = tokenize_job_description("React, Node.js\nDocker - Kubernetes");
        assert_eq!(tokens, vec!["react", "node.js", "docker", "kubernetes"]);
    }

    #[test]
    fn test_tokenize_discards_empty_tokens() {
        let tokens = tokenize_job_description(",,\n - ,rust");
        assert_eq!(tokens, vec!["rust"]);
    }

    #[test]
    fn test_tokenize_empty_input_is_empty() {
        assert!(tokenize_job_description("").is_empty());
        assert!(tokenize_job_description(" \n ").is_empty());
    }
}
