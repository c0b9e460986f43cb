//! Skill matching — overlap between JD skill tokens and résumé skills.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::AppError;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("job description produced no skill tokens")]
    EmptyJobSkillSet,
}

impl From<MatchError> for AppError {
    fn from(err: MatchError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Full match report returned to callers. All skill lists are normalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub match_score: u32, // 0 – 100
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub resume_skills: Vec<String>,
}

/// Scores JD skills against résumé skills. Both inputs must already be
/// normalized.
///
/// A JD skill counts as matched when it is a substring of at least one résumé
/// skill (asymmetric containment, not equality) — "react" matches a résumé
/// entry "react.js". This trades precision for recall against phrasing
/// variance in extracted text.
///
/// Fails with `EmptyJobSkillSet` when there are no JD skills: the score is
/// undefined, never 0/0.
pub fn score_match(
    job_skills: &[String],
    resume_skills: Vec<String>,
) -> Result<MatchReport, MatchError> {
    if job_skills.is_empty() {
        return Err(MatchError::EmptyJobSkillSet);
    }

    let matched_skills: Vec<String> = job_skills
        .iter()
        .filter(|skill| resume_skills.iter().any(|r| r.contains(skill.as_str())))
        .cloned()
        .collect();

    let missing_skills: Vec<String> = job_skills
        .iter()
        .filter(|skill| !matched_skills.contains(*skill))
        .cloned()
        .collect();

    let match_score =
        ((matched_skills.len() as f64 / job_skills.len() as f64) * 100.0).round() as u32;

    Ok(MatchReport {
        match_score,
        matched_skills,
        missing_skills,
        resume_skills,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::skills::normalize;

    fn normalized(skills: &[&str]) -> Vec<String> {
        skills.iter().map(|s| normalize(s)).collect()
    }

    #[test]
    fn test_react_node_example_scores_fifty() {
        let job = normalized(&["React", "Node.js"]);
        let resume = normalized(&["react", "express"]);

        let report = score_match(&job, resume).unwrap();
        assert_eq!(report.matched_skills, vec!["react"]);
        assert_eq!(report.missing_skills, vec!["node.js"]);
        assert_eq!(report.match_score, 50);
    }

    #[test]
    fn test_empty_job_skill_set_is_an_error() {
        let err = score_match(&[], vec!["rust".to_string()]).unwrap_err();
        assert!(matches!(err, MatchError::EmptyJobSkillSet));
    }

    #[test]
    fn test_substring_containment_matches_suffixed_resume_skill() {
        let job = normalized(&["react"]);
        let resume = normalized(&["React.js"]);

        let report = score_match(&job, resume).unwrap();
        assert_eq!(report.match_score, 100);
        assert!(report.missing_skills.is_empty());
    }

    #[test]
    fn test_containment_is_asymmetric() {
        // The résumé skill being a substring of the JD skill is NOT a match.
        let job = normalized(&["react.js"]);
        let resume = normalized(&["react"]);

        let report = score_match(&job, resume).unwrap();
        assert_eq!(report.match_score, 0);
        assert_eq!(report.missing_skills, vec!["react.js"]);
    }

    #[test]
    fn test_score_rounds_to_nearest_integer() {
        let job = normalized(&["a", "b", "c"]);
        let resume = normalized(&["a"]);

        // 1/3 → 33.33… → 33
        let report = score_match(&job, resume).unwrap();
        assert_eq!(report.match_score, 33);

        let job = normalized(&["a", "b", "c"]);
        let resume = normalized(&["a", "b"]);

        // 2/3 → 66.67 → 67
        let report = score_match(&job, resume).unwrap();
        assert_eq!(report.match_score, 67);
    }

    #[test]
    fn test_all_matched_scores_one_hundred() {
        let job = normalized(&["rust", "sql"]);
        let resume = normalized(&["Rust", "PostgreSQL and SQL"]);

        let report = score_match(&job, resume).unwrap();
        assert_eq!(report.match_score, 100);
        assert_eq!(report.matched_skills.len(), 2);
    }

    #[test]
    fn test_resume_skills_are_echoed_back() {
        let job = normalized(&["rust"]);
        let resume = normalized(&["rust", "docker"]);

        let report = score_match(&job, resume.clone()).unwrap();
        assert_eq!(report.resume_skills, resume);
    }
}
