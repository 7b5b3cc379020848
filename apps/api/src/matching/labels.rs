//! Free-form label normalization for collateral difficulty and assessment type.
//!
//! Labels are trimmed, lowercased, and have spaces/hyphens folded to underscores before
//! an exhaustive match. Anything unmapped falls through to an explicit default arm and is
//! logged at debug level.

use serde::{Deserialize, Serialize};
use tracing::debug;

fn normalize(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Case-study difficulty, 1 (foundational) through 4 (expert).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyRank {
    Foundational,
    Intermediate,
    Advanced,
    Expert,
}

impl DifficultyRank {
    pub fn rank(self) -> u8 {
        match self {
            DifficultyRank::Foundational => 1,
            DifficultyRank::Intermediate => 2,
            DifficultyRank::Advanced => 3,
            DifficultyRank::Expert => 4,
        }
    }

    /// Inverse of `rank`, saturating at both ends.
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 | 1 => DifficultyRank::Foundational,
            2 => DifficultyRank::Intermediate,
            3 => DifficultyRank::Advanced,
            _ => DifficultyRank::Expert,
        }
    }

    /// Missing or unrecognized labels rank as intermediate.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return DifficultyRank::Intermediate;
        };
        match normalize(label).as_str() {
            "foundational" | "foundation" | "basic" | "beginner" | "introductory" => {
                DifficultyRank::Foundational
            }
            "intermediate" | "moderate" | "medium" => DifficultyRank::Intermediate,
            "advanced" | "complex" | "hard" => DifficultyRank::Advanced,
            "expert" => DifficultyRank::Expert,
            other => {
                debug!("Unmapped difficulty label '{other}', ranking as intermediate");
                DifficultyRank::Intermediate
            }
        }
    }
}

/// Canonical formative-check kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Mcq,
    QuickPoll,
    DiscussionQuestion,
    Reflection,
}

impl AssessmentKind {
    /// Missing or unrecognized labels become `Mcq`.
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return AssessmentKind::Mcq;
        };
        match normalize(label).as_str() {
            "mcq" | "multiple_choice" | "multiplechoice" | "multiple_choice_question" | "quiz" => {
                AssessmentKind::Mcq
            }
            "quick_poll" | "quickpoll" | "poll" => AssessmentKind::QuickPoll,
            "discussion_question" | "discussion" | "open_ended" | "open_question" => {
                AssessmentKind::DiscussionQuestion
            }
            "reflection" | "reflective" | "self_assessment" | "self_reflection" => {
                AssessmentKind::Reflection
            }
            other => {
                debug!("Unmapped assessment type '{other}', treating as mcq");
                AssessmentKind::Mcq
            }
        }
    }

    /// Default minutes before keyword adjustment.
    pub fn default_minutes(self) -> i64 {
        match self {
            AssessmentKind::Mcq => 3,
            AssessmentKind::QuickPoll => 2,
            AssessmentKind::DiscussionQuestion => 8,
            AssessmentKind::Reflection => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_case_spaces_and_hyphens() {
        assert_eq!(normalize("  Multiple  Choice "), "multiple_choice");
        assert_eq!(normalize("open-ended"), "open_ended");
        assert_eq!(normalize("Self_Assessment"), "self_assessment");
    }

    #[test]
    fn test_difficulty_synonyms() {
        assert_eq!(DifficultyRank::from_label(Some("Basic")), DifficultyRank::Foundational);
        assert_eq!(DifficultyRank::from_label(Some("moderate")), DifficultyRank::Intermediate);
        assert_eq!(DifficultyRank::from_label(Some("COMPLEX")), DifficultyRank::Advanced);
        assert_eq!(DifficultyRank::from_label(Some(" expert ")), DifficultyRank::Expert);
    }

    #[test]
    fn test_difficulty_defaults_to_intermediate() {
        assert_eq!(DifficultyRank::from_label(None), DifficultyRank::Intermediate);
        assert_eq!(DifficultyRank::from_label(Some("spicy")), DifficultyRank::Intermediate);
    }

    #[test]
    fn test_difficulty_rank_round_trips_through_numbers() {
        for rank in 1..=4 {
            assert_eq!(DifficultyRank::from_rank(rank).rank(), rank);
        }
        assert_eq!(DifficultyRank::from_rank(9), DifficultyRank::Expert);
    }

    #[test]
    fn test_assessment_type_synonyms() {
        assert_eq!(AssessmentKind::from_label(Some("Multiple Choice")), AssessmentKind::Mcq);
        assert_eq!(AssessmentKind::from_label(Some("poll")), AssessmentKind::QuickPoll);
        assert_eq!(
            AssessmentKind::from_label(Some("open_ended")),
            AssessmentKind::DiscussionQuestion
        );
        assert_eq!(
            AssessmentKind::from_label(Some("self-assessment")),
            AssessmentKind::Reflection
        );
    }

    #[test]
    fn test_assessment_type_defaults_to_mcq() {
        assert_eq!(AssessmentKind::from_label(None), AssessmentKind::Mcq);
        assert_eq!(AssessmentKind::from_label(Some("interpretive dance")), AssessmentKind::Mcq);
    }

    #[test]
    fn test_default_minutes_per_kind() {
        assert_eq!(AssessmentKind::Mcq.default_minutes(), 3);
        assert_eq!(AssessmentKind::QuickPoll.default_minutes(), 2);
        assert_eq!(AssessmentKind::DiscussionQuestion.default_minutes(), 8);
        assert_eq!(AssessmentKind::Reflection.default_minutes(), 5);
    }
}
