use serde::{Deserialize, Serialize};

use crate::matching::labels::{AssessmentKind, DifficultyRank};
use crate::matching::registry::Appearance;
use crate::models::outcome::{BloomLevel, Outcome};

/// A time-bounded, outcome-bearing unit within a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonBlock {
    pub lesson_number: u32,
    /// Minutes.
    pub duration: u32,
    pub assigned_outcomes: Vec<Outcome>,
    /// Highest level among `assigned_outcomes`.
    pub complexity_level: BloomLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_study_activity: Option<CaseStudyActivity>,
    #[serde(default)]
    pub formative_checks: Vec<FormativeCheck>,
}

impl LessonBlock {
    pub fn new(lesson_number: u32, duration: u32, assigned_outcomes: Vec<Outcome>) -> Self {
        let complexity_level = assigned_outcomes
            .iter()
            .map(|o| o.complexity_level)
            .max()
            .unwrap_or_default();
        LessonBlock {
            lesson_number,
            duration,
            assigned_outcomes,
            complexity_level,
            case_study_activity: None,
            formative_checks: Vec::new(),
        }
    }

    pub fn outcome_ids(&self) -> impl Iterator<Item = &str> {
        self.assigned_outcomes.iter().map(|o| o.id.as_str())
    }
}

/// Case study attached to a lesson by the collateral matcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyActivity {
    pub activity_type: String,
    pub case_study_id: String,
    pub title: String,
    /// Lesson outcome ids that the case study is tagged with, in lesson order.
    pub linked_outcome_ids: Vec<String>,
    pub difficulty: DifficultyRank,
    pub expected_difficulty: DifficultyRank,
    pub role_play_suitable: bool,
    pub appearance: Appearance,
}

/// A short in-lesson assessment drawn from the question bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormativeCheck {
    pub check_id: String,
    #[serde(rename = "type")]
    pub kind: AssessmentKind,
    pub source_assessment_id: String,
    #[serde(default)]
    pub question: Option<String>,
    pub linked_mlo: String,
    /// Minutes, always within 1..=15.
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, level: BloomLevel) -> Outcome {
        Outcome {
            id: id.to_string(),
            statement: String::new(),
            complexity_level: level,
            linked_higher_outcomes: vec![],
            tag_links: vec![],
        }
    }

    #[test]
    fn test_block_level_is_highest_outcome_level() {
        let block = LessonBlock::new(
            1,
            90,
            vec![
                outcome("a", BloomLevel::Evaluate),
                outcome("b", BloomLevel::Apply),
            ],
        );
        assert_eq!(block.complexity_level, BloomLevel::Evaluate);
    }

    #[test]
    fn test_unannotated_block_omits_case_study_field() {
        let block = LessonBlock::new(1, 60, vec![outcome("a", BloomLevel::Apply)]);
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("case_study_activity").is_none());
        assert_eq!(value["formative_checks"], serde_json::json!([]));
        assert_eq!(value["complexity_level"], "apply");
    }
}
