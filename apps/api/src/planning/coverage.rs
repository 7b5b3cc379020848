use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::lesson::LessonBlock;
use crate::models::outcome::Outcome;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum CoverageStatus {
    /// Every outcome taught, every lesson has a case study and checks.
    Complete,
    /// Every outcome taught, some lessons lack collateral.
    Partial,
    /// At least one outcome is taught nowhere.
    Gapped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageReport {
    pub covered_outcome_ids: Vec<String>,
    pub uncovered_outcome_ids: Vec<String>,
    pub dropped_outcome_count: usize,
    pub lessons_without_case_study: Vec<u32>,
    pub lessons_without_checks: Vec<u32>,
    pub status: CoverageStatus,
    pub recommendations: Vec<String>,
}

pub fn compute_coverage_report(
    outcomes: &[Outcome],
    lessons: &[LessonBlock],
    dropped_outcome_ids: &[String],
) -> CoverageReport {
    let (covered_outcome_ids, uncovered_outcome_ids): (Vec<String>, Vec<String>) = outcomes
        .iter()
        .map(|o| o.id.clone())
        .partition(|id| lessons.iter().any(|l| l.outcome_ids().any(|a| a == id)));

    let lessons_without_case_study: Vec<u32> = lessons
        .iter()
        .filter(|l| l.case_study_activity.is_none())
        .map(|l| l.lesson_number)
        .collect();

    let lessons_without_checks: Vec<u32> = lessons
        .iter()
        .filter(|l| l.formative_checks.is_empty())
        .map(|l| l.lesson_number)
        .collect();

    let status = if !uncovered_outcome_ids.is_empty() {
        CoverageStatus::Gapped
    } else if lessons_without_case_study.is_empty() && lessons_without_checks.is_empty() {
        CoverageStatus::Complete
    } else {
        CoverageStatus::Partial
    };

    let mut recommendations = Vec::new();
    if outcomes.is_empty() {
        recommendations.push(
            "Module has no learning outcomes; lessons carry a placeholder outcome".to_string(),
        );
    }
    if !uncovered_outcome_ids.is_empty() {
        warn!(
            "{} outcomes not taught in any lesson: {}",
            uncovered_outcome_ids.len(),
            uncovered_outcome_ids.join(", ")
        );
        recommendations.push(format!(
            "{} outcomes exceed lesson capacity ({}); add contact hours or merge outcomes",
            uncovered_outcome_ids.len(),
            uncovered_outcome_ids.join(", ")
        ));
    }
    if !lessons_without_case_study.is_empty() {
        recommendations.push(format!(
            "{} lessons have no matching case study; tag case studies with these lessons' outcomes",
            lessons_without_case_study.len()
        ));
    }
    if !lessons_without_checks.is_empty() {
        recommendations.push(format!(
            "{} lessons have no formative checks; add question-bank items for their outcomes",
            lessons_without_checks.len()
        ));
    }

    CoverageReport {
        covered_outcome_ids,
        uncovered_outcome_ids,
        dropped_outcome_count: dropped_outcome_ids.len(),
        lessons_without_case_study,
        lessons_without_checks,
        status,
        recommendations,
    }
}
