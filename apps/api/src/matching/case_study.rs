//! Attaches at most one case study to each lesson.
//!
//! Candidates must share an outcome id with the lesson. Among several, the one whose
//! difficulty sits closest to where the lesson falls in the module wins, so case studies
//! get harder as the module progresses. Ties go to the easier case study.
//!
//! A case study is used at most once per invocation. Cross-module reuse is only recorded
//! in the injected `UsageRegistry`.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::matching::labels::DifficultyRank;
use crate::matching::registry::UsageRegistry;
use crate::models::collateral::CaseStudyCollateral;
use crate::models::lesson::{CaseStudyActivity, LessonBlock};

pub const CASE_STUDY_ACTIVITY: &str = "case_study";

/// Difficulty a lesson at `position` (0-based) out of `total` should carry.
///
/// Spreads ranks 1..=4 linearly over the module; a single lesson expects rank 1.
pub fn expected_difficulty(position: usize, total: usize) -> DifficultyRank {
    let span = total.saturating_sub(1).max(1);
    let rank = (position * 3 / span).min(3) as u8 + 1;
    DifficultyRank::from_rank(rank)
}

/// Matches case studies to `lessons` in lesson order. Returns how many were attached.
pub fn match_case_studies<R>(
    lessons: &mut [LessonBlock],
    module_id: &str,
    case_studies: &[CaseStudyCollateral],
    registry: &mut R,
) -> usize
where
    R: UsageRegistry + ?Sized,
{
    let available: Vec<&CaseStudyCollateral> = case_studies
        .iter()
        .filter(|cs| cs.belongs_to(module_id))
        .collect();

    let total = lessons.len();
    let mut used: HashSet<&str> = HashSet::new();
    let mut attached = 0usize;

    for (position, lesson) in lessons.iter_mut().enumerate() {
        let outcome_ids: Vec<&str> = lesson.outcome_ids().collect();

        let mut pool: Vec<(&CaseStudyCollateral, DifficultyRank)> = available
            .iter()
            .copied()
            .filter(|cs| !used.contains(cs.id.as_str()))
            .filter(|cs| cs.outcome_tags.iter().any(|t| outcome_ids.contains(&t.as_str())))
            .map(|cs| (cs, DifficultyRank::from_label(cs.difficulty_label.as_deref())))
            .collect();

        let expected = expected_difficulty(position, total);

        let chosen = match pool.len() {
            0 => {
                debug!(
                    "No case study shares an outcome with lesson {}",
                    lesson.lesson_number
                );
                continue;
            }
            1 => pool[0],
            _ => {
                pool.sort_by_key(|(_, rank)| *rank);
                *pool
                    .iter()
                    .min_by_key(|(_, rank)| rank.rank().abs_diff(expected.rank()))
                    .unwrap_or(&pool[0])
            }
        };

        let (case_study, difficulty) = chosen;
        used.insert(case_study.id.as_str());
        let appearance = registry.record_use(&case_study.id, module_id);

        let linked_outcome_ids = outcome_ids
            .iter()
            .filter(|id| case_study.outcome_tags.iter().any(|t| t == *id))
            .map(|id| id.to_string())
            .collect();

        lesson.case_study_activity = Some(CaseStudyActivity {
            activity_type: CASE_STUDY_ACTIVITY.to_string(),
            case_study_id: case_study.id.clone(),
            title: case_study.title.clone(),
            linked_outcome_ids,
            difficulty,
            expected_difficulty: expected,
            role_play_suitable: case_study.is_role_play_suitable,
            appearance,
        });
        attached += 1;
    }

    info!(
        "Attached {attached} case studies across {total} lessons in module {module_id}"
    );
    attached
}
