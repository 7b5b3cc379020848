//! Picks up to three formative checks per lesson from the question bank.
//!
//! Items are scored by how many of the lesson's outcome ids they are tagged with; zero
//! scores never attach. Higher overlap wins, ties keep question-bank order.

use std::cmp::Reverse;

use tracing::info;

use crate::matching::labels::AssessmentKind;
use crate::models::collateral::AssessmentItem;
use crate::models::lesson::{FormativeCheck, LessonBlock};

pub const MAX_CHECKS_PER_LESSON: usize = 3;
pub const MIN_CHECK_MINUTES: i64 = 1;
pub const MAX_CHECK_MINUTES: i64 = 15;
/// Linked outcome used when a lesson somehow carries no outcomes.
pub const UNKNOWN_OUTCOME: &str = "unknown";

/// Attaches formative checks to every lesson. Returns the total number attached.
pub fn match_assessments(
    lessons: &mut [LessonBlock],
    module_id: &str,
    items: &[AssessmentItem],
) -> usize {
    let module_items: Vec<&AssessmentItem> =
        items.iter().filter(|a| a.module_id == module_id).collect();

    let mut attached = 0usize;

    for lesson in lessons.iter_mut() {
        let outcome_ids: Vec<&str> = lesson.outcome_ids().collect();

        let mut scored: Vec<(&AssessmentItem, usize)> = module_items
            .iter()
            .map(|item| (*item, overlap_score(&outcome_ids, item.tags())))
            .filter(|(_, score)| *score > 0)
            .collect();
        scored.sort_by_key(|(_, score)| Reverse(*score));
        scored.truncate(MAX_CHECKS_PER_LESSON);

        let checks: Vec<FormativeCheck> = scored
            .iter()
            .enumerate()
            .map(|(index, (item, _))| build_check(lesson.lesson_number, index, item, &outcome_ids))
            .collect();

        attached += checks.len();
        lesson.formative_checks = checks;
    }

    info!(
        "Attached {attached} formative checks across {} lessons in module {module_id}",
        lessons.len()
    );
    attached
}

/// Number of lesson outcome ids the item is tagged with.
pub fn overlap_score(outcome_ids: &[&str], tags: &[String]) -> usize {
    outcome_ids
        .iter()
        .filter(|id| tags.iter().any(|t| t == *id))
        .count()
}

fn build_check(
    lesson_number: u32,
    index: usize,
    item: &AssessmentItem,
    outcome_ids: &[&str],
) -> FormativeCheck {
    let kind = AssessmentKind::from_label(item.type_label.as_deref());
    let tags = item.tags();

    let linked_mlo = outcome_ids
        .iter()
        .find(|id| tags.iter().any(|t| t == *id))
        .or_else(|| outcome_ids.first())
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_OUTCOME.to_string());

    let (options, correct_answer) = if kind == AssessmentKind::Mcq {
        (
            (!item.options.is_empty()).then(|| item.options.clone()),
            item.correct_answer.clone(),
        )
    } else {
        (None, None)
    };

    FormativeCheck {
        check_id: format!("fc-{lesson_number}-{}", index + 1),
        kind,
        source_assessment_id: item.id.clone(),
        question: item.question.clone(),
        linked_mlo,
        duration: check_minutes(item, kind),
        options,
        correct_answer,
    }
}

/// Explicit minutes win; otherwise the kind's default nudged by question wording.
pub fn check_minutes(item: &AssessmentItem, kind: AssessmentKind) -> u32 {
    let minutes = match item.duration {
        Some(explicit) => explicit,
        None => {
            kind.default_minutes() + complexity_adjustment(item.question.as_deref().unwrap_or(""))
        }
    };
    minutes.clamp(MIN_CHECK_MINUTES, MAX_CHECK_MINUTES) as u32
}

/// +2 for judgement/design prompts, +1 for explanation/analysis, -1 for pure recall.
fn complexity_adjustment(text: &str) -> i64 {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .map(|word| match word {
            "evaluate" | "justify" | "critique" | "design" | "create" | "synthesize" | "defend"
            | "argue" => 2,
            "explain" | "compare" | "contrast" | "analyze" | "analyse" | "apply" | "scenario"
            | "why" => 1,
            "define" | "list" | "identify" | "name" | "recall" | "label" => -1,
            _ => 0,
        })
        .fold(0, |strongest, weight| {
            if priority(weight) > priority(strongest) {
                weight
            } else {
                strongest
            }
        })
}

/// Ordering among adjustments: 2 beats 1 beats -1 beats 0.
fn priority(weight: i64) -> u8 {
    match weight {
        2 => 3,
        1 => 2,
        -1 => 1,
        _ => 0,
    }
}
