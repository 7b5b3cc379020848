//! Module Planner: runs the full lesson pipeline for one module or a whole program.
//!
//! Flow: allocate durations → distribute outcomes → Bloom progression →
//!       match case studies → match formative checks → coverage report.
//!
//! Deterministic for identical inputs. Timestamps and run ids are added by the handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matching::{match_assessments, match_case_studies, CaseStudyRegistry, UsageRegistry};
use crate::models::collateral::{AssessmentItem, CaseStudyCollateral};
use crate::models::lesson::LessonBlock;
use crate::models::module::ModuleDescriptor;
use crate::planning::coverage::{compute_coverage_report, CoverageReport};
use crate::planning::duration::allocate_durations;
use crate::planning::outcomes::distribute_outcomes;
use crate::planning::progression::{apply_bloom_progression, verify_bloom_progression};

/// Lesson blocks before progression ordering, in allocation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonAllocation {
    pub lessons: Vec<LessonBlock>,
    pub dropped_outcome_ids: Vec<String>,
}

/// Everything the planner decided for one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePlan {
    pub module_id: String,
    pub title: Option<String>,
    pub total_minutes: u32,
    pub lessons: Vec<LessonBlock>,
    pub dropped_outcome_ids: Vec<String>,
    pub progression_verified: bool,
    pub coverage: CoverageReport,
}

/// Plans for several modules that shared one case-study registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramPlan {
    pub modules: Vec<ModulePlan>,
    /// Case-study id → module where it first appeared.
    pub case_study_first_appearances: BTreeMap<String, String>,
}

/// Allocates durations and outcomes for `module`. Lessons are numbered in allocation order.
pub fn build_lesson_blocks(module: &ModuleDescriptor) -> LessonAllocation {
    let durations = allocate_durations(module.contact_hours);
    let distribution = distribute_outcomes(durations.len(), &module.mlos);

    let lessons = durations
        .into_iter()
        .zip(distribution.assignments)
        .enumerate()
        .map(|(index, (duration, outcomes))| LessonBlock::new(index as u32 + 1, duration, outcomes))
        .collect();

    LessonAllocation {
        lessons,
        dropped_outcome_ids: distribution.dropped_outcome_ids,
    }
}

/// Plans one module end to end.
///
/// `case_studies` and `assessments` may hold items for other modules; each matcher filters
/// to `module.id`. `registry` records first appearances across calls.
pub fn plan_module<R>(
    module: &ModuleDescriptor,
    case_studies: &[CaseStudyCollateral],
    assessments: &[AssessmentItem],
    registry: &mut R,
) -> ModulePlan
where
    R: UsageRegistry + ?Sized,
{
    let LessonAllocation {
        mut lessons,
        dropped_outcome_ids,
    } = build_lesson_blocks(module);

    apply_bloom_progression(&mut lessons);
    let progression_verified = verify_bloom_progression(&lessons);

    match_case_studies(&mut lessons, &module.id, case_studies, registry);
    match_assessments(&mut lessons, &module.id, assessments);

    let coverage = compute_coverage_report(&module.mlos, &lessons, &dropped_outcome_ids);

    info!(
        "Planned module {}: {} lessons over {} minutes, coverage {:?}",
        module.id,
        lessons.len(),
        module.total_minutes(),
        coverage.status
    );

    ModulePlan {
        module_id: module.id.clone(),
        title: module.title.clone(),
        total_minutes: module.total_minutes(),
        lessons,
        dropped_outcome_ids,
        progression_verified,
        coverage,
    }
}

/// Plans `modules` in order with a fresh registry shared across them.
pub fn plan_program(
    modules: &[ModuleDescriptor],
    case_studies: &[CaseStudyCollateral],
    assessments: &[AssessmentItem],
) -> ProgramPlan {
    let mut registry = CaseStudyRegistry::new();

    let modules = modules
        .iter()
        .map(|module| plan_module(module, case_studies, assessments, &mut registry))
        .collect();

    ProgramPlan {
        modules,
        case_study_first_appearances: registry.first_appearances().clone(),
    }
}
