//! Axum route handlers for the Planning API.

use std::collections::{BTreeMap, HashSet};

use axum::{extract::rejection::JsonRejection, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::CaseStudyRegistry;
use crate::models::collateral::{AssessmentItem, CaseStudyCollateral};
use crate::models::lesson::LessonBlock;
use crate::models::module::{ModuleDescriptor, MAX_CONTACT_HOURS};
use crate::planning::{plan_module, plan_program, ModulePlan};
use crate::planning::progression::verify_bloom_progression;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PlanModuleRequest {
    pub module: ModuleDescriptor,
    #[serde(default)]
    pub case_studies: Vec<CaseStudyCollateral>,
    #[serde(default)]
    pub assessments: Vec<AssessmentItem>,
}

#[derive(Debug, Deserialize)]
pub struct PlanProgramRequest {
    pub modules: Vec<ModuleDescriptor>,
    #[serde(default)]
    pub case_studies: Vec<CaseStudyCollateral>,
    #[serde(default)]
    pub assessments: Vec<AssessmentItem>,
}

#[derive(Debug, Serialize)]
pub struct PlanProgramResponse {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub modules: Vec<ModulePlan>,
    pub case_study_first_appearances: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyProgressionRequest {
    pub lessons: Vec<LessonBlock>,
}

#[derive(Debug, Serialize)]
pub struct VerifyProgressionResponse {
    pub verified: bool,
    pub lesson_count: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/modules/plan
///
/// Plans a single module: lesson durations, outcomes, order, case studies and checks.
pub async fn handle_plan_module(
    payload: Result<Json<PlanModuleRequest>, JsonRejection>,
) -> Result<Json<ModulePlan>, AppError> {
    let Json(request) = payload?;
    validate_module(&request.module)?;

    let plan = tokio::task::spawn_blocking(move || {
        let mut registry = CaseStudyRegistry::new();
        plan_module(
            &request.module,
            &request.case_studies,
            &request.assessments,
            &mut registry,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Planning task failed: {e}")))?;

    Ok(Json(plan))
}

/// POST /api/v1/programs/plan
///
/// Plans every module in request order with one shared case-study registry, so a case
/// study reused by a later module is framed as a continuation.
pub async fn handle_plan_program(
    payload: Result<Json<PlanProgramRequest>, JsonRejection>,
) -> Result<Json<PlanProgramResponse>, AppError> {
    let Json(request) = payload?;

    if request.modules.is_empty() {
        return Err(AppError::Validation("modules cannot be empty".to_string()));
    }
    let mut seen = HashSet::new();
    for module in &request.modules {
        validate_module(module)?;
        if !seen.insert(module.id.as_str()) {
            return Err(AppError::Validation(format!(
                "duplicate module id '{}'",
                module.id
            )));
        }
    }

    let run_id = Uuid::new_v4();
    info!(
        "Planning run {run_id}: {} modules, {} case studies, {} assessments",
        request.modules.len(),
        request.case_studies.len(),
        request.assessments.len()
    );

    let program = tokio::task::spawn_blocking(move || {
        plan_program(
            &request.modules,
            &request.case_studies,
            &request.assessments,
        )
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Planning task failed: {e}")))?;

    Ok(Json(PlanProgramResponse {
        run_id,
        generated_at: Utc::now(),
        modules: program.modules,
        case_study_first_appearances: program.case_study_first_appearances,
    }))
}

/// POST /api/v1/lessons/verify-progression
///
/// Checks that a client-edited lesson list still climbs in complexity.
pub async fn handle_verify_progression(
    payload: Result<Json<VerifyProgressionRequest>, JsonRejection>,
) -> Result<Json<VerifyProgressionResponse>, AppError> {
    let Json(request) = payload?;

    Ok(Json(VerifyProgressionResponse {
        verified: verify_bloom_progression(&request.lessons),
        lesson_count: request.lessons.len(),
    }))
}

fn validate_module(module: &ModuleDescriptor) -> Result<(), AppError> {
    if module.id.trim().is_empty() {
        return Err(AppError::Validation("module id cannot be empty".to_string()));
    }
    if !module.contact_hours.is_finite() || module.contact_hours <= 0.0 {
        return Err(AppError::Validation(format!(
            "contact_hours for module '{}' must be a positive number",
            module.id
        )));
    }
    if module.contact_hours > MAX_CONTACT_HOURS {
        return Err(AppError::Validation(format!(
            "contact_hours for module '{}' must not exceed {MAX_CONTACT_HOURS}",
            module.id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str, hours: f64) -> ModuleDescriptor {
        ModuleDescriptor {
            id: id.to_string(),
            title: None,
            contact_hours: hours,
            mlos: vec![],
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_hours() {
        assert!(validate_module(&descriptor("m1", 0.0)).is_err());
        assert!(validate_module(&descriptor("m1", -1.5)).is_err());
        assert!(validate_module(&descriptor("m1", f64::NAN)).is_err());
    }

    #[test]
    fn test_validate_rejects_blank_id() {
        assert!(matches!(
            validate_module(&descriptor("  ", 3.0)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_hours() {
        assert!(validate_module(&descriptor("m1", MAX_CONTACT_HOURS)).is_ok());
        assert!(matches!(
            validate_module(&descriptor("m1", 1.0e7)),
            Err(AppError::Validation(msg)) if msg.contains("must not exceed")
        ));
    }

    #[test]
    fn test_validate_accepts_fractional_hours() {
        assert!(validate_module(&descriptor("m1", 1.5)).is_ok());
    }
}
