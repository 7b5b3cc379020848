//! Remembers which module first used each case study.
//!
//! Bookkeeping only: matching never consults it. Callers inject it so a program run can
//! frame a reused case study as a continuation of an earlier module.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Whether a case study is being introduced or revisited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Appearance {
    FirstAppearance,
    Continuation { first_module_id: String },
}

/// Records case-study usage across matcher invocations.
pub trait UsageRegistry {
    /// Claims `case_study_id` for `module_id`. The first module to claim an id owns it.
    fn record_use(&mut self, case_study_id: &str, module_id: &str) -> Appearance;
}

/// In-memory registry for a single program run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseStudyRegistry {
    first_seen: BTreeMap<String, String>,
}

impl CaseStudyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-study id → module where it first appeared.
    pub fn first_appearances(&self) -> &BTreeMap<String, String> {
        &self.first_seen
    }
}

impl UsageRegistry for CaseStudyRegistry {
    fn record_use(&mut self, case_study_id: &str, module_id: &str) -> Appearance {
        let first_module_id = self
            .first_seen
            .entry(case_study_id.to_string())
            .or_insert_with(|| module_id.to_string());

        if first_module_id.as_str() == module_id {
            Appearance::FirstAppearance
        } else {
            Appearance::Continuation {
                first_module_id: first_module_id.clone(),
            }
        }
    }
}

/// Shared handle for callers that plan modules on several threads.
impl UsageRegistry for Arc<Mutex<CaseStudyRegistry>> {
    fn record_use(&mut self, case_study_id: &str, module_id: &str) -> Appearance {
        // Every write is a single insert, so a poisoned map is still consistent.
        let mut registry = self.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        registry.record_use(case_study_id, module_id)
    }
}
