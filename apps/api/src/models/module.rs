use serde::{Deserialize, Serialize};

use crate::models::outcome::Outcome;

/// The slice of a module design the planner needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub contact_hours: f64,
    #[serde(default, alias = "outcomes")]
    pub mlos: Vec<Outcome>,
}

/// Largest contact time a single module may declare.
pub const MAX_CONTACT_HOURS: f64 = 1_000.0;

impl ModuleDescriptor {
    /// Contact time in whole minutes. Hours outside `(0, MAX_CONTACT_HOURS]` yield zero,
    /// which plans as an empty module.
    pub fn total_minutes(&self) -> u32 {
        minutes_for_hours(self.contact_hours).unwrap_or(0)
    }
}

/// Converts contact hours to whole minutes, or `None` when the hours are non-finite,
/// non-positive, or above `MAX_CONTACT_HOURS`.
pub fn minutes_for_hours(contact_hours: f64) -> Option<u32> {
    if !contact_hours.is_finite() || contact_hours <= 0.0 || contact_hours > MAX_CONTACT_HOURS {
        return None;
    }
    u32::try_from((contact_hours * 60.0).round() as u64).ok()
}
