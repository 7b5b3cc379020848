// Lesson-block planning engine.
// Implements: duration allocation, outcome distribution, Bloom progression, module/program
// orchestration, coverage reporting. Pure functions of their inputs; handlers are the only
// async surface.

pub mod coverage;
pub mod duration;
pub mod handlers;
pub mod outcomes;
pub mod planner;
pub mod progression;

pub use planner::{plan_module, plan_program, ModulePlan};
