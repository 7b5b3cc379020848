// Collateral and formative-assessment matching.
// Both matchers annotate a finished, progression-ordered lesson list and are independent
// of each other. No I/O; the only shared state is the injected usage registry.

pub mod assessment;
pub mod case_study;
pub mod labels;
pub mod registry;

pub use assessment::match_assessments;
pub use case_study::match_case_studies;
pub use registry::{CaseStudyRegistry, UsageRegistry};
