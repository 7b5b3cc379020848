use serde::{Deserialize, Serialize};

/// Cognitive-complexity level of a learning outcome, lowest first.
///
/// Deserializes leniently from free-form labels: anything unrecognized
/// ranks as `Remember`, the lowest level.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum BloomLevel {
    #[default]
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    /// Numeric rank, 1 (remember) through 6 (create).
    pub fn rank(self) -> u8 {
        match self {
            BloomLevel::Remember => 1,
            BloomLevel::Understand => 2,
            BloomLevel::Apply => 3,
            BloomLevel::Analyze => 4,
            BloomLevel::Evaluate => 5,
            BloomLevel::Create => 6,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "remember" | "recall" | "knowledge" => BloomLevel::Remember,
            "understand" | "comprehension" | "comprehend" => BloomLevel::Understand,
            "apply" | "application" => BloomLevel::Apply,
            "analyze" | "analyse" | "analysis" => BloomLevel::Analyze,
            "evaluate" | "evaluation" => BloomLevel::Evaluate,
            "create" | "synthesis" | "synthesize" => BloomLevel::Create,
            other => {
                tracing::debug!("Unmapped complexity label '{other}', ranking as remember");
                BloomLevel::Remember
            }
        }
    }
}

impl From<String> for BloomLevel {
    fn from(label: String) -> Self {
        BloomLevel::from_label(&label)
    }
}

/// A module-level learning outcome (MLO). Authored upstream; read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub id: String,
    #[serde(default)]
    pub statement: String,
    #[serde(default)]
    pub complexity_level: BloomLevel,
    #[serde(default)]
    pub linked_higher_outcomes: Vec<String>,
    #[serde(default)]
    pub tag_links: Vec<String>,
}

/// Id of the outcome synthesized when a module arrives without any.
pub const PLACEHOLDER_OUTCOME_ID: &str = "default-outcome";

impl Outcome {
    /// Stand-in outcome used to keep every block outcome-bearing.
    pub fn placeholder() -> Self {
        Outcome {
            id: PLACEHOLDER_OUTCOME_ID.to_string(),
            statement: "Understand key concepts".to_string(),
            complexity_level: BloomLevel::Understand,
            linked_higher_outcomes: Vec::new(),
            tag_links: Vec::new(),
        }
    }
}
