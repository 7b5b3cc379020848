use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Externally authored case study that can be attached to a lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseStudyCollateral {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Free-form ("Basic", "moderate", "Expert"...). Ranked by `DifficultyRank`.
    #[serde(default)]
    pub difficulty_label: Option<String>,
    #[serde(default)]
    pub outcome_tags: Vec<String>,
    /// Passed through for the content generator; plays no part in matching.
    #[serde(default)]
    pub is_role_play_suitable: bool,
    /// Modules this case study belongs to. Empty means unscoped.
    #[serde(default)]
    pub module_ids: Vec<String>,
}

impl CaseStudyCollateral {
    pub fn belongs_to(&self, module_id: &str) -> bool {
        self.module_ids.is_empty() || self.module_ids.iter().any(|m| m == module_id)
    }
}

/// A formative-assessment item from the external question bank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub module_id: String,
    #[serde(default)]
    pub outcome_tags: Vec<String>,
    /// Older question banks tag items under this name instead.
    #[serde(default)]
    pub linked_mlos: Vec<String>,
    #[serde(default, alias = "type", alias = "assessment_type")]
    pub type_label: Option<String>,
    /// Explicit duration in minutes; numeric strings are accepted, junk is ignored.
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration: Option<i64>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_answer: Option<String>,
}

impl AssessmentItem {
    /// Outcome ids this item is tagged with, whichever field carried them.
    pub fn tags(&self) -> &[String] {
        if self.outcome_tags.is_empty() {
            &self.linked_mlos
        } else {
            &self.outcome_tags
        }
    }
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|minutes| minutes.is_finite())
        .map(|minutes| minutes.round() as i64))
}
