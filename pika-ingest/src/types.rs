use pika_core::AssignmentKind;
use serde::{Deserialize, Serialize};

/// One array item exactly as the LLM is asked to emit it.
///
/// Typing does the first pass of validation: `type` must be one of the three
/// kinds and the numeric fields must be JSON numbers. Range and emptiness
/// checks happen in `parsers::llm_json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLlmAssignment {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: AssignmentKind,

    pub weight: f64,

    #[serde(default)]
    pub score: Option<f64>,

    /// Free text; coerced to `YYYY-MM-DD` during normalisation.
    pub due_date: String,

    pub estimated_hours: f64,
}
