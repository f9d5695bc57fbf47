use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Raw output of the external scoring model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ModelOutput {
    /// Scale is defined by the model.
    pub viability_score: f64,
    /// Risk label, e.g. `Low`, `Medium`, `High`.
    pub confidence: String,
}
