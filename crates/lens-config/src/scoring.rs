//! Scoring model and response mapping configuration.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    30
}

fn default_recommendation() -> String {
    String::from(
        "Stress-test the highest-risk assumptions before committing further runway.",
    )
}

const fn default_chart_prefix() -> [i64; 5] {
    [10, 20, 35, 50, 45]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// Executable wrapping the pretrained model. Reads features JSON on
    /// stdin, writes `{"viability_score", "confidence"}` on stdout.
    #[serde(default)]
    pub model_command: String,

    #[serde(default)]
    pub model_args: Vec<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_recommendation")]
    pub recommendation: String,

    /// Fixed chart points preceding the derived score point.
    #[serde(default = "default_chart_prefix")]
    pub chart_prefix: [i64; 5],
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            model_command: String::new(),
            model_args: Vec::new(),
            timeout_secs: default_timeout_secs(),
            recommendation: default_recommendation(),
            chart_prefix: default_chart_prefix(),
        }
    }
}

impl ScoringConfig {
    /// A model command is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.model_command.trim().is_empty()
    }
}
