use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One row of the reference company dataset.
///
/// Looked up by `company_name`, case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct CompanyRecord {
    pub company_name: String,
    pub total_funding_usd: f64,
    pub funding_rounds: u32,
    /// Absent column or empty cell.
    pub founder_count: Option<u32>,
    pub founding_year: i32,
}

impl CompanyRecord {
    /// Founder count with the documented default of one founder.
    #[must_use]
    pub fn founders_or_default(&self) -> u32 {
        self.founder_count.unwrap_or(1)
    }
}
