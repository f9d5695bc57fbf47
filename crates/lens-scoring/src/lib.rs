//! # lens-scoring
//!
//! Scoring model integration for FounderLens.
//!
//! - [`ScoringModel`]: the narrow seam to the pretrained model
//! - [`ProcessModel`]: the model as a child process speaking JSON
//! - [`ScoreMapper`]: model output to the audit response contract
//! - [`AuditService`]: validation, harmonization, scoring and mapping in one
//!   call, with opaque failures

mod error;
mod mapper;
mod model;
mod service;

pub use error::{AuditError, ScoringError};
pub use mapper::{CHART_POINTS, ScoreMapper};
pub use model::{ProcessModel, ScoringModel};
pub use service::AuditService;
