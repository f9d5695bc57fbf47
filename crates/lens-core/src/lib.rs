//! # lens-core
//!
//! Core types and error types for FounderLens.
//!
//! This crate provides the foundational types shared across all FounderLens crates:
//! - Signal archive entries and the domains they are partitioned by
//! - Reference dataset rows (`CompanyRecord`)
//! - The inbound audit contract and its validated form
//! - Feature vectors for both harmonization paths
//! - Opaque scoring model output
//! - Cross-cutting error types

pub mod audit;
pub mod company;
pub mod errors;
pub mod features;
pub mod scoring;
pub mod signal;

pub use audit::{AuditInput, AuditRequest, AuditResponse};
pub use company::CompanyRecord;
pub use errors::CoreError;
pub use features::{CompanyFeatures, FeatureVector, InputFeatures};
pub use scoring::ModelOutput;
pub use signal::{Metadata, SignalDomain, SignalEntry};
