// crates/report-page-contract/src/lib.rs
// ============================================================================
// Module: Report Page Contract Library
// Description: Canonical contract artifacts and generators for report pages.
// Purpose: Single source of truth for the published schema, types, and samples.
// Dependencies: report-page-config, report-page-core, serde, thiserror
// ============================================================================

//! ## Overview
//! The contract library renders everything a consumer of report pages needs
//! without linking Rust: the JSON Schema (pinned to the major version, with a
//! strict variant and a `latest` alias), TypeScript declarations, canonical
//! example documents, and the fixture bundle of expected verdicts. The
//! [`ContractBuilder`] writes these artifacts deterministically and verifies
//! on-disk copies for drift.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod contract;
pub mod examples;
pub mod fixtures;
pub mod schemas;
pub mod types;
pub mod typescript;

// ============================================================================
// SECTION: Errors
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when generating contract artifacts.
///
/// # Invariants
/// - [`ContractError::OutputPath`] always includes the offending path.
#[derive(Debug, Error)]
pub enum ContractError {
    /// IO failure while writing artifacts.
    #[error("io error: {0}")]
    Io(String),
    /// Serialization failure while rendering artifacts.
    #[error("serialization error: {0}")]
    Serialization(String),
    /// Contract generation or verification failed.
    #[error("contract generation error: {0}")]
    Generation(String),
    /// Output path invalid or inaccessible.
    #[error("invalid output path: {0}")]
    OutputPath(PathBuf),
}

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use contract::ContractBuilder;
pub use fixtures::test_cases;
pub use schemas::latest_report_page_schema;
pub use schemas::report_page_schema;
pub use types::ContractArtifact;
pub use types::ContractBundle;
pub use types::ContractManifest;
pub use types::ExpectedOutcome;
pub use types::ManifestArtifact;
pub use types::TestCase;
