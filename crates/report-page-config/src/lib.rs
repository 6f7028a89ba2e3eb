// crates/report-page-config/src/lib.rs
// ============================================================================
// Module: Report Page Config Library
// Description: Canonical config model, validation, and artifact generation.
// Purpose: Single source of truth for report-page.toml semantics.
// Dependencies: report-page-core, serde, toml
// ============================================================================

//! ## Overview
//! `report-page-config` defines the configuration read by the validator CLI:
//! unknown-field policy, pinned schema version, input limits, and audit
//! output. Loading is fail-closed; the crate also generates the config JSON
//! Schema and a canonical example for the contract bundle.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;
pub mod schema;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
pub use schema::config_schema;
