// crates/report-page-core/src/lib.rs
// ============================================================================
// Module: Report Page Core Library
// Description: Public API surface for the report page contract model.
// Purpose: Expose the typed document model, version policy, and hashing.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Report page core holds the canonical in-memory representation of the
//! report page contract: pages, rows, visuals, queries, and verify blocks. It
//! also owns the schema version policy, the deprecation registry, and the
//! canonical hashing used for manifests and audit digests.
//!
//! The types here deserialize leniently (unknown fields are ignored); the
//! strict classification of raw JSON lives in `report-page-validator`.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;
