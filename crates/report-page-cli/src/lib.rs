// crates/report-page-cli/src/lib.rs
// ============================================================================
// Module: Report Page CLI Library
// Description: Shared helpers for the report-page command-line interface.
// Purpose: Expose the message catalog to the binary and its tests.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The `report-page` binary keeps every user-facing string in the
//! [`i18n`] catalog; this library exposes that catalog and the
//! [`t!`](crate::t) macro so integration tests can render the same messages
//! the binary prints.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod i18n;

#[cfg(test)]
mod tests;
