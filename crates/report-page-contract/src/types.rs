// crates/report-page-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Shared data models for report page contract artifacts.
// Purpose: Canonical shapes for the manifest, bundles, and fixture cases.
// Dependencies: report-page-core, serde, serde_json
// ============================================================================

//! ## Overview
//! Typed shapes serialized into the generated artifacts under
//! `Docs/generated/report-page`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use report_page_core::HashDigest;
use report_page_core::UnknownFieldPolicy;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Manifest Types
// ============================================================================

/// Manifest describing the generated contract artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractManifest {
    /// Contract schema version the artifacts describe.
    pub schema_version: String,
    /// Generator version (matches the crate version).
    pub generator_version: String,
    /// Artifacts included in the bundle, ordered by path.
    pub artifacts: Vec<ManifestArtifact>,
}

/// Manifest entry describing a single artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestArtifact {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// Artifact content type.
    pub content_type: String,
    /// `sha256:<hex>` digest of the artifact payload.
    pub digest: HashDigest,
}

// ============================================================================
// SECTION: Bundle Types
// ============================================================================

/// Generated contract bundle with artifacts and manifest metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractBundle {
    /// Manifest describing the artifacts.
    pub manifest: ContractManifest,
    /// Artifact payloads included in the bundle.
    pub artifacts: Vec<ContractArtifact>,
}

impl ContractBundle {
    /// Returns the artifact at `path`, if present.
    #[must_use]
    pub fn artifact(&self, path: &str) -> Option<&ContractArtifact> {
        self.artifacts.iter().find(|artifact| artifact.path == path)
    }
}

/// Artifact payload with content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    /// Relative artifact path under the output directory.
    pub path: String,
    /// MIME content type for the artifact.
    pub content_type: String,
    /// Serialized artifact payload bytes.
    pub bytes: Vec<u8>,
}

// ============================================================================
// SECTION: Fixture Types
// ============================================================================

/// One input document with its expected classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Stable case name.
    pub name: String,
    /// What the case exercises.
    pub description: String,
    /// Unknown-field policy the case is evaluated under.
    pub unknown_fields: UnknownFieldPolicy,
    /// Whether the published JSON Schema alone reaches the same verdict.
    pub schema_expressible: bool,
    /// Candidate document.
    pub document: Value,
    /// Expected result.
    pub expected: ExpectedOutcome,
}

/// Expected validator output for a fixture case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedOutcome {
    /// Whether the document is a legal report page.
    pub valid: bool,
    /// Sorted, distinct JSON Pointers of every violation.
    pub violation_paths: Vec<String>,
    /// Sorted warning kinds.
    pub warning_kinds: Vec<String>,
}
