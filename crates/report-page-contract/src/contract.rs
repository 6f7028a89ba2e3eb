// crates/report-page-contract/src/contract.rs
// ============================================================================
// Module: Contract Bundle Builder
// Description: Generates, writes, and verifies report page contract artifacts.
// Purpose: Keep published artifacts byte-identical to the Rust sources.
// Dependencies: report-page-config, report-page-core, cap-std, serde_jcs
// ============================================================================

//! ## Overview
//! [`ContractBuilder`] renders every artifact in memory, sorted by path, and
//! hashes each payload into `index.json`. Writing goes through a
//! capability-scoped directory handle that refuses to follow symlinks;
//! verification re-renders the bundle and fails on any byte difference,
//! missing file, or stray file.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::path::Path;
use std::path::PathBuf;

use report_page_config::config_schema;
use report_page_config::config_toml_example;
use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::HashDigest;
use report_page_core::UnknownFieldPolicy;
use serde::Serialize;

use crate::ContractError;
use crate::examples::full_report_example;
use crate::examples::my_report_example;
use crate::fixtures::test_cases;
use crate::schemas::latest_report_page_schema;
use crate::schemas::report_page_schema;
use crate::schemas::schema_path;
use crate::types::ContractArtifact;
use crate::types::ContractBundle;
use crate::types::ContractManifest;
use crate::types::ManifestArtifact;
use crate::typescript::render_typescript_declarations;

mod output;

use output::OutputRoot;

/// Manifest file name at the bundle root.
pub const MANIFEST_PATH: &str = "index.json";
/// Artifact path of the unpinned schema alias.
pub const LATEST_SCHEMA_PATH: &str = "schema/latest/report-page.schema.json";
/// Artifact path of the TypeScript declarations.
pub const TYPESCRIPT_PATH: &str = "types/report-page.d.ts";
/// Artifact path of the fixture bundle.
pub const FIXTURES_PATH: &str = "fixtures/test-cases.json";

// ============================================================================
// SECTION: Contract Builder
// ============================================================================

/// Builder for report page contract artifacts.
///
/// # Invariants
/// - Artifacts are deterministic and ordered by relative path.
/// - Artifact paths are relative and free of parent traversal.
#[derive(Debug, Clone)]
pub struct ContractBuilder {
    /// Output directory for generated artifacts.
    output_dir: PathBuf,
}

impl ContractBuilder {
    /// Creates a builder targeting `output_dir`.
    #[must_use]
    pub const fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
        }
    }

    /// Returns the default output directory for generated artifacts.
    #[must_use]
    pub fn default_output_dir() -> PathBuf {
        PathBuf::from("Docs/generated/report-page")
    }

    /// Returns the configured output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Builds the contract bundle without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when an artifact fails to serialize or two
    /// artifacts share a path.
    pub fn build(&self) -> Result<ContractBundle, ContractError> {
        let mut artifacts = vec![
            json_artifact(
                &schema_path(UnknownFieldPolicy::Permissive),
                &report_page_schema(UnknownFieldPolicy::Permissive),
            )?,
            json_artifact(
                &schema_path(UnknownFieldPolicy::Strict),
                &report_page_schema(UnknownFieldPolicy::Strict),
            )?,
            json_artifact(LATEST_SCHEMA_PATH, &latest_report_page_schema())?,
            text_artifact(
                TYPESCRIPT_PATH,
                render_typescript_declarations(),
                "application/typescript",
            ),
            json_artifact("examples/my-report.json", &my_report_example())?,
            json_artifact("examples/full-report.json", &full_report_example())?,
            json_artifact(FIXTURES_PATH, &test_cases())?,
            json_artifact("config/report-page-config.schema.json", &config_schema())?,
            text_artifact("config/report-page.toml", config_toml_example(), "application/toml"),
        ];
        artifacts.sort_by(|lhs, rhs| lhs.path.cmp(&rhs.path));
        ensure_unique_paths(&artifacts)?;
        let manifest = Self::manifest(&artifacts);
        Ok(ContractBundle {
            manifest,
            artifacts,
        })
    }

    /// Writes the bundle to the configured output directory.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when generation or writing fails.
    pub fn write(&self) -> Result<ContractManifest, ContractError> {
        self.write_to(&self.output_dir)
    }

    /// Writes the bundle under `output_dir`, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError`] when generation or writing fails.
    pub fn write_to(&self, output_dir: &Path) -> Result<ContractManifest, ContractError> {
        let bundle = self.build()?;
        let root = OutputRoot::open(output_dir, true)?;
        for artifact in &bundle.artifacts {
            root.write(&artifact.path, &artifact.bytes)?;
        }
        root.write(MANIFEST_PATH, &serialize_json_pretty(&bundle.manifest)?)?;
        Ok(bundle.manifest)
    }

    /// Checks the bundle on disk under `output_dir` for drift.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Generation`] naming the first drifted
    /// artifact, or a path error when the directory is unsafe.
    pub fn verify_output(&self, output_dir: &Path) -> Result<(), ContractError> {
        let bundle = self.build()?;
        let root = OutputRoot::open(output_dir, false)?;
        let mut expected = BTreeSet::new();
        for artifact in &bundle.artifacts {
            compare(&root, &artifact.path, &artifact.bytes)?;
            expected.insert(artifact.path.clone());
        }
        compare(&root, MANIFEST_PATH, &serialize_json_pretty(&bundle.manifest)?)?;
        expected.insert(MANIFEST_PATH.to_string());
        if let Some(stray) = root.list_files()?.into_iter().find(|path| !expected.contains(path)) {
            return Err(ContractError::Generation(format!("unexpected artifact: {stray}")));
        }
        Ok(())
    }

    /// Builds the manifest for sorted artifacts.
    fn manifest(artifacts: &[ContractArtifact]) -> ContractManifest {
        ContractManifest {
            schema_version: CURRENT_SCHEMA_VERSION.to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            artifacts: artifacts
                .iter()
                .map(|artifact| ManifestArtifact {
                    path: artifact.path.clone(),
                    content_type: artifact.content_type.clone(),
                    digest: HashDigest::of_bytes(&artifact.bytes),
                })
                .collect(),
        }
    }
}

impl Default for ContractBuilder {
    fn default() -> Self {
        Self::new(Self::default_output_dir())
    }
}

// ============================================================================
// SECTION: Artifact Helpers
// ============================================================================

/// Builds a JSON artifact with canonical key order and pretty layout.
fn json_artifact<T: Serialize>(path: &str, value: &T) -> Result<ContractArtifact, ContractError> {
    Ok(ContractArtifact {
        path: path.to_string(),
        content_type: String::from("application/json"),
        bytes: serialize_json_pretty(value)?,
    })
}

/// Builds a text artifact.
fn text_artifact(path: &str, content: String, content_type: &str) -> ContractArtifact {
    ContractArtifact {
        path: path.to_string(),
        content_type: content_type.to_string(),
        bytes: content.into_bytes(),
    }
}

/// Serializes through RFC 8785 first so key order is stable, then pretty
/// prints with a trailing newline.
fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<Vec<u8>, ContractError> {
    let canonical =
        serde_jcs::to_vec(value).map_err(|err| ContractError::Serialization(err.to_string()))?;
    let ordered: serde_json::Value = serde_json::from_slice(&canonical)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    let mut bytes = serde_json::to_vec_pretty(&ordered)
        .map_err(|err| ContractError::Serialization(err.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Rejects bundles where two artifacts share a path.
fn ensure_unique_paths(artifacts: &[ContractArtifact]) -> Result<(), ContractError> {
    let mut seen = BTreeSet::new();
    match artifacts.iter().find(|artifact| !seen.insert(artifact.path.as_str())) {
        Some(duplicate) => Err(ContractError::Generation(format!(
            "duplicate artifact path: {}",
            duplicate.path
        ))),
        None => Ok(()),
    }
}

/// Compares one on-disk artifact against the expected bytes.
fn compare(root: &OutputRoot, path: &str, expected: &[u8]) -> Result<(), ContractError> {
    let actual = root.read_exact_len(path, expected.len())?;
    if actual != expected {
        return Err(ContractError::Generation(format!("artifact mismatch: {path}")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
