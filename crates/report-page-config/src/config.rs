// crates/report-page-config/src/config.rs
// ============================================================================
// Module: Report Page Configuration
// Description: Configuration loading and validation for the report page tools.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: report-page-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then `REPORT_PAGE_CONFIG`, then
//! `./report-page.toml`. Only the implicit default path may be absent, in
//! which case built-in defaults apply. Every loaded config is validated
//! before use; invalid values fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use report_page_core::CURRENT_SCHEMA_VERSION;
use report_page_core::SchemaVersion;
use report_page_core::UnknownFieldPolicy;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "report-page.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "REPORT_PAGE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Smallest accepted `max_violations`.
pub(crate) const MIN_MAX_VIOLATIONS: usize = 1;
/// Largest accepted `max_violations`.
pub(crate) const MAX_MAX_VIOLATIONS: usize = 100_000;
/// Smallest accepted `max_document_bytes`.
pub(crate) const MIN_DOCUMENT_BYTES: usize = 1024;
/// Largest accepted `max_document_bytes`.
pub(crate) const MAX_DOCUMENT_BYTES: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Root configuration for the report page tools.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportPageConfig {
    /// Document validation settings.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Input handling limits.
    #[serde(default)]
    pub input: InputConfig,
    /// Audit output settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// File the config was read from, when any (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl ReportPageConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path, env::var(CONFIG_ENV_VAR).ok())?;
        validate_path(resolved.path())?;
        if let ResolvedPath::Default(default_path) = &resolved
            && !default_path.exists()
        {
            return Ok(Self::default());
        }
        let resolved = resolved.into_path();
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::parse(content)?;
        config.source_path = Some(resolved);
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validation.validate()?;
        self.input.validate()?;
        self.audit.validate()
    }
}

/// Document validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Treatment of undeclared document members.
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
    /// Contract version the validator is pinned to.
    #[serde(default = "default_supported_version")]
    pub supported_version: SchemaVersion,
    /// Warn about SQL placeholders that no parameter declares.
    #[serde(default = "default_check_sql_parameters")]
    pub check_sql_parameters: bool,
    /// Cap on reported violations per document.
    #[serde(default = "default_max_violations")]
    pub max_violations: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::default(),
            supported_version: default_supported_version(),
            check_sql_parameters: default_check_sql_parameters(),
            max_violations: default_max_violations(),
        }
    }
}

impl ValidationConfig {
    /// Validates validation settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.supported_version.major != CURRENT_SCHEMA_VERSION.major {
            return Err(ConfigError::Invalid(format!(
                "validation.supported_version must be a {}.x version",
                CURRENT_SCHEMA_VERSION.major
            )));
        }
        if !(MIN_MAX_VIOLATIONS ..= MAX_MAX_VIOLATIONS).contains(&self.max_violations) {
            return Err(ConfigError::Invalid(format!(
                "validation.max_violations must be between {MIN_MAX_VIOLATIONS} and \
                 {MAX_MAX_VIOLATIONS}"
            )));
        }
        Ok(())
    }
}

/// Input handling limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Largest document accepted, in bytes.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

impl InputConfig {
    /// Validates input limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_DOCUMENT_BYTES ..= MAX_DOCUMENT_BYTES).contains(&self.max_document_bytes) {
            return Err(ConfigError::Invalid(format!(
                "input.max_document_bytes must be between {MIN_DOCUMENT_BYTES} and \
                 {MAX_DOCUMENT_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Audit output settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Emit one audit event per validated document.
    #[serde(default)]
    pub enabled: bool,
    /// Audit destination.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// JSON-lines file path (required for the file sink).
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        if self.sink == AuditSinkKind::File && self.path.is_none() {
            return Err(ConfigError::Invalid(
                "audit.path is required when audit.sink = \"file\"".to_string(),
            ));
        }
        Ok(())
    }
}

/// Audit destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `audit.path`.
    File,
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Default pinned schema version.
pub(crate) const fn default_supported_version() -> SchemaVersion {
    CURRENT_SCHEMA_VERSION
}

/// SQL placeholder checks are on by default.
pub(crate) const fn default_check_sql_parameters() -> bool {
    true
}

/// Default cap on reported violations.
pub(crate) const fn default_max_violations() -> usize {
    1000
}

/// Default document size limit (4 MiB).
pub(crate) const fn default_max_document_bytes() -> usize {
    4 * 1024 * 1024
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Config path together with how it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolvedPath {
    /// Passed by the caller or the environment; must exist.
    Explicit(PathBuf),
    /// Implicit default; may be absent.
    Default(PathBuf),
}

impl ResolvedPath {
    /// Returns the path.
    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }

    /// Consumes into the path.
    fn into_path(self) -> PathBuf {
        match self {
            Self::Explicit(path) | Self::Default(path) => path,
        }
    }
}

/// Resolves the config path from the caller, the environment, or the default.
fn resolve_path(path: Option<&Path>, env_path: Option<String>) -> Result<ResolvedPath, ConfigError> {
    if let Some(path) = path {
        return Ok(ResolvedPath::Explicit(path.to_path_buf()));
    }
    if let Some(env_path) = env_path {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(ResolvedPath::Explicit(PathBuf::from(env_path)));
    }
    Ok(ResolvedPath::Default(PathBuf::from(DEFAULT_CONFIG_NAME)))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::path::PathBuf;

    use super::DEFAULT_CONFIG_NAME;
    use super::MAX_PATH_COMPONENT_LENGTH;
    use super::MAX_TOTAL_PATH_LENGTH;
    use super::ResolvedPath;
    use super::resolve_path;
    use super::validate_path_string;

    #[test]
    fn explicit_path_wins_over_environment() {
        let resolved = resolve_path(Some(Path::new("custom.toml")), Some("env.toml".to_string()));
        assert_eq!(resolved.ok(), Some(ResolvedPath::Explicit(PathBuf::from("custom.toml"))));
    }

    #[test]
    fn environment_path_is_explicit() {
        let resolved = resolve_path(None, Some("env.toml".to_string()));
        assert_eq!(resolved.ok(), Some(ResolvedPath::Explicit(PathBuf::from("env.toml"))));
    }

    #[test]
    fn default_path_is_optional() {
        let resolved = resolve_path(None, None);
        assert_eq!(resolved.ok(), Some(ResolvedPath::Default(PathBuf::from(DEFAULT_CONFIG_NAME))));
    }

    #[test]
    fn oversized_environment_path_is_rejected() {
        let long = "a".repeat(MAX_TOTAL_PATH_LENGTH + 1);
        assert!(resolve_path(None, Some(long)).is_err());
    }

    #[test]
    fn path_strings_are_bounded() {
        assert!(validate_path_string("audit.path", "logs/audit.jsonl").is_ok());
        assert!(validate_path_string("audit.path", "   ").is_err());
        let long_component = "a".repeat(MAX_PATH_COMPONENT_LENGTH + 1);
        assert!(validate_path_string("audit.path", &long_component).is_err());
    }
}
