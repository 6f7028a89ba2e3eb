// crates/report-page-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Message catalog and translation utilities for the CLI.
// Purpose: Keep every user-facing string in one localizable table.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! User-facing strings live in per-locale catalogs keyed by stable message
//! ids. Runtime output goes through the [`t!`](crate::t) macro, which looks
//! the key up for the selected locale and substitutes `{placeholder}` values.
//!
//! ## Invariants
//! - The catalogs are initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Parses a locale value, ignoring case and region tags (`ca-ES`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.split(['-', '_']).next() {
            Some("en") => Some(Self::En),
            Some("ca") => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Supported locales in presentation order.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
#[derive(Clone)]
pub struct MessageArg {
    /// Placeholder name without braces (for example, `path`).
    pub key: &'static str,
    /// Preformatted value substituted for the placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`].
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Locale chosen for this process.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "report-page {version}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to render JSON output: {error}"),
    ("input.read_failed", "Failed to read {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.parse_failed", "{path} is not valid JSON: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("audit.init_failed", "Failed to initialize audit sink: {error}"),
    ("validate.valid", "{path}: valid"),
    ("validate.invalid", "{path}: invalid ({count} violation(s))"),
    ("validate.violation", "  {violation}"),
    ("validate.truncated", "  further violations omitted (limit {limit})"),
    ("validate.warning", "  warning: {warning}"),
    ("validate.schema_error", "  schema: {message}"),
    ("validate.schema_compile_failed", "Failed to compile the report page schema: {error}"),
    ("fixtures.case_ok", "{name}: ok"),
    ("fixtures.case_failed", "{name}: FAILED (expected {expected}, got {actual})"),
    ("fixtures.summary", "{passed} of {total} fixture cases passed."),
    ("contract.generate.ok", "Contract artifacts written to {path}"),
    ("contract.generate.failed", "Failed to generate contract artifacts: {error}"),
    ("contract.check.ok", "Contract artifacts in {path} are up to date."),
    ("contract.check.failed", "Contract artifacts are out of date: {error}"),
];

/// Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "report-page {version}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut generar la sortida JSON: {error}"),
    ("input.read_failed", "No s'ha pogut llegir {path}: {error}"),
    (
        "input.read_too_large",
        "No es llegeix {path} perquè ocupa {size} bytes (límit {limit}).",
    ),
    ("input.parse_failed", "{path} no és JSON vàlid: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida."),
    ("audit.init_failed", "No s'ha pogut inicialitzar la sortida d'auditoria: {error}"),
    ("validate.valid", "{path}: vàlid"),
    ("validate.invalid", "{path}: no vàlid ({count} infracció(ns))"),
    ("validate.violation", "  {violation}"),
    ("validate.truncated", "  s'han omès més infraccions (límit {limit})"),
    ("validate.warning", "  avís: {warning}"),
    ("validate.schema_error", "  esquema: {message}"),
    ("validate.schema_compile_failed", "No s'ha pogut compilar l'esquema de la pàgina: {error}"),
    ("fixtures.case_ok", "{name}: correcte"),
    ("fixtures.case_failed", "{name}: ERROR (s'esperava {expected}, s'ha obtingut {actual})"),
    ("fixtures.summary", "{passed} de {total} casos de prova superats."),
    ("contract.generate.ok", "Artefactes del contracte escrits a {path}"),
    ("contract.generate.failed", "No s'han pogut generar els artefactes del contracte: {error}"),
    ("contract.check.ok", "Els artefactes del contracte a {path} estan al dia."),
    ("contract.check.failed", "Els artefactes del contracte no estan al dia: {error}"),
];

/// Returns the raw catalog entries for `locale`, in declaration order.
pub(crate) const fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    let map = match locale {
        Locale::En => &CATALOG_EN_MAP,
        Locale::Ca => &CATALOG_CA_MAP,
    };
    map.get_or_init(|| catalog_entries_for(locale).iter().copied().collect())
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let template = catalog_for(current_locale())
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    let mut result = template.to_string();
    for arg in args {
        result = result.replace(&format!("{{{}}}", arg.key), &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// Named arguments are substituted into `{placeholder}` positions; any
/// `Display` value is accepted.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
