// crates/report-page-validator/src/validator/page.rs
// ============================================================================
// Module: Page Checks
// Description: Root, meta, datasource, parameter, and theme validation.
// Purpose: Validate page-level members and gather page declarations.
// Dependencies: report-page-core, serde_json
// ============================================================================

use std::collections::BTreeSet;

use report_page_core::DatasourceKind;
use report_page_core::FieldScope;
use report_page_core::MAX_COMPONENT_DIGITS;
use report_page_core::ParameterType;
use report_page_core::SchemaVersion;
use report_page_core::VersionCompatibility;
use report_page_core::VersionError;
use report_page_core::deprecation;
use report_page_core::is_email;
use report_page_core::is_identifier;
use report_page_core::is_slug;
use report_page_core::is_timestamp;
use serde_json::Map;
use serde_json::Value;

use super::Pass;
use super::leaf::field;
use crate::pointer::JsonPointer;
use crate::report::ViolationKind;
use crate::report::WarningKind;

/// Members of the page object.
const PAGE_KEYS: &[&str] =
    &["title", "description", "meta", "rows", "datasources", "parameters", "theme"];
/// Members of `meta`.
const META_KEYS: &[&str] = &["schema_version", "last_updated", "updated_by"];
/// Members of `meta.updated_by`.
const AUTHOR_KEYS: &[&str] = &["id", "name", "email"];
/// Members of a datasource.
const DATASOURCE_KEYS: &[&str] = &["kind", "connection_ref", "description"];
/// Members of a parameter.
const PARAMETER_KEYS: &[&str] =
    &["name", "type", "label", "required", "default", "allowed_values"];
/// Members of `theme`.
const THEME_KEYS: &[&str] = &[
    "primary_color",
    "background_color",
    "text_color",
    "accent_color",
    "palette",
    "font_family",
    "density",
];
/// Theme members holding a single color.
const THEME_COLOR_KEYS: &[&str] =
    &["primary_color", "background_color", "text_color", "accent_color"];

impl Pass<'_> {
    /// Validates a whole document.
    pub(super) fn document(&mut self, document: &Value) {
        let root = JsonPointer::root();
        let Some(page) = self.object(document, &root) else {
            return;
        };
        self.collect_declarations(page);
        self.check_keys(page, &root, PAGE_KEYS);
        if let Some((title, path)) = self.required(page, "title", &root) {
            self.non_empty(title, &path);
        }
        if let Some((description, path)) = field(page, "description", &root) {
            self.string(description, &path);
        }
        if let Some((meta, path)) = self.required(page, "meta", &root) {
            self.meta(meta, &path);
        }
        if let Some((datasources, path)) = field(page, "datasources", &root) {
            self.datasources(datasources, &path);
        }
        if let Some((parameters, path)) = field(page, "parameters", &root) {
            self.parameters(parameters, &path);
        }
        if let Some((theme, path)) = field(page, "theme", &root) {
            self.theme(theme, &path);
        }
        if let Some((rows, path)) = self.required(page, "rows", &root) {
            self.rows(rows, &path);
        }
    }

    /// Records datasource and parameter names before the walk.
    fn collect_declarations(&mut self, page: &Map<String, Value>) {
        self.datasources = match page.get("datasources") {
            None => Some(BTreeSet::new()),
            Some(Value::Object(map)) => Some(map.keys().cloned().collect()),
            Some(_) => None,
        };
        self.parameters = page
            .get("parameters")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|parameter| parameter.get("name").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
    }

    /// Validates `meta`.
    fn meta(&mut self, value: &Value, path: &JsonPointer) {
        let Some(meta) = self.object(value, path) else {
            return;
        };
        self.check_keys(meta, path, META_KEYS);
        if let Some((version, version_path)) = self.required(meta, "schema_version", path) {
            self.schema_version(version, &version_path);
        }
        if let Some((updated, updated_path)) = self.required(meta, "last_updated", path) {
            self.pattern(updated, &updated_path, is_timestamp, "an RFC 3339 timestamp");
        }
        if let Some((author, author_path)) = self.required(meta, "updated_by", path) {
            self.author(author, &author_path);
        }
    }

    /// Checks the declared version against the supported version.
    fn schema_version(&mut self, value: &Value, path: &JsonPointer) {
        let Some(text) = self.string(value, path) else {
            return;
        };
        let version = match SchemaVersion::parse(text) {
            Ok(version) => version,
            Err(VersionError::Overflow(_)) => {
                self.violation(
                    path,
                    ViolationKind::OutOfRange,
                    format!("version components are limited to {MAX_COMPONENT_DIGITS} digits"),
                );
                return;
            }
            Err(VersionError::Malformed(_) | VersionError::LeadingZero(_)) => {
                self.violation(
                    path,
                    ViolationKind::PatternMismatch,
                    "must be MAJOR.MINOR.PATCH without leading zeros",
                );
                return;
            }
        };
        let supported = self.options.supported_version;
        match version.compatibility_with(supported) {
            VersionCompatibility::MajorMismatch => self.violation(
                path,
                ViolationKind::UnsupportedVersion,
                format!("version {version} is not readable; supported major is {}", supported.major),
            ),
            VersionCompatibility::NewerMinor => self.warning(
                path,
                WarningKind::NewerMinorVersion,
                format!("version {version} is newer than supported {supported}"),
            ),
            VersionCompatibility::Exact | VersionCompatibility::OlderMinor => {}
        }
        self.document_version = Some(version);
    }

    /// Validates `meta.updated_by`.
    fn author(&mut self, value: &Value, path: &JsonPointer) {
        let Some(author) = self.object(value, path) else {
            return;
        };
        self.check_keys(author, path, AUTHOR_KEYS);
        if let Some((id, id_path)) = self.required(author, "id", path) {
            self.non_empty(id, &id_path);
        }
        if let Some((name, name_path)) = self.required(author, "name", path) {
            self.non_empty(name, &name_path);
        }
        if let Some((email, email_path)) = field(author, "email", path) {
            self.pattern(email, &email_path, is_email, "an email address");
        }
    }

    /// Validates the `datasources` map.
    fn datasources(&mut self, value: &Value, path: &JsonPointer) {
        let Some(datasources) = self.object(value, path) else {
            return;
        };
        for (name, datasource) in datasources {
            let entry_path = path.key(name);
            if !is_slug(name) {
                self.violation(
                    &entry_path,
                    ViolationKind::PatternMismatch,
                    "datasource name must be a slug",
                );
            }
            self.datasource(datasource, &entry_path);
        }
    }

    /// Validates one datasource.
    fn datasource(&mut self, value: &Value, path: &JsonPointer) {
        let Some(datasource) = self.object(value, path) else {
            return;
        };
        self.check_keys(datasource, path, DATASOURCE_KEYS);
        if let Some((kind, kind_path)) = self.required(datasource, "kind", path) {
            let labels: Vec<&str> = DatasourceKind::ALL.iter().map(|kind| kind.as_str()).collect();
            self.label(kind, &kind_path, &labels);
        }
        if let Some((reference, reference_path)) = self.required(datasource, "connection_ref", path)
        {
            self.non_empty(reference, &reference_path);
        }
        if let Some((description, description_path)) = field(datasource, "description", path) {
            self.string(description, &description_path);
        }
    }

    /// Validates the `parameters` array.
    fn parameters(&mut self, value: &Value, path: &JsonPointer) {
        let Some(parameters) = self.array(value, path) else {
            return;
        };
        let mut seen = BTreeSet::new();
        for (index, parameter) in parameters.iter().enumerate() {
            self.parameter(parameter, &path.index(index), &mut seen);
        }
    }

    /// Validates one parameter; `seen` tracks names for uniqueness.
    fn parameter<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
        seen: &mut BTreeSet<&'v str>,
    ) {
        let Some(parameter) = self.object(value, path) else {
            return;
        };
        self.check_keys(parameter, path, PARAMETER_KEYS);
        if let Some((name, name_path)) = self.required(parameter, "name", path)
            && let Some(name) = self.pattern(name, &name_path, is_identifier, "an identifier")
            && !seen.insert(name)
        {
            self.violation(
                &name_path,
                ViolationKind::Inconsistent,
                format!("duplicate parameter name `{name}`"),
            );
        }
        let parameter_type = self.required(parameter, "type", path).and_then(|(kind, kind_path)| {
            let labels: Vec<&str> = ParameterType::ALL.iter().map(|kind| kind.as_str()).collect();
            let label = self.label(kind, &kind_path, &labels)?;
            ParameterType::ALL.iter().copied().find(|kind| kind.as_str() == label)
        });
        if let Some((label, label_path)) = field(parameter, "label", path) {
            self.string(label, &label_path);
        }
        if let Some((required, required_path)) = field(parameter, "required", path) {
            self.boolean(required, &required_path);
        }
        let allowed = field(parameter, "allowed_values", path)
            .and_then(|(allowed, allowed_path)| {
                self.allowed_values(allowed, &allowed_path, parameter_type)
            });
        if let Some((default, default_path)) = field(parameter, "default", path) {
            if !self.scalar(default, &default_path) {
                return;
            }
            if let Some(kind) = parameter_type
                && !kind.matches(default)
            {
                self.violation(
                    &default_path,
                    ViolationKind::WrongType,
                    format!("must be a {} value", kind.as_str()),
                );
            } else if let Some(allowed) = allowed
                && !allowed.contains(default)
            {
                self.violation(
                    &default_path,
                    ViolationKind::Inconsistent,
                    "must be one of allowed_values",
                );
            }
        }
    }

    /// Validates `allowed_values`; returns them when every entry is well typed.
    fn allowed_values<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
        parameter_type: Option<ParameterType>,
    ) -> Option<&'v [Value]> {
        let allowed = self.non_empty_array(value, path)?;
        let mut well_typed = !allowed.is_empty();
        for (index, entry) in allowed.iter().enumerate() {
            let entry_path = path.index(index);
            if !self.scalar(entry, &entry_path) {
                well_typed = false;
            } else if let Some(kind) = parameter_type
                && !kind.matches(entry)
            {
                self.violation(
                    &entry_path,
                    ViolationKind::WrongType,
                    format!("must be a {} value", kind.as_str()),
                );
                well_typed = false;
            }
        }
        well_typed.then_some(allowed)
    }

    /// Validates `theme`.
    fn theme(&mut self, value: &Value, path: &JsonPointer) {
        let Some(theme) = self.object(value, path) else {
            return;
        };
        self.check_keys(theme, path, THEME_KEYS);
        for key in THEME_COLOR_KEYS {
            if let Some((color, color_path)) = field(theme, key, path) {
                self.hex_color(color, &color_path);
                self.deprecated(FieldScope::Theme, key, &color_path);
            }
        }
        if let Some((palette, palette_path)) = field(theme, "palette", path) {
            self.hex_colors(palette, &palette_path);
        }
        if let Some((font, font_path)) = field(theme, "font_family", path) {
            self.string(font, &font_path);
        }
        if let Some((density, density_path)) = field(theme, "density", path) {
            self.label(density, &density_path, &["compact", "comfortable"]);
        }
    }

    /// Reports use of a deprecated member, if `field_name` is one.
    pub(super) fn deprecated(&mut self, scope: FieldScope, field_name: &str, path: &JsonPointer) {
        let Some(entry) = deprecation::lookup(scope, field_name) else {
            return;
        };
        let still_accepted =
            self.document_version.is_none_or(|version| entry.accepted_in(version));
        if still_accepted {
            self.warning(
                path,
                WarningKind::DeprecatedField,
                format!(
                    "{}.{} is deprecated since {}; use {}",
                    scope.as_str(),
                    entry.field,
                    entry.since,
                    entry.replacement
                ),
            );
        } else {
            self.violation(
                path,
                ViolationKind::UnknownField,
                format!(
                    "{}.{} was removed in {}.0.0",
                    scope.as_str(),
                    entry.field,
                    entry.removed_in_major
                ),
            );
        }
    }
}

