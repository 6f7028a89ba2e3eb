// crates/report-page-validator/src/validator/rows.rs
// ============================================================================
// Module: Row Checks
// Description: Row type, arity, and visual placement validation.
// Purpose: Enforce which visual kinds each row type holds, and how many.
// Dependencies: report-page-core, serde_json
// ============================================================================

use report_page_core::OPTION_BUNDLE_KEYS;
use report_page_core::RowType;
use report_page_core::VisualKind;
use serde_json::Map;
use serde_json::Value;

use super::Pass;
use super::leaf::field;
use crate::pointer::JsonPointer;
use crate::report::ViolationKind;

/// Members of a row.
const ROW_KEYS: &[&str] = &["type", "id", "title", "visuals"];
/// Members shared by every visual, option bundles excluded.
const VISUAL_KEYS: &[&str] = &["kind", "id", "title", "description", "query", "verify"];

impl Pass<'_> {
    /// Validates the `rows` array.
    pub(super) fn rows(&mut self, value: &Value, path: &JsonPointer) {
        let Some(rows) = self.array(value, path) else {
            return;
        };
        if rows.is_empty() {
            self.violation(path, ViolationKind::ArityViolation, "a page needs at least one row");
            return;
        }
        for (index, row) in rows.iter().enumerate() {
            self.row(row, &path.index(index));
        }
    }

    /// Validates one row and its visuals.
    fn row(&mut self, value: &Value, path: &JsonPointer) {
        let Some(row) = self.object(value, path) else {
            return;
        };
        self.check_keys(row, path, ROW_KEYS);
        let row_type = self.row_type(row, path);
        if let Some((id, id_path)) = field(row, "id", path) {
            self.slug(id, &id_path);
        }
        if let Some((title, title_path)) = field(row, "title", path) {
            self.string(title, &title_path);
        }
        let Some((visuals, visuals_path)) = self.required(row, "visuals", path) else {
            return;
        };
        let Some(visuals) = self.array(visuals, &visuals_path) else {
            return;
        };
        if let Some(row_type) = row_type {
            self.arity(row_type, visuals.len(), &visuals_path);
        }
        for (index, visual) in visuals.iter().enumerate() {
            self.visual(visual, &visuals_path.index(index), row_type);
        }
    }

    /// Reads the row `type`.
    fn row_type(&mut self, row: &Map<String, Value>, path: &JsonPointer) -> Option<RowType> {
        let (value, type_path) = self.required(row, "type", path)?;
        let label = self.string(value, &type_path)?;
        let row_type = RowType::parse(label);
        if row_type.is_none() {
            let labels: Vec<&str> = RowType::ALL.iter().map(|row_type| row_type.as_str()).collect();
            self.violation(
                &type_path,
                ViolationKind::EnumMismatch,
                format!("must be one of {}", labels.join(", ")),
            );
        }
        row_type
    }

    /// Checks the visual count against the row type.
    fn arity(&mut self, row_type: RowType, count: usize, path: &JsonPointer) {
        let arity = row_type.arity();
        if arity.contains(&count) {
            return;
        }
        let (min, max) = (*arity.start(), *arity.end());
        let message = if min == max {
            format!("must have exactly {min} visual(s) for type={}", row_type.as_str())
        } else if count < min {
            format!("must have at least {min} visual(s) for type={}", row_type.as_str())
        } else {
            format!("must have at most {max} visual(s) for type={}", row_type.as_str())
        };
        self.violation(path, ViolationKind::ArityViolation, message);
    }

    /// Validates one visual placed in a row of `row_type`.
    fn visual(&mut self, value: &Value, path: &JsonPointer, row_type: Option<RowType>) {
        let Some(visual) = self.object(value, path) else {
            return;
        };
        let kind = self.visual_kind(visual, path, row_type);
        let mut known = VISUAL_KEYS.to_vec();
        known.extend_from_slice(OPTION_BUNDLE_KEYS);
        self.check_keys(visual, path, &known);
        if let Some((id, id_path)) = field(visual, "id", path)
            && let Some(id) = self.slug(id, &id_path)
            && !self.visual_ids.insert(id.to_string())
        {
            self.violation(
                &id_path,
                ViolationKind::Inconsistent,
                format!("visual id `{id}` is already used on this page"),
            );
        }
        for key in ["title", "description"] {
            if let Some((text, text_path)) = field(visual, key, path) {
                self.string(text, &text_path);
            }
        }
        if let Some((query, query_path)) = field(visual, "query", path) {
            self.query(query, &query_path);
        }
        if let Some((verify, verify_path)) = field(visual, "verify", path) {
            self.verify(verify, &verify_path);
        }
        if let Some(kind) = kind {
            self.visual_options(kind, visual, path);
        }
    }

    /// Reads the visual `kind` and checks it against the row type.
    fn visual_kind(
        &mut self,
        visual: &Map<String, Value>,
        path: &JsonPointer,
        row_type: Option<RowType>,
    ) -> Option<VisualKind> {
        let (value, kind_path) = self.required(visual, "kind", path)?;
        let label = self.string(value, &kind_path)?;
        let Some(kind) = VisualKind::parse(label) else {
            let labels: Vec<&str> = VisualKind::ALL.iter().map(|kind| kind.as_str()).collect();
            self.violation(
                &kind_path,
                ViolationKind::EnumMismatch,
                format!("must be one of {}", labels.join(", ")),
            );
            return None;
        };
        if let Some(row_type) = row_type
            && !row_type.allows(kind)
        {
            let allowed: Vec<&str> =
                row_type.allowed_kinds().iter().map(|kind| kind.as_str()).collect();
            self.violation(
                &kind_path,
                ViolationKind::KindMismatch,
                format!(
                    "kind {label} is not allowed in a {} row (allowed: {})",
                    row_type.as_str(),
                    allowed.join(", ")
                ),
            );
        }
        Some(kind)
    }

    /// Checks which option bundles a visual of `kind` carries.
    fn visual_options(&mut self, kind: VisualKind, visual: &Map<String, Value>, path: &JsonPointer) {
        let own_key = kind.options_key();
        for key in OPTION_BUNDLE_KEYS.iter().filter(|key| **key != own_key) {
            if visual.contains_key(*key) {
                self.violation(
                    &path.key(key),
                    ViolationKind::OptionsConflict,
                    format!("{key} does not apply to kind {}", kind.as_str()),
                );
            }
        }
        match field(visual, own_key, path) {
            Some((options, options_path)) => self.bundle(kind, options, &options_path),
            None if kind.options_required() => self.violation(
                &path.key(own_key),
                ViolationKind::MissingField,
                format!("is required for kind {}", kind.as_str()),
            ),
            None => {}
        }
    }
}
