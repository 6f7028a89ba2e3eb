// crates/report-page-validator/src/validator/query.rs
// ============================================================================
// Module: Query Checks
// Description: Query and verify block validation.
// Purpose: Check query bounds, datasource references, and verify rules.
// Dependencies: report-page-core, serde_json
// ============================================================================

use std::collections::BTreeSet;

use report_page_core::ColumnType;
use report_page_core::FieldScope;
use report_page_core::MAX_RESULT_ROWS;
use report_page_core::MAX_TIMEOUT_MS;
use report_page_core::is_identifier;
use serde_json::Value;

use super::Pass;
use super::leaf::field;
use super::leaf::is_scalar;
use crate::pointer::JsonPointer;
use crate::report::ViolationKind;
use crate::report::WarningKind;
use crate::sql;

/// Members of a query.
const QUERY_KEYS: &[&str] = &["sql", "params", "datasource", "timeout_ms", "max_rows", "limit"];
/// Members of a verify block.
const VERIFY_KEYS: &[&str] = &["row_count", "columns", "values"];
/// Members of a row count rule.
const ROW_COUNT_KEYS: &[&str] = &["eq", "min", "max"];
/// Members of a column rule.
const COLUMN_KEYS: &[&str] = &["name", "type", "nullable", "required"];
/// Members of a value rule.
const VALUE_KEYS: &[&str] = &["column", "min", "max", "regex", "allowed", "unique"];
/// Value rule members that assert something about the column.
const VALUE_ASSERTIONS: &[&str] = &["min", "max", "regex", "allowed", "unique"];

impl Pass<'_> {
    /// Validates a visual `query`.
    pub(super) fn query(&mut self, value: &Value, path: &JsonPointer) {
        let Some(query) = self.object(value, path) else {
            return;
        };
        self.check_keys(query, path, QUERY_KEYS);
        let sql = self
            .required(query, "sql", path)
            .and_then(|(sql, sql_path)| self.non_empty(sql, &sql_path).map(|sql| (sql, sql_path)));
        let params = field(query, "params", path)
            .and_then(|(params, params_path)| self.query_params(params, &params_path));
        if let Some((datasource, datasource_path)) = field(query, "datasource", path) {
            self.datasource_ref(datasource, &datasource_path);
        }
        if let Some((timeout, timeout_path)) = field(query, "timeout_ms", path) {
            self.integer(timeout, &timeout_path, 1, Some(MAX_TIMEOUT_MS));
        }
        if let Some((max_rows, max_rows_path)) = field(query, "max_rows", path) {
            self.integer(max_rows, &max_rows_path, 1, Some(MAX_RESULT_ROWS));
        }
        if let Some((limit, limit_path)) = field(query, "limit", path) {
            self.integer(limit, &limit_path, 1, Some(MAX_RESULT_ROWS));
            self.deprecated(FieldScope::Query, "limit", &limit_path);
        }
        if self.options.check_sql_parameters
            && let Some((sql, sql_path)) = sql
        {
            self.placeholders(sql, params.as_ref(), &sql_path);
        }
    }

    /// Validates `params`; returns the declared names when it is an object.
    fn query_params(&mut self, value: &Value, path: &JsonPointer) -> Option<BTreeSet<String>> {
        let params = self.object(value, path)?;
        for (name, param) in params {
            let param_path = path.key(name);
            if !is_identifier(name) {
                self.violation(
                    &param_path,
                    ViolationKind::PatternMismatch,
                    "parameter name must be an identifier",
                );
            }
            let bindable = match param {
                Value::Null => true,
                Value::Array(items) => items.iter().all(is_scalar),
                other => is_scalar(other),
            };
            if !bindable {
                self.violation(
                    &param_path,
                    ViolationKind::WrongType,
                    "must be a scalar, null, or an array of scalars",
                );
            }
        }
        Some(params.keys().cloned().collect())
    }

    /// Checks a datasource reference against the page declarations.
    fn datasource_ref(&mut self, value: &Value, path: &JsonPointer) {
        let Some(name) = self.slug(value, path) else {
            return;
        };
        let declared = self.datasources.as_ref().is_none_or(|names| names.contains(name));
        if !declared {
            self.violation(
                path,
                ViolationKind::Inconsistent,
                format!("datasource `{name}` is not declared in datasources"),
            );
        }
    }

    /// Warns about placeholders bound neither by `params` nor a page parameter.
    fn placeholders(&mut self, sql: &str, params: Option<&BTreeSet<String>>, path: &JsonPointer) {
        for name in sql::placeholders(sql) {
            let bound = params.is_some_and(|params| params.contains(&name))
                || self.parameters.contains(&name);
            if !bound {
                self.warning(
                    path,
                    WarningKind::UndeclaredSqlParameter,
                    format!("placeholder :{name} is not declared in params or parameters"),
                );
            }
        }
    }

    /// Validates a visual `verify` block.
    pub(super) fn verify(&mut self, value: &Value, path: &JsonPointer) {
        let Some(verify) = self.object(value, path) else {
            return;
        };
        self.check_keys(verify, path, VERIFY_KEYS);
        if let Some((row_count, row_count_path)) = field(verify, "row_count", path) {
            self.row_count(row_count, &row_count_path);
        }
        if let Some((columns, columns_path)) = field(verify, "columns", path)
            && let Some(columns) = self.array(columns, &columns_path)
        {
            let mut names = BTreeSet::new();
            for (index, column) in columns.iter().enumerate() {
                self.column_rule(column, &columns_path.index(index), &mut names);
            }
        }
        if let Some((values, values_path)) = field(verify, "values", path)
            && let Some(values) = self.array(values, &values_path)
        {
            for (index, rule) in values.iter().enumerate() {
                self.value_rule(rule, &values_path.index(index));
            }
        }
    }

    /// Validates `verify.row_count`.
    fn row_count(&mut self, value: &Value, path: &JsonPointer) {
        let Some(rule) = self.object(value, path) else {
            return;
        };
        self.check_keys(rule, path, ROW_COUNT_KEYS);
        let mut bound = |key: &str| {
            field(rule, key, path)
                .map(|(value, bound_path)| self.integer(value, &bound_path, 0, None))
        };
        let (eq, min, max) = (bound("eq"), bound("min"), bound("max"));
        if eq.is_none() && min.is_none() && max.is_none() {
            self.violation(path, ViolationKind::MissingField, "needs at least one of eq, min, max");
            return;
        }
        if eq.is_some() && (min.is_some() || max.is_some()) {
            self.violation(
                path,
                ViolationKind::OptionsConflict,
                "eq cannot be combined with min or max",
            );
        }
        if let (Some(Some(min)), Some(Some(max))) = (min, max)
            && min > max
        {
            self.violation(
                path,
                ViolationKind::Inconsistent,
                format!("min {min} is greater than max {max}"),
            );
        }
    }

    /// Validates one column rule; `names` tracks names for uniqueness.
    fn column_rule<'v>(
        &mut self,
        value: &'v Value,
        path: &JsonPointer,
        names: &mut BTreeSet<&'v str>,
    ) {
        let Some(rule) = self.object(value, path) else {
            return;
        };
        self.check_keys(rule, path, COLUMN_KEYS);
        if let Some((name, name_path)) = self.required(rule, "name", path)
            && let Some(name) = self.non_empty(name, &name_path)
            && !names.insert(name)
        {
            self.violation(
                &name_path,
                ViolationKind::Inconsistent,
                format!("column `{name}` is listed twice"),
            );
        }
        if let Some((column_type, type_path)) = field(rule, "type", path) {
            let labels: Vec<&str> = ColumnType::ALL.iter().map(|kind| kind.as_str()).collect();
            self.label(column_type, &type_path, &labels);
        }
        for key in ["nullable", "required"] {
            if let Some((flag, flag_path)) = field(rule, key, path) {
                self.boolean(flag, &flag_path);
            }
        }
    }

    /// Validates one value rule.
    fn value_rule(&mut self, value: &Value, path: &JsonPointer) {
        let Some(rule) = self.object(value, path) else {
            return;
        };
        self.check_keys(rule, path, VALUE_KEYS);
        if let Some((column, column_path)) = self.required(rule, "column", path) {
            self.non_empty(column, &column_path);
        }
        if !VALUE_ASSERTIONS.iter().any(|key| rule.contains_key(*key)) {
            self.violation(
                path,
                ViolationKind::MissingField,
                "needs at least one of min, max, regex, allowed, unique",
            );
            return;
        }
        let min = field(rule, "min", path).and_then(|(min, min_path)| self.number(min, &min_path));
        let max = field(rule, "max", path).and_then(|(max, max_path)| self.number(max, &max_path));
        if let (Some(min), Some(max)) = (min, max)
            && min > max
        {
            self.violation(
                path,
                ViolationKind::Inconsistent,
                format!("min {min} is greater than max {max}"),
            );
        }
        if let Some((regex, regex_path)) = field(rule, "regex", path) {
            self.non_empty(regex, &regex_path);
        }
        if let Some((allowed, allowed_path)) = field(rule, "allowed", path) {
            self.allowed_scalars(allowed, &allowed_path);
        }
        if let Some((unique, unique_path)) = field(rule, "unique", path) {
            self.boolean(unique, &unique_path);
        }
    }

    /// Expects a non-empty array of scalars.
    fn allowed_scalars(&mut self, value: &Value, path: &JsonPointer) {
        if let Some(allowed) = self.non_empty_array(value, path) {
            for (index, entry) in allowed.iter().enumerate() {
                self.scalar(entry, &path.index(index));
            }
        }
    }
}

