// crates/report-page-validator/src/schema_check.rs
// ============================================================================
// Module: Schema Cross-Check
// Description: Compiled JSON Schema view of the report page contract.
// Purpose: Check documents against the published schema for parity testing.
// Dependencies: jsonschema, report-page-contract, report-page-core, thiserror
// ============================================================================

//! ## Overview
//! The published schema is a strict subset of the native validator: every
//! document it rejects the native validator also rejects, while cross-field
//! rules (unique ids, declared references, ordered bounds) are native only.
//! This module compiles the schema once so callers can confirm that subset
//! relationship at runtime or in tests.

use jsonschema::Draft;
use jsonschema::Validator;
use report_page_contract::report_page_schema;
use report_page_core::UnknownFieldPolicy;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while compiling the contract schema.
#[derive(Debug, Error)]
pub enum SchemaCheckError {
    /// The generated schema failed to compile.
    #[error("report page schema failed to compile: {0}")]
    Compile(String),
}

/// Compiled report page schema for one unknown-field policy.
pub struct ContractSchema {
    /// Policy the schema was generated for.
    policy: UnknownFieldPolicy,
    /// Compiled draft 2020-12 validator.
    validator: Validator,
}

impl ContractSchema {
    /// Compiles the published schema for `policy`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCheckError::Compile`] when the schema does not compile.
    pub fn compile(policy: UnknownFieldPolicy) -> Result<Self, SchemaCheckError> {
        let schema = report_page_schema(policy);
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|err| SchemaCheckError::Compile(err.to_string()))?;
        Ok(Self {
            policy,
            validator,
        })
    }

    /// Returns the policy the schema was generated for.
    #[must_use]
    pub const fn policy(&self) -> UnknownFieldPolicy {
        self.policy
    }

    /// Returns true when `document` satisfies the schema.
    #[must_use]
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }

    /// Checks `document`, returning every schema error message on failure.
    ///
    /// # Errors
    ///
    /// Returns the schema error messages when the document is rejected.
    pub fn check(&self, document: &Value) -> Result<(), Vec<String>> {
        let messages: Vec<String> =
            self.validator.iter_errors(document).map(|err| err.to_string()).collect();
        if messages.is_empty() { Ok(()) } else { Err(messages) }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions favor direct unwraps.")]

    use report_page_contract::examples::my_report_example;
    use report_page_core::UnknownFieldPolicy;
    use serde_json::json;

    use super::ContractSchema;

    #[test]
    fn compiles_for_both_policies() {
        for policy in [UnknownFieldPolicy::Permissive, UnknownFieldPolicy::Strict] {
            let schema = ContractSchema::compile(policy).unwrap();
            assert_eq!(schema.policy(), policy);
            assert!(schema.check(&my_report_example()).is_ok());
        }
    }

    #[test]
    fn rejections_carry_messages() {
        let schema = ContractSchema::compile(UnknownFieldPolicy::Permissive).unwrap();
        let messages = schema.check(&json!({ "title": 3 })).unwrap_err();
        assert!(!messages.is_empty());
        assert!(!schema.is_valid(&json!([])));
    }
}
