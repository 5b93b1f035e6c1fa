//! # Document Shape Validation
//!
//! Checks that a parsed schema has the structure of a service definition
//! before anything interprets it: required keys present, ids in the 16-bit
//! wire range, strings where strings are expected. The rules live in
//! `schemas/service.schema.json` (Draft 2020-12) and are compiled once per
//! [`ShapeValidator`].
//!
//! Only structure is checked here. Type whitelists, id uniqueness and
//! encoding rules are enforced by later stages with their own error kinds.
//!
//! Unknown keys are tolerated at every level; they are carried through
//! unchanged into the embedded schema copies.

use jsonschema::Validator;
use serde_json::Value;
use xbot_codegen_core::CodegenError;

/// The service shape schema, embedded at compile time.
pub const SERVICE_SHAPE_SCHEMA: &str = include_str!("../schemas/service.schema.json");

/// Name used for the built-in schema in error messages.
const SHAPE_SCHEMA_NAME: &str = "service.schema.json";

/// A compiled validator for the service document shape.
///
/// `Send + Sync`; one instance can check documents from several threads.
pub struct ShapeValidator {
    validator: Validator,
}

impl std::fmt::Debug for ShapeValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeValidator")
            .field("schema", &SHAPE_SCHEMA_NAME)
            .finish()
    }
}

impl ShapeValidator {
    /// Compile the built-in shape schema.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::ShapeSchema` if the embedded schema does not
    /// compile.
    pub fn new() -> Result<Self, CodegenError> {
        Self::from_source(SERVICE_SHAPE_SCHEMA)
    }

    fn from_source(source: &str) -> Result<Self, CodegenError> {
        let build_error = |reason: String| CodegenError::ShapeSchema { reason };
        let schema: Value = serde_json::from_str(source)
            .map_err(|e| build_error(format!("invalid JSON: {e}")))?;

        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema)
            .map_err(|e| build_error(format!("cannot compile: {e}")))?;
        Ok(Self { validator })
    }

    /// Check `document` against the service shape.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::MalformedSchema` for the first violation, with
    /// the JSON pointer of the offending value as its path.
    pub fn check(&self, document: &Value) -> Result<(), CodegenError> {
        match self.validator.iter_errors(document).next() {
            None => Ok(()),
            Some(e) => {
                let pointer = e.instance_path.to_string();
                Err(CodegenError::MalformedSchema {
                    path: if pointer.is_empty() {
                        "(root)".to_string()
                    } else {
                        pointer
                    },
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Returns true if `document` has the service shape.
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }
}
