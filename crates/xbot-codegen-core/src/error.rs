//! # Error Types
//!
//! Defines the error types used throughout the code generator. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every error is fatal to the compilation of one schema file. There is no
//!   partial IR and no best-effort recovery.
//! - Field-level errors carry a path such as `inputs[2] ("Target Speed")`
//!   so the faulting schema entry can be located without re-parsing.
//! - Low-level errors (`TypeError`, `CanonicalizationError`) carry only the
//!   reason; the pipeline lifts them into [`CodegenError`] with context.

use thiserror::Error;

use crate::category::Category;

/// Top-level error type for a schema compilation.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The schema file could not be read or is not well-formed JSON.
    #[error("cannot read schema '{path}': {reason}")]
    SchemaRead {
        /// Path of the schema file (or `<memory>` for in-memory documents).
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The document is valid JSON but does not have the shape of a service.
    #[error("malformed schema at {path}: {reason}")]
    MalformedSchema {
        /// JSON path of the offending value, e.g. `inputs[0].id`.
        path: String,
        /// What was expected.
        reason: String,
    },

    /// A declared type is not a whitelisted scalar or a well-formed array.
    #[error("illegal data type '{declared}' at {path}: {reason}")]
    IllegalType {
        /// Field path, e.g. `outputs[1] ("Status")`.
        path: String,
        /// The type string as written in the schema.
        declared: String,
        /// Why the type was rejected.
        reason: TypeError,
    },

    /// Two fields of the same category share an id.
    #[error("duplicate id {id} in {category}")]
    DuplicateId {
        /// Category in which the collision occurred.
        category: Category,
        /// The repeated id.
        id: u16,
    },

    /// The `encoding` directive is unknown or not allowed on this field.
    #[error("illegal encoding '{encoding}' at {path}: {reason}")]
    IllegalEncoding {
        /// Field path.
        path: String,
        /// The directive as written in the schema.
        encoding: String,
        /// Why the directive was rejected.
        reason: String,
    },

    /// Re-serializing the schema for embedding failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The built-in service shape schema does not compile. Indicates a
    /// broken build, not bad input.
    #[error("built-in service shape schema is invalid: {reason}")]
    ShapeSchema {
        /// Why the schema could not be compiled.
        reason: String,
    },

    /// The generator configuration could not be loaded.
    #[error("invalid configuration '{path}': {reason}")]
    Config {
        /// Path of the configuration file.
        path: String,
        /// Reason the configuration was rejected.
        reason: String,
    },
}

impl CodegenError {
    /// Short machine-friendly name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SchemaRead { .. } => "SchemaReadError",
            Self::MalformedSchema { .. } => "MalformedSchemaError",
            Self::IllegalType { .. } => "IllegalTypeError",
            Self::DuplicateId { .. } => "DuplicateIdError",
            Self::IllegalEncoding { .. } => "IllegalEncodingError",
            Self::Canonicalization(_) => "CanonicalizationError",
            Self::ShapeSchema { .. } => "ShapeSchemaError",
            Self::Config { .. } => "ConfigError",
        }
    }
}

/// Reason a declared type string was rejected by the type resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// The base type is not in the scalar whitelist.
    #[error("'{0}' is not a supported scalar type")]
    UnknownScalar(String),

    /// An array clause was opened with `[` but does not end with `]`.
    #[error("array length clause is missing the closing ']'")]
    MissingClosingBracket,

    /// The array length is not a positive decimal integer.
    #[error("array length '{0}' is not a positive integer")]
    InvalidLength(String),

    /// A compiled codec type name is not a valid C identifier.
    #[error("'{0}' is not a valid codec type name")]
    InvalidCodecType(String),
}

/// Error during canonical re-serialization of a schema.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR serialization failed.
    #[error("CBOR serialization failed: {0}")]
    Cbor(String),
}
