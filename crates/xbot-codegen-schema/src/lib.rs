//! # xbot-codegen-schema — Service Schema Compilation
//!
//! Turns xbot service schema documents into the validated [`Service`] IR
//! consumed by the template renderer.
//!
//! ## Pipeline
//!
//! - [`load`] reads and parses a schema file.
//! - [`shape`] checks the document against the built-in
//!   `service.schema.json` (JSON Schema draft 2020-12).
//! - [`document`] gives the shape-checked document a typed view.
//! - [`unique`] rejects repeated ids within a category.
//! - [`encoding`] picks raw or compiled representation per field and
//!   synthesizes codec calls.
//! - [`assemble`] drives all of the above and produces the [`ir`] records.
//!
//! Codec naming (entry point prefixes, header suffixes, directive strings)
//! comes from a [`CodegenConfig`] profile, which defaults to zcbor.
//!
//! ## Crate Policy
//!
//! - Depends only on `xbot-codegen-core` internally.
//! - A returned `Service` is always complete. Any error aborts assembly.
//! - No process-wide state. Compilations are independent of each other.

pub mod assemble;
pub mod config;
pub mod document;
pub mod encoding;
pub mod ir;
pub mod load;
pub mod shape;
pub mod unique;

pub use assemble::{assemble_service, compile_schema_file, ServiceCompiler};
pub use config::CodegenConfig;
pub use document::{FieldDocument, ServiceDocument};
pub use encoding::{select_kind, CodecCall, DecodeContract, EncodeContract, Encoding, Includes};
pub use ir::{Field, FieldKind, Service};
pub use load::{load_schema, parse_schema_str};
pub use shape::{ShapeValidator, SERVICE_SHAPE_SCHEMA};
pub use unique::check_unique_ids;
