//! # xbot-codegen-core — Foundational Types for the Service Code Generator
//!
//! This crate holds the leaf primitives of the schema-to-IR pipeline. Every
//! other crate in the workspace depends on `xbot-codegen-core`; it depends on
//! nothing internal.
//!
//! ## Contents
//!
//! 1. **`ScalarType` whitelist.** One enum for every type with a fixed wire
//!    width. Raw fields may only use these.
//!
//! 2. **Type resolution.** [`resolve_type`] turns `"uint8_t[16]"` into a
//!    [`DeclaredType`] or a typed [`TypeError`].
//!
//! 3. **Identifier derivation.** [`derive_identifier`] strips whitespace from
//!    schema names; the name builders add the fixed callback/method affixes.
//!
//! 4. **Canonical serialization.** [`CanonicalSchema`] produces the JSON and
//!    CBOR copies of a schema embedded in generated code.
//!
//! 5. **Binary embedding.** [`binary2c_array`] renders bytes as a C array
//!    initializer.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `xbot-codegen-*` crates.
//! - No global state. Every function is pure over its arguments.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod category;
pub mod embed;
pub mod error;
pub mod ident;
pub mod scalar;
pub mod types;

// Re-export primary types for ergonomic imports.
pub use canonical::{canonical_cbor, canonical_json, decode_cbor, CanonicalSchema};
pub use category::Category;
pub use embed::binary2c_array;
pub use error::{CanonicalizationError, CodegenError, TypeError};
pub use ident::{callback_name, class_name, derive_identifier, interface_class_name, method_name};
pub use scalar::ScalarType;
pub use types::{check_codec_type, resolve_type, DeclaredType};
