//! # Service Assembly
//!
//! Runs the whole pipeline for one schema document:
//!
//! 1. Shape check against the built-in service schema.
//! 2. Typed view of the document.
//! 3. Id uniqueness in every category.
//! 4. Per category, in the order inputs, outputs, registers: name
//!    derivation and encoding selection for each field.
//! 5. Class names from the service type.
//! 6. Canonical JSON and CBOR copies of the original document.
//!
//! Assembly is all-or-nothing. The first error aborts it and no partial
//! [`Service`] is ever returned.
//!
//! ## Concurrency
//!
//! A [`ServiceCompiler`] holds only its configuration and the compiled shape
//! validator. Codec includes are collected per call and returned inside the
//! `Service`, so one compiler can serve many threads and independent
//! compilations never observe each other.

use std::path::Path;

use serde_json::Value;
use xbot_codegen_core::{
    callback_name, class_name, derive_identifier, interface_class_name, method_name,
    CanonicalSchema, CanonicalizationError, Category, CodegenError,
};

use crate::config::CodegenConfig;
use crate::document::{FieldDocument, ServiceDocument};
use crate::encoding::{select_kind, Includes};
use crate::ir::{Field, Service};
use crate::load::load_schema;
use crate::shape::ShapeValidator;
use crate::unique::check_unique_ids;

/// Compiles service schemas into [`Service`] IR.
#[derive(Debug)]
pub struct ServiceCompiler {
    config: CodegenConfig,
    shape: ShapeValidator,
}

impl ServiceCompiler {
    /// Create a compiler for `config`.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::Config` if the profile is inconsistent.
    pub fn new(config: CodegenConfig) -> Result<Self, CodegenError> {
        config.check().map_err(|reason| CodegenError::Config {
            path: "<config>".to_string(),
            reason,
        })?;
        Ok(Self {
            config,
            shape: ShapeValidator::new()?,
        })
    }

    /// The active codec profile.
    pub fn config(&self) -> &CodegenConfig {
        &self.config
    }

    /// Load and compile the schema file at `path`.
    pub fn compile_file(&self, path: impl AsRef<Path>) -> Result<Service, CodegenError> {
        let path = path.as_ref();
        let document = load_schema(path)?;
        tracing::debug!(path = %path.display(), "loaded service schema");
        self.compile_document(&document)
    }

    /// Compile an already parsed schema document.
    pub fn compile_document(&self, document: &Value) -> Result<Service, CodegenError> {
        self.shape.check(document)?;
        let parsed = ServiceDocument::from_value(document)?;
        for &category in Category::all() {
            check_unique_ids(category, parsed.fields(category))?;
        }

        let mut includes = Includes::new();
        let mut category_fields = |category: Category| -> Result<Vec<Field>, CodegenError> {
            let (fields, found) =
                assemble_category(category, parsed.fields(category), &self.config)?;
            includes.merge(found);
            Ok(fields)
        };
        let inputs = category_fields(Category::Input)?;
        let outputs = category_fields(Category::Output)?;
        let registers = category_fields(Category::Register)?;

        let (service_json, service_cbor) = CanonicalSchema::new(document)?.into_parts();

        tracing::debug!(
            service_type = %parsed.service_type,
            version = parsed.version,
            inputs = inputs.len(),
            outputs = outputs.len(),
            registers = registers.len(),
            includes = includes.len(),
            cbor_bytes = service_cbor.len(),
            "assembled service"
        );

        Ok(Service {
            class_name: class_name(&parsed.service_type),
            interface_class_name: interface_class_name(&parsed.service_type),
            service_type: parsed.service_type,
            version: parsed.version,
            inputs,
            outputs,
            registers,
            additional_includes: includes,
            service_json,
            service_cbor,
        })
    }
}

/// Compile a parsed schema document with `config`.
pub fn assemble_service(document: &Value, config: &CodegenConfig) -> Result<Service, CodegenError> {
    ServiceCompiler::new(config.clone())?.compile_document(document)
}

/// Load and compile the schema file at `path` with `config`.
pub fn compile_schema_file(
    path: impl AsRef<Path>,
    config: &CodegenConfig,
) -> Result<Service, CodegenError> {
    ServiceCompiler::new(config.clone())?.compile_file(path)
}

/// Build the fields of one category and the codec headers they need.
///
/// Ids must already be known unique within the category.
fn assemble_category(
    category: Category,
    entries: &[FieldDocument],
    config: &CodegenConfig,
) -> Result<(Vec<Field>, Includes), CodegenError> {
    let mut includes = Includes::new();
    let mut fields = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let name = derive_identifier(&entry.name);
        let callback = callback_name(category, &name);
        let kind = select_kind(category, index, entry, &callback, config, &mut includes)?;

        let default = match (&entry.default, category) {
            (Some(value), Category::Register) => Some(
                serde_json::to_string(value)
                    .map_err(|e| CodegenError::from(CanonicalizationError::from(e)))?,
            ),
            (Some(_), _) => {
                tracing::warn!(
                    path = %entry.path(category, index),
                    "ignoring default value; only registers carry defaults"
                );
                None
            }
            (None, _) => None,
        };

        fields.push(Field {
            category,
            id: entry.id,
            raw_name: entry.name.clone(),
            method_name: method_name(category, &name),
            callback_name: callback,
            name,
            kind,
            default,
        });
    }
    Ok((fields, includes))
}
