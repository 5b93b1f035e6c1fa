//! # Generator Configuration
//!
//! The codec profile: which `encoding` directive strings select raw or
//! compiled encoding, and how the compiled codec's entry points and headers
//! are named. The defaults match the zcbor code generator.
//!
//! ```yaml
//! raw_encoding: raw
//! compiled_encoding: zcbor
//! decode_entry_prefix: cbor_decode_
//! encode_entry_prefix: cbor_encode_
//! decode_include_suffix: _decode.h
//! encode_include_suffix: _encode.h
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos do not silently
//! fall back to a default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use xbot_codegen_core::CodegenError;

/// Naming profile for encodings and compiled codecs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodegenConfig {
    /// Directive selecting raw fixed-width encoding. Same as omitting it.
    pub raw_encoding: String,
    /// Directive selecting the compiled codec.
    pub compiled_encoding: String,
    /// Prefix of the generated decode function, followed by the type name.
    pub decode_entry_prefix: String,
    /// Prefix of the generated encode function, followed by the type name.
    pub encode_entry_prefix: String,
    /// Suffix of the generated decoder header, preceded by the type name.
    pub decode_include_suffix: String,
    /// Suffix of the generated encoder header, preceded by the type name.
    pub encode_include_suffix: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            raw_encoding: "raw".to_string(),
            compiled_encoding: "zcbor".to_string(),
            decode_entry_prefix: "cbor_decode_".to_string(),
            encode_entry_prefix: "cbor_encode_".to_string(),
            decode_include_suffix: "_decode.h".to_string(),
            encode_include_suffix: "_encode.h".to_string(),
        }
    }
}

impl CodegenConfig {
    /// Parse a YAML configuration. An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `CodegenError::Config` on invalid YAML, unknown keys, or an
    /// inconsistent profile (see [`CodegenConfig::check`]).
    pub fn from_yaml_str(yaml: &str, origin: &str) -> Result<Self, CodegenError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| CodegenError::Config {
                path: origin.to_string(),
                reason: format!("invalid YAML: {e}"),
            })?
        };
        config.check().map_err(|reason| CodegenError::Config {
            path: origin.to_string(),
            reason,
        })?;
        Ok(config)
    }

    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CodegenError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CodegenError::Config {
            path: path.display().to_string(),
            reason: format!("cannot read file: {e}"),
        })?;
        Self::from_yaml_str(&content, &path.display().to_string())
    }

    /// Check the profile for values that would make generated code ambiguous.
    pub fn check(&self) -> Result<(), String> {
        if self.raw_encoding.is_empty() || self.compiled_encoding.is_empty() {
            return Err("encoding directives must not be empty".to_string());
        }
        if self.raw_encoding == self.compiled_encoding {
            return Err(format!(
                "raw and compiled encoding share the directive '{}'",
                self.raw_encoding
            ));
        }
        if self.decode_entry_prefix.is_empty() || self.encode_entry_prefix.is_empty() {
            return Err("codec entry point prefixes must not be empty".to_string());
        }
        if self.decode_include_suffix == self.encode_include_suffix {
            return Err("decoder and encoder headers must have distinct suffixes".to_string());
        }
        Ok(())
    }
}
