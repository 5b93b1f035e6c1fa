//! # xbot-codegen-cli — Service Code Generation CLI
//!
//! Provides the `xbot-codegen` command-line interface used by the firmware
//! and host builds to turn service schemas into template input.
//!
//! ## Subcommands
//!
//! - `xbot-codegen ir`: Compile schemas and emit the template IR as JSON.
//! - `xbot-codegen check`: Compile schemas and report pass/fail.
//! - `xbot-codegen embed`: Emit the CBOR descriptor as a C array literal.
//!
//! ```bash
//! xbot-codegen ir services/EchoService.json --output-dir build/ir
//! xbot-codegen check services/*.json
//! xbot-codegen --config codec.yaml embed services/PetStore.json
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` at least one schema failed to compile, `2` operational
//! error (unreadable configuration, unwritable output).

pub mod check;
pub mod embed;
pub mod ir;

use std::path::Path;

use anyhow::{Context, Result};
use xbot_codegen_schema::{CodegenConfig, ServiceCompiler};

/// Build a compiler from the configuration file at `config`, or from the
/// default zcbor profile when no file is given.
pub fn load_compiler(config: Option<&Path>) -> Result<ServiceCompiler> {
    let config = match config {
        Some(path) => {
            let config = CodegenConfig::load(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded codec profile");
            config
        }
        None => CodegenConfig::default(),
    };
    ServiceCompiler::new(config).context("invalid codec profile")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_without_file() {
        let compiler = load_compiler(None).unwrap();
        assert_eq!(compiler.config(), &CodegenConfig::default());
    }

    #[test]
    fn profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.yaml");
        std::fs::write(&path, "encode_entry_prefix: pack_\n").unwrap();
        let compiler = load_compiler(Some(&path)).unwrap();
        assert_eq!(compiler.config().encode_entry_prefix, "pack_");
    }

    #[test]
    fn missing_profile_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_compiler(Some(&dir.path().join("absent.yaml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to load configuration"));
    }

    #[test]
    fn inconsistent_profile_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codec.yaml");
        std::fs::write(&path, "raw_encoding: zcbor\n").unwrap();
        let err = load_compiler(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("share the directive 'zcbor'"));
    }
}
