//! # Embed Subcommand
//!
//! Emits the canonical CBOR descriptor of a service as a C array
//! initializer, ready to be pasted after `static const uint8_t x[] = `.
//! `--json` emits the canonical JSON instead.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use xbot_codegen_schema::ServiceCompiler;

/// Arguments for the `xbot-codegen embed` subcommand.
#[derive(Args, Debug)]
pub struct EmbedArgs {
    /// Service schema file.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Emit the canonical JSON instead of the CBOR array.
    #[arg(long)]
    pub json: bool,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the embed subcommand.
///
/// Returns exit code 1 if the schema does not compile.
pub fn run_embed(args: &EmbedArgs, compiler: &ServiceCompiler) -> Result<u8> {
    let service = match compiler.compile_file(&args.schema) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!(kind = e.kind(), "{}: {e}", args.schema.display());
            return Ok(1);
        }
    };

    let rendered = if args.json {
        service.service_json().to_string()
    } else {
        service.service_cbor_c_array()
    };

    match &args.output {
        Some(out) => {
            std::fs::write(out, format!("{rendered}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(
                out = %out.display(),
                cbor_bytes = service.service_cbor().len(),
                "wrote embedded descriptor"
            );
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}
