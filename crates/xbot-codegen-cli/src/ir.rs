//! # IR Subcommand
//!
//! Compiles service schemas and emits the IR the code templates consume,
//! either to stdout or as `<class_name>.ir.json` files in an output
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use xbot_codegen_schema::{Service, ServiceCompiler};

/// Arguments for the `xbot-codegen ir` subcommand.
#[derive(Args, Debug)]
pub struct IrArgs {
    /// Service schema files to compile.
    #[arg(value_name = "SCHEMA", required = true)]
    pub schemas: Vec<PathBuf>,

    /// Write one `<class_name>.ir.json` per schema into this directory
    /// instead of printing to stdout.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Emit single-line JSON.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the ir subcommand.
///
/// Every schema is attempted even after a failure. Returns exit code 1 if
/// any schema failed to compile.
pub fn run_ir(args: &IrArgs, compiler: &ServiceCompiler) -> Result<u8> {
    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }

    let mut failed = 0usize;
    for path in &args.schemas {
        let service = match compiler.compile_file(path) {
            Ok(service) => service,
            Err(e) => {
                tracing::error!(kind = e.kind(), "{}: {e}", path.display());
                failed += 1;
                continue;
            }
        };

        let rendered = render_ir(&service, args.compact)?;
        match &args.output_dir {
            Some(dir) => {
                let out = write_ir(dir, &service, &rendered)?;
                tracing::info!(schema = %path.display(), out = %out.display(), "wrote IR");
            }
            None => println!("{rendered}"),
        }
    }

    if failed > 0 {
        tracing::error!("{failed} of {} schema(s) failed to compile", args.schemas.len());
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Serialize the IR of `service` as JSON.
pub fn render_ir(service: &Service, compact: bool) -> Result<String> {
    let rendered = if compact {
        serde_json::to_string(service)
    } else {
        serde_json::to_string_pretty(service)
    };
    rendered.with_context(|| format!("failed to serialize IR of {}", service.class_name()))
}

fn write_ir(dir: &Path, service: &Service, rendered: &str) -> Result<PathBuf> {
    let out = dir.join(format!("{}.ir.json", service.class_name()));
    std::fs::write(&out, format!("{rendered}\n"))
        .with_context(|| format!("failed to write {}", out.display()))?;
    Ok(out)
}
