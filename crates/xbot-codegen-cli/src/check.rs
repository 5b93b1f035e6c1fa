//! # Check Subcommand
//!
//! Compiles service schemas without emitting anything and reports which
//! ones pass. Intended for CI, where a malformed schema should fail the
//! build before any template runs.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use xbot_codegen_schema::ServiceCompiler;

/// Arguments for the `xbot-codegen check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Service schema files to check.
    #[arg(value_name = "SCHEMA", required = true)]
    pub schemas: Vec<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Result of checking a batch of schemas.
#[derive(Debug, Default, Serialize)]
pub struct CheckReport {
    pub total: usize,
    pub passed: usize,
    pub failures: Vec<CheckFailure>,
}

/// One schema that failed to compile.
#[derive(Debug, Serialize)]
pub struct CheckFailure {
    pub schema: PathBuf,
    /// Error kind, e.g. `DuplicateIdError`.
    pub kind: &'static str,
    pub message: String,
}

/// Compile every schema in `schemas` and collect the outcome.
pub fn check_schemas(schemas: &[PathBuf], compiler: &ServiceCompiler) -> CheckReport {
    let mut report = CheckReport {
        total: schemas.len(),
        ..CheckReport::default()
    };
    for path in schemas {
        match compiler.compile_file(path) {
            Ok(service) => {
                tracing::debug!(schema = %path.display(), class = service.class_name(), "schema ok");
                report.passed += 1;
            }
            Err(e) => report.failures.push(CheckFailure {
                schema: path.clone(),
                kind: e.kind(),
                message: e.to_string(),
            }),
        }
    }
    report
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if every schema compiles, 1 otherwise.
pub fn run_check(args: &CheckArgs, compiler: &ServiceCompiler) -> Result<u8> {
    let report = check_schemas(&args.schemas, compiler);

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize check report")?;
        println!("{rendered}");
    } else {
        for failure in &report.failures {
            println!("  FAIL: {}: {}", failure.schema.display(), failure.message);
        }
        println!("Schemas: {}/{} passed", report.passed, report.total);
    }

    if report.failures.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}
