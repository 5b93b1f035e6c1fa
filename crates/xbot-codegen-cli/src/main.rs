//! # xbot-codegen CLI entry point
//!
//! Parses command-line arguments, loads the codec profile, and dispatches
//! to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use xbot_codegen_cli::check::{run_check, CheckArgs};
use xbot_codegen_cli::embed::{run_embed, EmbedArgs};
use xbot_codegen_cli::ir::{run_ir, IrArgs};
use xbot_codegen_cli::load_compiler;

/// xbot service code generator.
///
/// Compiles service interface schemas into the IR used by the C++ code
/// templates, and emits the embedded service descriptor.
#[derive(Parser, Debug)]
#[command(name = "xbot-codegen", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML codec profile.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile schemas and emit the template IR as JSON.
    Ir(IrArgs),

    /// Compile schemas and report which ones pass.
    Check(CheckArgs),

    /// Emit the CBOR service descriptor as a C array literal.
    Embed(EmbedArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("xbot-codegen v{} starting", env!("CARGO_PKG_VERSION"));

    let compiler = match load_compiler(cli.config.as_deref()) {
        Ok(compiler) => compiler,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Ir(args) => run_ir(&args, &compiler),
        Commands::Check(args) => run_check(&args, &compiler),
        Commands::Embed(args) => run_embed(&args, &compiler),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
