//! Advisor CLI - profile page builder.
//!
//! Provides commands for:
//! - `build`: Render advisor records to static HTML pages
//! - `fields`: Print the content stream configuration

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, FieldsArgs};
use output::Output;

/// Advisor - financial professional profile pages.
#[derive(Parser)]
#[command(name = "advisor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render records to HTML pages.
    Build(BuildArgs),
    /// Print the stream configuration as JSON.
    Fields(FieldsArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Build(args) if args.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Fields(args) => args.execute(),
    };

    if let Err(err) = result {
        output.failed(&err);
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO; otherwise `RUST_LOG`, falling back to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("info");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}
