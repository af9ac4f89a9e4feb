//! texsnap CLI - LaTeX to image renderer.
//!
//! Provides commands for:
//! - `render`: Render one expression and save it as SVG or PNG
//! - `session`: Drive the renderer interactively from stdin

mod commands;
mod engine;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SessionArgs};
use output::Output;

/// texsnap - Render LaTeX math to SVG and PNG.
#[derive(Parser)]
#[command(name = "texsnap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an expression and save it.
    Render(RenderArgs),
    /// Read markup and commands from stdin.
    Session(SessionArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Session(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");
    let result = match cli.command {
        Commands::Render(args) => rt.block_on(args.execute()),
        Commands::Session(args) => rt.block_on(args.execute()),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
