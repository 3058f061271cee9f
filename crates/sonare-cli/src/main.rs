//! Sonare CLI - design FIR kernels and run sample streams through them.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sonare")]
#[command(author, version, about = "Sonare FIR toolkit CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Design filter coefficients
    Design(commands::design::DesignArgs),

    /// Convolve a sample stream with a preset's coefficients
    Filter(commands::filter::FilterArgs),

    /// Low-pass and decimate a sample stream through an oversampling stage
    Oversample(commands::oversample::OversampleArgs),

    /// List, inspect and export design presets
    Presets(commands::presets::PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays a clean sample stream
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Design(args) => commands::design::run(args),
        Commands::Filter(args) => commands::filter::run(args),
        Commands::Oversample(args) => commands::oversample::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
