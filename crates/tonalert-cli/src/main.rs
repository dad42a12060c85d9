//! tonalert CLI - spectral peak warnings for WAV files.

mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tonalert")]
#[command(author, version, about = "Spectral peak monitor for WAV recordings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a WAV file and report whether its spectral peak exceeds the warning level
    Check(commands::check::CheckArgs),

    /// Display WAV file information
    Info(commands::info::InfoArgs),

    /// List analysis profiles or show one
    Profiles(commands::profiles::ProfilesArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Info(args) => commands::info::run(args).map(|()| ExitCode::SUCCESS),
        Commands::Profiles(args) => commands::profiles::run(args).map(|()| ExitCode::SUCCESS),
        Commands::Generate(args) => commands::generate::run(args).map(|()| ExitCode::SUCCESS),
    }
}
