//! piisift command-line entry point

use clap::Parser;
use piisift_cli::commands::Commands;

/// Detect and anonymize personally identifiable information in text files
#[derive(Debug, Parser)]
#[command(name = "piisift", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    Cli::parse().command.execute()
}
