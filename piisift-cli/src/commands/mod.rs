//! CLI command implementations

use anyhow::{Context, Result};
use clap::Subcommand;
use piisift_core::{
    anonymizer::{DEFAULT_PLACEHOLDER, PLACEHOLDERS},
    patterns::BUILTIN_PATTERNS,
    span::DEFAULT_LABELS,
};

pub mod anonymize;
pub mod detect;
pub mod generate_config;
pub mod run;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Detect PII spans in text files
    Detect(detect::DetectArgs),

    /// Replace PII in text files with placeholders
    Anonymize(anonymize::AnonymizeArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },

    /// Write a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),
}

/// List subcommands
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ListCommands {
    /// List detector and pattern labels
    Labels,

    /// List anonymization placeholders
    Placeholders,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Detect(args) => args.execute(),
            Commands::Anonymize(args) => args.execute(),
            Commands::List { subcommand } => {
                print!("{}", subcommand.render());
                Ok(())
            }
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

impl ListCommands {
    /// Listing printed for this subcommand
    pub fn render(self) -> String {
        let mut out = String::new();
        match self {
            ListCommands::Labels => {
                out.push_str("Detector labels (default):\n");
                for label in DEFAULT_LABELS {
                    out.push_str(&format!("  {label}\n"));
                }
                out.push_str("Pattern labels:\n");
                for (label, _) in BUILTIN_PATTERNS {
                    out.push_str(&format!("  {label}\n"));
                }
            }
            ListCommands::Placeholders => {
                out.push_str("Placeholders:\n");
                for (label, placeholder) in PLACEHOLDERS {
                    out.push_str(&format!("  {label:<12} {placeholder}\n"));
                }
                out.push_str(&format!("  {:<12} {}\n", "(other)", DEFAULT_PLACEHOLDER));
            }
            ListCommands::Formats => {
                out.push_str("Available output formats:\n");
                out.push_str("  text - Spans one per line, or the anonymized text\n");
                out.push_str("  json - JSON array with one response per file\n");
            }
        }
        out
    }
}

/// Initialize logging based on verbosity level
///
/// Called once per process; a second call fails because the global logger
/// is already set.
pub fn init_logging(verbose: u8, quiet: bool) -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level(verbose, quiet)),
    )
    .try_init()
    .context("Failed to initialize logging")
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0, false), "warn");
        assert_eq!(log_level(1, false), "info");
        assert_eq!(log_level(2, false), "debug");
        assert_eq!(log_level(5, false), "trace");
        assert_eq!(log_level(3, true), "error");
    }

    #[test]
    fn test_logging_initializes_once() {
        let _ = init_logging(0, true);
        assert!(init_logging(0, true).is_err());
    }

    #[test]
    fn test_list_labels() {
        let out = ListCommands::Labels.render();
        assert!(out.contains("  person\n"));
        assert!(out.contains("  bsn\n"));
        assert!(out.contains("  postalcode\n"));
    }

    #[test]
    fn test_list_placeholders() {
        let out = ListCommands::Placeholders.render();
        assert!(out.contains("[NAME]"));
        assert!(out.contains("[ID]"));
        assert!(out.contains("(other)      [REDACTED]"));
    }

    #[test]
    fn test_list_formats() {
        let out = ListCommands::Formats.render();
        assert!(out.contains("text"));
        assert!(out.contains("json"));
    }
}
