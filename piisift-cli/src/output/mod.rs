//! Output formatting module

use anyhow::{Context, Result};
use piisift_api::{AnonymizeResponse, DetectResponse};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write the detection result for one input
    fn write_detection(&mut self, source: &str, response: &DetectResponse) -> Result<()>;

    /// Write the anonymization result for one input
    fn write_anonymized(&mut self, source: &str, response: &AnonymizeResponse) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable spans or anonymized text
    Text,
    /// JSON array with one response object per file
    Json,
}

impl OutputFormat {
    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }
}

/// Build a formatter writing to `output`, or stdout when `None`
pub fn create_formatter(
    format: OutputFormat,
    output: Option<&Path>,
    show_source: bool,
    pretty_json: bool,
) -> Result<Box<dyn OutputFormatter>> {
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, show_source)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("TEXT"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_name("markdown"), None);
    }
}
