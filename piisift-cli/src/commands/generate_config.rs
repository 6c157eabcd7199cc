//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

const TEMPLATE: &str = r#"# piisift configuration

[detection]
# Spans scoring below this are dropped (0.0 - 1.0)
threshold = 0.3

# Texts are cut into chunks of at most this many characters
max_length = 512

# Labels requested from the detector
labels = ["person", "email", "phone", "address", "date", "organization", "location"]

# A chunk preferably ends right after one of these characters
terminators = [".", "!", "?"]

[output]
# "text" or "json"
default_format = "text"

# Include the per-category summary in detect output
categorize = true

# Pretty print JSON output
pretty_json = true

[performance]
# Process files in parallel from this many files on
parallel_min_files = 4

# Number of worker threads (0 = one per CPU)
worker_threads = 0

[lexicon]
# Score reported for every lexicon hit
score = 0.9

# Terms matched case-insensitively, per label
[lexicon.terms]
# person = ["Jan Jansen"]
# organization = ["Acme B.V."]
# location = ["Amsterdam", "Rotterdam"]
"#;

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        std::fs::write(&self.output, TEMPLATE)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template written to {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("1. Add your own terms under [lexicon.terms]");
        println!("2. Use it for processing:");
        println!(
            "   piisift anonymize -i cv.txt -c {}",
            self.output.display()
        );

        Ok(())
    }
}
