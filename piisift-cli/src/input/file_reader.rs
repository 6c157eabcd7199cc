//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// File reader with UTF-8 validation
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    /// Read a file, returning `None` when it holds only whitespace
    pub fn read_non_blank(path: &Path) -> Result<Option<String>> {
        let text = Self::read_text(path)?;
        if text.trim().is_empty() {
            log::warn!("Skipping blank file: {}", path.display());
            return Ok(None);
        }
        Ok(Some(text))
    }
}
