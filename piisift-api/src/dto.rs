//! Data Transfer Objects for API
//!
//! Request and response shapes a host service exposes for its `detect` and
//! `anonymize` endpoints.

use crate::error::{ApiError, Result};
use piisift_core::{
    config::{DEFAULT_MAX_LENGTH, DEFAULT_THRESHOLD},
    Categorized, ReplacementRecord, Span,
};
use std::fs;
use std::io::Read;
use std::path::PathBuf;

/// Input source for processing
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// Raw text string
    Text(String),
    /// File path
    File(PathBuf),
    /// Raw bytes (UTF-8)
    Bytes(Vec<u8>),
    /// Reader, e.g. stdin (not serializable)
    #[cfg_attr(feature = "serde", serde(skip))]
    Reader(Box<dyn Read + Send>),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // Only sizes; the content is the PII itself
            Input::Text(text) => f.debug_tuple("Text").field(&text.len()).finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Input::Reader(_) => f.write_str("Reader(..)"),
        }
    }
}

impl Input {
    /// Create input from text
    pub fn from_text(text: impl Into<String>) -> Self {
        Input::Text(text.into())
    }

    /// Create input from file path
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Input::File(path.into())
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Read the text content from the input
    pub fn read_text(self) -> Result<String> {
        match self {
            Input::Text(text) => Ok(text),
            Input::File(path) => fs::read_to_string(&path).map_err(ApiError::Io),
            Input::Bytes(bytes) => String::from_utf8(bytes).map_err(ApiError::Utf8),
            Input::Reader(mut reader) => {
                let mut buffer = String::new();
                reader.read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

#[cfg(feature = "serde")]
fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[cfg(feature = "serde")]
fn default_max_length() -> usize {
    DEFAULT_MAX_LENGTH
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

/// Detection request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectRequest {
    /// Text to analyze
    pub text: String,
    /// Confidence threshold in `[0, 1]`
    #[cfg_attr(feature = "serde", serde(default = "default_threshold"))]
    pub threshold: f64,
    /// Maximum chunk length in chars
    #[cfg_attr(feature = "serde", serde(default = "default_max_length"))]
    pub max_length: usize,
    /// Whether to include categorized PII
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub categorize: bool,
}

impl DetectRequest {
    /// Request with default parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            threshold: DEFAULT_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
            categorize: true,
        }
    }
}

/// Detection response
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectResponse {
    /// Detected spans sorted by start
    pub entities: Vec<Span>,
    /// Distinct texts per category, if requested
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub categorized: Option<Categorized>,
    /// Wall time of the call
    pub processing_time_ms: f64,
    /// Number of spans
    pub entity_count: usize,
}

/// Anonymization request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnonymizeRequest {
    /// Text to anonymize
    pub text: String,
    /// Detection threshold in `[0, 1]`
    #[cfg_attr(feature = "serde", serde(default = "default_threshold"))]
    pub threshold: f64,
    /// Maximum chunk length in chars
    #[cfg_attr(feature = "serde", serde(default = "default_max_length"))]
    pub max_length: usize,
}

impl AnonymizeRequest {
    /// Request with default parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            threshold: DEFAULT_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Anonymization response
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnonymizeResponse {
    /// Text with placeholders
    pub anonymized_text: String,
    /// Distinct texts per category
    pub pii_detected: Categorized,
    /// What was replaced, per label
    pub replacements: ReplacementRecord,
    /// Number of detected spans
    pub entity_count: usize,
    /// Wall time of the call
    pub processing_time_ms: f64,
}

/// Milliseconds rounded to two decimals
pub(crate) fn elapsed_ms(started: std::time::Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 100_000.0).round() / 100.0
}
