//! Configuration types for the pipeline

use crate::{
    chunker::DEFAULT_TERMINATORS,
    error::{PipelineError, Result},
    span::DEFAULT_LABELS,
};

/// Confidence threshold used when the caller does not pick one
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Maximum chunk length (chars) used when the caller does not pick one
pub const DEFAULT_MAX_LENGTH: usize = 512;

/// Per-call detection options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectOptions {
    /// Minimum score for model predictions, in `[0, 1]`
    pub threshold: f64,
    /// Maximum chunk length handed to the detector, in chars
    pub max_length: usize,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

impl DetectOptions {
    /// Options with the given threshold and chunk length
    pub fn new(threshold: f64, max_length: usize) -> Self {
        Self {
            threshold,
            max_length,
        }
    }

    /// Reject thresholds outside `[0, 1]` and a zero chunk length
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PipelineError::invalid_input(format!(
                "threshold {} is outside [0, 1]",
                self.threshold
            )));
        }
        if self.max_length == 0 {
            return Err(PipelineError::invalid_input(
                "max_length must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Settings fixed for the lifetime of a pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Candidate labels passed to the detector
    pub labels: Vec<String>,
    /// Characters the chunker prefers to cut after
    pub terminators: Vec<char>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            terminators: DEFAULT_TERMINATORS.to_vec(),
        }
    }
}

impl PipelineConfig {
    /// Replace the label set
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the terminator set
    pub fn with_terminators(mut self, terminators: impl IntoIterator<Item = char>) -> Self {
        self.terminators = terminators.into_iter().collect();
        self
    }

    /// Reject an empty label set
    pub fn validate(&self) -> Result<()> {
        if self.labels.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one label is required".to_string(),
            ));
        }
        Ok(())
    }
}
