//! High-level configuration API

use crate::error::{ApiError, Result};
use piisift_core::{
    chunker::DEFAULT_TERMINATORS,
    config::{DEFAULT_MAX_LENGTH, DEFAULT_THRESHOLD},
    span::DEFAULT_LABELS,
    DetectOptions, PipelineConfig,
};

/// High-level configuration for detection requests
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Default confidence threshold for requests
    pub threshold: f64,
    /// Default maximum chunk length for requests, in chars
    pub max_length: usize,
    /// Whether detect responses include categories by default
    pub categorize: bool,
    labels: Vec<String>,
    terminators: Vec<char>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
            categorize: true,
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            terminators: DEFAULT_TERMINATORS.to_vec(),
        }
    }
}

impl Config {
    /// Create a builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Labels requested from the detector
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Chunk terminators
    pub fn terminators(&self) -> &[char] {
        &self.terminators
    }

    /// Detection options carrying the configured defaults
    pub fn detect_options(&self) -> DetectOptions {
        DetectOptions::new(self.threshold, self.max_length)
    }

    pub(crate) fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_labels(self.labels.iter().cloned())
            .with_terminators(self.terminators.iter().copied())
    }
}

/// Configuration builder
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the default threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set the default maximum chunk length
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.config.max_length = max_length;
        self
    }

    /// Set whether detect responses are categorized by default
    pub fn categorize(mut self, categorize: bool) -> Self {
        self.config.categorize = categorize;
        self
    }

    /// Replace the label set
    pub fn labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the chunk terminators
    pub fn terminators(mut self, terminators: impl IntoIterator<Item = char>) -> Self {
        self.config.terminators = terminators.into_iter().collect();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        self.config
            .detect_options()
            .validate()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        if self.config.labels.is_empty() {
            return Err(ApiError::Config("at least one label is required".to_string()));
        }
        Ok(self.config)
    }
}
