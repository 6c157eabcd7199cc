//! Configuration module
//!
//! Settings are read from a TOML file; every section and key is optional and
//! falls back to the pipeline defaults.

use crate::error::CliError;
use anyhow::{Context, Result};
use piisift_api::{ApiError, Config};
use piisift_core::{
    chunker::DEFAULT_TERMINATORS,
    config::{DEFAULT_MAX_LENGTH, DEFAULT_THRESHOLD},
    detector::lexicon::DEFAULT_LEXICON_SCORE,
    span::DEFAULT_LABELS,
    LexiconDetector,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Detection configuration
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// Built-in term detector
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

/// Detection-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum confidence for detected spans
    pub threshold: f64,

    /// Maximum chunk length in chars
    pub max_length: usize,

    /// Labels requested from the detector
    pub labels: Vec<String>,

    /// Characters the chunker prefers to cut after
    pub terminators: Vec<char>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_length: DEFAULT_MAX_LENGTH,
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            terminators: DEFAULT_TERMINATORS.to_vec(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Include categories in detect output
    pub categorize: bool,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            categorize: true,
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of files from which processing goes parallel
    pub parallel_min_files: usize,

    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            parallel_min_files: 4,
            worker_threads: 0,
        }
    }
}

impl PerformanceConfig {
    /// Worker threads with `0` resolved to the CPU count
    pub fn threads(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}

/// Term lists for the built-in lexicon detector
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LexiconConfig {
    /// Score reported for every lexicon hit
    pub score: f64,

    /// Label to terms
    pub terms: BTreeMap<String, Vec<String>>,
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            score: DEFAULT_LEXICON_SCORE,
            terms: BTreeMap::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path`, or defaults when no file is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Service configuration for these settings
    pub fn service_config(&self) -> Result<Config> {
        let config = Config::builder()
            .threshold(self.detection.threshold)
            .max_length(self.detection.max_length)
            .labels(self.detection.labels.iter().cloned())
            .terminators(self.detection.terminators.iter().copied())
            .categorize(self.output.categorize)
            .build()
            .map_err(|e| match e {
                ApiError::Config(msg) => CliError::ConfigError(msg),
                other => CliError::ConfigError(other.to_string()),
            })?;
        Ok(config)
    }

    /// Lexicon detector for the configured terms
    pub fn lexicon_detector(&self) -> Result<LexiconDetector> {
        let detector = LexiconDetector::from_map(&self.lexicon.terms, self.lexicon.score)
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        log::debug!(
            "Lexicon detector with {} label(s) and {} term(s)",
            detector.label_count(),
            self.lexicon.terms.values().map(Vec::len).sum::<usize>()
        );
        Ok(detector)
    }
}
