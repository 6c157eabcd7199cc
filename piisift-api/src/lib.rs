//! Public API for piisift PII detection and anonymization
//!
//! This crate wraps the core pipeline in request/response types a host
//! service can expose directly, with timing and input validation handled
//! at this boundary.
//!
//! ```
//! use piisift_api::{AnonymizeRequest, PiiService};
//! use piisift_core::NoopDetector;
//!
//! let service = PiiService::new(NoopDetector)?;
//! let response = service.anonymize(AnonymizeRequest::new("Mail info@example.nl"))?;
//! assert_eq!(response.anonymized_text, "Mail [EMAIL]");
//! # Ok::<(), piisift_api::ApiError>(())
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod dto;
pub mod error;

use dto::elapsed_ms;
use error::Result;
use piisift_core::{DetectOptions, PiiPipeline, SpanDetector};
use std::time::Instant;

// Re-export key types
pub use config::{Config, ConfigBuilder};
pub use dto::{AnonymizeRequest, AnonymizeResponse, DetectRequest, DetectResponse, Input};
pub use error::ApiError;

/// Main entry point for PII detection
///
/// Holds a configured pipeline around one detector. Requests carry their own
/// threshold and chunk length; the service configuration supplies labels,
/// terminators and the defaults used by the `*_input` helpers.
pub struct PiiService<D> {
    pipeline: PiiPipeline<D>,
    config: Config,
}

impl<D: SpanDetector> PiiService<D> {
    /// Create a service with default configuration
    pub fn new(detector: D) -> Result<Self> {
        Self::with_config(detector, Config::default())
    }

    /// Create a service with custom configuration
    pub fn with_config(detector: D, config: Config) -> Result<Self> {
        let pipeline = PiiPipeline::with_config(detector, config.pipeline_config())?;
        tracing::debug!(
            detector = pipeline.detector().name(),
            labels = config.labels().len(),
            "PII service ready"
        );
        Ok(Self { pipeline, config })
    }

    /// Current configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Underlying pipeline
    pub fn pipeline(&self) -> &PiiPipeline<D> {
        &self.pipeline
    }

    /// Detect PII spans, optionally with categories
    pub fn detect(&self, request: DetectRequest) -> Result<DetectResponse> {
        let started = Instant::now();
        ensure_text(&request.text)?;

        let options = DetectOptions::new(request.threshold, request.max_length);
        let entities = self.pipeline.detect(&request.text, &options)?;
        let categorized = request
            .categorize
            .then(|| self.pipeline.categorize(&entities));

        Ok(DetectResponse {
            entity_count: entities.len(),
            entities,
            categorized,
            processing_time_ms: elapsed_ms(started),
        })
    }

    /// Detect PII and replace it with placeholders
    pub fn anonymize(&self, request: AnonymizeRequest) -> Result<AnonymizeResponse> {
        let started = Instant::now();
        ensure_text(&request.text)?;

        let options = DetectOptions::new(request.threshold, request.max_length);
        let result = self.pipeline.anonymize(&request.text, &options)?;

        Ok(AnonymizeResponse {
            anonymized_text: result.text,
            pii_detected: self.pipeline.categorize(&result.spans),
            replacements: result.record,
            entity_count: result.spans.len(),
            processing_time_ms: elapsed_ms(started),
        })
    }

    /// Detect over any input source using the configured defaults
    pub fn detect_input(&self, input: Input) -> Result<DetectResponse> {
        self.detect(DetectRequest {
            text: input.read_text()?,
            threshold: self.config.threshold,
            max_length: self.config.max_length,
            categorize: self.config.categorize,
        })
    }

    /// Anonymize any input source using the configured defaults
    pub fn anonymize_input(&self, input: Input) -> Result<AnonymizeResponse> {
        self.anonymize(AnonymizeRequest {
            text: input.read_text()?,
            threshold: self.config.threshold,
            max_length: self.config.max_length,
        })
    }
}

fn ensure_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput("text is required".to_string()));
    }
    Ok(())
}
