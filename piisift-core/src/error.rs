//! Pipeline error types
//!
//! Errors are split by who is at fault: the caller (`InvalidInput`,
//! `InvalidConfig`), the external labeling capability (`DetectionFailure`)
//! or the pipeline itself (`PreconditionViolation`).

use thiserror::Error;

/// Boxed error returned by a [`SpanDetector`](crate::SpanDetector)
pub type DetectorError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by the detection pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Document text or per-call options rejected before any stage ran
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// The labeling capability failed or returned malformed spans
    #[error("detection failed on chunk {chunk}: {source}")]
    DetectionFailure {
        /// Index of the chunk being labeled when the failure occurred
        chunk: usize,
        /// Underlying cause
        #[source]
        source: DetectorError,
    },

    /// An internal stage received data that violates its contract
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// Configuration error
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Shorthand for an [`PipelineError::InvalidInput`] error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        PipelineError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller rather than the pipeline
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidInput { .. } | PipelineError::InvalidConfig(_)
        )
    }
}

/// Malformed output from the labeling capability
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedSpan {
    /// Offsets are empty, reversed or run past the chunk
    #[error("span [{start}, {end}) is out of range for chunk of {chunk_len} chars")]
    OutOfRange {
        /// Reported start
        start: usize,
        /// Reported end
        end: usize,
        /// Length of the chunk in chars
        chunk_len: usize,
    },

    /// Score is NaN or outside `[0, 1]`
    #[error("score {0} is outside [0, 1]")]
    InvalidScore(f64),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detection_failure_keeps_cause() {
        let err = PipelineError::DetectionFailure {
            chunk: 2,
            source: Box::new(MalformedSpan::InvalidScore(1.5)),
        };

        assert_eq!(
            err.to_string(),
            "detection failed on chunk 2: score 1.5 is outside [0, 1]"
        );
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("1.5"));
    }

    #[test]
    fn test_user_errors() {
        assert!(PipelineError::invalid_input("empty").is_user_error());
        assert!(PipelineError::InvalidConfig("x".into()).is_user_error());
        assert!(!PipelineError::PreconditionViolation("x".into()).is_user_error());
    }
}
