//! Span post-processing for PII detection in free-form text
//!
//! A span-labeling model only sees bounded input and produces noisy,
//! overlapping predictions. This crate turns those predictions into a
//! clean, document-level list of PII spans and can rewrite the document
//! with placeholders:
//!
//! 1. [`chunker`] cuts the document at sentence-like boundaries
//! 2. [`detector`] runs a [`SpanDetector`] per chunk and lifts offsets
//! 3. [`merger`] collapses overlapping predictions
//! 4. [`patterns`] adds deterministic matches the model missed
//! 5. [`categorizer`] and [`anonymizer`] consume the final spans
//!
//! All offsets are char offsets into the original document.
//!
//! # Example
//!
//! ```rust
//! use piisift_core::{DetectOptions, LexiconDetector, PiiPipeline};
//!
//! let detector = LexiconDetector::default()
//!     .with_terms("person", &["Jan Jansen"])
//!     .unwrap();
//! let pipeline = PiiPipeline::new(detector).unwrap();
//!
//! let result = pipeline
//!     .anonymize("Jan Jansen, jan@example.nl", &DetectOptions::default())
//!     .unwrap();
//! assert_eq!(result.text, "[NAME], [EMAIL]");
//! ```

#![warn(missing_docs)]

pub mod anonymizer;
pub mod categorizer;
pub mod chunker;
pub mod config;
pub mod detector;
pub mod document;
pub mod error;
pub mod merger;
pub mod patterns;
pub mod pipeline;
pub mod span;

// Re-export key types
pub use anonymizer::{anonymize, Replacement, ReplacementRecord};
pub use categorizer::{categorize, Categorized, Category};
pub use chunker::{ChunkManager, TextChunk};
pub use config::{DetectOptions, PipelineConfig};
pub use detector::{LexiconDetector, NoopDetector, SpanDetector};
pub use document::Document;
pub use error::{DetectorError, PipelineError, Result};
pub use patterns::PatternAugmenter;
pub use pipeline::{Anonymized, PiiPipeline};
pub use span::{RawSpan, Span, SpanSource};
