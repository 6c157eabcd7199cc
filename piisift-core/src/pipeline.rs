//! Detection and anonymization entry points
//!
//! A [`PiiPipeline`] owns its detector. Build it once, share it by
//! reference, and drop it on shutdown; it keeps no state between calls.

use crate::{
    anonymizer::{self, ReplacementRecord},
    categorizer::{self, Categorized},
    chunker::ChunkManager,
    config::{DetectOptions, PipelineConfig},
    detector::{self, SpanDetector},
    document::Document,
    error::Result,
    merger,
    patterns::PatternAugmenter,
    span::Span,
};

/// Result of an anonymization call
#[derive(Debug, Clone, PartialEq)]
pub struct Anonymized {
    /// Text with every span replaced by its placeholder
    pub text: String,
    /// Spans that were detected, as reported by `detect`
    pub spans: Vec<Span>,
    /// What was replaced, per label
    pub record: ReplacementRecord,
}

/// Chunk → detect → merge → augment
#[derive(Debug)]
pub struct PiiPipeline<D> {
    detector: D,
    config: PipelineConfig,
    augmenter: PatternAugmenter,
}

impl<D: SpanDetector> PiiPipeline<D> {
    /// Create a pipeline with the default configuration
    pub fn new(detector: D) -> Result<Self> {
        Self::with_config(detector, PipelineConfig::default())
    }

    /// Create a pipeline with a custom configuration
    pub fn with_config(detector: D, config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            detector,
            config,
            augmenter: PatternAugmenter::new()?,
        })
    }

    /// The detector this pipeline calls
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// The pipeline configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Detect PII spans in `text`
    ///
    /// Blank text yields no spans and the detector is not called. The
    /// result is sorted by start. Spans added by patterns may partially
    /// overlap detected spans.
    pub fn detect(&self, text: &str, options: &DetectOptions) -> Result<Vec<Span>> {
        let doc = Document::new(text);
        if doc.is_blank() {
            return Ok(Vec::new());
        }
        options.validate()?;

        let chunker =
            ChunkManager::with_terminators(options.max_length, self.config.terminators.clone())?;
        let chunks = chunker.chunk_text(&doc);

        let detected = detector::detect_chunks(
            &self.detector,
            &doc,
            &chunks,
            &self.config.labels,
            options.threshold,
        )?;
        let detected_count = detected.len();

        let merged = merger::merge(&doc, detected)?;
        let merged_count = merged.len();

        let spans = self.augmenter.augment(&doc, merged)?;

        tracing::debug!(
            chars = doc.char_len(),
            chunks = chunks.len(),
            detected = detected_count,
            merged = merged_count,
            total = spans.len(),
            "detection finished"
        );
        Ok(spans)
    }

    /// Bucket spans into reporting categories
    pub fn categorize(&self, spans: &[Span]) -> Categorized {
        categorizer::categorize(spans)
    }

    /// Detect PII in `text` and replace it with placeholders
    pub fn anonymize(&self, text: &str, options: &DetectOptions) -> Result<Anonymized> {
        let spans = self.detect(text, options)?;
        let doc = Document::new(text);

        let (anonymized, record) = if has_overlap(&spans) {
            tracing::debug!("pattern spans overlap detected spans, merging before rewrite");
            let resolved = merger::merge(&doc, spans.clone())?;
            anonymizer::anonymize(text, &resolved)?
        } else {
            anonymizer::anonymize(text, &spans)?
        };

        Ok(Anonymized {
            text: anonymized,
            spans,
            record,
        })
    }
}

/// For start-sorted spans any overlap shows up between neighbours
fn has_overlap(spans: &[Span]) -> bool {
    spans.windows(2).any(|pair| pair[0].end > pair[1].start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        categorizer::Category,
        error::{DetectorError, PipelineError},
        span::{RawSpan, SpanSource},
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Returns fixed spans for the first chunk only
    struct StubDetector {
        spans: Vec<RawSpan>,
        calls: AtomicUsize,
    }

    impl StubDetector {
        fn new(spans: Vec<RawSpan>) -> Self {
            Self {
                spans,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl SpanDetector for StubDetector {
        fn predict(
            &self,
            _text: &str,
            _labels: &[String],
            _threshold: f64,
        ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if call == 0 { self.spans.clone() } else { Vec::new() })
        }
    }

    #[test]
    fn test_cv_header_scenario() {
        let text = "Jan Jansen, jan@example.nl, 06-12345678";
        let pipeline = PiiPipeline::new(StubDetector::new(vec![RawSpan::new(
            "person",
            "Jan Jansen",
            0,
            10,
            0.9,
        )]))
        .unwrap();

        let spans = pipeline.detect(text, &DetectOptions::default()).unwrap();
        let found: Vec<_> = spans
            .iter()
            .map(|s| (s.label.as_str(), s.text.as_str(), s.source))
            .collect();
        assert_eq!(
            found,
            vec![
                ("person", "Jan Jansen", SpanSource::Model),
                ("email", "jan@example.nl", SpanSource::Pattern),
                ("phone", "06-12345678", SpanSource::Pattern),
            ]
        );

        let categorized = pipeline.categorize(&spans);
        assert!(categorized.get(Category::Names).contains("Jan Jansen"));
        assert!(categorized.get(Category::Emails).contains("jan@example.nl"));
    }

    #[test]
    fn test_cv_header_anonymized() {
        let text = "Jan Jansen, jan@example.nl, 06-12345678";
        let pipeline = PiiPipeline::new(StubDetector::new(vec![RawSpan::new(
            "person",
            "Jan Jansen",
            0,
            10,
            0.9,
        )]))
        .unwrap();

        let result = pipeline.anonymize(text, &DetectOptions::default()).unwrap();
        assert_eq!(result.text, "[NAME], [EMAIL], [PHONE]");
        assert_eq!(result.record.restore(&result.text).unwrap(), text);
    }

    #[test]
    fn test_overlapping_predictions_merge() {
        let text = "abcdefghijklmnopqrstuvwxyz";
        let pipeline = PiiPipeline::new(StubDetector::new(vec![
            RawSpan::new("location", "fghij", 5, 10, 0.4),
            RawSpan::new("organization", "ijklmno", 8, 15, 0.9),
        ]))
        .unwrap();

        let spans = pipeline.detect(text, &DetectOptions::default()).unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!((spans[0].start, spans[0].end), (5, 15));
        assert_eq!(spans[0].label, "organization");
        assert_eq!(spans[0].text, "fghijklmno");
    }

    #[test]
    fn test_blank_text_skips_detector() {
        let detector = StubDetector::new(Vec::new());
        let pipeline = PiiPipeline::new(&detector).unwrap();

        assert!(pipeline.detect("", &DetectOptions::default()).unwrap().is_empty());
        assert!(pipeline
            .detect("  \n ", &DetectOptions::default())
            .unwrap()
            .is_empty());
        assert_eq!(detector.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_options() {
        let pipeline = PiiPipeline::new(StubDetector::new(Vec::new())).unwrap();
        let err = pipeline
            .detect("text", &DetectOptions::new(0.3, 0))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput { .. }));
    }

    #[test]
    fn test_anonymize_resolves_partial_overlap() {
        let text = "mail jan@example.nl";
        // Model only caught "jan", the email pattern then adds the full address
        let pipeline = PiiPipeline::new(StubDetector::new(vec![RawSpan::new(
            "person", "jan", 5, 8, 0.6,
        )]))
        .unwrap();

        let result = pipeline.anonymize(text, &DetectOptions::default()).unwrap();
        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.text, "mail [EMAIL]");
    }
}
