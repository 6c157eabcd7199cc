//! The labeling capability seam and the chunk adapter around it
//!
//! The statistical model lives outside this crate. Anything that can label
//! a piece of text implements [`SpanDetector`]; [`detect_chunks`] runs it
//! over every chunk of a document and lifts chunk-local offsets to
//! document offsets.

use crate::{
    chunker::TextChunk,
    document::Document,
    error::{DetectorError, MalformedSpan, PipelineError, Result},
    span::{RawSpan, Span, SpanSource},
};
use std::sync::Arc;

pub mod lexicon;

pub use lexicon::LexiconDetector;

/// A capability that labels spans in a piece of text
///
/// Implementations must return offsets local to `text`, in chars.
pub trait SpanDetector: Send + Sync {
    /// Label `text` with any of `labels`, keeping predictions scoring at
    /// least `threshold`
    fn predict(
        &self,
        text: &str,
        labels: &[String],
        threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError>;

    /// Human-readable name for logs
    fn name(&self) -> &'static str {
        "detector"
    }
}

impl<D: SpanDetector + ?Sized> SpanDetector for &D {
    fn predict(
        &self,
        text: &str,
        labels: &[String],
        threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
        (**self).predict(text, labels, threshold)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<D: SpanDetector + ?Sized> SpanDetector for Box<D> {
    fn predict(
        &self,
        text: &str,
        labels: &[String],
        threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
        (**self).predict(text, labels, threshold)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<D: SpanDetector + ?Sized> SpanDetector for Arc<D> {
    fn predict(
        &self,
        text: &str,
        labels: &[String],
        threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
        (**self).predict(text, labels, threshold)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Detector that never finds anything; leaves detection to the patterns
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDetector;

impl SpanDetector for NoopDetector {
    fn predict(
        &self,
        _text: &str,
        _labels: &[String],
        _threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
        Ok(Vec::new())
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}

/// Run `detector` over every chunk and return document-level spans
///
/// Chunks are labeled one after another in document order. The first
/// failing or malformed chunk aborts the whole detection.
pub fn detect_chunks<D: SpanDetector + ?Sized>(
    detector: &D,
    doc: &Document<'_>,
    chunks: &[TextChunk<'_>],
    labels: &[String],
    threshold: f64,
) -> Result<Vec<Span>> {
    let mut spans = Vec::new();

    for (index, chunk) in chunks.iter().enumerate() {
        let raw_spans = detector
            .predict(chunk.text, labels, threshold)
            .map_err(|source| PipelineError::DetectionFailure {
                chunk: index,
                source,
            })?;

        tracing::trace!(
            detector = detector.name(),
            chunk = index,
            offset = chunk.start,
            spans = raw_spans.len(),
            "labeled chunk"
        );

        for raw in raw_spans {
            spans.push(lift(doc, chunk, raw).map_err(|malformed| {
                PipelineError::DetectionFailure {
                    chunk: index,
                    source: Box::new(malformed),
                }
            })?);
        }
    }

    Ok(spans)
}

/// Shift a chunk-local span to document offsets
fn lift(
    doc: &Document<'_>,
    chunk: &TextChunk<'_>,
    raw: RawSpan,
) -> std::result::Result<Span, MalformedSpan> {
    if raw.start >= raw.end || raw.end > chunk.len {
        return Err(MalformedSpan::OutOfRange {
            start: raw.start,
            end: raw.end,
            chunk_len: chunk.len,
        });
    }
    if !(0.0..=1.0).contains(&raw.score) {
        return Err(MalformedSpan::InvalidScore(raw.score));
    }

    let start = chunk.start + raw.start;
    let end = chunk.start + raw.end;
    let text = doc.slice(start, end).ok_or(MalformedSpan::OutOfRange {
        start: raw.start,
        end: raw.end,
        chunk_len: chunk.len,
    })?;
    if text != raw.text {
        tracing::debug!(start, end, "reported span text differs from document, using document text");
    }

    Ok(Span {
        label: raw.label,
        text: text.to_string(),
        start,
        end,
        score: raw.score,
        source: SpanSource::Model,
    })
}
