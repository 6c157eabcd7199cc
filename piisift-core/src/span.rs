//! Span types shared by every pipeline stage

use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels requested from the labeling capability by default
pub const DEFAULT_LABELS: [&str; 7] = [
    "person",
    "email",
    "phone",
    "address",
    "date",
    "organization",
    "location",
];

/// Where a span came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanSource {
    /// Predicted by the labeling capability
    Model,
    /// Matched by a deterministic pattern
    Pattern,
}

impl SpanSource {
    /// Lowercase tag used in serialized output
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanSource::Model => "model",
            SpanSource::Pattern => "pattern",
        }
    }
}

impl fmt::Display for SpanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labeled, scored character range of a document
///
/// `start` and `end` are half-open char offsets into the original,
/// unchunked document and `text` is exactly `document[start..end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Semantic type, e.g. `person` or `postalcode`
    pub label: String,
    /// Covered text
    pub text: String,
    /// First char (inclusive)
    pub start: usize,
    /// Last char (exclusive)
    pub end: usize,
    /// Confidence in `[0, 1]`
    pub score: f64,
    /// Provenance
    pub source: SpanSource,
}

impl Span {
    /// Create a span
    pub fn new(
        label: impl Into<String>,
        text: impl Into<String>,
        start: usize,
        end: usize,
        score: f64,
        source: SpanSource,
    ) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            start,
            end,
            score,
            source,
        }
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the range is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `[start, end)` lies entirely inside this span
    pub fn contains_range(&self, start: usize, end: usize) -> bool {
        start >= self.start && end <= self.end
    }

    /// Whether the two ranges share at least one char
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A span as returned by the labeling capability, local to the text it saw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Predicted label
    pub label: String,
    /// Text the capability reports for the span
    pub text: String,
    /// First char, relative to the labeled text
    pub start: usize,
    /// Last char (exclusive), relative to the labeled text
    pub end: usize,
    /// Confidence
    pub score: f64,
}

impl RawSpan {
    /// Create a raw span
    pub fn new(
        label: impl Into<String>,
        text: impl Into<String>,
        start: usize,
        end: usize,
        score: f64,
    ) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            start,
            end,
            score,
        }
    }
}

/// Stable sort by start; equal starts keep insertion order
pub fn sort_by_start(spans: &mut [Span]) {
    spans.sort_by_key(|span| span.start);
}

/// Whether spans are in ascending start order
pub fn is_sorted_by_start(spans: &[Span]) -> bool {
    spans.windows(2).all(|pair| pair[0].start <= pair[1].start)
}
