//! Deterministic pattern augmentation
//!
//! The model misses well-formed identifiers surprisingly often. After
//! merging, the whole document is scanned with a fixed list of patterns
//! and every match not already inside a detected span is added with full
//! confidence.

use crate::{
    document::Document,
    error::{PipelineError, Result},
    span::{sort_by_start, Span, SpanSource},
};
use regex::Regex;

/// Built-in patterns in the order they are applied
pub const BUILTIN_PATTERNS: [(&str, &str); 4] = [
    ("email", r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
    (
        "phone",
        r"(?:(?:\+31|0031)[ -]?|\b0)[1-9](?:[ -]?[0-9]){8}\b",
    ),
    ("bsn", r"\b[0-9]{9}\b"),
    ("postalcode", r"\b[1-9][0-9]{3}\s?[A-Z]{2}\b"),
];

/// A labeled pattern
#[derive(Debug, Clone)]
pub struct PiiPattern {
    label: &'static str,
    regex: Regex,
}

impl PiiPattern {
    /// Label given to matches
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Pattern source
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Adds pattern matches that the model did not cover
#[derive(Debug, Clone)]
pub struct PatternAugmenter {
    patterns: Vec<PiiPattern>,
}

impl PatternAugmenter {
    /// Compile the built-in patterns
    pub fn new() -> Result<Self> {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|&(label, source)| {
                Regex::new(source)
                    .map(|regex| PiiPattern { label, regex })
                    .map_err(|e| {
                        PipelineError::InvalidConfig(format!("pattern '{label}' does not compile: {e}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Patterns in application order
    pub fn patterns(&self) -> &[PiiPattern] {
        &self.patterns
    }

    /// Add uncovered pattern matches to `spans`
    ///
    /// A match is skipped only when it lies entirely inside one of the
    /// incoming spans; a partial overlap is still added. The result is
    /// stably sorted by start, so at equal starts incoming spans come
    /// before pattern spans, and pattern spans keep their declared order.
    pub fn augment(&self, doc: &Document<'_>, spans: Vec<Span>) -> Result<Vec<Span>> {
        let covered: Vec<(usize, usize)> = spans.iter().map(|s| (s.start, s.end)).collect();
        let is_covered = |start: usize, end: usize| {
            covered
                .iter()
                .any(|&(from, to)| start >= from && end <= to)
        };

        let mut augmented = spans;
        let before = augmented.len();

        for pattern in &self.patterns {
            for found in pattern.regex.find_iter(doc.text()) {
                let range = doc.char_range(found.range()).ok_or_else(|| {
                    PipelineError::PreconditionViolation(format!(
                        "pattern '{}' matched off a char boundary at byte {}",
                        pattern.label,
                        found.start()
                    ))
                })?;
                if is_covered(range.start, range.end) {
                    continue;
                }
                augmented.push(Span::new(
                    pattern.label,
                    found.as_str(),
                    range.start,
                    range.end,
                    1.0,
                    SpanSource::Pattern,
                ));
            }
        }

        tracing::debug!(added = augmented.len() - before, "pattern augmentation");
        sort_by_start(&mut augmented);
        Ok(augmented)
    }
}
