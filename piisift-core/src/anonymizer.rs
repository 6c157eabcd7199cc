//! Placeholder substitution with a reversible replacement record
//!
//! Spans are replaced from the rightmost to the leftmost so that each
//! replacement leaves the offsets of all spans still to be processed valid.

use crate::{
    document::Document,
    error::{PipelineError, Result},
    span::Span,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder for labels without a dedicated one
pub const DEFAULT_PLACEHOLDER: &str = "[REDACTED]";

/// Label to placeholder table
pub const PLACEHOLDERS: [(&str, &str); 7] = [
    ("person", "[NAME]"),
    ("email", "[EMAIL]"),
    ("phone", "[PHONE]"),
    ("address", "[ADDRESS]"),
    ("date", "[DATE]"),
    ("bsn", "[ID]"),
    ("postalcode", "[POSTALCODE]"),
];

/// Placeholder for a (lowercase) label
pub fn placeholder_for(label: &str) -> &'static str {
    PLACEHOLDERS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, placeholder)| *placeholder)
        .unwrap_or(DEFAULT_PLACEHOLDER)
}

/// One replaced span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// Text that was removed
    pub original: String,
    /// Placeholder that took its place
    pub placeholder: String,
    /// `(start, end)` char offsets in the original text
    pub position: (usize, usize),
}

/// Replacements grouped by lowercase label, each group in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementRecord(BTreeMap<String, Vec<Replacement>>);

impl ReplacementRecord {
    /// Replacements made for `label`
    pub fn get(&self, label: &str) -> Option<&[Replacement]> {
        self.0.get(label).map(Vec::as_slice)
    }

    /// Iterate labels and their replacements
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Replacement])> {
        self.0.iter().map(|(label, r)| (label.as_str(), r.as_slice()))
    }

    /// Total number of replacements
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Whether nothing was replaced
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, label: String, replacement: Replacement) {
        self.0.entry(label).or_default().push(replacement);
    }

    /// Rebuild the original text from the anonymized text
    ///
    /// Fails if a placeholder is not found where the record says it is.
    pub fn restore(&self, anonymized: &str) -> Result<String> {
        let mut entries: Vec<&Replacement> = self.0.values().flatten().collect();
        entries.sort_by_key(|r| r.position.0);

        let doc = Document::new(anonymized);
        let mut restored = String::with_capacity(anonymized.len());
        // Char offset in `anonymized` up to which text has been copied
        let mut cursor = 0;
        // Anonymized offset minus original offset at the cursor
        let mut shift: isize = 0;

        for entry in entries {
            let (start, end) = entry.position;
            let at = start
                .checked_add_signed(shift)
                .filter(|&at| at >= cursor)
                .ok_or_else(|| restore_error(entry))?;
            let placeholder_len = entry.placeholder.chars().count();

            restored.push_str(doc.slice(cursor, at).ok_or_else(|| restore_error(entry))?);
            if doc.slice(at, at + placeholder_len) != Some(entry.placeholder.as_str()) {
                return Err(restore_error(entry));
            }
            restored.push_str(&entry.original);

            cursor = at + placeholder_len;
            shift += placeholder_len as isize - (end - start) as isize;
        }

        restored.push_str(doc.slice(cursor, doc.char_len()).unwrap_or_default());
        Ok(restored)
    }
}

fn restore_error(entry: &Replacement) -> PipelineError {
    PipelineError::PreconditionViolation(format!(
        "placeholder {} for [{}, {}) not found in anonymized text",
        entry.placeholder, entry.position.0, entry.position.1
    ))
}

/// Replace every span with its placeholder
///
/// Spans must lie within `text` and must not overlap; either violation is
/// reported as [`PipelineError::PreconditionViolation`] and nothing is
/// replaced.
pub fn anonymize(text: &str, spans: &[Span]) -> Result<(String, ReplacementRecord)> {
    let doc = Document::new(text);

    let mut ordered: Vec<&Span> = spans.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    // Validate everything up front so a failure never leaves a partial rewrite
    let mut replacements = Vec::with_capacity(ordered.len());
    let mut limit = doc.char_len();
    for span in ordered {
        let bytes = match (doc.byte_offset(span.start), doc.byte_offset(span.end)) {
            (Some(from), Some(to)) if span.start < span.end => from..to,
            _ => {
                return Err(PipelineError::PreconditionViolation(format!(
                    "span [{}, {}) is out of range for text of {} chars",
                    span.start,
                    span.end,
                    doc.char_len()
                )))
            }
        };
        if span.end > limit {
            return Err(PipelineError::PreconditionViolation(format!(
                "span [{}, {}) overlaps a later span",
                span.start, span.end
            )));
        }
        limit = span.start;
        replacements.push((span, bytes));
    }

    let mut anonymized = text.to_string();
    let mut record = ReplacementRecord::default();

    for (span, bytes) in replacements {
        let label = span.label.to_lowercase();
        let placeholder = placeholder_for(&label);

        // Everything left of the previous replacement still has its original offsets
        anonymized.replace_range(bytes.clone(), placeholder);
        record.push(
            label,
            Replacement {
                original: text[bytes].to_string(),
                placeholder: placeholder.to_string(),
                position: (span.start, span.end),
            },
        );
    }

    Ok((anonymized, record))
}
