//! Overlap merging of span predictions
//!
//! Predictions that overlap or touch are collapsed into one span per
//! cluster. The merged span covers the union of the cluster, its text is
//! re-sliced from the document, and the highest-scoring member decides the
//! label.

use crate::{
    document::Document,
    error::{PipelineError, Result},
    span::{is_sorted_by_start, sort_by_start, Span},
};

/// Merge overlapping and touching spans
///
/// Input is sorted by start first if needed. The output is sorted,
/// non-overlapping, and merging it again returns it unchanged.
pub fn merge(doc: &Document<'_>, mut spans: Vec<Span>) -> Result<Vec<Span>> {
    if spans.is_empty() {
        return Ok(spans);
    }
    if !is_sorted_by_start(&spans) {
        tracing::debug!(spans = spans.len(), "sorting spans before merge");
        sort_by_start(&mut spans);
    }

    let mut merged = Vec::with_capacity(spans.len());
    let mut iter = spans.into_iter();
    let mut cluster = match iter.next() {
        Some(first) => first,
        None => return Ok(merged),
    };

    for candidate in iter {
        if candidate.start <= cluster.end {
            absorb(doc, &mut cluster, candidate)?;
        } else {
            merged.push(std::mem::replace(&mut cluster, candidate));
        }
    }
    merged.push(cluster);

    Ok(merged)
}

/// Extend `cluster` by an overlapping `candidate`
fn absorb(doc: &Document<'_>, cluster: &mut Span, candidate: Span) -> Result<()> {
    if candidate.end > cluster.end {
        cluster.end = candidate.end;
        cluster.text = doc
            .slice(cluster.start, cluster.end)
            .ok_or_else(|| {
                PipelineError::PreconditionViolation(format!(
                    "merged span [{}, {}) exceeds document of {} chars",
                    cluster.start,
                    cluster.end,
                    doc.char_len()
                ))
            })?
            .to_string();
    }

    if candidate.score > cluster.score {
        cluster.score = candidate.score;
        cluster.label = candidate.label;
        cluster.source = candidate.source;
    }

    Ok(())
}
