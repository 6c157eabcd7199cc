//! Gazetteer detector
//!
//! Labels known terms (names, employers, cities) with a fixed score. Useful
//! as a deterministic stand-in for the model and for organisation-specific
//! lists the model keeps missing.

use super::SpanDetector;
use crate::{
    document::Document,
    error::{DetectorError, PipelineError, Result},
    span::RawSpan,
};
use regex::Regex;
use std::collections::BTreeMap;

/// Score given to lexicon hits unless configured otherwise
pub const DEFAULT_LEXICON_SCORE: f64 = 0.9;

#[derive(Debug, Clone)]
struct LexiconEntry {
    label: String,
    pattern: Regex,
}

/// Case-insensitive whole-word term matcher
#[derive(Debug, Clone)]
pub struct LexiconDetector {
    entries: Vec<LexiconEntry>,
    score: f64,
}

impl Default for LexiconDetector {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            score: DEFAULT_LEXICON_SCORE,
        }
    }
}

impl LexiconDetector {
    /// Empty lexicon reporting hits with `score`
    pub fn new(score: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&score) {
            return Err(PipelineError::InvalidConfig(format!(
                "lexicon score {score} is outside [0, 1]"
            )));
        }
        Ok(Self {
            entries: Vec::new(),
            score,
        })
    }

    /// Build from a label to terms map
    pub fn from_map(terms: &BTreeMap<String, Vec<String>>, score: f64) -> Result<Self> {
        terms
            .iter()
            .try_fold(Self::new(score)?, |lexicon, (label, terms)| {
                lexicon.with_terms(label, terms)
            })
    }

    /// Add terms for `label`; blank terms are ignored
    pub fn with_terms<S: AsRef<str>>(mut self, label: &str, terms: &[S]) -> Result<Self> {
        let mut terms: Vec<&str> = terms
            .iter()
            .map(|t| t.as_ref().trim())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(self);
        }
        // Longest first so "Jan Jansen" wins over "Jan"
        terms.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));

        let alternatives: Vec<String> = terms.iter().map(|t| word_pattern(t)).collect();
        let source = format!("(?i)(?:{})", alternatives.join("|"));
        let pattern = Regex::new(&source).map_err(|e| {
            PipelineError::InvalidConfig(format!("lexicon for '{label}' does not compile: {e}"))
        })?;

        self.entries.push(LexiconEntry {
            label: label.to_lowercase(),
            pattern,
        });
        Ok(self)
    }

    /// Number of labels with at least one term
    pub fn label_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether no terms are configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Escape a term and anchor it on word boundaries where that makes sense
fn word_pattern(term: &str) -> String {
    let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
    let mut pattern = String::new();
    if is_word(term.chars().next()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if is_word(term.chars().last()) {
        pattern.push_str(r"\b");
    }
    pattern
}

impl SpanDetector for LexiconDetector {
    fn predict(
        &self,
        text: &str,
        labels: &[String],
        threshold: f64,
    ) -> std::result::Result<Vec<RawSpan>, DetectorError> {
        if self.score < threshold {
            return Ok(Vec::new());
        }

        let doc = Document::new(text);
        let mut spans = Vec::new();

        for entry in &self.entries {
            if !labels.iter().any(|l| l.eq_ignore_ascii_case(&entry.label)) {
                continue;
            }
            for found in entry.pattern.find_iter(text) {
                let range = doc
                    .char_range(found.range())
                    .ok_or("lexicon match is not on a char boundary")?;
                spans.push(RawSpan::new(
                    entry.label.clone(),
                    found.as_str(),
                    range.start,
                    range.end,
                    self.score,
                ));
            }
        }

        spans.sort_by_key(|s| s.start);
        Ok(spans)
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_whole_words_case_insensitively() {
        let lexicon = LexiconDetector::default()
            .with_terms("person", &["Jan Jansen", "Jan"])
            .unwrap();

        let spans = lexicon
            .predict("jan jansen met Jan, niet Janssen", &labels(&["person"]), 0.3)
            .unwrap();

        let found: Vec<_> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(found, vec![(0, 10), (15, 18)]);
        assert_eq!(spans[0].text, "jan jansen");
        assert_eq!(spans[0].score, DEFAULT_LEXICON_SCORE);
    }

    #[test]
    fn test_only_requested_labels() {
        let lexicon = LexiconDetector::default()
            .with_terms("organization", &["Google"])
            .unwrap()
            .with_terms("location", &["Amsterdam"])
            .unwrap();

        let spans = lexicon
            .predict("Google Amsterdam", &labels(&["location"]), 0.3)
            .unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].label, "location");
    }

    #[test]
    fn test_threshold_above_score_suppresses_hits() {
        let lexicon = LexiconDetector::new(0.5)
            .unwrap()
            .with_terms("person", &["Piet"])
            .unwrap();
        assert!(lexicon
            .predict("Piet", &labels(&["person"]), 0.6)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        let lexicon = LexiconDetector::default()
            .with_terms("location", &["Utrecht"])
            .unwrap();
        let spans = lexicon
            .predict("Café in Utrecht", &labels(&["location"]), 0.3)
            .unwrap();
        assert_eq!((spans[0].start, spans[0].end), (8, 15));
    }

    #[test]
    fn test_from_map_and_invalid_score() {
        let mut terms = BTreeMap::new();
        terms.insert("person".to_string(), vec!["Jan".to_string(), " ".to_string()]);
        terms.insert("date".to_string(), Vec::new());

        let lexicon = LexiconDetector::from_map(&terms, 0.8).unwrap();
        assert_eq!(lexicon.label_count(), 1);
        assert!(LexiconDetector::new(1.5).is_err());
    }
}
