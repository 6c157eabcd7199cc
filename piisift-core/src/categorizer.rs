//! Reporting categories for detected spans

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Semantic bucket used when reporting detected PII
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Person names
    Names,
    /// Email addresses
    Emails,
    /// Phone numbers
    Phones,
    /// Addresses and locations
    Addresses,
    /// Dates
    Dates,
    /// Organizations
    Organizations,
    /// Everything else, including national IDs and postal codes
    Other,
}

impl Category {
    /// All categories in reporting order
    pub const ALL: [Category; 7] = [
        Category::Names,
        Category::Emails,
        Category::Phones,
        Category::Addresses,
        Category::Dates,
        Category::Organizations,
        Category::Other,
    ];

    /// Classify a span by label, falling back to its text for emails
    pub fn of(span: &Span) -> Self {
        let label = span.label.to_lowercase();
        match label.as_str() {
            "person" => Category::Names,
            "email" => Category::Emails,
            _ if span.text.contains('@') => Category::Emails,
            "phone" | "phone_number" => Category::Phones,
            "address" | "location" => Category::Addresses,
            "date" => Category::Dates,
            "organization" => Category::Organizations,
            _ => Category::Other,
        }
    }

    /// Category name as reported
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Names => "names",
            Category::Emails => "emails",
            Category::Phones => "phones",
            Category::Addresses => "addresses",
            Category::Dates => "dates",
            Category::Organizations => "organizations",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinct span texts per category; every category is present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Categorized(BTreeMap<Category, BTreeSet<String>>);

impl Default for Categorized {
    fn default() -> Self {
        Self(Category::ALL.iter().map(|&c| (c, BTreeSet::new())).collect())
    }
}

impl Categorized {
    /// Texts in `category`
    pub fn get(&self, category: Category) -> &BTreeSet<String> {
        static EMPTY: BTreeSet<String> = BTreeSet::new();
        self.0.get(&category).unwrap_or(&EMPTY)
    }

    /// Iterate categories in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<String>)> {
        self.0.iter().map(|(c, texts)| (*c, texts))
    }

    /// Total number of distinct texts across categories
    pub fn total(&self) -> usize {
        self.0.values().map(BTreeSet::len).sum()
    }

    fn insert(&mut self, category: Category, text: &str) {
        self.0.entry(category).or_default().insert(text.to_string());
    }
}

/// Bucket spans into categories with set semantics
pub fn categorize(spans: &[Span]) -> Categorized {
    let mut categorized = Categorized::default();
    for span in spans {
        categorized.insert(Category::of(span), &span.text);
    }
    categorized
}
