//! carefinder-match
//!
//! Case-insensitive substring matching over a record's searchable fields, and
//! exact category matching. No tokenization, no fuzzy scoring.

use carefinder_core::traits::Discoverable;
use carefinder_core::types::CategoryFilter;

/// A trimmed, lower-cased needle, normalized once per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextQuery {
    needle: String,
}

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        Self { needle: raw.trim().to_lowercase() }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches<R: Discoverable + ?Sized>(&self, record: &R) -> bool {
        if self.is_empty() {
            return true;
        }
        record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

/// True if any searchable field contains `text` (trimmed, case-folded).
/// Empty or whitespace-only text matches everything.
pub fn matches<R: Discoverable + ?Sized>(record: &R, text: &str) -> bool {
    TextQuery::new(text).matches(record)
}

pub fn matches_category<R: Discoverable + ?Sized>(record: &R, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Key(key) => record.category_key() == key.as_str(),
    }
}
