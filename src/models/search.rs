//! Search types and filters.

use super::{Difficulty, Document};
use serde::Serialize;

/// Filter criteria applied before scoring.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    /// Only documents in this category (compared case-insensitively).
    pub category: Option<String>,
    /// Only documents with this difficulty.
    pub difficulty: Option<Difficulty>,
}

impl SearchFilter {
    /// Creates an empty filter (matches all).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            category: None,
            difficulty: None,
        }
    }

    /// Restricts results to a category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restricts results to a difficulty tier.
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Returns true if the filter is empty (matches all).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category.is_none() && self.difficulty.is_none()
    }

    /// Returns true if `document` passes every active filter.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        if let Some(category) = &self.category {
            if !document.category.trim().eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        self.difficulty
            .is_none_or(|difficulty| document.difficulty == difficulty)
    }
}

/// A single ranked search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit<'a> {
    /// The matched document.
    pub document: &'a Document,
    /// Accumulated score (always positive).
    pub score: u32,
}
