//! Document types and difficulty tiers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical slug shape: lowercase alphanumeric words joined by single hyphens.
static SLUG_PATTERN: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").ok());

/// Returns true if `slug` is lowercase and hyphen-separated.
///
/// Non-canonical slugs are still accepted by the parser; this check only
/// drives a warning at ingestion time.
#[must_use]
pub fn is_canonical_slug(slug: &str) -> bool {
    SLUG_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(slug))
}

/// Difficulty tier of an article.
///
/// Tiers are ordered: `Beginner < Intermediate < Advanced`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry-level article.
    #[default]
    Beginner,
    /// Assumes familiarity with the basics.
    Intermediate,
    /// Deep-dive material.
    Advanced,
}

impl Difficulty {
    /// Returns all tiers in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Beginner, Self::Intermediate, Self::Advanced]
    }

    /// Returns the tier as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parses a tier from a string (case-insensitive, surrounding whitespace ignored).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A parsed troubleshooting article.
///
/// Constructed once by [`crate::parser::parse_document`] and never mutated
/// afterwards. A [`crate::Corpus`] owns every document it was loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within a corpus.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Category slug (open set, see [`super::CategoryInfo`]).
    pub category: String,
    /// Difficulty tier.
    pub difficulty: Difficulty,
    /// Search boost terms, matched case-insensitively.
    pub keywords: Vec<String>,
    /// Commands and shortcuts mentioned by the article, in source order.
    pub commands: Vec<String>,
    /// Slugs of related articles. May reference slugs absent from the corpus.
    pub related: Vec<String>,
    /// Short description derived from the body.
    pub summary: String,
    /// Article body with the front matter removed.
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hooks-not-running", true ; "hyphenated")]
    #[test_case("git", true ; "single word")]
    #[test_case("mcp-v2-setup", true ; "digits")]
    #[test_case("Hooks-Not-Running", false ; "uppercase")]
    #[test_case("hooks--running", false ; "double hyphen")]
    #[test_case("-hooks", false ; "leading hyphen")]
    #[test_case("hooks_running", false ; "underscore")]
    #[test_case("", false ; "empty")]
    fn test_is_canonical_slug(slug: &str, expected: bool) {
        assert_eq!(is_canonical_slug(slug), expected);
    }

    #[test]
    fn test_difficulty_ordering() {
        assert!(Difficulty::Beginner < Difficulty::Intermediate);
        assert!(Difficulty::Intermediate < Difficulty::Advanced);
        assert_eq!(Difficulty::default(), Difficulty::Beginner);
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("ADVANCED"), Some(Difficulty::Advanced));
        assert_eq!(Difficulty::parse(" intermediate "), Some(Difficulty::Intermediate));
        assert_eq!(Difficulty::parse("expert"), None);
    }

    #[test]
    fn test_difficulty_as_str_roundtrips() {
        for tier in Difficulty::all() {
            assert_eq!(Difficulty::parse(tier.as_str()), Some(*tier));
            assert_eq!(tier.to_string(), tier.as_str());
        }
    }
}
