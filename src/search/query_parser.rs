//! Filter query parser for article search.
//!
//! Parses GitHub-style filter tokens mixed with free text:
//! - `category:troubleshooting` (or `cat:`) - Filter by category
//! - `difficulty:advanced` (or `level:`) - Filter by difficulty tier
//!
//! Everything that is not a recognised filter token stays in the free-text
//! part of the query.

use crate::models::{Difficulty, SearchFilter};

/// A search query split into free text and filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    /// Free text to score documents against.
    pub text: String,
    /// Filters extracted from `key:value` tokens.
    pub filter: SearchFilter,
}

/// Parses a query string into free text and a `SearchFilter`.
///
/// Later filter tokens override earlier ones. A difficulty value that is not a
/// known tier is dropped. Unknown keys are kept as free text, so `error:404`
/// still searches for `error` and `404`.
///
/// # Examples
///
/// ```
/// use kbindex::{Difficulty, parse_search_query};
///
/// let parsed = parse_search_query("category:troubleshooting level:advanced hooks failing");
/// assert_eq!(parsed.text, "hooks failing");
/// assert_eq!(parsed.filter.category.as_deref(), Some("troubleshooting"));
/// assert_eq!(parsed.filter.difficulty, Some(Difficulty::Advanced));
/// ```
#[must_use]
pub fn parse_search_query(query: &str) -> ParsedQuery {
    let mut filter = SearchFilter::new();
    let mut words: Vec<&str> = Vec::new();

    // Split on whitespace to get individual tokens
    for token in query.split_whitespace() {
        if !parse_token(token, &mut filter) {
            words.push(token);
        }
    }

    ParsedQuery {
        text: words.join(" "),
        filter,
    }
}

/// Parses a single filter token and updates the filter.
///
/// Returns false if the token is free text.
fn parse_token(token: &str, filter: &mut SearchFilter) -> bool {
    // Parse key:value tokens
    let Some((key, value)) = token.split_once(':') else {
        return false;
    };

    match key.to_lowercase().as_str() {
        "category" | "cat" => {
            if !value.is_empty() {
                filter.category = Some(value.to_lowercase());
            }
            true
        },
        "difficulty" | "level" => {
            if let Some(difficulty) = Difficulty::parse(value) {
                filter.difficulty = Some(difficulty);
            }
            true
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_query() {
        let parsed = parse_search_query("");
        assert!(parsed.text.is_empty());
        assert!(parsed.filter.is_empty());
    }

    #[test]
    fn test_plain_text_passes_through() {
        let parsed = parse_search_query("model not   found");
        assert_eq!(parsed.text, "model not found");
        assert!(parsed.filter.is_empty());
    }

    #[test]
    fn test_parse_category() {
        let parsed = parse_search_query("category:troubleshooting");
        assert_eq!(parsed.filter.category.as_deref(), Some("troubleshooting"));
        assert!(parsed.text.is_empty());
    }

    #[test]
    fn test_parse_category_alias() {
        let parsed = parse_search_query("cat:Models slow");
        assert_eq!(parsed.filter.category.as_deref(), Some("models"));
        assert_eq!(parsed.text, "slow");
    }

    #[test]
    fn test_parse_difficulty() {
        let parsed = parse_search_query("difficulty:intermediate");
        assert_eq!(parsed.filter.difficulty, Some(Difficulty::Intermediate));
    }

    #[test]
    fn test_unknown_difficulty_dropped() {
        let parsed = parse_search_query("level:expert git");
        assert!(parsed.filter.difficulty.is_none());
        assert_eq!(parsed.text, "git");
    }

    #[test]
    fn test_later_token_overrides() {
        let parsed = parse_search_query("cat:git cat:models");
        assert_eq!(parsed.filter.category.as_deref(), Some("models"));
    }

    #[test]
    fn test_unknown_key_stays_in_text() {
        let parsed = parse_search_query("error:404 hooks");
        assert_eq!(parsed.text, "error:404 hooks");
        assert!(parsed.filter.is_empty());
    }

    #[test]
    fn test_parse_case_insensitive_keys() {
        let parsed = parse_search_query("CATEGORY:Troubleshooting LEVEL:Beginner");
        assert_eq!(parsed.filter.category.as_deref(), Some("troubleshooting"));
        assert_eq!(parsed.filter.difficulty, Some(Difficulty::Beginner));
    }
}
