//! Front matter block splitting.
//!
//! An article starts with a front matter block:
//! ```text
//! ---
//! slug: hooks-not-running
//! title: Hooks not running
//! category: troubleshooting
//! keywords: [hooks, not, running]
//! ---
//! # Hooks not running
//! ...
//! ```
//!
//! Both delimiters must sit on a line of their own. The block content is YAML.

use crate::{Error, Result};

/// The front matter delimiter.
pub const DELIMITER: &str = "---";

/// Splits `text` into the raw front matter and the body.
///
/// Leading whitespace (and a byte-order mark) before the opening delimiter is
/// ignored. Blank lines directly after the closing delimiter are dropped from
/// the body; everything else is returned verbatim.
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] if the opening delimiter is missing or
/// the block is never closed.
///
/// # Examples
///
/// ```rust
/// use kbindex::parser::split_front_matter;
///
/// let (meta, body) = split_front_matter("---\nslug: a\n---\nBody").unwrap();
/// assert_eq!(meta.trim(), "slug: a");
/// assert_eq!(body, "Body");
/// ```
pub fn split_front_matter(text: &str) -> Result<(&str, &str)> {
    let content = text.trim_start_matches('\u{feff}').trim_start();

    let Some(rest) = strip_opening_delimiter(content) else {
        return Err(Error::malformed(
            "missing front matter (expected a leading `---` line)",
        ));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let meta = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(['\r', '\n']);
            return Ok((meta, body));
        }
        offset += line.len();
    }

    Err(Error::malformed(
        "unterminated front matter (missing closing `---` line)",
    ))
}

/// Returns the text after the opening delimiter line, if present.
fn strip_opening_delimiter(content: &str) -> Option<&str> {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    (first.trim_end() == DELIMITER).then_some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let (meta, body) = split_front_matter("---\nslug: a\ntitle: A\n---\n# A\nText").unwrap();
        assert_eq!(meta, "slug: a\ntitle: A\n");
        assert_eq!(body, "# A\nText");
    }

    #[test]
    fn test_split_crlf() {
        let (meta, body) = split_front_matter("---\r\nslug: a\r\n---\r\n\r\nBody").unwrap();
        assert_eq!(meta, "slug: a\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_leading_whitespace() {
        let (meta, body) = split_front_matter("\n\n  ---\nslug: a\n---\nBody").unwrap();
        assert_eq!(meta, "slug: a\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_dashes_inside_values_do_not_close() {
        let text = "---\ntitle: a---b\n---\nBody";
        let (meta, body) = split_front_matter(text).unwrap();
        assert_eq!(meta, "title: a---b\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_horizontal_rule_in_body_is_kept() {
        let (_, body) = split_front_matter("---\nslug: a\n---\nOne\n---\nTwo").unwrap();
        assert_eq!(body, "One\n---\nTwo");
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = split_front_matter("---\n---\nBody").unwrap();
        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_text() {
        let (meta, body) = split_front_matter("---\nslug: a\n---").unwrap();
        assert_eq!(meta, "slug: a\n");
        assert!(body.is_empty());
    }

    #[test]
    fn test_missing_opening_delimiter() {
        let err = split_front_matter("# Just markdown").unwrap_err();
        assert!(matches!(err, Error::MalformedDocument { .. }));
        assert!(err.to_string().contains("missing front matter"));
    }

    #[test]
    fn test_unterminated_block() {
        let err = split_front_matter("---\nslug: a\ntitle: A\n").unwrap_err();
        assert!(err.to_string().contains("unterminated"));
    }

    #[test]
    fn test_four_dashes_is_not_a_delimiter() {
        assert!(split_front_matter("----\nslug: a\n----\n").is_err());
    }
}
