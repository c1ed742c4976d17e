//! Article parsing.
//!
//! Turns the raw text of one article into a [`Document`]. Parsing is a pure
//! transformation: no I/O, no shared state.
//!
//! # Front matter fields
//!
//! | Field | Required | Shape | Default |
//! |-------|----------|-------|---------|
//! | `slug` | yes | string | |
//! | `title` | yes | string | |
//! | `category` | yes | string | |
//! | `difficulty` | no | `beginner` / `intermediate` / `advanced` | `beginner` |
//! | `keywords` | no | list, or space/comma separated string | empty |
//! | `commands` | no | list, or a single string | empty |
//! | `related` (alias `related_topics`) | no | list, or space/comma separated string | empty |
//!
//! Lists may be written inline (`[a, b]`, `[]`) or as YAML block lists. A key
//! with nothing after the colon is an empty list.

mod front_matter;
mod summary;

pub use front_matter::{DELIMITER, split_front_matter};
pub use summary::extract_summary;

use crate::models::{Difficulty, Document, is_canonical_slug};
use crate::{Error, Result};
use serde_json::Value;

/// How a scalar string is interpreted when a list was expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScalarList {
    /// Split on whitespace and commas (`keywords: hooks git`).
    Words,
    /// Keep the whole string as one entry (`commands: git status`).
    Single,
}

/// Parses one article into a [`Document`].
///
/// # Errors
///
/// Returns [`Error::MalformedDocument`] when:
/// - the front matter block is missing or unterminated
/// - the front matter is not valid YAML, or not a mapping
/// - `slug`, `title` or `category` is absent or blank
/// - a list field holds a nested mapping
///
/// # Examples
///
/// ```rust
/// use kbindex::{Difficulty, parse_document};
///
/// let doc = parse_document(
///     "---\nslug: git-errors\ntitle: Git errors\ncategory: troubleshooting\n---\nBody",
/// )?;
/// assert_eq!(doc.slug, "git-errors");
/// assert_eq!(doc.difficulty, Difficulty::Beginner);
/// assert!(doc.keywords.is_empty());
/// # Ok::<(), kbindex::Error>(())
/// ```
pub fn parse_document(text: &str) -> Result<Document> {
    let (raw_meta, body) = split_front_matter(text)?;
    let metadata = parse_metadata(raw_meta)?;

    let slug = required_string(&metadata, "slug")?;
    let title = required_string(&metadata, "title")?;
    let category = required_string(&metadata, "category")?;

    if !is_canonical_slug(&slug) {
        tracing::warn!(slug = %slug, "Slug is not lowercase and hyphen-separated");
    }

    let difficulty = parse_difficulty(&metadata, &slug);
    let keywords = list_field(&metadata, &["keywords"], ScalarList::Words)?;
    let commands = list_field(&metadata, &["commands"], ScalarList::Single)?;
    let related = list_field(&metadata, &["related", "related_topics"], ScalarList::Words)?;

    Ok(Document {
        slug,
        title,
        category,
        difficulty,
        keywords,
        commands,
        related,
        summary: extract_summary(body),
        body: body.to_string(),
    })
}

/// Parses the YAML block into a JSON value map.
fn parse_metadata(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    let value: Value = serde_yaml_ng::from_str(raw)
        .map_err(|e| Error::malformed(format!("invalid YAML front matter: {e}")))?;

    match value {
        Value::Object(_) => Ok(value),
        Value::Null => Ok(Value::Object(serde_json::Map::new())),
        _ => Err(Error::malformed("front matter must be a key: value mapping")),
    }
}

/// Renders a scalar YAML value as a string.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads a required, non-blank string field.
fn required_string(metadata: &Value, key: &str) -> Result<String> {
    metadata
        .get(key)
        .and_then(scalar_to_string)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::malformed(format!("missing required field `{key}`")))
}

/// Reads the difficulty tier, falling back to the default on absent or unknown values.
fn parse_difficulty(metadata: &Value, slug: &str) -> Difficulty {
    let Some(raw) = metadata.get("difficulty").and_then(scalar_to_string) else {
        tracing::debug!(slug = %slug, "No difficulty set, using default");
        return Difficulty::default();
    };

    Difficulty::parse(&raw).unwrap_or_else(|| {
        tracing::warn!(
            slug = %slug,
            difficulty = %raw,
            "Unrecognized difficulty, using default"
        );
        Difficulty::default()
    })
}

/// Reads a list field from the first key present among `keys`.
fn list_field(metadata: &Value, keys: &[&str], scalar: ScalarList) -> Result<Vec<String>> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| metadata.get(*key).map(|value| (*key, value)))
    else {
        return Ok(Vec::new());
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .iter()
            .filter_map(scalar_to_string)
            .filter(|s| !s.is_empty())
            .collect()),
        Value::String(s) => Ok(split_scalar(s, scalar)),
        Value::Number(_) | Value::Bool(_) => Ok(scalar_to_string(value).into_iter().collect()),
        Value::Object(_) => Err(Error::malformed(format!(
            "field `{key}` must be a list, not a mapping"
        ))),
    }
}

/// Splits a scalar string into list entries.
fn split_scalar(s: &str, scalar: ScalarList) -> Vec<String> {
    match scalar {
        ScalarList::Words => s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
        ScalarList::Single => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Vec::new()
            } else {
                vec![trimmed.to_string()]
            }
        },
    }
}
