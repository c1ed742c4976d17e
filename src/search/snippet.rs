//! Highlighted body excerpts.

/// Highlight marker placed around a matched token.
const HIGHLIGHT: &str = "**";
/// Elision marker for cut text.
const ELLIPSIS: &str = "...";

/// Builds an excerpt of `body` around the first occurrence of any token.
///
/// `width` is the number of characters kept on each side of the match. The
/// match is wrapped in `**`; cut ends are marked with `...`. Whitespace runs
/// are collapsed to single spaces. Returns `None` when no token occurs in the
/// body (case-insensitive).
///
/// # Examples
///
/// ```rust
/// use kbindex::search::snippet;
///
/// let excerpt = snippet("Restart the MCP server and retry.", &["mcp".to_string()], 7);
/// assert_eq!(excerpt.as_deref(), Some("...rt the **MCP** server..."));
/// ```
#[must_use]
pub fn snippet(body: &str, tokens: &[String], width: usize) -> Option<String> {
    let text: Vec<char> = body.split_whitespace().collect::<Vec<_>>().join(" ").chars().collect();
    let lower: Vec<char> = text.iter().map(|c| lowercase_char(*c)).collect();

    let (start, len) = tokens
        .iter()
        .filter(|t| !t.is_empty())
        .filter_map(|t| {
            let needle: Vec<char> = t.chars().map(lowercase_char).collect();
            find_chars(&lower, &needle).map(|pos| (pos, needle.len()))
        })
        .min_by_key(|&(pos, len)| (pos, std::cmp::Reverse(len)))?;

    let from = start.saturating_sub(width);
    let to = start.saturating_add(len).saturating_add(width).min(text.len());

    let mut out = String::new();
    if from > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(&text[from..start]);
    out.push_str(HIGHLIGHT);
    out.extend(&text[start..start + len]);
    out.push_str(HIGHLIGHT);
    out.extend(&text[start + len..to]);
    if to < text.len() {
        out.push_str(ELLIPSIS);
    }

    Some(out)
}

/// Lowercases a char, keeping a one-to-one char mapping.
fn lowercase_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Finds the first position of `needle` in `haystack`.
fn find_chars(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
