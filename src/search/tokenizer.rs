//! Query tokenization.

/// Splits text into lowercase word tokens.
///
/// Any non-alphanumeric character separates tokens; empty tokens are dropped.
/// Repeated words are kept, in order.
///
/// # Examples
///
/// ```rust
/// use kbindex::tokenize;
///
/// assert_eq!(tokenize("Hooks, not running!"), vec!["hooks", "not", "running"]);
/// assert!(tokenize("  ...  ").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("hooks failing", &["hooks", "failing"] ; "whitespace")]
    #[test_case("MCP-server: timeout", &["mcp", "server", "timeout"] ; "punctuation")]
    #[test_case("git git GIT", &["git", "git", "git"] ; "repeats kept")]
    #[test_case("\tmodel\n\nnot found ", &["model", "not", "found"] ; "mixed whitespace")]
    #[test_case("", &[] ; "empty")]
    #[test_case("--- ??? !!!", &[] ; "only punctuation")]
    #[test_case("Ünïcode café", &["ünïcode", "café"] ; "unicode letters")]
    #[test_case("error 404", &["error", "404"] ; "digits")]
    fn test_tokenize(input: &str, expected: &[&str]) {
        assert_eq!(tokenize(input), expected);
    }
}
