//! Summary extraction from article bodies.

/// Maximum summary length when falling back to the leading body text.
const MAX_FALLBACK_CHARS: usize = 200;
/// Minimum length for a paragraph to count as a summary.
const MIN_PARAGRAPH_CHARS: usize = 20;

/// Derives a short summary from a Markdown body.
///
/// Tries, in order:
/// 1. the lines of a `## Summary` section, joined with spaces
/// 2. the first paragraph after the title heading that is longer than 20 chars
/// 3. the first 200 characters of non-heading text, with `...` when truncated
#[must_use]
pub fn extract_summary(body: &str) -> String {
    let lines: Vec<&str> = body.trim().lines().map(str::trim).collect();

    if let Some(section) = summary_section(&lines) {
        return section;
    }

    if let Some(paragraph) = first_paragraph(&lines) {
        return paragraph;
    }

    let text = lines
        .iter()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if text.chars().count() > MAX_FALLBACK_CHARS {
        let truncated: String = text.chars().take(MAX_FALLBACK_CHARS).collect();
        format!("{truncated}...")
    } else {
        text
    }
}

/// Joins the non-empty lines of a `## Summary` section.
fn summary_section(lines: &[&str]) -> Option<String> {
    let start = lines.iter().position(|line| line.starts_with("## Summary"))?;

    let collected: Vec<&str> = lines[start + 1..]
        .iter()
        .take_while(|line| !line.starts_with("##"))
        .filter(|line| !line.is_empty())
        .copied()
        .collect();

    (!collected.is_empty()).then(|| collected.join(" "))
}

/// Returns the first substantial paragraph of the opening section.
fn first_paragraph(lines: &[&str]) -> Option<String> {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut skip_title = true;

    for &line in lines {
        if line.starts_with('#') {
            if skip_title {
                skip_title = false;
                continue;
            }
            break;
        }

        if line.is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    paragraphs
        .into_iter()
        .find(|p| p.chars().count() > MIN_PARAGRAPH_CHARS)
}
