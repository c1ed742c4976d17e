//! Keyword-scored article search.
//!
//! Scoring rule, applied per query token (repeated tokens count each time):
//!
//! | Match                                   | Points |
//! |-----------------------------------------|--------|
//! | token equals a keyword (case-insensitive) | 3    |
//! | token is a substring of the title       | 2      |
//! | token is a substring of the body        | 1      |
//!
//! Filters are applied before scoring. Documents scoring zero are excluded.
//! Hits are ordered by score descending, ties broken by slug ascending.

use super::keyword_index::normalize_keyword;
use super::tokenizer::tokenize;
use crate::corpus::Corpus;
use crate::models::{Document, SearchFilter, SearchHit};
use std::collections::HashSet;
use std::time::Instant;
use tracing::instrument;

/// Points for a token equal to a document keyword.
pub const KEYWORD_WEIGHT: u32 = 3;
/// Points for a token found in the title.
pub const TITLE_WEIGHT: u32 = 2;
/// Points for a token found in the body.
pub const BODY_WEIGHT: u32 = 1;

/// Lowercased views of one document, computed once per engine.
#[derive(Debug)]
struct IndexedDocument<'a> {
    document: &'a Document,
    title: String,
    body: String,
    keywords: HashSet<String>,
}

impl<'a> IndexedDocument<'a> {
    fn new(document: &'a Document) -> Self {
        Self {
            document,
            title: document.title.to_lowercase(),
            body: document.body.to_lowercase(),
            keywords: document
                .keywords
                .iter()
                .map(|k| normalize_keyword(k))
                .collect(),
        }
    }

    fn score(&self, tokens: &[String]) -> u32 {
        tokens.iter().fold(0u32, |score, token| {
            let mut points = 0;
            if self.keywords.contains(token) {
                points += KEYWORD_WEIGHT;
            }
            if self.title.contains(token.as_str()) {
                points += TITLE_WEIGHT;
            }
            if self.body.contains(token.as_str()) {
                points += BODY_WEIGHT;
            }
            score.saturating_add(points)
        })
    }
}

/// Search engine bound to one corpus.
///
/// Holds no mutable state: the same query against the same corpus always
/// returns the same hits.
///
/// # Example
///
/// ```rust
/// use kbindex::{Corpus, QueryEngine, SearchFilter};
///
/// let corpus = Corpus::load([
///     "---\nslug: push-rejected\ntitle: Push rejected\ncategory: troubleshooting\nkeywords: [git]\n---\nFetch first.",
/// ])?;
/// let engine = QueryEngine::new(&corpus);
/// let hits = engine.search("git push", &SearchFilter::new());
/// assert_eq!(hits[0].document.slug, "push-rejected");
/// assert_eq!(hits[0].score, 5);
/// # Ok::<(), kbindex::Error>(())
/// ```
#[derive(Debug)]
pub struct QueryEngine<'a> {
    entries: Vec<IndexedDocument<'a>>,
}

impl<'a> QueryEngine<'a> {
    /// Prepares an engine over `corpus`.
    #[must_use]
    pub fn new(corpus: &'a Corpus) -> Self {
        Self {
            entries: corpus.all().map(IndexedDocument::new).collect(),
        }
    }

    /// Scores every document passing `filter` against `query`.
    ///
    /// An empty query (or one with no word characters) returns no hits.
    #[instrument(
        name = "kbindex.search",
        skip(self, filter),
        fields(component = "search", operation = "search", hits = tracing::field::Empty)
    )]
    pub fn search(&self, query: &str, filter: &SearchFilter) -> Vec<SearchHit<'a>> {
        let start = Instant::now();
        let tokens = tokenize(query);

        let mut hits: Vec<SearchHit<'a>> = if tokens.is_empty() {
            Vec::new()
        } else {
            self.entries
                .iter()
                .filter(|entry| filter.matches(entry.document))
                .filter_map(|entry| {
                    let score = entry.score(&tokens);
                    (score > 0).then_some(SearchHit {
                        document: entry.document,
                        score,
                    })
                })
                .collect()
        };

        hits.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.document.slug.cmp(&b.document.slug))
        });

        tracing::Span::current().record("hits", hits.len());
        tracing::debug!(tokens = tokens.len(), hits = hits.len(), "Search complete");
        metrics::counter!("kbindex_search_total").increment(1);
        metrics::histogram!("kbindex_search_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        hits
    }

    /// Like [`search`](Self::search), keeping at most `limit` hits.
    #[must_use]
    pub fn search_limited(
        &self,
        query: &str,
        filter: &SearchFilter,
        limit: usize,
    ) -> Vec<SearchHit<'a>> {
        let mut hits = self.search(query, filter);
        hits.truncate(limit);
        hits
    }

    /// Number of searchable documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there is nothing to search.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Difficulty;
    use test_case::test_case;

    fn scenario() -> Corpus {
        Corpus::load([
            "---\nslug: a\ntitle: Automation trouble\ncategory: troubleshooting\n\
             keywords: [hooks, failing]\nrelated: [b]\n---\nNothing to see.",
            "---\nslug: b\ntitle: Server quiet\ncategory: troubleshooting\n\
             keywords: [mcp, not, responding]\nrelated: [a]\n---\nRestart it.",
        ])
        .unwrap()
    }

    fn ranked(hits: &[SearchHit<'_>]) -> Vec<(String, u32)> {
        hits.iter()
            .map(|h| (h.document.slug.clone(), h.score))
            .collect()
    }

    #[test]
    fn test_keyword_scenario() {
        let corpus = scenario();
        let engine = QueryEngine::new(&corpus);
        let hits = engine.search("hooks failing", &SearchFilter::new());
        assert_eq!(ranked(&hits), vec![("a".to_string(), 6)]);
    }

    #[test_case("hooks", 3 ; "keyword only")]
    #[test_case("automation", 2 ; "title only")]
    #[test_case("nothing", 1 ; "body only")]
    #[test_case("HOOKS", 3 ; "case insensitive")]
    #[test_case("hooks hooks", 6 ; "repeated tokens count twice")]
    #[test_case("trouble", 2 ; "title substring")]
    fn test_score_components(query: &str, expected: u32) {
        let corpus = scenario();
        let engine = QueryEngine::new(&corpus);
        let hits = engine.search(query, &SearchFilter::new());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].document.slug, "a");
        assert_eq!(hits[0].score, expected);
    }

    #[test]
    fn test_all_components_sum() {
        let corpus = Corpus::load([
            "---\nslug: x\ntitle: Git push\ncategory: c\nkeywords: [git]\n---\ngit push output",
        ])
        .unwrap();
        let engine = QueryEngine::new(&corpus);
        let hits = engine.search("git", &SearchFilter::new());
        assert_eq!(hits[0].score, KEYWORD_WEIGHT + TITLE_WEIGHT + BODY_WEIGHT);
    }

    #[test]
    fn test_zero_scores_excluded() {
        let corpus = scenario();
        let engine = QueryEngine::new(&corpus);
        assert!(engine.search("kubernetes", &SearchFilter::new()).is_empty());
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let corpus = scenario();
        let engine = QueryEngine::new(&corpus);
        assert!(engine.search("", &SearchFilter::new()).is_empty());
        assert!(engine.search("  ?! ", &SearchFilter::new()).is_empty());
    }

    #[test]
    fn test_ties_broken_by_slug() {
        let corpus = Corpus::load([
            "---\nslug: zeta\ntitle: Z\ncategory: c\nkeywords: [shared]\n---\n",
            "---\nslug: alpha\ntitle: A\ncategory: c\nkeywords: [shared]\n---\n",
            "---\nslug: mid\ntitle: M\ncategory: c\nkeywords: [shared, extra]\n---\n",
        ])
        .unwrap();
        let engine = QueryEngine::new(&corpus);
        let hits = engine.search("shared extra", &SearchFilter::new());
        assert_eq!(
            ranked(&hits),
            vec![
                ("mid".to_string(), 6),
                ("alpha".to_string(), 3),
                ("zeta".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_filter_applied_before_scoring() {
        let corpus = Corpus::load([
            "---\nslug: a\ntitle: A\ncategory: models\ndifficulty: advanced\nkeywords: [slow]\n---\n",
            "---\nslug: b\ntitle: B\ncategory: setup\nkeywords: [slow]\n---\n",
        ])
        .unwrap();
        let engine = QueryEngine::new(&corpus);

        let by_category = engine.search("slow", &SearchFilter::new().with_category("Models"));
        assert_eq!(ranked(&by_category), vec![("a".to_string(), 3)]);

        let by_difficulty =
            engine.search("slow", &SearchFilter::new().with_difficulty(Difficulty::Beginner));
        assert_eq!(ranked(&by_difficulty), vec![("b".to_string(), 3)]);
    }

    #[test]
    fn test_search_is_idempotent() {
        let corpus = scenario();
        let engine = QueryEngine::new(&corpus);
        let first = ranked(&engine.search("hooks not responding", &SearchFilter::new()));
        let second = ranked(&engine.search("hooks not responding", &SearchFilter::new()));
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_limited() {
        let corpus = scenario();
        let engine = QueryEngine::new(&corpus);
        let hits = engine.search_limited("hooks mcp", &SearchFilter::new(), 1);
        assert_eq!(hits.len(), 1);
        assert!(engine.search_limited("hooks", &SearchFilter::new(), 0).is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = Corpus::default();
        let engine = QueryEngine::new(&corpus);
        assert!(engine.is_empty());
        assert!(engine.search("anything", &SearchFilter::new()).is_empty());
    }
}
