//! Keyword index for corpus exploration.
//!
//! Maps every normalized keyword to the documents that declare it, for quick
//! lookup and keyword listings.

use crate::corpus::Corpus;
use crate::models::Document;
use serde::Serialize;
use std::collections::HashMap;

/// Information about a keyword in the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordInfo {
    /// Keyword (normalized, lowercase).
    pub keyword: String,
    /// Number of documents declaring this keyword.
    pub document_count: usize,
    /// Slugs of those documents, in corpus order.
    pub slugs: Vec<String>,
}

/// Keyword to document mappings for one corpus.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex<'a> {
    entries: HashMap<String, Vec<&'a Document>>,
}

impl<'a> KeywordIndex<'a> {
    /// Builds the index from every document keyword.
    ///
    /// A document that lists the same keyword twice is recorded once.
    #[must_use]
    pub fn build(corpus: &'a Corpus) -> Self {
        let mut entries: HashMap<String, Vec<&'a Document>> = HashMap::new();

        for doc in corpus.all() {
            for keyword in &doc.keywords {
                let normalized = normalize_keyword(keyword);
                if normalized.is_empty() {
                    continue;
                }
                let docs = entries.entry(normalized).or_default();
                if !docs.iter().any(|d| d.slug == doc.slug) {
                    docs.push(doc);
                }
            }
        }

        Self { entries }
    }

    /// Documents declaring `keyword` (case-insensitive), in corpus order.
    #[must_use]
    pub fn documents(&self, keyword: &str) -> &[&'a Document] {
        self.entries
            .get(&normalize_keyword(keyword))
            .map_or(&[], Vec::as_slice)
    }

    /// Lists all keywords, most used first, ties in alphabetical order.
    #[must_use]
    pub fn list(&self) -> Vec<KeywordInfo> {
        let mut keywords: Vec<KeywordInfo> = self
            .entries
            .iter()
            .map(|(keyword, docs)| KeywordInfo {
                keyword: keyword.clone(),
                document_count: docs.len(),
                slugs: docs.iter().map(|d| d.slug.clone()).collect(),
            })
            .collect();

        keywords.sort_by(|a, b| {
            b.document_count
                .cmp(&a.document_count)
                .then_with(|| a.keyword.cmp(&b.keyword))
        });

        keywords
    }

    /// Returns the number of distinct keywords.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no document declares a keyword.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of keyword-document associations.
    #[must_use]
    pub fn association_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Normalizes a keyword for consistent indexing.
pub(crate) fn normalize_keyword(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::load([
            "---\nslug: a\ntitle: A\ncategory: c\nkeywords: [Git, push, git]\n---\n",
            "---\nslug: b\ntitle: B\ncategory: c\nkeywords: [git, rebase]\n---\n",
            "---\nslug: c\ntitle: C\ncategory: c\n---\n",
        ])
        .unwrap()
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  Rust "), "rust");
        assert_eq!(normalize_keyword("error-handling"), "error-handling");
    }

    #[test]
    fn test_documents_for_keyword() {
        let corpus = corpus();
        let index = KeywordIndex::build(&corpus);

        let slugs: Vec<&str> = index
            .documents("GIT")
            .iter()
            .map(|d| d.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["a", "b"]);
        assert!(index.documents("missing").is_empty());
    }

    #[test]
    fn test_duplicate_keyword_in_one_document_counted_once() {
        let corpus = corpus();
        let index = KeywordIndex::build(&corpus);
        assert_eq!(index.len(), 3);
        assert_eq!(index.association_count(), 4);
    }

    #[test]
    fn test_list_sorted_by_count_then_name() {
        let corpus = corpus();
        let index = KeywordIndex::build(&corpus);

        let listing = index.list();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].keyword, "git");
        assert_eq!(listing[0].document_count, 2);
        assert_eq!(listing[0].slugs, vec!["a", "b"]);
        assert_eq!(listing[1].keyword, "push");
        assert_eq!(listing[2].keyword, "rebase");
    }

    #[test]
    fn test_empty_index() {
        let corpus = Corpus::default();
        let index = KeywordIndex::build(&corpus);
        assert!(index.is_empty());
        assert!(index.list().is_empty());
    }
}
