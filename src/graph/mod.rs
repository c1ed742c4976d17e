//! Relation graph over `related` links.
//!
//! A read-only view over a [`Corpus`]: there is an edge `A -> B` iff `B`
//! appears in `A.related`. The graph may contain cycles and references to
//! slugs that are not in the corpus (dangling references). Traversal uses a
//! visited set, so cycles never cause repeated visits.

use crate::corpus::Corpus;
use crate::models::Document;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet, VecDeque};

/// A `related` entry pointing at a slug absent from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DanglingReference {
    /// Slug of the document holding the reference.
    pub source: String,
    /// The referenced slug that does not exist.
    pub target: String,
}

impl DanglingReference {
    /// Creates a dangling reference record.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Traversal view over the `related` links of a corpus.
///
/// # Example
///
/// ```rust
/// use kbindex::{Corpus, RelationGraph};
///
/// let corpus = Corpus::load([
///     "---\nslug: a\ntitle: A\ncategory: c\nrelated: [b]\n---\n",
///     "---\nslug: b\ntitle: B\ncategory: c\nrelated: [a]\n---\n",
/// ])?;
/// let graph = RelationGraph::new(&corpus);
/// let reachable = graph.reachable_from("a", None);
/// assert_eq!(reachable.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
/// # Ok::<(), kbindex::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RelationGraph<'a> {
    corpus: &'a Corpus,
}

impl<'a> RelationGraph<'a> {
    /// Creates a graph view over `corpus`.
    #[must_use]
    pub const fn new(corpus: &'a Corpus) -> Self {
        Self { corpus }
    }

    /// Returns the raw `related` list of `slug`, dangling entries included.
    ///
    /// Unknown slugs have no neighbors.
    #[must_use]
    pub fn neighbors(&self, slug: &str) -> &'a [String] {
        self.corpus
            .find(slug)
            .map_or(&[], |doc| doc.related.as_slice())
    }

    /// Total number of edges (all `related` entries, dangling included).
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.corpus.all().map(|doc| doc.related.len()).sum()
    }

    /// Returns every `(source, target)` pair whose target is not in the corpus.
    ///
    /// Runs in time linear in the total edge count. A pair listed twice in the
    /// same `related` list is reported once.
    #[must_use]
    pub fn dangling_references(&self) -> BTreeSet<DanglingReference> {
        let mut dangling = BTreeSet::new();
        for doc in self.corpus.all() {
            for target in &doc.related {
                if !self.corpus.contains(target) {
                    dangling.insert(DanglingReference::new(&doc.slug, target));
                }
            }
        }
        dangling
    }

    /// Returns the slugs reachable from `start` by following `related` links.
    ///
    /// Breadth-first, at most `max_depth` hops (`None` means until no new slug
    /// is found). The start slug is reachable at depth 0 and is always part of
    /// the result when it exists. Only slugs present in the corpus are
    /// reported; an unknown start yields an empty set.
    #[must_use]
    pub fn reachable_from(&self, start: &str, max_depth: Option<usize>) -> BTreeSet<&'a str> {
        let Some(start_doc) = self.corpus.find(start) else {
            return BTreeSet::new();
        };

        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<(&'a Document, usize)> = VecDeque::new();

        visited.insert(start_doc.slug.as_str());
        queue.push_back((start_doc, 0));

        while let Some((current, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }

            for target in &current.related {
                if visited.contains(target.as_str()) {
                    continue;
                }
                // Dangling targets are not nodes.
                if let Some(next) = self.corpus.find(target) {
                    visited.insert(next.slug.as_str());
                    queue.push_back((next, depth + 1));
                }
            }
        }

        visited.into_iter().collect()
    }

    /// Resolves the `related` list of `slug` to documents, ordered by title.
    ///
    /// Dangling references are skipped. Unknown slugs yield an empty list.
    #[must_use]
    pub fn related_documents(&self, slug: &str) -> Vec<&'a Document> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut docs: Vec<&'a Document> = self
            .neighbors(slug)
            .iter()
            .filter(|target| seen.insert(target.as_str()))
            .filter_map(|target| self.corpus.find(target))
            .collect();
        docs.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)));
        docs
    }

    /// Documents whose `related` list mentions `slug`, in corpus order.
    ///
    /// Works for dangling targets too: backlinks of a missing slug are the
    /// documents that reference it.
    #[must_use]
    pub fn backlinks(&self, slug: &str) -> Vec<&'a Document> {
        self.corpus
            .all()
            .filter(|doc| doc.related.iter().any(|target| target == slug))
            .collect()
    }
}
