//! Corpus store.
//!
//! An immutable, insertion-ordered collection of [`Document`]s keyed by slug.
//! A corpus is built once by [`Corpus::load`]; rebuilding means loading a new
//! corpus and swapping the reference (see [`crate::KnowledgeBase`]).

use crate::models::{CategoryInfo, Difficulty, Document, KNOWN_CATEGORIES};
use crate::parser::parse_document;
use crate::{Error, Result};
use std::collections::HashMap;
use std::time::Instant;
use tracing::instrument;

/// Immutable collection of all documents from one load.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// Documents in input order.
    documents: Vec<Document>,
    /// Slug to position in `documents`.
    by_slug: HashMap<String, usize>,
}

impl Corpus {
    /// Parses every raw text and builds a corpus.
    ///
    /// Loading is fail-fast: the first malformed document or duplicate slug
    /// aborts the whole batch and no corpus is produced.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedDocument`] with `source_index` set to the position of
    ///   the offending text
    /// - [`Error::DuplicateSlug`] naming both positions
    #[instrument(
        name = "kbindex.corpus.load",
        skip(texts),
        fields(component = "corpus", operation = "load", documents = tracing::field::Empty)
    )]
    pub fn load<I>(texts: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let start = Instant::now();
        let result = (|| {
            let mut corpus = Self::default();
            for (index, text) in texts.into_iter().enumerate() {
                let document = parse_document(text.as_ref()).map_err(|e| e.at_index(index))?;
                corpus.insert(document, index)?;
            }
            Ok(corpus)
        })();

        let status = match &result {
            Ok(corpus) => {
                tracing::Span::current().record("documents", corpus.len());
                tracing::info!(documents = corpus.len(), "Corpus loaded");
                metrics::counter!("kbindex_documents_loaded_total").increment(corpus.len() as u64);
                "success"
            },
            Err(e) => {
                tracing::warn!(error = %e, "Corpus load aborted");
                "error"
            },
        };
        metrics::counter!("kbindex_loads_total", "status" => status).increment(1);
        metrics::histogram!("kbindex_load_duration_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        result
    }

    /// Appends a document, rejecting duplicate slugs.
    ///
    /// `index` is the load-input position used in error reports. Documents are
    /// stored in insertion order, so the position of a stored document equals
    /// its load index.
    fn insert(&mut self, document: Document, index: usize) -> Result<()> {
        if let Some(&first_index) = self.by_slug.get(&document.slug) {
            return Err(Error::DuplicateSlug {
                slug: document.slug,
                first_index,
                second_index: index,
            });
        }
        self.by_slug.insert(document.slug.clone(), self.documents.len());
        self.documents.push(document);
        Ok(())
    }

    /// Returns the document with `slug`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no document carries this slug.
    pub fn get(&self, slug: &str) -> Result<&Document> {
        self.find(slug)
            .ok_or_else(|| Error::NotFound(slug.to_string()))
    }

    /// Returns the document with `slug`, or `None`.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&Document> {
        self.by_slug.get(slug).map(|&i| &self.documents[i])
    }

    /// Returns true if a document with `slug` exists.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.by_slug.contains_key(slug)
    }

    /// Iterates over all documents in insertion order.
    ///
    /// The iterator is lazy and finite; call `all()` again (or clone the
    /// iterator) to restart.
    pub fn all(&self) -> std::slice::Iter<'_, Document> {
        self.documents.iter()
    }

    /// Number of documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if the corpus holds no documents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in `category` (case-insensitive), ordered by title.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self
            .all()
            .filter(|d| d.category.eq_ignore_ascii_case(category.trim()))
            .collect();
        docs.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)));
        docs
    }

    /// Documents with `difficulty`, ordered by category then title.
    #[must_use]
    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self
            .all()
            .filter(|d| d.difficulty == difficulty)
            .collect();
        docs.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then_with(|| a.title.cmp(&b.title))
                .then_with(|| a.slug.cmp(&b.slug))
        });
        docs
    }

    /// Category summaries with document counts.
    ///
    /// Every well-known category is listed (possibly with a zero count), in
    /// catalog order, followed by any other category found in the corpus in
    /// alphabetical order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryInfo> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for doc in self.all() {
            *counts.entry(doc.category.as_str()).or_insert(0) += 1;
        }

        let mut categories: Vec<CategoryInfo> = KNOWN_CATEGORIES
            .iter()
            .map(|known| CategoryInfo::new(known.slug, counts.remove(known.slug).unwrap_or(0)))
            .collect();

        let mut extra: Vec<(&str, usize)> = counts.into_iter().collect();
        extra.sort_unstable_by(|a, b| a.0.cmp(b.0));
        categories.extend(
            extra
                .into_iter()
                .map(|(slug, count)| CategoryInfo::new(slug, count)),
        );

        categories
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}
