//! # kbindex
//!
//! Keyword and metadata index for Markdown troubleshooting articles.
//!
//! kbindex ingests articles written as Markdown with a front-matter block,
//! builds an immutable in-memory corpus, and answers "which article covers
//! this symptom" queries with a deterministic keyword ranking.
//!
//! ## Components
//!
//! - [`parser`]: front matter + body into a [`Document`]
//! - [`corpus`]: slug-keyed, insertion-ordered collection of documents
//! - [`graph`]: traversal over the `related` links between articles
//! - [`search`]: tokenizer, filter syntax and ranked lookup
//! - [`source`]: acquisition of raw article text (directories, in-memory lists)
//! - [`services`]: swappable knowledge-base handle for long-running callers
//!
//! ## Example
//!
//! ```rust
//! use kbindex::{Corpus, QueryEngine, SearchFilter};
//!
//! let article = "---\nslug: git-push-rejected\ntitle: Push rejected\ncategory: troubleshooting\nkeywords: [git, push]\n---\nRebase onto the remote branch first.\n";
//! let corpus = Corpus::load([article])?;
//! let engine = QueryEngine::new(&corpus);
//! let hits = engine.search("git push", &SearchFilter::new());
//! assert_eq!(hits[0].document.slug, "git-push-rejected");
//! # Ok::<(), kbindex::Error>(())
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod config;
pub mod corpus;
pub mod graph;
pub mod models;
pub mod observability;
pub mod parser;
pub mod search;
pub mod services;
pub mod source;

// Re-exports for convenience
pub use config::KbConfig;
pub use corpus::Corpus;
pub use graph::{DanglingReference, RelationGraph};
pub use models::{CategoryInfo, Difficulty, Document, SearchFilter, SearchHit};
pub use parser::parse_document;
pub use search::{KeywordIndex, ParsedQuery, QueryEngine, parse_search_query, tokenize};
pub use services::KnowledgeBase;
pub use source::{DirectorySource, DocumentSource, SourceText, StaticSource};

/// Error type for kbindex operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `MalformedDocument` | Front matter missing or unterminated, required field absent, invalid YAML |
/// | `DuplicateSlug` | Two documents in one load share a slug |
/// | `NotFound` | Lookup of a slug absent from the corpus |
/// | `InvalidInput` | Bad CLI or configuration values |
/// | `OperationFailed` | I/O errors, config parsing, lock poisoning, logging init |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A raw article could not be turned into a document.
    ///
    /// Aborts the whole load; `source_index` is the position of the offending
    /// text in the load input (absent when parsing a single document).
    #[error("malformed document{}: {reason}", index_suffix(.source_index))]
    MalformedDocument {
        /// What is wrong with the document.
        reason: String,
        /// Position of the document in the load input.
        source_index: Option<usize>,
    },

    /// Two documents in the same load share a slug.
    #[error("duplicate slug '{slug}' (documents #{first_index} and #{second_index})")]
    DuplicateSlug {
        /// The repeated slug.
        slug: String,
        /// Position of the first document carrying the slug.
        first_index: usize,
        /// Position of the second document carrying the slug.
        second_index: usize,
    },

    /// No document with this slug exists in the corpus.
    #[error("no such article: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - An unknown difficulty tier is passed on the command line
    /// - A configuration value cannot be interpreted
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur while reading articles or configuration
    /// - The configuration file is not valid TOML
    /// - A lock guarding the current corpus is poisoned
    /// - Logging cannot be initialized
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Builds a `MalformedDocument` error without a source index.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
            source_index: None,
        }
    }

    /// Attaches a load-input position to a `MalformedDocument` error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        match self {
            Self::MalformedDocument { reason, .. } => Self::MalformedDocument {
                reason,
                source_index: Some(index),
            },
            other => other,
        }
    }
}

/// Formats the optional load position of a malformed document.
#[allow(clippy::ref_option)]
fn index_suffix(index: &Option<usize>) -> String {
    index.map(|i| format!(" #{i}")).unwrap_or_default()
}

/// Result type alias for kbindex operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidInput("test error".to_string());
        assert_eq!(err.to_string(), "invalid input: test error");

        let err = Error::OperationFailed {
            operation: "test".to_string(),
            cause: "failed".to_string(),
        };
        assert_eq!(err.to_string(), "operation 'test' failed: failed");

        let err = Error::NotFound("ghost".to_string());
        assert_eq!(err.to_string(), "no such article: ghost");

        let err = Error::DuplicateSlug {
            slug: "git".to_string(),
            first_index: 0,
            second_index: 3,
        };
        assert_eq!(
            err.to_string(),
            "duplicate slug 'git' (documents #0 and #3)"
        );
    }

    #[test]
    fn test_malformed_display_with_and_without_index() {
        let err = Error::malformed("missing required field `title`");
        assert_eq!(
            err.to_string(),
            "malformed document: missing required field `title`"
        );

        let err = err.at_index(4);
        assert_eq!(
            err.to_string(),
            "malformed document #4: missing required field `title`"
        );
    }

    #[test]
    fn test_at_index_leaves_other_variants() {
        let err = Error::NotFound("x".to_string()).at_index(2);
        assert!(matches!(err, Error::NotFound(ref s) if s == "x"));
    }
}
