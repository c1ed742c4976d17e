//! Acquisition of raw article text.
//!
//! The corpus never touches the filesystem itself. A [`DocumentSource`]
//! produces the raw texts in a stable order, and the caller hands them to
//! [`Corpus::load`](crate::Corpus::load).
//!
//! # Implementations
//!
//! | Source | Description |
//! |--------|-------------|
//! | [`DirectorySource`] | `*.md` files in a knowledge directory |
//! | [`StaticSource`] | In-memory texts (tests, embedding) |

mod directory;
mod memory;

pub use directory::DirectorySource;
pub use memory::StaticSource;

use crate::Result;

/// One raw article and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    /// Human-readable origin (file path, or `memory:<n>`).
    pub origin: String,
    /// The raw article text.
    pub text: String,
}

impl SourceText {
    /// Creates a source text.
    #[must_use]
    pub fn new(origin: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            text: text.into(),
        }
    }
}

impl AsRef<str> for SourceText {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

/// Trait for article sources.
///
/// Fetching must be deterministic: the same underlying content yields the same
/// texts in the same order, so load-input positions in errors are stable.
pub trait DocumentSource: Send + Sync {
    /// Returns every raw article, in load order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OperationFailed`] if the content cannot be read.
    fn fetch(&self) -> Result<Vec<SourceText>>;

    /// Short description used in logs.
    fn describe(&self) -> String;
}
