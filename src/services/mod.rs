//! Long-lived knowledge-base handle.
//!
//! A [`Corpus`] is immutable. Hosts that need to pick up edited articles keep
//! a [`KnowledgeBase`], which builds a fresh corpus from a
//! [`DocumentSource`] and swaps it in atomically. Readers holding an older
//! snapshot keep using it until they drop it.

use crate::corpus::Corpus;
use crate::source::DocumentSource;
use crate::{Error, Result};
use std::sync::{Arc, RwLock};
use tracing::instrument;

/// Swappable handle to the current corpus.
///
/// # Example
///
/// ```rust
/// use kbindex::{KnowledgeBase, StaticSource};
///
/// let kb = KnowledgeBase::default();
/// let source = StaticSource::new(["---\nslug: a\ntitle: A\ncategory: c\n---\n"]);
/// assert_eq!(kb.reload(&source)?, 1);
/// assert!(kb.snapshot()?.contains("a"));
/// # Ok::<(), kbindex::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    current: RwLock<Arc<Corpus>>,
}

impl KnowledgeBase {
    /// Wraps an already loaded corpus.
    #[must_use]
    pub fn new(corpus: Corpus) -> Self {
        Self {
            current: RwLock::new(Arc::new(corpus)),
        }
    }

    /// Loads a knowledge base from `source`.
    ///
    /// # Errors
    ///
    /// Returns the fetch or load error; see [`Corpus::load`].
    pub fn from_source(source: &dyn DocumentSource) -> Result<Self> {
        let kb = Self::default();
        kb.reload(source)?;
        Ok(kb)
    }

    /// Returns the current corpus.
    ///
    /// The snapshot stays valid after later reloads.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<Corpus>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|_| Error::OperationFailed {
                operation: "snapshot".to_string(),
                cause: "Lock poisoned".to_string(),
            })
    }

    /// Rebuilds the corpus from `source` and swaps it in.
    ///
    /// The new corpus is built outside the lock. On any error the previous
    /// corpus stays current. Returns the number of loaded documents.
    ///
    /// # Errors
    ///
    /// Returns the fetch or load error, or [`Error::OperationFailed`] if the
    /// lock is poisoned.
    #[instrument(
        name = "kbindex.knowledge_base.reload",
        skip(self, source),
        fields(component = "knowledge_base", operation = "reload", source = %source.describe())
    )]
    pub fn reload(&self, source: &dyn DocumentSource) -> Result<usize> {
        let texts = source.fetch()?;
        let corpus = Corpus::load(&texts).inspect_err(|e| {
            if let Error::MalformedDocument {
                source_index: Some(index),
                ..
            } = e
            {
                if let Some(text) = texts.get(*index) {
                    tracing::error!(origin = %text.origin, error = %e, "Rejected article");
                }
            }
        })?;

        let count = corpus.len();
        self.replace(corpus)?;
        Ok(count)
    }

    /// Swaps in an already built corpus.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the lock is poisoned.
    pub fn replace(&self, corpus: Corpus) -> Result<()> {
        let count = corpus.len();
        {
            let mut guard = self.current.write().map_err(|_| Error::OperationFailed {
                operation: "replace_corpus".to_string(),
                cause: "Lock poisoned".to_string(),
            })?;
            *guard = Arc::new(corpus);
        }

        tracing::info!(documents = count, "Corpus swapped");
        Ok(())
    }

    /// Number of documents in the current corpus (0 if the lock is poisoned).
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns true if the current corpus is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;

    fn article(slug: &str) -> String {
        format!("---\nslug: {slug}\ntitle: {slug}\ncategory: c\n---\n")
    }

    #[test]
    fn test_default_is_empty() {
        let kb = KnowledgeBase::default();
        assert!(kb.is_empty());
        assert!(kb.snapshot().unwrap().is_empty());
    }

    #[test]
    fn test_reload_swaps_corpus() {
        let kb = KnowledgeBase::from_source(&StaticSource::new([article("a")])).unwrap();
        let before = kb.snapshot().unwrap();

        let count = kb
            .reload(&StaticSource::new([article("b"), article("c")]))
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(kb.len(), 2);
        assert!(kb.snapshot().unwrap().contains("b"));

        // Old snapshots are unaffected.
        assert!(before.contains("a"));
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_previous_corpus() {
        let kb = KnowledgeBase::from_source(&StaticSource::new([article("a")])).unwrap();

        let err = kb
            .reload(&StaticSource::new([article("x"), article("x")]))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { .. }));

        let err = kb
            .reload(&StaticSource::new(["no front matter".to_string()]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedDocument {
                source_index: Some(0),
                ..
            }
        ));

        let snapshot = kb.snapshot().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.contains("a"));
    }

    #[test]
    fn test_replace() {
        let kb = KnowledgeBase::new(Corpus::default());
        kb.replace(Corpus::load([article("z")]).unwrap()).unwrap();
        assert!(kb.snapshot().unwrap().contains("z"));
    }

    #[test]
    fn test_concurrent_readers() {
        let kb = Arc::new(KnowledgeBase::from_source(&StaticSource::new([article("a")])).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let kb = Arc::clone(&kb);
                std::thread::spawn(move || kb.snapshot().unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 1);
        }
    }
}
