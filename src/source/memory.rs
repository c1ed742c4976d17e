//! In-memory article source.

use super::{DocumentSource, SourceText};
use crate::Result;

/// A fixed list of article texts.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    texts: Vec<String>,
}

impl StaticSource {
    /// Creates a source over `texts`, kept in the given order.
    #[must_use]
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            texts: texts.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a text.
    pub fn push(&mut self, text: impl Into<String>) {
        self.texts.push(text.into());
    }
}

impl DocumentSource for StaticSource {
    fn fetch(&self) -> Result<Vec<SourceText>> {
        Ok(self
            .texts
            .iter()
            .enumerate()
            .map(|(i, text)| SourceText::new(format!("memory:{i}"), text.clone()))
            .collect())
    }

    fn describe(&self) -> String {
        format!("{} in-memory articles", self.texts.len())
    }
}
