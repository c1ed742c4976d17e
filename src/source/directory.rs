//! Knowledge directory source.
//!
//! Reads `*.md` files from a root directory and from its immediate,
//! non-hidden subdirectories (one level, typically one per category). Files
//! in the root come first; each directory is read in file-name order.

use super::{DocumentSource, SourceText};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of article files.
const ARTICLE_EXTENSION: &str = "md";

/// Articles stored as Markdown files on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists article paths in load order without reading them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the root or a subdirectory cannot
    /// be listed.
    pub fn article_paths(&self) -> Result<Vec<PathBuf>> {
        let (mut files, subdirs) = list_dir(&self.root)?;
        for dir in subdirs {
            let (nested, _) = list_dir(&dir)?;
            files.extend(nested);
        }
        Ok(files)
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self) -> Result<Vec<SourceText>> {
        let paths = self.article_paths()?;
        tracing::debug!(
            root = %self.root.display(),
            files = paths.len(),
            "Reading knowledge directory"
        );

        paths
            .into_iter()
            .map(|path| {
                let text = fs::read_to_string(&path).map_err(|e| Error::OperationFailed {
                    operation: "read_article".to_string(),
                    cause: format!("{}: {e}", path.display()),
                })?;
                Ok(SourceText::new(path.display().to_string(), text))
            })
            .collect()
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

/// Returns the sorted article files and sorted visible subdirectories of `dir`.
fn list_dir(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let entries = fs::read_dir(dir).map_err(|e| Error::OperationFailed {
        operation: "list_directory".to_string(),
        cause: format!("{}: {e}", dir.display()),
    })?;

    let mut files = Vec::new();
    let mut subdirs = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|e| Error::OperationFailed {
            operation: "list_directory".to_string(),
            cause: format!("{}: {e}", dir.display()),
        })?;
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        if path.is_dir() {
            subdirs.push(path);
        } else if path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTICLE_EXTENSION))
        {
            files.push(path);
        }
    }

    files.sort();
    subdirs.sort();
    Ok((files, subdirs))
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn names(source: &DirectorySource) -> Vec<String> {
        source
            .article_paths()
            .unwrap()
            .iter()
            .map(|p| {
                p.strip_prefix(source.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_root_first_then_sorted_subdirectories() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.md", "b");
        write(dir.path(), "a.md", "a");
        write(dir.path(), "models/z.md", "z");
        write(dir.path(), "models/m.md", "m");
        write(dir.path(), "best-practices/x.md", "x");

        let source = DirectorySource::new(dir.path());
        assert_eq!(
            names(&source),
            vec!["a.md", "b.md", "best-practices/x.md", "models/m.md", "models/z.md"]
        );
    }

    #[test]
    fn test_skips_hidden_non_markdown_and_deep_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "keep.md", "k");
        write(dir.path(), "notes.txt", "n");
        write(dir.path(), ".draft.md", "d");
        write(dir.path(), ".git/config.md", "g");
        write(dir.path(), "cat/deeper/too-deep.md", "t");
        write(dir.path(), "cat/UPPER.MD", "u");

        let source = DirectorySource::new(dir.path());
        assert_eq!(names(&source), vec!["keep.md", "cat/UPPER.MD"]);
    }

    #[test]
    fn test_fetch_reads_contents() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "one.md", "---\nslug: one\n---\n");

        let source = DirectorySource::new(dir.path());
        let texts = source.fetch().unwrap();
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].text, "---\nslug: one\n---\n");
        assert!(texts[0].origin.ends_with("one.md"));
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path().join("absent"));
        let err = source.fetch().unwrap_err();
        assert!(matches!(err, Error::OperationFailed { ref operation, .. } if operation == "list_directory"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(source.fetch().unwrap().is_empty());
        assert!(source.describe().starts_with("directory "));
    }
}
