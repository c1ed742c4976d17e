//! Category catalog.
//!
//! Categories are an open set: any string in a document's `category` field is
//! valid. The catalog below only supplies display names, descriptions and a
//! stable sort order for the well-known ones.

use serde::Serialize;

/// A well-known category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownCategory {
    /// Category slug as used in front matter.
    pub slug: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Well-known categories, in display order.
pub const KNOWN_CATEGORIES: &[KnownCategory] = &[
    KnownCategory {
        slug: "context-efficiency",
        name: "Context Efficiency",
        description: "Optimizing token usage and context window management",
    },
    KnownCategory {
        slug: "project-setup",
        name: "Project Setup",
        description: "Setting up and configuring projects",
    },
    KnownCategory {
        slug: "psb-workflow",
        name: "PSB Workflow",
        description: "Plan-Scan-Build and other workflow patterns",
    },
    KnownCategory {
        slug: "feature-selection",
        name: "Feature Selection",
        description: "Choosing and using assistant features effectively",
    },
    KnownCategory {
        slug: "models",
        name: "Models & Performance",
        description: "Understanding and selecting models",
    },
    KnownCategory {
        slug: "advanced-patterns",
        name: "Advanced Patterns",
        description: "Advanced techniques for experienced users",
    },
    KnownCategory {
        slug: "troubleshooting",
        name: "Troubleshooting",
        description: "Solving common problems and errors",
    },
    KnownCategory {
        slug: "best-practices",
        name: "Best Practices",
        description: "Recommended approaches and conventions",
    },
];

/// Returns the catalog entry for `slug`, if it is a well-known category.
#[must_use]
pub fn known_category(slug: &str) -> Option<&'static KnownCategory> {
    KNOWN_CATEGORIES.iter().find(|c| c.slug == slug)
}

/// Category summary with its document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    /// Category slug.
    pub slug: String,
    /// Display name (the slug itself for categories outside the catalog).
    pub name: String,
    /// Description (empty for categories outside the catalog).
    pub description: String,
    /// Number of documents in this category.
    pub document_count: usize,
}

impl CategoryInfo {
    /// Builds a summary for `slug`, using catalog metadata when available.
    #[must_use]
    pub fn new(slug: &str, document_count: usize) -> Self {
        known_category(slug).map_or_else(
            || Self {
                slug: slug.to_string(),
                name: slug.to_string(),
                description: String::new(),
                document_count,
            },
            |known| Self {
                slug: known.slug.to_string(),
                name: known.name.to_string(),
                description: known.description.to_string(),
                document_count,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_category_lookup() {
        let known = known_category("troubleshooting");
        assert!(known.is_some());
        assert_eq!(known.map(|c| c.name), Some("Troubleshooting"));
        assert!(known_category("cooking").is_none());
    }

    #[test]
    fn test_category_info_for_unknown_slug() {
        let info = CategoryInfo::new("cooking", 2);
        assert_eq!(info.name, "cooking");
        assert!(info.description.is_empty());
        assert_eq!(info.document_count, 2);
    }

    #[test]
    fn test_catalog_slugs_are_unique() {
        for (i, a) in KNOWN_CATEGORIES.iter().enumerate() {
            for b in &KNOWN_CATEGORIES[i + 1..] {
                assert_ne!(a.slug, b.slug);
            }
        }
    }
}
