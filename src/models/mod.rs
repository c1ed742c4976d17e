//! Data models for kbindex.
//!
//! This module contains the core data structures shared by the parser, the
//! corpus, the relation graph and the query engine.

mod category;
mod document;
mod search;

pub use category::{CategoryInfo, KNOWN_CATEGORIES, KnownCategory, known_category};
pub use document::{Difficulty, Document, is_canonical_slug};
pub use search::{SearchFilter, SearchHit};
