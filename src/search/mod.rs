//! Article search.
//!
//! - [`tokenize`]: query text into lowercase word tokens
//! - [`parse_search_query`]: `category:` / `difficulty:` filter tokens
//! - [`QueryEngine`]: deterministic keyword/title/body scoring
//! - [`KeywordIndex`]: keyword to document listings
//! - [`snippet`]: highlighted body excerpts for result display

mod engine;
mod keyword_index;
mod query_parser;
mod snippet;
mod tokenizer;

pub use engine::{BODY_WEIGHT, KEYWORD_WEIGHT, QueryEngine, TITLE_WEIGHT};
pub use keyword_index::{KeywordIndex, KeywordInfo};
pub use query_parser::{ParsedQuery, parse_search_query};
pub use snippet::snippet;
pub use tokenizer::tokenize;
