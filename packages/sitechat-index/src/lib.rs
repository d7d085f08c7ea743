//! Lexical retrieval over website passages.
//!
//! [`LexicalIndex`] keeps passages next to their token multisets, [`store`] persists and restores
//! them, and [`LexicalIndex::search`] ranks passages against a query with a pluggable
//! [`Similarity`].

pub mod defaults;
pub mod similarity;
pub mod store;
pub mod tokenize;

mod error;
mod index;
mod search;

pub use error::{Error, Result};
pub use index::{IndexEntry, LexicalIndex};
pub use similarity::{Cosine, Jaccard, Query, Similarity, calculate_similarity};
pub use store::{IndexPaths, IndexSource, Loaded};
pub use tokenize::{TokenBag, tokenize};

pub const DEFAULT_TOP_K: usize = 5;
