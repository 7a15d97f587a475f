//! # weatlab Core
//!
//! Core library for weatlab, a toolkit for querying pretrained word
//! embeddings and measuring association bias between word groups.
//!
//! This crate provides the in-memory data structures and the numerics:
//!
//! - [`VectorStore`] - Immutable word/vector/norm table with O(1) word lookup
//! - [`similarity`] - Cosine similarity and exact k-nearest-neighbour ranking
//! - [`wordlist`] - Resolution of raw word lists against a store's vocabulary
//! - [`association`] - Differential association and WEAT-style effect size
//! - [`BiasTest`] - The full two-target, two-attribute test as a [`BiasReport`]
//!
//! ## Example
//!
//! ```rust
//! use weatlab_core::{similarity, VectorStore};
//!
//! let store = VectorStore::build(vec![
//!     ("cat".to_string(), vec![1.0, 0.0]),
//!     ("dog".to_string(), vec![0.9, 0.1]),
//!     ("car".to_string(), vec![0.0, 1.0]),
//! ])
//! .unwrap();
//!
//! let neighbours = similarity::most_similar_to_word(&store, "cat", 1).unwrap();
//! assert_eq!(neighbours[0].word, "dog");
//! ```

pub mod association;
pub mod bias;
pub mod error;
pub mod similarity;
pub mod store;
pub mod vector;
pub mod wordlist;

pub use bias::{BiasReport, BiasTest, WordAssociation, DEFAULT_TOP_ATTRIBUTES};
pub use error::{Error, Result};
pub use similarity::{cosine_similarity, k_nearest, most_similar_to_word, SimilarityResult};
pub use store::{Embedding, Matrix, VectorStore, WordIndex};
pub use wordlist::NamedWordList;
