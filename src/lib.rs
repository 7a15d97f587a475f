//! # weatlab
//!
//! Nearest-neighbour search and association-bias measurement over
//! pretrained word embeddings (GloVe-style text vectors).
//!
//! weatlab answers two questions about an embedding:
//!
//! - Which words are most similar to a query word? (exact cosine k-NN)
//! - Are two target word groups differently associated with two attribute
//!   groups? (a WEAT-style effect size, without the permutation test)
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! weatlab convert glove.twitter.27B.50d.txt twitter
//! weatlab similar twitter king 10
//! weatlab weat twitter flowers insects pleasant unpleasant
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use weatlab::prelude::*;
//!
//! let store = VectorStore::build(vec![
//!     ("rose".to_string(), vec![1.0, 0.1]),
//!     ("wasp".to_string(), vec![0.1, 1.0]),
//!     ("love".to_string(), vec![0.9, 0.0]),
//!     ("filth".to_string(), vec![0.0, 0.9]),
//! ])
//! .unwrap();
//!
//! let flowers = resolve("flowers", &["rose"], &store).unwrap();
//! let insects = resolve("insects", &["wasp"], &store).unwrap();
//! let pleasant = resolve("pleasant", &["love"], &store).unwrap();
//! let unpleasant = resolve("unpleasant", &["filth"], &store).unwrap();
//!
//! let report = BiasTest::new(&store, &flowers, &insects, &pleasant, &unpleasant)
//!     .run()
//!     .unwrap();
//! assert!(report.effect_size > 0.0);
//! ```
//!
//! ## Crate Structure
//!
//! - `weatlab-core` - Vector store, similarity, word lists, association statistics
//! - `weatlab-storage` - Persisted store format, GloVe text parsing, model/word-list catalog

// Re-export core types
pub use weatlab_core::{
    association, similarity, wordlist, BiasReport, BiasTest, Embedding, Error, Matrix,
    NamedWordList, Result, SimilarityResult, VectorStore, WordAssociation,
};

// Re-export storage
pub use weatlab_storage::{Workspace, WorkspaceConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BiasReport, BiasTest, Error, NamedWordList, Result, SimilarityResult, VectorStore,
        Workspace, WorkspaceConfig,
    };
    pub use weatlab_core::similarity::{cosine_similarity, k_nearest, most_similar_to_word};
    pub use weatlab_core::wordlist::resolve;
}

/// Persistence and text-parsing entry points
pub mod storage {
    pub use weatlab_storage::{
        from_bytes, load_store, parse_glove, read_glove, save_store, to_bytes, ParseSummary,
    };
}
