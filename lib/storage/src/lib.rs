pub mod catalog;
pub mod glove;
pub mod persistence;

pub use catalog::{Workspace, WorkspaceConfig, MODEL_EXTENSION, WORDLIST_EXTENSION};
pub use glove::{parse_glove, read_glove, ParseSummary};
pub use persistence::{from_bytes, load_store, read_store, save_store, to_bytes, write_store};
