use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Vector store not found: {0}")]
    StoreNotFound(String),

    #[error("Corrupt vector store: {0}")]
    CorruptStore(String),

    #[error("Malformed entry {word:?}: expected {expected} components, got {actual}")]
    MalformedEntry {
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Word list {0:?} has no words present in the vocabulary")]
    EmptyWordList(String),

    #[error("Cannot average over an empty group")]
    EmptyGroup,

    #[error("Pooled standard deviation is zero; effect size is undefined")]
    DegenerateVariance,

    #[error("Word not in vocabulary: {0}")]
    UnknownWord(String),

    #[error("Zero-norm vector has no direction")]
    ZeroNorm,

    #[error("Word list not found: {0}")]
    WordListNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
