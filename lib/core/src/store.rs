use crate::vector::norm;
use crate::{Error, Result};
use ahash::AHashMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Row-major `f64` matrix, `rows * cols` values in `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::CorruptStore(format!(
                "matrix shape [{}, {}] does not match {} values",
                rows,
                cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }
}

/// Word -> row lookup. The first occurrence of a duplicated word wins.
#[derive(Debug, Clone, Default)]
pub struct WordIndex {
    map: AHashMap<String, usize>,
}

impl WordIndex {
    pub fn build(words: &[String]) -> Self {
        let mut map = AHashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            map.entry(word.clone()).or_insert(i);
        }
        Self { map }
    }

    #[inline]
    pub fn get(&self, word: &str) -> Option<usize> {
        self.map.get(word).copied()
    }
}

/// Borrowed view of one store row
#[derive(Debug, Clone, Copy)]
pub struct Embedding<'a> {
    pub index: usize,
    pub word: &'a str,
    pub vector: &'a [f64],
    pub norm: f64,
}

/// Immutable embedding table: words, their vectors and precomputed norms.
///
/// Row `i` of `vectors` and `norms[i]` belong to `words[i]`. A store is
/// never mutated after construction, so it can be shared across threads
/// by reference.
#[derive(Debug, Clone)]
pub struct VectorStore {
    words: Vec<String>,
    vectors: Matrix,
    norms: Vec<f64>,
    index: WordIndex,
}

impl VectorStore {
    /// Build a store from raw `(word, vector)` entries.
    ///
    /// The width of the first entry fixes the dimensionality; any later
    /// entry of a different width fails with [`Error::MalformedEntry`].
    pub fn build<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut words = Vec::new();
        let mut data = Vec::new();
        let mut dim: Option<usize> = None;

        for (word, vector) in entries {
            let expected = *dim.get_or_insert(vector.len());
            if vector.len() != expected {
                return Err(Error::MalformedEntry {
                    word,
                    expected,
                    actual: vector.len(),
                });
            }
            words.push(word);
            data.extend_from_slice(&vector);
        }

        let cols = dim.unwrap_or(0);
        let vectors = Matrix::new(words.len(), cols, data)?;
        let norms = compute_norms(&vectors);
        tracing::debug!("Built store with {} words of dimension {}", words.len(), cols);

        Ok(Self::assemble(words, vectors, norms))
    }

    /// Reassemble a store from its three persisted arrays.
    ///
    /// Norms are taken as given; only the array lengths are validated.
    pub fn from_parts(words: Vec<String>, vectors: Matrix, norms: Vec<f64>) -> Result<Self> {
        if vectors.rows.checked_mul(vectors.cols) != Some(vectors.data.len()) {
            return Err(Error::CorruptStore(format!(
                "matrix shape [{}, {}] does not match {} values",
                vectors.rows,
                vectors.cols,
                vectors.data.len()
            )));
        }
        if words.len() != vectors.rows || norms.len() != vectors.rows {
            return Err(Error::CorruptStore(format!(
                "inconsistent lengths: {} words, {} vector rows, {} norms",
                words.len(),
                vectors.rows,
                norms.len()
            )));
        }
        Ok(Self::assemble(words, vectors, norms))
    }

    fn assemble(words: Vec<String>, vectors: Matrix, norms: Vec<f64>) -> Self {
        let index = WordIndex::build(&words);
        Self {
            words,
            vectors,
            norms,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.vectors.cols
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn vectors(&self) -> &Matrix {
        &self.vectors
    }

    pub fn norms(&self) -> &[f64] {
        &self.norms
    }

    #[inline]
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.index.get(word)
    }

    /// Row `i` as an [`Embedding`]. Panics if `i >= len()`.
    #[inline]
    pub fn embedding(&self, i: usize) -> Embedding<'_> {
        Embedding {
            index: i,
            word: &self.words[i],
            vector: self.vectors.row(i),
            norm: self.norms[i],
        }
    }

    /// Look up a word the caller expects to be present
    pub fn lookup(&self, word: &str) -> Result<Embedding<'_>> {
        self.index_of(word)
            .map(|i| self.embedding(i))
            .ok_or_else(|| Error::UnknownWord(word.to_string()))
    }

    /// Embeddings for a list of row indices, in the given order
    ///
    /// Fails with [`Error::InvalidArgument`] if an index is out of range.
    pub fn embeddings(&self, indices: &[usize]) -> Result<Vec<Embedding<'_>>> {
        indices
            .iter()
            .map(|&i| {
                if i < self.len() {
                    Ok(self.embedding(i))
                } else {
                    Err(Error::InvalidArgument(format!(
                        "row {} out of range for a store of {} words",
                        i,
                        self.len()
                    )))
                }
            })
            .collect()
    }
}

fn compute_norms(vectors: &Matrix) -> Vec<f64> {
    if vectors.cols == 0 {
        return vec![0.0; vectors.rows];
    }
    vectors.data.par_chunks_exact(vectors.cols).map(norm).collect()
}
