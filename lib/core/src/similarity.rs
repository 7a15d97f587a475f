//! Cosine similarity and exact k-nearest-neighbour ranking over a [`VectorStore`].
//!
//! Every query scores all rows (O(N·D)); there is no approximate index.
//! Scoring runs in parallel across rows, but the ranking is deterministic:
//! equal scores are ordered by row index.

use crate::store::VectorStore;
use crate::vector::dot_product;
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// One ranked neighbour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityResult {
    pub word: String,
    pub score: f64,
}

/// `dot(a, b) / (norm_a * norm_b)`.
///
/// Fails with [`Error::ZeroNorm`] if either norm is zero.
#[inline]
pub fn cosine_similarity(a: &[f64], norm_a: f64, b: &[f64], norm_b: f64) -> Result<f64> {
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(Error::ZeroNorm);
    }
    Ok(dot_product(a, b) / (norm_a * norm_b))
}

/// The `k` rows most similar to `query`, most similar first.
///
/// The query's own row, if it is in the store, is included like any other
/// row. Rows with a zero norm are never candidates, so the result can be
/// shorter than `k` only when the store contains such rows.
pub fn k_nearest(
    query: &[f64],
    query_norm: f64,
    store: &VectorStore,
    k: usize,
) -> Result<Vec<SimilarityResult>> {
    let ranked = top_k(query, query_norm, store, k)?;
    Ok(into_results(store, ranked))
}

/// The `k` words most similar to `word`, excluding `word` itself.
///
/// Fails with [`Error::UnknownWord`] if `word` is not in the store.
pub fn most_similar_to_word(
    store: &VectorStore,
    word: &str,
    k: usize,
) -> Result<Vec<SimilarityResult>> {
    let query = store.lookup(word)?;
    if k == 0 || k >= store.len() {
        return Err(Error::InvalidArgument(format!(
            "result count must be between 1 and {}, got {}",
            store.len().saturating_sub(1),
            k
        )));
    }

    let mut ranked = top_k(query.vector, query.norm, store, k + 1)?;
    ranked.retain(|&(i, _)| i != query.index);
    ranked.truncate(k);

    tracing::debug!("Found {} neighbours for {:?}", ranked.len(), word);
    Ok(into_results(store, ranked))
}

fn top_k(
    query: &[f64],
    query_norm: f64,
    store: &VectorStore,
    k: usize,
) -> Result<Vec<(usize, f64)>> {
    if k == 0 || k > store.len() {
        return Err(Error::InvalidArgument(format!(
            "k must be between 1 and {}, got {}",
            store.len(),
            k
        )));
    }
    if query.len() != store.dim() {
        return Err(Error::InvalidArgument(format!(
            "query has dimension {}, store has {}",
            query.len(),
            store.dim()
        )));
    }
    if query_norm == 0.0 {
        return Err(Error::ZeroNorm);
    }

    let vectors = store.vectors();
    let norms = store.norms();
    let scores: Vec<(usize, f64)> = (0..store.len())
        .into_par_iter()
        .filter(|&i| norms[i] != 0.0)
        .map(|i| (i, dot_product(query, vectors.row(i)) / (query_norm * norms[i])))
        .collect();

    Ok(select_top_k(scores, k))
}

/// Bounded min-heap selection; a better candidate has a higher score, or the
/// same score and a lower index.
fn select_top_k(scores: Vec<(usize, f64)>, k: usize) -> Vec<(usize, f64)> {
    type Key = (OrderedFloat<f64>, Reverse<usize>);
    let mut heap: BinaryHeap<Reverse<Key>> = BinaryHeap::with_capacity(k + 1);

    for (i, score) in scores {
        let key = (OrderedFloat(score), Reverse(i));
        if heap.len() < k {
            heap.push(Reverse(key));
        } else if let Some(Reverse(worst)) = heap.peek() {
            if key > *worst {
                heap.pop();
                heap.push(Reverse(key));
            }
        }
    }

    let mut ranked: Vec<Key> = heap.into_iter().map(|Reverse(key)| key).collect();
    ranked.sort_unstable_by(|a, b| b.cmp(a));
    ranked
        .into_iter()
        .map(|(score, Reverse(i))| (i, score.into_inner()))
        .collect()
}

fn into_results(store: &VectorStore, ranked: Vec<(usize, f64)>) -> Vec<SimilarityResult> {
    ranked
        .into_iter()
        .map(|(i, score)| SimilarityResult {
            word: store.words()[i].clone(),
            score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animals() -> VectorStore {
        VectorStore::build(vec![
            ("cat".to_string(), vec![1.0, 0.0]),
            ("dog".to_string(), vec![0.9, 0.1]),
            ("car".to_string(), vec![0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_cosine_similarity() {
        let sim = cosine_similarity(&[1.0, 0.0], 1.0, &[1.0, 0.0], 1.0).unwrap();
        assert!((sim - 1.0).abs() < 1e-12);

        let sim = cosine_similarity(&[1.0, 0.0], 1.0, &[0.0, 1.0], 1.0).unwrap();
        assert!(sim.abs() < 1e-12);

        let sim = cosine_similarity(&[1.0, 0.0], 1.0, &[-2.0, 0.0], 2.0).unwrap();
        assert!((sim + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_self_is_one() {
        let v = [0.3, -1.2, 4.0];
        let n = crate::vector::norm(&v);
        assert!((cosine_similarity(&v, n, &v, n).unwrap() - 1.0).abs() < 1e-12);

        let w = [-7.5, 0.02, 3.3, 11.0];
        let n = crate::vector::norm(&w);
        assert!((cosine_similarity(&w, n, &w, n).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cosine_similarity_symmetric() {
        let a = [0.3, -1.2, 4.0];
        let b = [2.5, 0.1, -0.7];
        let (na, nb) = (crate::vector::norm(&a), crate::vector::norm(&b));
        assert_eq!(
            cosine_similarity(&a, na, &b, nb).unwrap(),
            cosine_similarity(&b, nb, &a, na).unwrap()
        );
    }

    #[test]
    fn test_cosine_similarity_zero_norm() {
        assert!(matches!(
            cosine_similarity(&[0.0, 0.0], 0.0, &[1.0, 0.0], 1.0),
            Err(Error::ZeroNorm)
        ));
        assert!(matches!(
            cosine_similarity(&[1.0, 0.0], 1.0, &[0.0, 0.0], 0.0),
            Err(Error::ZeroNorm)
        ));
    }

    #[test]
    fn test_k_nearest_includes_self() {
        let store = animals();
        let cat = store.lookup("cat").unwrap();
        let results = k_nearest(cat.vector, cat.norm, &store, 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].word, "cat");
        assert!((results[0].score - 1.0).abs() < 1e-12);
        assert_eq!(results[1].word, "dog");
        assert!((results[1].score - 0.9 / 0.82f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_most_similar_excludes_self() {
        let store = animals();
        let results = most_similar_to_word(&store, "cat", 1).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "dog");
        assert!((results[0].score - 0.994).abs() < 1e-3);
    }

    #[test]
    fn test_k_nearest_out_of_range() {
        let store = animals();
        let q = [1.0, 0.0];
        assert!(matches!(k_nearest(&q, 1.0, &store, 0), Err(Error::InvalidArgument(_))));
        assert!(matches!(k_nearest(&q, 1.0, &store, 4), Err(Error::InvalidArgument(_))));
        assert!(k_nearest(&q, 1.0, &store, 3).is_ok());

        // excluding self leaves N - 1 candidates
        assert!(matches!(
            most_similar_to_word(&store, "cat", 3),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_k_nearest_dimension_mismatch() {
        let store = animals();
        assert!(matches!(
            k_nearest(&[1.0, 0.0, 0.0], 1.0, &store, 1),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_most_similar_unknown_word() {
        let store = animals();
        assert!(matches!(
            most_similar_to_word(&store, "truck", 1),
            Err(Error::UnknownWord(w)) if w == "truck"
        ));
    }

    #[test]
    fn test_ties_broken_by_index() {
        let store = VectorStore::build(vec![
            ("q".to_string(), vec![1.0, 0.0]),
            ("b".to_string(), vec![0.0, 2.0]),
            ("a".to_string(), vec![0.0, 1.0]),
            ("c".to_string(), vec![0.0, 3.0]),
        ])
        .unwrap();

        let results = k_nearest(&[0.0, 1.0], 1.0, &store, 3).unwrap();
        let words: Vec<&str> = results.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_zero_rows_are_skipped() {
        let store = VectorStore::build(vec![
            ("zero".to_string(), vec![0.0, 0.0]),
            ("x".to_string(), vec![1.0, 0.0]),
        ])
        .unwrap();

        let results = k_nearest(&[1.0, 0.0], 1.0, &store, 2).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "x");

        assert!(matches!(
            k_nearest(&[0.0, 0.0], 0.0, &store, 1),
            Err(Error::ZeroNorm)
        ));
    }

    #[test]
    fn test_scores_non_increasing() {
        let entries: Vec<(String, Vec<f64>)> = (0..50)
            .map(|i| {
                let t = i as f64 * 0.37;
                (format!("w{i}"), vec![t.sin(), t.cos(), (t * 0.5).sin() + 0.1])
            })
            .collect();
        let store = VectorStore::build(entries).unwrap();
        let q = store.embedding(7);

        let results = k_nearest(q.vector, q.norm, &store, 50).unwrap();
        assert_eq!(results.len(), 50);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
