//! Association statistics between target and attribute word groups.
//!
//! A word's differential association is its mean cosine similarity to
//! attribute group A minus its mean similarity to attribute group B. The
//! effect size compares the mean differential association of two target
//! groups, scaled by the population standard deviation of the per-word
//! differences pooled across both target groups.

use crate::similarity::{cosine_similarity, SimilarityResult};
use crate::store::Embedding;
use crate::vector::{mean, population_std_dev};
use crate::{Error, Result};

/// Mean cosine similarity between `target` and every member of `group`
pub fn average_similarity(target: &Embedding<'_>, group: &[Embedding<'_>]) -> Result<f64> {
    if group.is_empty() {
        return Err(Error::EmptyGroup);
    }
    let mut sum = 0.0;
    for member in group {
        sum += cosine_similarity(target.vector, target.norm, member.vector, member.norm)?;
    }
    Ok(sum / group.len() as f64)
}

/// `average_similarity(word, a) - average_similarity(word, b)`
pub fn differential_association(
    word: &Embedding<'_>,
    attr_a: &[Embedding<'_>],
    attr_b: &[Embedding<'_>],
) -> Result<f64> {
    Ok(average_similarity(word, attr_a)? - average_similarity(word, attr_b)?)
}

/// Differential association of every word in `targets`, in order
pub fn differential_associations(
    targets: &[Embedding<'_>],
    attr_a: &[Embedding<'_>],
    attr_b: &[Embedding<'_>],
) -> Result<Vec<f64>> {
    if targets.is_empty() {
        return Err(Error::EmptyGroup);
    }
    targets
        .iter()
        .map(|t| differential_association(t, attr_a, attr_b))
        .collect()
}

/// Effect size from per-word differences of two target groups.
///
/// `(mean(diffs1) - mean(diffs2)) / std(diffs1 ++ diffs2)` with the
/// population standard deviation over the individual word differences.
/// Fails with [`Error::DegenerateVariance`] when that deviation is zero.
pub fn effect_size(diffs1: &[f64], diffs2: &[f64]) -> Result<f64> {
    let mean1 = mean(diffs1).ok_or(Error::EmptyGroup)?;
    let mean2 = mean(diffs2).ok_or(Error::EmptyGroup)?;

    let pooled: Vec<f64> = diffs1.iter().chain(diffs2).copied().collect();
    let std_dev = population_std_dev(&pooled).ok_or(Error::EmptyGroup)?;

    // identical inputs can leave a few ulps of rounding noise
    if std_dev.is_nan() || std_dev <= f64::EPSILON {
        return Err(Error::DegenerateVariance);
    }
    Ok((mean1 - mean2) / std_dev)
}

/// WEAT-style effect size of `target1` vs `target2` over attributes `a` and `b`
pub fn group_effect_size(
    target1: &[Embedding<'_>],
    target2: &[Embedding<'_>],
    attr_a: &[Embedding<'_>],
    attr_b: &[Embedding<'_>],
) -> Result<f64> {
    let diffs1 = differential_associations(target1, attr_a, attr_b)?;
    let diffs2 = differential_associations(target2, attr_a, attr_b)?;
    effect_size(&diffs1, &diffs2)
}

/// The `n` attribute words with the highest mean similarity to `targets`.
///
/// Selection is "stable-sort ascending, keep the last `n`", so among
/// attributes tied at the cutoff the later ones are kept. The result is then
/// reversed to read most similar first. If `n` exceeds the number of
/// attributes, all of them are returned.
pub fn rank_attributes_by_association(
    targets: &[Embedding<'_>],
    attributes: &[Embedding<'_>],
    n: usize,
) -> Result<Vec<SimilarityResult>> {
    if n == 0 {
        return Err(Error::InvalidArgument(
            "number of ranked attributes must be at least 1".to_string(),
        ));
    }
    if attributes.is_empty() {
        return Err(Error::EmptyGroup);
    }

    let mut ranked = attributes
        .iter()
        .map(|attr| {
            Ok(SimilarityResult {
                word: attr.word.to_string(),
                score: average_similarity(attr, targets)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    let keep_from = ranked.len().saturating_sub(n);
    let mut top = ranked.split_off(keep_from);
    top.reverse();
    Ok(top)
}
