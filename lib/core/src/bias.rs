use crate::association::{average_similarity, effect_size, rank_attributes_by_association};
use crate::similarity::SimilarityResult;
use crate::store::{Embedding, VectorStore};
use crate::wordlist::NamedWordList;
use crate::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_ATTRIBUTES: usize = 5;

/// Association scores of a single target word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordAssociation {
    pub word: String,
    pub target: String,
    pub similarity_attr1: f64,
    pub similarity_attr2: f64,
    pub difference: f64,
}

/// Full outcome of a two-target, two-attribute association test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiasReport {
    pub target1: NamedWordList,
    pub target2: NamedWordList,
    pub attr1: NamedWordList,
    pub attr2: NamedWordList,
    /// Most associated attribute words (from attr1 then attr2), best first
    pub top_attributes_target1: Vec<SimilarityResult>,
    pub top_attributes_target2: Vec<SimilarityResult>,
    /// Target1 words first, then target2 words, each in list order
    pub associations: Vec<WordAssociation>,
    pub effect_size: f64,
}

impl BiasReport {
    /// Per-word differences of one target group, in list order
    pub fn differences(&self, target: &str) -> Vec<f64> {
        self.associations
            .iter()
            .filter(|a| a.target == target)
            .map(|a| a.difference)
            .collect()
    }
}

/// A WEAT-style test over four word lists resolved against one store.
///
/// The effect size is positive when target1 is more associated with attr1
/// than target2 is (equivalently, target2 more with attr2).
pub struct BiasTest<'a> {
    store: &'a VectorStore,
    target1: &'a NamedWordList,
    target2: &'a NamedWordList,
    attr1: &'a NamedWordList,
    attr2: &'a NamedWordList,
    top_n: usize,
}

impl<'a> BiasTest<'a> {
    pub fn new(
        store: &'a VectorStore,
        target1: &'a NamedWordList,
        target2: &'a NamedWordList,
        attr1: &'a NamedWordList,
        attr2: &'a NamedWordList,
    ) -> Self {
        Self {
            store,
            target1,
            target2,
            attr1,
            attr2,
            top_n: DEFAULT_TOP_ATTRIBUTES,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn run(&self) -> Result<BiasReport> {
        let target1 = self.target1.embeddings(self.store)?;
        let target2 = self.target2.embeddings(self.store)?;
        let attr1 = self.attr1.embeddings(self.store)?;
        let attr2 = self.attr2.embeddings(self.store)?;

        let all_attributes: Vec<Embedding<'_>> = attr1.iter().chain(attr2.iter()).copied().collect();
        let top_attributes_target1 =
            rank_attributes_by_association(&target1, &all_attributes, self.top_n)?;
        let top_attributes_target2 =
            rank_attributes_by_association(&target2, &all_attributes, self.top_n)?;

        let mut associations = self.associate(&self.target1.name, &target1, &attr1, &attr2)?;
        let split = associations.len();
        associations.extend(self.associate(&self.target2.name, &target2, &attr1, &attr2)?);

        let diffs: Vec<f64> = associations.iter().map(|a| a.difference).collect();
        let effect_size = effect_size(&diffs[..split], &diffs[split..])?;

        tracing::info!(
            "Effect size of {}/{} over {}/{}: {:.4}",
            self.target1.name,
            self.target2.name,
            self.attr1.name,
            self.attr2.name,
            effect_size
        );

        Ok(BiasReport {
            target1: self.target1.clone(),
            target2: self.target2.clone(),
            attr1: self.attr1.clone(),
            attr2: self.attr2.clone(),
            top_attributes_target1,
            top_attributes_target2,
            associations,
            effect_size,
        })
    }

    fn associate(
        &self,
        target_name: &str,
        targets: &[Embedding<'_>],
        attr1: &[Embedding<'_>],
        attr2: &[Embedding<'_>],
    ) -> Result<Vec<WordAssociation>> {
        targets
            .iter()
            .map(|t| {
                let similarity_attr1 = average_similarity(t, attr1)?;
                let similarity_attr2 = average_similarity(t, attr2)?;
                Ok(WordAssociation {
                    word: t.word.to_string(),
                    target: target_name.to_string(),
                    similarity_attr1,
                    similarity_attr2,
                    difference: similarity_attr1 - similarity_attr2,
                })
            })
            .collect()
    }
}
