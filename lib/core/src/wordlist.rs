use crate::store::{Embedding, VectorStore};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named word list resolved against one store's vocabulary.
///
/// `resolved_words[i]` lives at row `indices[i]` of the store it was
/// resolved against. Input order is preserved, duplicates included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedWordList {
    pub name: String,
    pub resolved_words: Vec<String>,
    pub omitted: Vec<String>,
    #[serde(skip)]
    indices: Vec<usize>,
}

impl NamedWordList {
    pub fn len(&self) -> usize {
        self.resolved_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved_words.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Embeddings of the resolved words in `store`.
    ///
    /// Each recorded row must still hold the same word, otherwise this fails
    /// with [`Error::InvalidArgument`]. A deserialized list carries no row
    /// indices, so its words are looked up again.
    pub fn embeddings<'a>(&self, store: &'a VectorStore) -> Result<Vec<Embedding<'a>>> {
        if self.indices.len() != self.resolved_words.len() {
            return self.resolved_words.iter().map(|w| store.lookup(w)).collect();
        }

        let rows = store.embeddings(&self.indices).map_err(|_| self.foreign_store())?;
        if rows.iter().zip(&self.resolved_words).any(|(e, w)| e.word != w) {
            return Err(self.foreign_store());
        }
        Ok(rows)
    }

    fn foreign_store(&self) -> Error {
        Error::InvalidArgument(format!(
            "word list {:?} was resolved against a different store",
            self.name
        ))
    }
}

/// Lower-case and trim a raw word list entry
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolve raw words against the store's vocabulary.
///
/// Each word is trimmed and lower-cased. Words missing from the vocabulary
/// are collected in `omitted` and reported as a warning. Fails with
/// [`Error::EmptyWordList`] only when no word at all is known.
pub fn resolve<S: AsRef<str>>(
    name: &str,
    raw_words: &[S],
    store: &VectorStore,
) -> Result<NamedWordList> {
    let mut resolved_words = Vec::new();
    let mut indices = Vec::new();
    let mut omitted = Vec::new();

    for raw in raw_words {
        let word = normalize_word(raw.as_ref());
        match store.index_of(&word) {
            Some(i) => {
                resolved_words.push(word);
                indices.push(i);
            }
            None => omitted.push(word),
        }
    }

    if !omitted.is_empty() {
        tracing::warn!(
            "The following words from {} are not in the vocabulary: {}",
            name,
            omitted.join(", ")
        );
    }

    if resolved_words.is_empty() {
        return Err(Error::EmptyWordList(name.to_string()));
    }

    Ok(NamedWordList {
        name: name.to_string(),
        resolved_words,
        omitted,
        indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store() -> VectorStore {
        VectorStore::build(vec![
            ("cat".to_string(), vec![1.0, 0.0]),
            ("dog".to_string(), vec![0.9, 0.1]),
            ("car".to_string(), vec![0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_resolve_normalizes_and_filters() {
        let store = store();
        let list = resolve("pets", &["  Cat\n", "DOG", "Unicorn "], &store).unwrap();

        assert_eq!(list.name, "pets");
        assert_eq!(list.resolved_words, vec!["cat", "dog"]);
        assert_eq!(list.omitted, vec!["unicorn"]);
        assert_eq!(list.indices(), &[0, 1]);
    }

    #[test]
    fn test_resolved_and_omitted_cover_input() {
        let store = store();
        let raw = ["car", "Truck", "cat", "bus"];
        let list = resolve("mixed", &raw, &store).unwrap();

        let covered: HashSet<String> = list
            .resolved_words
            .iter()
            .chain(list.omitted.iter())
            .cloned()
            .collect();
        let expected: HashSet<String> = raw.iter().map(|w| normalize_word(w)).collect();
        assert_eq!(covered, expected);
    }

    #[test]
    fn test_resolve_all_unknown_fails() {
        let store = store();
        let err = resolve("vehicles", &["truck"], &store).unwrap_err();
        assert!(matches!(err, Error::EmptyWordList(name) if name == "vehicles"));

        let empty: [&str; 0] = [];
        assert!(matches!(resolve("none", &empty, &store), Err(Error::EmptyWordList(_))));
    }

    #[test]
    fn test_resolve_keeps_order_and_duplicates() {
        let store = store();
        let list = resolve("dups", &["car", "cat", "car"], &store).unwrap();
        assert_eq!(list.resolved_words, vec!["car", "cat", "car"]);

        let words: Vec<&str> = list.embeddings(&store).unwrap().iter().map(|e| e.word).collect();
        assert_eq!(words, vec!["car", "cat", "car"]);
    }

    #[test]
    fn test_embeddings_against_other_store() {
        let list = resolve("pets", &["dog", "car"], &store()).unwrap();

        let smaller = VectorStore::build(vec![("dog".to_string(), vec![1.0, 0.0])]).unwrap();
        assert!(matches!(list.embeddings(&smaller), Err(Error::InvalidArgument(_))));

        // same size, different words at the recorded rows
        let shuffled = VectorStore::build(vec![
            ("car".to_string(), vec![0.0, 1.0]),
            ("cat".to_string(), vec![1.0, 0.0]),
            ("dog".to_string(), vec![0.9, 0.1]),
        ])
        .unwrap();
        assert!(matches!(list.embeddings(&shuffled), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_deserialized_list_looks_words_up_again() {
        let store = store();
        let list = resolve("pets", &["car", "Dog", "unicorn"], &store).unwrap();

        let json = serde_json::to_string(&list).unwrap();
        let restored: NamedWordList = serde_json::from_str(&json).unwrap();
        assert!(restored.indices().is_empty());
        assert_eq!(restored.omitted, vec!["unicorn"]);

        let words: Vec<&str> = restored.embeddings(&store).unwrap().iter().map(|e| e.word).collect();
        assert_eq!(words, vec!["car", "dog"]);

        let other = VectorStore::build(vec![("car".to_string(), vec![1.0])]).unwrap();
        assert!(matches!(restored.embeddings(&other), Err(Error::UnknownWord(w)) if w == "dog"));
    }
}
