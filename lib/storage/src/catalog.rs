use crate::persistence::{load_store, save_store};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use weatlab_core::wordlist::{self, NamedWordList};
use weatlab_core::{Error, Result, VectorStore};

/// Extension of persisted stores ("word-vector store")
pub const MODEL_EXTENSION: &str = "wvs";
/// Extension of word-list files
pub const WORDLIST_EXTENSION: &str = "txt";

/// Where models and word lists live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    pub models_dir: PathBuf,
    pub wordlists_dir: PathBuf,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            models_dir: PathBuf::from("models"),
            wordlists_dir: PathBuf::from("wordlists"),
        }
    }
}

/// Named access to stores and word lists under two directories
pub struct Workspace {
    config: WorkspaceConfig,
}

impl Workspace {
    pub fn new(config: WorkspaceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    pub fn store_path(&self, name: &str) -> PathBuf {
        self.config
            .models_dir
            .join(format!("{}.{}", name, MODEL_EXTENSION))
    }

    pub fn wordlist_path(&self, name: &str) -> PathBuf {
        self.config
            .wordlists_dir
            .join(format!("{}.{}", name, WORDLIST_EXTENSION))
    }

    /// Load the store called `name`; a missing file fails with
    /// [`Error::StoreNotFound`] carrying `name`
    pub fn load_store(&self, name: &str) -> Result<VectorStore> {
        let path = self.store_path(name);
        if !path.exists() {
            return Err(Error::StoreNotFound(name.to_string()));
        }
        load_store(path)
    }

    pub fn save_store(&self, name: &str, store: &VectorStore) -> Result<PathBuf> {
        fs::create_dir_all(&self.config.models_dir)?;
        let path = self.store_path(name);
        save_store(store, &path)?;
        Ok(path)
    }

    /// Sorted names of the stores in the models directory
    pub fn list_models(&self) -> Result<Vec<String>> {
        list_names(&self.config.models_dir, MODEL_EXTENSION)
    }

    /// Sorted names of the word lists in the word-lists directory
    pub fn list_wordlists(&self) -> Result<Vec<String>> {
        list_names(&self.config.wordlists_dir, WORDLIST_EXTENSION)
    }

    /// Raw lines of the word list `name`, blank lines dropped
    pub fn read_wordlist(&self, name: &str) -> Result<Vec<String>> {
        let path = self.wordlist_path(name);
        if !path.is_file() {
            return Err(Error::WordListNotFound(name.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        Ok(text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Read the word list `name` and resolve it against `store`
    pub fn resolve_wordlist(&self, name: &str, store: &VectorStore) -> Result<NamedWordList> {
        let raw = self.read_wordlist(name)?;
        wordlist::resolve(name, &raw, store)
    }
}

fn list_names(dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            names.push(stem.to_string());
        }
    }
    names.sort();
    Ok(names)
}
