//! Persisted store layout: three bincode values written back to back.
//!
//! 1. `Vec<String>` words
//! 2. [`Matrix`] vectors (`rows`, `cols`, row-major `data`)
//! 3. `Vec<f64>` norms
//!
//! Floats are stored bit-exact, and loading never recomputes norms.

use atomicwrites::{AtomicFile, OverwriteBehavior};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use weatlab_core::{Error, Matrix, Result, VectorStore};

/// Serialize a store into any writer
pub fn write_store<W: Write>(store: &VectorStore, writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    encode(store, &mut writer).map_err(|e| Error::Serialization(e.to_string()))?;
    writer.flush()?;
    Ok(())
}

/// Deserialize a store from any reader.
///
/// Undecodable input, trailing bytes and inconsistent array lengths all
/// fail with [`Error::CorruptStore`].
pub fn read_store<R: Read>(reader: R) -> Result<VectorStore> {
    let mut reader = BufReader::new(reader);

    let words: Vec<String> = bincode::deserialize_from(&mut reader)
        .map_err(|e| Error::CorruptStore(format!("words: {}", e)))?;
    let vectors: Matrix = bincode::deserialize_from(&mut reader)
        .map_err(|e| Error::CorruptStore(format!("vectors: {}", e)))?;
    let norms: Vec<f64> = bincode::deserialize_from(&mut reader)
        .map_err(|e| Error::CorruptStore(format!("norms: {}", e)))?;

    if !reader.fill_buf()?.is_empty() {
        return Err(Error::CorruptStore("trailing bytes after norms".to_string()));
    }

    VectorStore::from_parts(words, vectors, norms)
}

/// Serialize a store to bytes
pub fn to_bytes(store: &VectorStore) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_store(store, &mut buf)?;
    Ok(buf)
}

/// Deserialize a store from bytes
pub fn from_bytes(bytes: &[u8]) -> Result<VectorStore> {
    read_store(bytes)
}

/// Atomically write a store to `path` (temp file + rename)
pub fn save_store<P: AsRef<Path>>(store: &VectorStore, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = AtomicFile::new(path, OverwriteBehavior::AllowOverwrite);
    file.write(|f| {
        let mut writer = BufWriter::new(f);
        encode(store, &mut writer)?;
        writer.flush()?;
        Ok::<(), bincode::Error>(())
    })
    .map_err(|e| match e {
        atomicwrites::Error::Internal(io) => Error::Io(io),
        atomicwrites::Error::User(e) => Error::Serialization(e.to_string()),
    })?;

    tracing::info!("Saved {} vectors to {:?}", store.len(), path);
    Ok(())
}

/// Load a store from `path`, failing with [`Error::StoreNotFound`] if it does not exist
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<VectorStore> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::StoreNotFound(path.display().to_string()));
    }

    let store = read_store(File::open(path)?)?;
    tracing::info!(
        "Loaded {} vectors of dimension {} from {:?}",
        store.len(),
        store.dim(),
        path
    );
    Ok(store)
}

fn encode<W: Write>(store: &VectorStore, writer: &mut W) -> bincode::Result<()> {
    bincode::serialize_into(&mut *writer, store.words())?;
    bincode::serialize_into(&mut *writer, store.vectors())?;
    bincode::serialize_into(&mut *writer, store.norms())?;
    Ok(())
}
