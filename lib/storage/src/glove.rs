//! Plain-text embedding parser (GloVe / word2vec text layout)
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use weatlab_core::{Error, Result, VectorStore};

/// Counts from one parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseSummary {
    pub entries: usize,
    pub skipped: usize,
    pub dim: usize,
}

/// Parse `word v1 v2 ... vD` lines.
///
/// D is fixed by the first non-blank line. Lines with a different token
/// count are skipped; a component that is not a number fails with
/// [`Error::MalformedLine`].
pub fn parse_glove<R: BufRead>(reader: R) -> Result<(Vec<(String, Vec<f64>)>, ParseSummary)> {
    let mut entries = Vec::new();
    let mut summary = ParseSummary::default();
    let mut width: Option<usize> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        let expected = *width.get_or_insert(tokens.len());
        if tokens.len() != expected {
            summary.skipped += 1;
            tracing::warn!(
                "Skipping line {}: expected {} tokens, found {}",
                line_no + 1,
                expected,
                tokens.len()
            );
            continue;
        }

        let vector = tokens[1..]
            .iter()
            .map(|t| {
                t.parse::<f64>().map_err(|e| Error::MalformedLine {
                    line: line_no + 1,
                    reason: format!("{:?} is not a number: {}", t, e),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        entries.push((tokens[0].to_string(), vector));
    }

    summary.entries = entries.len();
    summary.dim = width.map(|w| w - 1).unwrap_or(0);
    Ok((entries, summary))
}

/// Parse a text embedding file and build a store from it
pub fn read_glove<P: AsRef<Path>>(path: P) -> Result<(VectorStore, ParseSummary)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let (entries, summary) = parse_glove(BufReader::new(file))?;
    tracing::info!(
        "Parsed {} vectors of dimension {} from {:?} ({} lines skipped)",
        summary.entries,
        summary.dim,
        path,
        summary.skipped
    );
    let store = VectorStore::build(entries)?;
    Ok((store, summary))
}
