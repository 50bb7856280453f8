//! Decode ladder JSON into [`PairLadders`] records.
//!
//! A ladder file is a JSON object keyed by pair. Two layouts exist in the wild:
//!
//! ```text
//! {"came-will": [["came", "wame", "wale", "wall", "will"]]}           // bare chains
//! {"onion-anion": [{"path": ["onion", "anion"]}]}                    // chain objects
//! ```
//!
//! Pairs whose ladders are bare chains have their key put in alphabetical order;
//! pairs written with chain objects keep their key exactly as given.

use super::{canonical_pair, split_pair, PairLadders};
use crate::errors::LoadError;
use log::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Files in a ladder directory are picked up when their name contains this.
pub const LADDER_FILE_MARKER: &str = "ladders.json";

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLadder {
    Chain(Vec<String>),
    Path { path: Vec<String> },
}

/// Decode one ladder document. `origin` names the source in error messages.
///
/// # Errors
///
/// - [`LoadError::MalformedLadders`] if `contents` is not a ladder document
/// - [`LoadError::InvalidPair`] if a key is not two words joined by `-`
/// - [`LoadError::ShortChain`] if a chain has fewer than two words
pub fn parse_ladder_json(contents: &str, origin: &str) -> Result<Vec<PairLadders>, LoadError> {
    let raw: BTreeMap<String, Vec<RawLadder>> =
        serde_json::from_str(contents).map_err(|source| LoadError::MalformedLadders {
            origin: origin.to_string(),
            source,
        })?;

    raw.into_iter()
        .map(|(key, ladders)| {
            let bare = ladders.iter().all(|l| matches!(l, RawLadder::Chain(_)));
            let pair = if bare { canonical_pair(&key) } else { split_pair(&key).map(|_| key.clone()) };
            let pair = pair.ok_or_else(|| LoadError::InvalidPair { pair: key.clone() })?;
            // chains under a reordered key must start from the new first word
            let flipped = pair != key;

            let chains = ladders
                .into_iter()
                .map(|l| match l {
                    RawLadder::Chain(chain) | RawLadder::Path { path: chain } => chain,
                })
                .map(|mut chain| {
                    if chain.len() < 2 {
                        return Err(LoadError::ShortChain { pair: pair.clone(), len: chain.len() });
                    }
                    if flipped {
                        chain.reverse();
                    }
                    Ok(chain)
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(PairLadders { pair, chains })
        })
        .collect()
}

/// Read ladders from a single JSON file, or from every `*ladders.json` file in a
/// directory (in file-name order).
///
/// # Errors
///
/// [`LoadError::Io`] when a file or directory can't be read, plus anything
/// [`parse_ladder_json`] reports.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Vec<PairLadders>, LoadError> {
    let path = path.as_ref();
    let io_err = |p: &std::path::Path| {
        let display = p.display().to_string();
        move |source| LoadError::Io { path: display, source }
    };

    if !path.is_dir() {
        let contents = std::fs::read_to_string(path).map_err(io_err(path))?;
        return parse_ladder_json(&contents, &path.display().to_string());
    }

    let mut files: Vec<std::path::PathBuf> = std::fs::read_dir(path)
        .map_err(io_err(path))?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.contains(LADDER_FILE_MARKER))
        })
        .collect();
    files.sort();

    let mut records = Vec::new();
    for file in &files {
        let contents = std::fs::read_to_string(file).map_err(io_err(file))?;
        let parsed = parse_ladder_json(&contents, &file.display().to_string())?;
        debug!("{}: {} ladder pairs", file.display(), parsed.len());
        records.extend(parsed);
    }
    info!("Read {} ladder pairs from {} files in {}", records.len(), files.len(), path.display());
    Ok(records)
}
