//! Disk persistence for inverted indices using bincode serialization.
//!
//! Each corpus index is serialized to `<corpus>.idx` in the data directory.
//! Writes use atomic temp-file + rename. A CRC32 checksum is appended as a
//! footer for integrity verification.

use crate::bm25::InvertedIndex;
use crate::document::{CorpusDocument, CorpusType};
use crate::storage::corpus::Corpus;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Magic bytes appended before the CRC32 footer.
const INDEX_CRC_MAGIC: &[u8; 4] = b"SIX1";

/// Location of the persisted index for `corpus` under `dir`.
pub fn index_path(dir: &Path, corpus: CorpusType) -> PathBuf {
    dir.join(format!("{}.idx", corpus))
}

/// Save an index to `path` with atomic write.
/// Layout: [bincode payload][magic "SIX1"][u32 CRC32 BE].
pub fn save_index(index: &InvertedIndex, path: &Path) -> io::Result<()> {
    let bytes = bincode::serialize(index).map_err(|e| io::Error::other(e.to_string()))?;
    let crc = crc32fast::hash(&bytes);

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("idx.tmp");

    let mut output = Vec::with_capacity(bytes.len() + 8);
    output.extend_from_slice(&bytes);
    output.extend_from_slice(INDEX_CRC_MAGIC);
    output.extend_from_slice(&crc.to_be_bytes());

    fs::write(&tmp_path, &output)?;
    fs::rename(&tmp_path, path)?;

    tracing::info!(
        "Saved index {:?} ({} bytes, CRC32={:#010x})",
        path,
        bytes.len(),
        crc
    );
    Ok(())
}

/// Load an index from `path`, verifying the CRC32 footer and internal invariants.
pub fn load_index(path: &Path) -> io::Result<InvertedIndex> {
    let raw = fs::read(path)?;

    if raw.len() < 8 || &raw[raw.len() - 8..raw.len() - 4] != INDEX_CRC_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Index {:?} has no CRC32 footer", path),
        ));
    }
    let payload = &raw[..raw.len() - 8];
    let stored_crc = u32::from_be_bytes([
        raw[raw.len() - 4],
        raw[raw.len() - 3],
        raw[raw.len() - 2],
        raw[raw.len() - 1],
    ]);
    let computed_crc = crc32fast::hash(payload);
    if computed_crc != stored_crc {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Index CRC32 mismatch: expected {:#010x}, got {:#010x}. File may be corrupted: {:?}",
                stored_crc, computed_crc, path
            ),
        ));
    }

    let index: InvertedIndex = bincode::deserialize(payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    index.validate().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("index validation failed: {}", e),
        )
    })?;

    tracing::debug!("Index {:?} CRC32 verified: {:#010x}", path, stored_crc);
    Ok(index)
}

/// Load the persisted index for `corpus` if one exists, otherwise build it from
/// the snapshot and persist it.
///
/// An existing index is never rebuilt. A corrupt one, or one whose document
/// count differs from the snapshot, is an `InvalidData` error; [`rebuild`] is
/// the recovery path.
pub fn build_or_load<D: CorpusDocument>(dir: &Path, corpus: &Corpus<D>) -> io::Result<InvertedIndex> {
    let path = index_path(dir, corpus.kind());
    if !path.exists() {
        return rebuild(dir, corpus);
    }

    let index = load_index(&path)?;
    if index.doc_count as usize != corpus.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "{} index at {:?} covers {} documents but snapshot has {}",
                corpus.kind(),
                path,
                index.doc_count,
                corpus.len()
            ),
        ));
    }
    tracing::info!(
        "{} index already exists, skipping reindexing ({} documents)",
        corpus.kind(),
        index.doc_count
    );
    Ok(index)
}

/// Build the index for `corpus` from scratch and persist it, replacing any existing file.
pub fn rebuild<D: CorpusDocument>(dir: &Path, corpus: &Corpus<D>) -> io::Result<InvertedIndex> {
    let index = InvertedIndex::build(corpus.documents());
    save_index(&index, &index_path(dir, corpus.kind()))?;
    tracing::info!(
        "{} index created ({} documents, {} terms)",
        corpus.kind(),
        index.doc_count,
        index.index.len()
    );
    Ok(index)
}
