//! One-file-per-chunk record store plus the run manifest.

use std::fs;
use std::path::{Path, PathBuf};

use ragprep_core::error::{Error, Result};
use ragprep_core::types::{Chunk, Manifest};

/// Chunk records live under `<out_dir>/chunks/<id>.json`; the manifest at
/// `<out_dir>/manifest.json`. The store never validates chunk content —
/// well-formedness is guaranteed upstream by the chunker.
pub struct ChunkStore {
    chunks_dir: PathBuf,
    manifest_path: PathBuf,
}

impl ChunkStore {
    /// Opens the store under `out_dir`, creating directories as needed.
    pub fn open(out_dir: &Path) -> Result<Self> {
        let chunks_dir = out_dir.join("chunks");
        fs::create_dir_all(&chunks_dir).map_err(|e| Error::storage(&chunks_dir, e))?;
        Ok(Self {
            chunks_dir,
            manifest_path: out_dir.join("manifest.json"),
        })
    }

    pub fn chunks_dir(&self) -> &Path {
        &self.chunks_dir
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Persists one chunk record addressable by its id.
    ///
    /// An existing record with the same id is overwritten, which keeps
    /// re-ingestion of unchanged input byte-idempotent.
    pub fn write(&self, chunk: &Chunk) -> Result<()> {
        let path = self.record_path(&chunk.id);
        let json = serde_json::to_string(chunk)?;
        fs::write(&path, json).map_err(|e| Error::storage(&path, e))
    }

    pub fn record_path(&self, id: &str) -> PathBuf {
        self.chunks_dir.join(format!("{id}.json"))
    }

    /// Overwrites the run manifest; never merged with a prior manifest.
    pub fn finalize_manifest(&self, manifest: &Manifest) -> Result<()> {
        let json = serde_json::to_string_pretty(manifest)?;
        fs::write(&self.manifest_path, json).map_err(|e| Error::storage(&self.manifest_path, e))
    }

    /// Loads every stored chunk record exactly once, ordered
    /// lexicographically by filename.
    pub fn load_chunks(&self) -> Result<Vec<Chunk>> {
        let entries =
            fs::read_dir(&self.chunks_dir).map_err(|e| Error::storage(&self.chunks_dir, e))?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();

        let mut chunks = Vec::with_capacity(paths.len());
        for path in paths {
            let raw = fs::read_to_string(&path).map_err(|e| Error::storage(&path, e))?;
            let chunk = serde_json::from_str(&raw).map_err(|e| Error::CorruptRecord {
                path: path.clone(),
                source: e,
            })?;
            chunks.push(chunk);
        }
        Ok(chunks)
    }
}
