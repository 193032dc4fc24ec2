//! Domain types shared by the ingestion and embedding phases.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// One retrieval window cut from a source document.
///
/// - `id`: content-derived identifier (see `chunk_id`)
/// - `source`: owning PDF filename
/// - `title`: best-effort document label
/// - `text`: the window content after normalization
///
/// Immutable once written by the chunk store. Two windows with identical
/// (source, index, first-2000-chars) always carry the same `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub source: String,
    pub title: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Position of a chunk within its parent document.
///
/// `chunk_index` is unique per document and increases in emission order;
/// `chars` always equals the character count of the window text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub chunk_index: usize,
    pub chunk_count: usize,
    pub chars: usize,
}

/// Summary of one ingestion run, fully overwritten on each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub pdf_dir: String,
    pub out_dir: String,
    pub files: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub pdf: String,
    pub title: String,
    pub num_chars: usize,
    pub num_chunks: usize,
    pub chunk_ids: Vec<ChunkId>,
}

/// One row of the append-only embedding output store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub id: ChunkId,
    pub values: Vec<f32>,
    pub metadata: EmbeddingMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingMetadata {
    pub source: String,
    pub title: String,
    pub chunk_index: usize,
}

impl EmbeddingRecord {
    /// Builds the output row for a chunk, joined to it by `id`.
    pub fn from_chunk(chunk: &Chunk, values: Vec<f32>) -> Self {
        Self {
            id: chunk.id.clone(),
            values,
            metadata: EmbeddingMetadata {
                source: chunk.source.clone(),
                title: chunk.title.clone(),
                chunk_index: chunk.metadata.chunk_index,
            },
        }
    }
}
