//! Append-only NDJSON writer for embedding output records.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ragprep_core::error::{Error, Result};
use ragprep_core::types::EmbeddingRecord;

/// Appends one record per line. Records are never reordered or rewritten;
/// re-running a pipeline against the same output file simply appends.
pub struct EmbeddingWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl EmbeddingWriter {
    /// Opens `path` for appending, creating it if missing.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::storage(path, e))?;
        Ok(Self {
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record as a single line and flushes before returning.
    ///
    /// The record is fully serialized before any byte is written, so an
    /// interrupted run never leaves a partial trailing line.
    pub fn append(&mut self, record: &EmbeddingRecord) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::storage(&self.path, e))
    }
}
