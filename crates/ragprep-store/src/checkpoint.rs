//! Persisted set of already-embedded chunk ids.
//!
//! One id per line, appended as each record lands. A restart consults the
//! set and skips ids already present, so re-running the pipeline is
//! additive instead of duplicating output rows.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ragprep_core::error::{Error, Result};
use ragprep_core::types::ChunkId;

pub struct Checkpoint {
    seen: HashSet<ChunkId>,
    writer: BufWriter<File>,
    path: PathBuf,
}

impl Checkpoint {
    /// Loads any existing checkpoint at `path` and opens it for appending.
    pub fn open(path: &Path) -> Result<Self> {
        let seen = if path.exists() {
            fs::read_to_string(path)
                .map_err(|e| Error::storage(path, e))?
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect()
        } else {
            HashSet::new()
        };
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::storage(path, e))?;
        Ok(Self {
            seen,
            writer: BufWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Records an id, flushed immediately so a crash cannot lose it.
    pub fn record(&mut self, id: &str) -> Result<()> {
        writeln!(self.writer, "{id}")
            .and_then(|()| self.writer.flush())
            .map_err(|e| Error::storage(&self.path, e))?;
        self.seen.insert(id.to_string());
        Ok(())
    }
}
