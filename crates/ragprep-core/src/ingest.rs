//! Document processing: walk a PDF directory, extract text, normalize,
//! chunk, and assign identifiers.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::chunk_id::stable_id;
use crate::chunker::Chunker;
use crate::error::{Error, Result};
use crate::normalize::TextNormalizer;
use crate::traits::TextExtractor;
use crate::types::{Chunk, ChunkMetadata, ManifestEntry};

/// Everything chunking produced for one source document.
///
/// The document text itself is dropped once chunking finishes; only the
/// windows and the manifest fields survive.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub pdf: String,
    pub title: String,
    pub num_chars: usize,
    pub chunks: Vec<Chunk>,
}

impl ProcessedDocument {
    pub fn manifest_entry(&self) -> ManifestEntry {
        ManifestEntry {
            pdf: self.pdf.clone(),
            title: self.title.clone(),
            num_chars: self.num_chars,
            num_chunks: self.chunks.len(),
            chunk_ids: self.chunks.iter().map(|c| c.id.clone()).collect(),
        }
    }
}

pub struct DocumentProcessor {
    normalizer: TextNormalizer,
    chunker: Chunker,
    episode_code: Regex,
}

impl DocumentProcessor {
    pub fn new(chunker: Chunker) -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            chunker,
            episode_code: Regex::new(r"(?i)(S\d{1,2}E\d{1,2})").expect("valid pattern"),
        }
    }

    /// Processes every PDF under `pdf_dir`, one document at a time.
    ///
    /// Processing order is lexicographic by filename, an explicit contract so
    /// repeated runs over unchanged input are byte-identical. An unreadable
    /// PDF is reported and skipped; an empty directory is an error.
    pub fn process_directory(
        &self,
        extractor: &dyn TextExtractor,
        pdf_dir: &Path,
    ) -> Result<Vec<ProcessedDocument>> {
        let files = list_pdf_files(pdf_dir);
        if files.is_empty() {
            return Err(Error::extraction(
                pdf_dir.display().to_string(),
                "no PDF files found",
            ));
        }

        let mut documents = Vec::new();
        for (file_index, path) in files.iter().enumerate() {
            info!(
                "Processing file {}/{}: {}",
                file_index + 1,
                files.len(),
                path.display()
            );
            match self.process_file(extractor, path) {
                Ok(doc) => documents.push(doc),
                Err(err) => warn!("skipping document: {err}"),
            }
        }
        Ok(documents)
    }

    fn process_file(
        &self,
        extractor: &dyn TextExtractor,
        path: &Path,
    ) -> Result<ProcessedDocument> {
        let pdf_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let raw = extractor
            .extract(path)
            .map_err(|e| Error::extraction(&pdf_name, e.to_string()))?;
        let text = self.normalizer.normalize(&raw);
        let num_chars = text.chars().count();
        let title = self.guess_title(&pdf_name);

        let windows = self.chunker.split(&text);
        let chunk_count = windows.len();
        let chunks = windows
            .into_iter()
            .enumerate()
            .map(|(chunk_index, window)| {
                let chars = window.chars().count();
                Chunk {
                    id: stable_id(&pdf_name, chunk_index, &window),
                    source: pdf_name.clone(),
                    title: title.clone(),
                    text: window,
                    metadata: ChunkMetadata {
                        chunk_index,
                        chunk_count,
                        chars,
                    },
                }
            })
            .collect();

        Ok(ProcessedDocument {
            pdf: pdf_name,
            title,
            num_chars,
            chunks,
        })
    }

    /// Best-effort label: an SxxEyy episode code pulled from the filename,
    /// uppercased, else the filename without its `.pdf` suffix.
    fn guess_title(&self, pdf_name: &str) -> String {
        if let Some(m) = self.episode_code.find(pdf_name) {
            return m.as_str().to_uppercase();
        }
        pdf_name.trim_end_matches(".pdf").to_string()
    }
}

fn list_pdf_files(root: &Path) -> Vec<PathBuf> {
    let mut pdf_files: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdf_files.sort();
    pdf_files
}
