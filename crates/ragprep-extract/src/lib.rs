//! ragprep-extract
//!
//! PDF text extraction behind the `TextExtractor` capability trait. The
//! extractor is treated as an opaque function from a document path to raw
//! Unicode text; everything downstream works on that text alone.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use ragprep_core::traits::TextExtractor;

/// `pdf-extract` backed implementation used by the ingestion binary.
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> anyhow::Result<String> {
        let text = pdf_extract::extract_text(path)
            .with_context(|| format!("failed to extract text from {}", path.display()))?;
        debug!("extracted {} bytes from {}", text.len(), path.display());
        Ok(text)
    }
}
