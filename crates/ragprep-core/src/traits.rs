use std::path::Path;

use crate::error::EmbedError;

/// Pulls raw Unicode text out of a source document.
///
/// Injected into the document processor so ingestion can run against
/// deterministic fakes in tests; the production implementation lives in
/// `ragprep-extract`.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> anyhow::Result<String>;
}

/// Maps text to a fixed-length vector via an external provider.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// Model identifier reported in logs.
    fn model_id(&self) -> &str;
}
