use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Provider-side embedding failures, split so the pipeline can decide
/// which ones are worth retrying.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("authentication rejected: {0}")]
    Auth(String),

    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("transient failure: {0}")]
    Transient(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl EmbedError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Transient(_))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to extract '{source_name}': {message}")]
    Extraction { source_name: String, message: String },

    #[error("Storage failure at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Embedding failed for chunk {chunk_id} from '{source_doc}': {source}")]
    Embedding {
        chunk_id: String,
        source_doc: String,
        #[source]
        source: EmbedError,
    },

    #[error("Corrupt record at {}: {source}", path.display())]
    CorruptRecord {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    pub fn extraction(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Extraction {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
