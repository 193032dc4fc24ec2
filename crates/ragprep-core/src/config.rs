//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Components never read process-global state: each phase extracts its typed
//! section once and passes values down explicitly.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Typed `[ingest]` section.
    pub fn ingest(&self) -> anyhow::Result<IngestConfig> {
        self.get("ingest")
    }

    /// Typed `[embed]` section.
    pub fn embed(&self) -> anyhow::Result<EmbedConfig> {
        self.get("embed")
    }
}

/// Settings for the chunking phase.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestConfig {
    pub pdf_dir: String,
    pub out_dir: String,
    #[serde(default = "default_chunk_chars")]
    pub chunk_chars: usize,
    #[serde(default = "default_overlap_chars")]
    pub overlap_chars: usize,
}

/// Settings for the embedding phase.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedConfig {
    pub out_dir: String,
    #[serde(default = "default_embeddings_file")]
    pub embeddings_file: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_chunk_chars() -> usize {
    // ~800-1100 tokens depending on text; tokenizing is overkill here
    4500
}

fn default_overlap_chars() -> usize {
    700
}

fn default_embeddings_file() -> String {
    "embeddings.ndjson".to_string()
}

fn default_model() -> String {
    "text-embedding-3-small".to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_pacing_ms() -> u64 {
    200
}

fn default_progress_every() -> usize {
    10
}

fn default_max_retries() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    30
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
