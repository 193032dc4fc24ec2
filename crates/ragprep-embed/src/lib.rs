//! Embedding providers behind the `Embedder` capability trait.
//!
//! The production provider talks to an OpenAI-compatible endpoint; a
//! deterministic hashing fake is selected via `APP_USE_FAKE_EMBEDDINGS` for
//! offline runs and tests.

pub mod openai;

use std::hash::{Hash, Hasher};
use std::time::Duration;

use anyhow::anyhow;
use tracing::info;
use twox_hash::XxHash64;

use ragprep_core::config::EmbedConfig;
use ragprep_core::error::EmbedError;
use ragprep_core::traits::Embedder;

use crate::openai::OpenAiEmbedder;

/// Dimensionality of the fake provider's vectors.
pub const FAKE_DIM: usize = 1536;

/// Deterministic stand-in for the HTTP provider: token hashes are scattered
/// into a fixed-width vector and normalized. Same text, same vector.
pub struct FakeEmbedder {
    dim: usize,
}

impl FakeEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for FakeEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut v = vec![0f32; self.dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % self.dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v {
            *x /= norm;
        }
        Ok(v)
    }

    fn model_id(&self) -> &str {
        "fake-embedder"
    }
}

/// Builds the embedder the config asks for.
///
/// `APP_USE_FAKE_EMBEDDINGS=1` short-circuits to the fake; otherwise the
/// OpenAI-compatible client is built from the `[embed]` section, with
/// `OPENAI_API_KEY` as the key fallback.
pub fn embedder_from_config(cfg: &EmbedConfig) -> anyhow::Result<Box<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        info!("using FakeEmbedder");
        return Ok(Box::new(FakeEmbedder::new(FAKE_DIM)));
    }

    let api_key = match cfg.api_key.clone() {
        Some(key) => key,
        None => std::env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow!("set embed.api_key or OPENAI_API_KEY in the environment"))?,
    };
    let embedder = OpenAiEmbedder::new(
        api_key,
        cfg.api_base.clone(),
        cfg.model.clone(),
        Duration::from_secs(cfg.timeout_secs.max(1)),
    )?;
    Ok(Box::new(embedder))
}
