//! Blocking client for OpenAI-compatible embedding endpoints.

use std::time::Duration;

use anyhow::Context;
use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use ragprep_core::error::EmbedError;
use ragprep_core::traits::Embedder;

/// One text in, one vector out, one HTTP round-trip per call.
///
/// The client classifies failures but never retries them itself; the retry
/// policy belongs to the pipeline that owns pacing and backoff.
pub struct OpenAiEmbedder {
    client: Client,
    endpoint: String,
    model: String,
}

impl OpenAiEmbedder {
    pub fn new(
        api_key: String,
        api_base: String,
        model: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(!api_key.trim().is_empty(), "missing API key");
        anyhow::ensure!(!model.trim().is_empty(), "missing embedding model name");

        let mut headers = reqwest::header::HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).context("invalid API key")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("failed to build embeddings HTTP client")?;
        let endpoint = format!("{}/embeddings", api_base.trim_end_matches('/'));
        Ok(Self {
            client,
            endpoint,
            model,
        })
    }
}

impl Embedder for OpenAiEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(classify_status(status, &body));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .map_err(|e| EmbedError::MalformedResponse(e.to_string()))?;
        let first = parsed.data.into_iter().next().ok_or_else(|| {
            EmbedError::MalformedResponse("response carried no embeddings".to_string())
        })?;
        Ok(first.embedding)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

fn classify_status(status: StatusCode, body: &str) -> EmbedError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            EmbedError::Auth(format!("{status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => EmbedError::RateLimited(format!("{status}: {body}")),
        s if s.is_server_error() => EmbedError::Transient(format!("{status}: {body}")),
        _ => EmbedError::MalformedResponse(format!("unexpected status {status}: {body}")),
    }
}

fn classify_transport(err: reqwest::Error) -> EmbedError {
    if err.is_decode() || err.is_body() {
        EmbedError::MalformedResponse(err.to_string())
    } else {
        // Timeouts, connect failures, and interrupted requests are all worth
        // another attempt.
        EmbedError::Transient(err.to_string())
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}
