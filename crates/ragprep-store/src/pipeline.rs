//! Sequential embedding pipeline over the chunk store.
//!
//! Chunks are embedded one at a time with an enforced inter-call delay.
//! Retryable provider failures back off and retry a bounded number of
//! times; anything else aborts the run carrying the chunk id and source
//! document. Successful records are appended to the NDJSON output and the
//! checkpoint before the next chunk is touched.

use std::thread;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use ragprep_core::error::{Error, Result};
use ragprep_core::traits::Embedder;
use ragprep_core::types::{Chunk, EmbeddingRecord};

use crate::checkpoint::Checkpoint;
use crate::chunk_store::ChunkStore;
use crate::ndjson::EmbeddingWriter;

/// Pacing and retry policy for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Fixed delay after each successful provider call.
    pub pacing: Duration,
    /// Progress line cadence, in processed chunks.
    pub progress_every: usize,
    /// Bound on attempts per chunk, first try included.
    pub max_retries: usize,
    /// Base for exponential backoff between retryable attempts.
    pub backoff_base: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(200),
            progress_every: 10,
            max_retries: 5,
            backoff_base: Duration::from_millis(500),
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineReport {
    pub embedded: usize,
    pub skipped: usize,
}

pub struct EmbeddingPipeline {
    options: PipelineOptions,
    progress_sink: Option<Box<dyn Fn(usize) + Send + Sync>>,
}

impl EmbeddingPipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            progress_sink: None,
        }
    }

    /// Installs an observer invoked with the running embedded count at each
    /// progress interval, alongside the bar's own line.
    pub fn with_progress_sink(mut self, sink: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.progress_sink = Some(Box::new(sink));
        self
    }

    /// Embeds every stored chunk not yet in the checkpoint, appending one
    /// output record per success.
    pub fn run(
        &self,
        store: &ChunkStore,
        embedder: &dyn Embedder,
        writer: &mut EmbeddingWriter,
        checkpoint: &mut Checkpoint,
    ) -> Result<PipelineReport> {
        let chunks = store.load_chunks()?;
        info!(
            "embedding {} stored chunks with {}",
            chunks.len(),
            embedder.model_id()
        );

        let pb = ProgressBar::new(chunks.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%) {msg}",
                )
                .unwrap()
                .progress_chars("#>-"),
        );

        let mut embedded = 0usize;
        let mut skipped = 0usize;
        for chunk in &chunks {
            if checkpoint.contains(&chunk.id) {
                skipped += 1;
                pb.set_position((embedded + skipped) as u64);
                continue;
            }

            let values = self.embed_with_retry(embedder, chunk)?;
            writer.append(&EmbeddingRecord::from_chunk(chunk, values))?;
            checkpoint.record(&chunk.id)?;
            embedded += 1;
            pb.set_position((embedded + skipped) as u64);
            if embedded % self.options.progress_every == 0 {
                pb.println(format!("Embedded {embedded} chunks..."));
                if let Some(sink) = &self.progress_sink {
                    sink(embedded);
                }
            }

            thread::sleep(self.options.pacing);
        }
        pb.finish_with_message("embedding complete");

        info!("wrote {embedded} embeddings ({skipped} already present)");
        Ok(PipelineReport { embedded, skipped })
    }

    fn embed_with_retry(&self, embedder: &dyn Embedder, chunk: &Chunk) -> Result<Vec<f32>> {
        let mut attempt = 0usize;
        loop {
            match embedder.embed(&chunk.text) {
                Ok(values) => return Ok(values),
                Err(err) if err.is_retryable() && attempt + 1 < self.options.max_retries => {
                    attempt += 1;
                    let delay = self.backoff(attempt);
                    warn!(
                        "retryable failure on chunk {} (attempt {attempt}): {err}; backing off {delay:?}",
                        chunk.id
                    );
                    thread::sleep(delay);
                }
                Err(err) => {
                    return Err(Error::Embedding {
                        chunk_id: chunk.id.clone(),
                        source_doc: chunk.source.clone(),
                        source: err,
                    })
                }
            }
        }
    }

    fn backoff(&self, attempt: usize) -> Duration {
        let capped = attempt.min(5) as u32;
        self.options.backoff_base * (1u32 << capped)
    }
}
