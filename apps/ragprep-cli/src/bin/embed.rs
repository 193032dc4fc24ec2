use std::time::Duration;

use ragprep_core::config::{expand_path, resolve_with_base, Config};
use ragprep_embed::embedder_from_config;
use ragprep_store::{Checkpoint, ChunkStore, EmbeddingPipeline, EmbeddingWriter, PipelineOptions};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let embed = config.embed()?;
    let out_dir = expand_path(&embed.out_dir);

    println!("Embedding Pipeline\n==================");
    println!("Chunk store: {}", out_dir.join("chunks").display());
    println!("Model: {}", embed.model);

    let store = ChunkStore::open(&out_dir)?;
    let embedder = embedder_from_config(&embed)?;
    let embeddings_path = resolve_with_base(&out_dir, &embed.embeddings_file);
    let mut writer = EmbeddingWriter::open(&embeddings_path)?;
    let mut checkpoint = Checkpoint::open(&out_dir.join("embedded_ids.txt"))?;
    if !checkpoint.is_empty() {
        println!(
            "Resuming: {} chunks already embedded in a prior run",
            checkpoint.len()
        );
    }

    let options = PipelineOptions {
        pacing: Duration::from_millis(embed.pacing_ms),
        progress_every: embed.progress_every.max(1),
        max_retries: embed.max_retries.max(1),
        ..PipelineOptions::default()
    };
    let pipeline = EmbeddingPipeline::new(options);
    let report = pipeline.run(&store, embedder.as_ref(), &mut writer, &mut checkpoint)?;

    println!(
        "\nDone. Wrote {} embeddings ({} skipped as already embedded).",
        report.embedded, report.skipped
    );
    println!("Output: {}", writer.path().display());
    Ok(())
}
