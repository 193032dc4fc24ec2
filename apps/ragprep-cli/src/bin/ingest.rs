use std::{env, path::PathBuf};

use ragprep_core::chunker::Chunker;
use ragprep_core::config::{expand_path, Config};
use ragprep_core::ingest::DocumentProcessor;
use ragprep_core::types::Manifest;
use ragprep_extract::PdfTextExtractor;
use ragprep_store::ChunkStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let ingest = config.ingest()?;

    // Optional positional override of the PDF directory.
    let args: Vec<String> = env::args().skip(1).collect();
    let pdf_dir = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| expand_path(&ingest.pdf_dir));
    let out_dir = expand_path(&ingest.out_dir);

    println!("PDF Chunker\n===========");
    println!("PDF directory: {}", pdf_dir.display());
    println!("Output directory: {}", out_dir.display());
    println!(
        "Window: {} chars, overlap: {} chars",
        ingest.chunk_chars, ingest.overlap_chars
    );

    let chunker = Chunker::new(ingest.chunk_chars, ingest.overlap_chars)?;
    let processor = DocumentProcessor::new(chunker);
    let extractor = PdfTextExtractor::new();
    let documents = processor.process_directory(&extractor, &pdf_dir)?;

    let store = ChunkStore::open(&out_dir)?;
    let mut files = Vec::new();
    let mut written = 0usize;
    for doc in &documents {
        println!("Chunked {} into {} windows", doc.pdf, doc.chunks.len());
        for chunk in &doc.chunks {
            store.write(chunk)?;
            written += 1;
        }
        files.push(doc.manifest_entry());
    }
    let manifest = Manifest {
        pdf_dir: pdf_dir.display().to_string(),
        out_dir: out_dir.display().to_string(),
        files,
    };
    store.finalize_manifest(&manifest)?;

    println!(
        "\nDone. Wrote {} chunk records across {} documents.",
        written,
        documents.len()
    );
    println!("Chunks: {}", store.chunks_dir().display());
    println!("Manifest: {}", store.manifest_path().display());
    Ok(())
}
