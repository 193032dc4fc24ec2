use std::fs;
use std::path::Path;

use tempfile::TempDir;

use ragprep_core::chunk_id::stable_id;
use ragprep_core::chunker::Chunker;
use ragprep_core::ingest::DocumentProcessor;
use ragprep_core::normalize::TextNormalizer;
use ragprep_core::traits::TextExtractor;

/// Reads the "PDF" as plain text, standing in for real extraction.
struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, path: &Path) -> anyhow::Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

fn patterned_text(len: usize) -> String {
    (0..len)
        .map(|i| char::from(b'a' + (i % 26) as u8))
        .collect()
}

#[test]
fn normalizer_canonicalizes_whitespace() {
    let normalizer = TextNormalizer::new();
    let raw = "  First\tline  with   gaps\r\nSecond line\n\n\n\n\nNext paragraph  ";
    let text = normalizer.normalize(raw);
    assert_eq!(text, "First line with gaps\n\nSecond line\n\nNext paragraph");
}

#[test]
fn normalizer_is_total_over_empty_input() {
    let normalizer = TextNormalizer::new();
    assert_eq!(normalizer.normalize(""), "");
    assert_eq!(normalizer.normalize(" \t\r\n "), "");
}

#[test]
fn ten_thousand_chars_split_into_three_overlapping_windows() {
    let text = patterned_text(10_000);
    let chunker = Chunker::new(4500, 700).expect("valid params");
    let windows = chunker.split(&text);

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0], text[0..4500]);
    assert_eq!(windows[1], text[3800..8300]);
    // Window 3 ends exactly at character 10,000.
    assert_eq!(windows[2], text[7600..10_000]);
    // Consecutive windows share the overlap region.
    assert_eq!(windows[0][3800..], windows[1][..700]);
    assert_eq!(windows[1][3800..], windows[2][..700]);
}

fn cyrillic_text(len: usize) -> String {
    const ALPHABET: [char; 6] = ['б', 'г', 'д', 'ж', 'л', 'ф'];
    (0..len).map(|i| ALPHABET[i % ALPHABET.len()]).collect()
}

#[test]
fn multi_byte_text_splits_on_character_boundaries() {
    // Two bytes per character; byte-indexed windows would land mid-character.
    let text = cyrillic_text(10_000);
    let chunker = Chunker::new(4500, 700).expect("valid params");
    let windows = chunker.split(&text);

    assert_eq!(windows.len(), 3);
    assert_eq!(windows[0].chars().count(), 4500);
    assert_eq!(windows[1].chars().count(), 4500);
    assert_eq!(windows[2].chars().count(), 2400);

    let tail: String = windows[0].chars().skip(3800).collect();
    let head: String = windows[1].chars().take(700).collect();
    assert_eq!(tail, head);
}

#[test]
fn id_prefix_counts_characters_not_bytes() {
    // The differing character sits at position 1,500: inside the first 2,000
    // characters but past the first 2,000 bytes of two-byte text.
    let a = format!("{}X{}", cyrillic_text(1500), cyrillic_text(600));
    let b = format!("{}Y{}", cyrillic_text(1500), cyrillic_text(600));
    assert_ne!(stable_id("doc.pdf", 0, &a), stable_id("doc.pdf", 0, &b));

    // Differences past 2,000 characters never reach the digest.
    let c = cyrillic_text(2000) + "tail one";
    let d = cyrillic_text(2000) + "a different tail";
    assert_eq!(stable_id("doc.pdf", 0, &c), stable_id("doc.pdf", 0, &d));
}

#[test]
fn chunking_is_deterministic() {
    let text = patterned_text(23_456);
    let chunker = Chunker::new(4500, 700).expect("valid params");
    assert_eq!(chunker.split(&text), chunker.split(&text));
}

#[test]
fn short_text_is_a_single_window() {
    let chunker = Chunker::new(4500, 700).expect("valid params");
    let text = patterned_text(1234);
    assert_eq!(chunker.split(&text), vec![text]);
}

#[test]
fn processor_orders_documents_lexicographically() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    fs::write(dir.join("b.pdf"), "second document body").expect("write");
    fs::write(dir.join("a.pdf"), "first document body").expect("write");

    let processor = DocumentProcessor::new(Chunker::new(4500, 700).expect("valid params"));
    let docs = processor
        .process_directory(&PlainTextExtractor, dir)
        .expect("process");

    let names: Vec<&str> = docs.iter().map(|d| d.pdf.as_str()).collect();
    assert_eq!(names, vec!["a.pdf", "b.pdf"]);
}

#[test]
fn processor_assigns_stable_ids_and_positions() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    let body = format!(
        "{}\n\n{}",
        patterned_text(4000),
        patterned_text(4000).to_uppercase()
    );
    fs::write(dir.join("Show_S02E05_transcript.pdf"), &body).expect("write");

    let processor = DocumentProcessor::new(Chunker::new(4500, 700).expect("valid params"));
    let first = processor
        .process_directory(&PlainTextExtractor, dir)
        .expect("process");
    let second = processor
        .process_directory(&PlainTextExtractor, dir)
        .expect("process");

    let doc = &first[0];
    assert_eq!(doc.title, "S02E05");
    assert!(doc.chunks.len() > 1);
    for (i, chunk) in doc.chunks.iter().enumerate() {
        assert_eq!(chunk.metadata.chunk_index, i);
        assert_eq!(chunk.metadata.chunk_count, doc.chunks.len());
        assert_eq!(chunk.metadata.chars, chunk.text.chars().count());
        assert_eq!(chunk.source, "Show_S02E05_transcript.pdf");
    }

    // Re-running ingestion on unchanged input reproduces every id.
    let ids = |docs: &[ragprep_core::ingest::ProcessedDocument]| -> Vec<String> {
        docs.iter()
            .flat_map(|d| d.chunks.iter().map(|c| c.id.clone()))
            .collect()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[test]
fn processor_falls_back_to_filename_title() {
    let tmp = TempDir::new().expect("tempdir");
    let dir = tmp.path();
    fs::write(dir.join("field-notes.pdf"), "plain notes").expect("write");

    let processor = DocumentProcessor::new(Chunker::new(4500, 700).expect("valid params"));
    let docs = processor
        .process_directory(&PlainTextExtractor, dir)
        .expect("process");
    assert_eq!(docs[0].title, "field-notes");
}

#[test]
fn empty_directory_is_an_error() {
    let tmp = TempDir::new().expect("tempdir");
    let processor = DocumentProcessor::new(Chunker::new(4500, 700).expect("valid params"));
    let err = processor
        .process_directory(&PlainTextExtractor, tmp.path())
        .expect_err("must fail");
    assert!(err.to_string().contains("no PDF files found"));
}
