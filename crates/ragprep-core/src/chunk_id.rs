//! Deterministic, content-derived chunk identifiers.

use sha2::{Digest, Sha256};

/// Characters of chunk text fed into the digest. Keeps identity computation
/// cheap and stable for very large windows; two windows sharing source,
/// index, and this prefix intentionally collide.
const ID_TEXT_PREFIX_CHARS: usize = 2000;

/// Hex characters kept from the digest.
const ID_HEX_LEN: usize = 24;

/// Derives the stable identifier for a chunk.
///
/// SHA-256 over the source name, the decimal index, and the first 2000
/// characters of the window text, newline-separated; the id is the first 24
/// hex characters of the digest.
pub fn stable_id(source: &str, chunk_index: usize, text: &str) -> String {
    let prefix: String = text.chars().take(ID_TEXT_PREFIX_CHARS).collect();

    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hasher.update(b"\n");
    hasher.update(chunk_index.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(prefix.as_bytes());

    let mut id = hex::encode(hasher.finalize());
    id.truncate(ID_HEX_LEN);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_yield_identical_ids() {
        let a = stable_id("episode.pdf", 3, "some window text");
        let b = stable_id("episode.pdf", 3, "some window text");
        assert_eq!(a, b);
        assert_eq!(a.len(), 24);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn any_changed_input_changes_the_id() {
        let base = stable_id("episode.pdf", 3, "some window text");
        assert_ne!(base, stable_id("other.pdf", 3, "some window text"));
        assert_ne!(base, stable_id("episode.pdf", 4, "some window text"));
        assert_ne!(base, stable_id("episode.pdf", 3, "different text"));
    }

    #[test]
    fn text_past_the_prefix_does_not_affect_identity() {
        let long_a: String = "x".repeat(2000) + "tail one";
        let long_b: String = "x".repeat(2000) + "a completely different tail";
        assert_eq!(
            stable_id("doc.pdf", 0, &long_a),
            stable_id("doc.pdf", 0, &long_b)
        );
    }
}
