//! Whitespace canonicalization for extracted PDF text.

use regex::Regex;

/// Canonicalizes line structure while preserving paragraph breaks.
///
/// Total over any input, including empty strings. Patterns are compiled
/// once at construction.
pub struct TextNormalizer {
    horizontal_ws: Regex,
    excess_newlines: Regex,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            horizontal_ws: Regex::new(r"[ \t]+").expect("valid pattern"),
            excess_newlines: Regex::new(r"\n{3,}").expect("valid pattern"),
        }
    }

    /// Carriage returns become newlines, runs of spaces/tabs collapse to one
    /// space, three-or-more newlines collapse to exactly two, and the result
    /// is trimmed.
    pub fn normalize(&self, raw: &str) -> String {
        let text = raw.replace('\r', "\n");
        let text = self.horizontal_ws.replace_all(&text, " ");
        let text = self.excess_newlines.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
