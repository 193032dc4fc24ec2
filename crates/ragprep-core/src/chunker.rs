//! Overlapping, boundary-aware window splitting.

use crate::error::{Error, Result};

/// Fraction of the target window size a paragraph break must lie past for
/// boundary snapping to take it; keeps snapped windows from shrinking much
/// below the target.
const SNAP_FLOOR: f64 = 0.6;

/// Splits normalized text into overlapping character windows.
///
/// Deterministic: identical text and parameters produce byte-identical
/// windows in identical order on every run.
#[derive(Debug, Clone)]
pub struct Chunker {
    window: usize,
    overlap: usize,
}

impl Chunker {
    pub fn new(window: usize, overlap: usize) -> Result<Self> {
        if window == 0 {
            return Err(Error::InvalidConfig("chunk window must be non-zero".into()));
        }
        if overlap >= window {
            return Err(Error::InvalidConfig(format!(
                "overlap ({overlap}) must be smaller than the window ({window})"
            )));
        }
        Ok(Self { window, overlap })
    }

    /// Produces the ordered sequence of non-empty windows for `text`.
    ///
    /// Text no longer than the window yields exactly one window. Otherwise
    /// the scan proposes size-based boundaries, snaps each back to the last
    /// paragraph break past 60% of the window, strips the result, and starts
    /// the next window `overlap` characters before the previous end.
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        if n == 0 {
            return Vec::new();
        }
        if n <= self.window {
            let whole = text.trim();
            return if whole.is_empty() {
                Vec::new()
            } else {
                vec![whole.to_string()]
            };
        }

        let mut windows = Vec::new();
        let mut start = 0usize;
        while start < n {
            let mut end = (start + self.window).min(n);
            if let Some(cut) = last_paragraph_break(&chars[start..end]) {
                if cut as f64 > self.window as f64 * SNAP_FLOOR {
                    end = start + cut;
                }
            }

            let piece: String = chars[start..end].iter().collect();
            let piece = piece.trim();
            if !piece.is_empty() {
                windows.push(piece.to_string());
            }

            if end >= n {
                break;
            }
            let next = end.saturating_sub(self.overlap);
            // A snapped boundary close to `start` must not stall the scan.
            start = if next > start { next } else { end };
        }
        windows
    }
}

/// Offset of the last paragraph break (two consecutive newlines) in `window`.
fn last_paragraph_break(window: &[char]) -> Option<usize> {
    window.windows(2).rposition(|pair| pair == ['\n', '\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_at_exactly_window_size_is_one_window() {
        let chunker = Chunker::new(10, 3).expect("valid params");
        let text = "abcdefghij";
        assert_eq!(chunker.split(text), vec![text.to_string()]);
    }

    #[test]
    fn overlap_must_be_smaller_than_window() {
        assert!(Chunker::new(100, 100).is_err());
        assert!(Chunker::new(100, 150).is_err());
        assert!(Chunker::new(0, 0).is_err());
    }

    #[test]
    fn empty_text_yields_no_windows() {
        let chunker = Chunker::new(10, 3).expect("valid params");
        assert!(chunker.split("").is_empty());
    }

    #[test]
    fn snaps_to_paragraph_break_past_sixty_percent() {
        // Break at offset 8 of a 10-char window: past 60%, so the first
        // window ends there.
        let text = "aaaaaaaa\n\nbbbbbbbbbb";
        let chunker = Chunker::new(10, 2).expect("valid params");
        let windows = chunker.split(text);
        assert_eq!(windows[0], "aaaaaaaa");
    }

    #[test]
    fn ignores_paragraph_break_before_sixty_percent() {
        // Break at offset 3: inside the window but too early to snap, so the
        // size-based boundary stands.
        let text = "aaa\n\nbbbbbbbbbbbbbbb";
        let chunker = Chunker::new(10, 2).expect("valid params");
        let windows = chunker.split(text);
        assert_eq!(windows[0], "aaa\n\nbbbbb");
    }
}
