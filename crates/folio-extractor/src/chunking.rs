//! Fixed-size, overlapping text chunking
//!
//! Windows are measured in characters. Chunk `i` starts at `i * (size - overlap)`
//! and holds at most `size` characters; the loop stops once the next start is
//! past the end of the text. Text no longer than `size` yields a single chunk.

use crate::error::ExtractorError;
use folio_domain::Chunk;
use std::iter;
use tracing::debug;

/// Default chunk size (characters)
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Default overlap between consecutive chunks (characters)
pub const DEFAULT_CHUNK_OVERLAP: usize = 200;

/// Splits text into overlapping fixed-size windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunker {
    size: usize,
    overlap: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if `size` is 0 or `overlap >= size`.
    pub fn new(size: usize, overlap: usize) -> Result<Self, ExtractorError> {
        if size == 0 {
            return Err(ExtractorError::Config(
                "chunk size must be greater than 0".to_string(),
            ));
        }
        if overlap >= size {
            return Err(ExtractorError::Config(format!(
                "chunk overlap {} must be less than chunk size {}",
                overlap, size
            )));
        }
        Ok(Self { size, overlap })
    }

    /// Chunk size in characters
    pub fn size(&self) -> usize {
        self.size
    }

    /// Overlap in characters
    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Distance between consecutive chunk starts
    pub fn step(&self) -> usize {
        self.size - self.overlap
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        if text.is_empty() {
            return Vec::new();
        }

        // Byte offset of every character boundary, including the end
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(iter::once(text.len()))
            .collect();
        let char_len = boundaries.len() - 1;

        if char_len <= self.size {
            return vec![Chunk::new(0, text)];
        }

        let step = self.step();
        let mut chunks = Vec::with_capacity(char_len.div_ceil(step));
        let mut start = 0;

        while start < char_len {
            let end = (start + self.size).min(char_len);
            chunks.push(Chunk::new(start, &text[boundaries[start]..boundaries[end]]));
            start += step;
        }

        debug!("Split {} chars into {} chunks", char_len, chunks.len());
        chunks
    }
}

impl Default for TextChunker {
    fn default() -> Self {
        Self {
            size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

/// Chunk `text` into windows of `size` characters overlapping by `overlap`
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Result<Vec<Chunk>, ExtractorError> {
    Ok(TextChunker::new(size, overlap)?.chunk(text))
}

#[cfg(test)]
pub(crate) fn reassemble(chunks: &[Chunk]) -> String {
    let mut text = String::new();
    let mut covered: usize = 0;
    for chunk in chunks {
        let skip = covered.saturating_sub(chunk.start);
        text.extend(chunk.text.chars().skip(skip));
        covered = covered.max(chunk.end());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(Chunk::as_str).collect()
    }

    #[test]
    fn test_overlapping_windows() {
        let chunks = chunk_text("abcdefghij", 4, 1).unwrap();
        assert_eq!(texts(&chunks), vec!["abcd", "defg", "ghij", "j"]);

        let starts: Vec<usize> = chunks.iter().map(|c| c.start).collect();
        assert_eq!(starts, vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_empty_text() {
        let chunks = TextChunker::default().chunk("");
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunk_text("abcd", 4, 1).unwrap();
        assert_eq!(texts(&chunks), vec!["abcd"]);

        let chunks = TextChunker::default().chunk("Invoice #42");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Invoice #42");
    }

    #[test]
    fn test_zero_overlap() {
        let chunks = chunk_text("abcdef", 2, 0).unwrap();
        assert_eq!(texts(&chunks), vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn test_default_parameters() {
        let text = "x".repeat(2500);
        let chunks = TextChunker::default().chunk(&text);

        // Starts at 0, 800, 1600, 2400
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].char_len(), 1000);
        assert_eq!(chunks[2].char_len(), 900);
        assert_eq!(chunks[3].char_len(), 100);
        assert_eq!(chunks[3].start, 2400);
    }

    #[test]
    fn test_multibyte_text_splits_on_characters() {
        let chunks = chunk_text("äöü€ß", 2, 0).unwrap();
        assert_eq!(texts(&chunks), vec!["äö", "ü€", "ß"]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(chunk_text("abc", 0, 0), Err(ExtractorError::Config(_))));
        assert!(matches!(chunk_text("abc", 4, 4), Err(ExtractorError::Config(_))));
        assert!(matches!(chunk_text("abc", 4, 9), Err(ExtractorError::Config(_))));
    }

    #[test]
    fn test_invalid_parameters_fail_on_empty_text_too() {
        assert!(chunk_text("", 3, 3).is_err());
    }

    #[test]
    fn test_reassemble_scenario() {
        let chunks = chunk_text("abcdefghij", 4, 1).unwrap();
        assert_eq!(reassemble(&chunks), "abcdefghij");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn expected_count(len: usize, size: usize, overlap: usize) -> usize {
        if len == 0 {
            0
        } else if len <= size {
            1
        } else {
            len.div_ceil(size - overlap)
        }
    }

    fn params() -> impl Strategy<Value = (usize, usize)> {
        (1usize..40).prop_flat_map(|size| (Just(size), 0..size))
    }

    proptest! {
        /// Property: Chunks with overlaps removed reconstruct the text
        #[test]
        fn test_chunks_cover_text(text in "\\PC{0,200}", (size, overlap) in params()) {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            prop_assert_eq!(reassemble(&chunks), text);
        }

        /// Property: Chunk count follows the windowing formula
        #[test]
        fn test_chunk_count(text in "[a-z ]{0,300}", (size, overlap) in params()) {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            prop_assert_eq!(chunks.len(), expected_count(text.chars().count(), size, overlap));
        }

        /// Property: Chunk i starts at i * step and holds at most `size` characters
        #[test]
        fn test_chunk_geometry(text in "\\PC{0,200}", (size, overlap) in params()) {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            for (i, chunk) in chunks.iter().enumerate() {
                prop_assert_eq!(chunk.start, i * (size - overlap));
                prop_assert!(chunk.char_len() <= size);
                prop_assert!(chunk.char_len() > 0);
            }
        }

        /// Property: Overlapping regions repeat the same characters
        #[test]
        fn test_overlap_regions_match(text in "[a-z]{0,200}", (size, overlap) in params()) {
            let chunks = chunk_text(&text, size, overlap).unwrap();
            for pair in chunks.windows(2) {
                let shared = pair[0].end().saturating_sub(pair[1].start);
                let tail: String = pair[0].text.chars().skip(pair[0].char_len() - shared).collect();
                let head: String = pair[1].text.chars().take(shared).collect();
                prop_assert_eq!(tail, head);
            }
        }

        /// Property: Chunking is deterministic
        #[test]
        fn test_chunking_deterministic(text in "\\PC{0,200}", (size, overlap) in params()) {
            let first = chunk_text(&text, size, overlap).unwrap();
            let second = chunk_text(&text, size, overlap).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
