//! Chunk value object

/// A contiguous window over a document's text
///
/// `start` is measured in characters (Unicode scalar values), not bytes, so a
/// chunk never begins or ends inside a multi-byte code point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Character offset of the first character of this chunk in the source text
    pub start: usize,
    /// The chunk's text
    pub text: String,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            text: text.into(),
        }
    }

    /// Length of the chunk in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Character offset one past the last character of this chunk
    pub fn end(&self) -> usize {
        self.start + self.char_len()
    }

    /// Borrow the chunk text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for Chunk {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
