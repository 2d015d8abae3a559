//! Context selection for question prompts
//!
//! Picks which chunks are sent to the model. The only policy today,
//! [`FirstNChunksPolicy`], always takes the document's opening chunks
//! regardless of the question; it is a positional heuristic, not relevance
//! ranking. A ranked policy can be added behind [`ContextSelectionPolicy`].

use folio_domain::Chunk;

/// Default number of leading chunks used as question context
pub const DEFAULT_CONTEXT_CHUNKS: usize = 3;

/// Chooses the chunks sent as context, in the order they should appear
pub trait ContextSelectionPolicy: Send + Sync {
    /// Select chunks from `chunks`
    fn select<'a>(&self, chunks: &'a [Chunk]) -> Vec<&'a Chunk>;
}

/// Takes the first `n` chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirstNChunksPolicy {
    n: usize,
}

impl FirstNChunksPolicy {
    /// Create a policy taking the first `n` chunks
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Number of chunks taken
    pub fn n(&self) -> usize {
        self.n
    }
}

impl Default for FirstNChunksPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_CHUNKS)
    }
}

impl ContextSelectionPolicy for FirstNChunksPolicy {
    fn select<'a>(&self, chunks: &'a [Chunk]) -> Vec<&'a Chunk> {
        chunks.iter().take(self.n).collect()
    }
}

/// Join the chunks picked by `policy` with a single newline
pub fn select_context(chunks: &[Chunk], policy: &dyn ContextSelectionPolicy) -> String {
    policy
        .select(chunks)
        .into_iter()
        .map(Chunk::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
