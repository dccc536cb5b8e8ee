//! Summary aggregation over retrieved chunks.

use docsum_core::error::{Error, Result, Stage};
use docsum_core::traits::Summarizer;
use docsum_core::types::IndexedChunk;

/// Combine the retrieved chunk texts (already in best-first rank order)
/// and invoke the summarizer exactly once. Callers must not reach here
/// with an empty set; the guard keeps a broken caller from burning a
/// model call on nothing.
pub fn summarize_chunks(chunks: &[IndexedChunk], summarizer: &dyn Summarizer) -> Result<String> {
    if chunks.is_empty() {
        return Err(Error::Inconsistency("summarizer invoked with no retrieved chunks".to_string()));
    }
    let joined = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n\n");
    summarizer
        .summarize(&joined)
        .map_err(|e| Error::stage(Stage::Summarize, e))
}
