//! Query-time retrieval: encode, search, map positions back to chunks.

use docsum_core::error::{Error, Result};
use docsum_core::types::IndexedChunk;
use docsum_embed::encode_query;
use docsum_index::NO_RESULT;
use tracing::debug;

use crate::session::{Models, SessionState};

/// Retrieve up to `top_k` chunks for `query`, best (smallest distance)
/// first. An empty result set is a valid outcome, not an error.
pub fn retrieve(
    query: &str,
    state: &SessionState,
    models: &Models,
    top_k: usize,
) -> Result<Vec<(IndexedChunk, f32)>> {
    let corpus = state.corpus().ok_or(Error::NoIndex)?;
    if query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }

    let query_vec = encode_query(query, models.embedder.as_ref())?;
    let (scores, positions) = corpus.index.search(&[query_vec], top_k)?;

    let mut retrieved = Vec::new();
    for (&pos, &score) in positions[0].iter().zip(scores[0].iter()) {
        if pos == NO_RESULT {
            continue;
        }
        let chunk = corpus
            .chunks
            .get(usize::try_from(pos).map_err(|_| bad_position(pos))?)
            .ok_or_else(|| bad_position(pos))?;
        retrieved.push((chunk.clone(), score));
    }
    debug!(hits = retrieved.len(), top_k, "retrieval complete");
    Ok(retrieved)
}

fn bad_position(pos: i64) -> Error {
    Error::Inconsistency(format!("index position {pos} outside the chunk list"))
}
