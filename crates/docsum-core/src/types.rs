//! Domain types shared across the retrieval pipeline.

use serde::{Deserialize, Serialize};

/// A contiguous window of a source document, the unit of embedding
/// and retrieval.
///
/// - `doc_id`: identity of the owning document (file name)
/// - `chunk_id`: 0-based position among the document's chunks, assigned
///   in emission order; used for ordering and display, never for search
/// - `text`: the window payload, always non-empty
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub text: String,
    pub doc_id: String,
    pub chunk_id: usize,
}

/// One ranked search result, already mapped back to its chunk.
///
/// `distance` is squared L2 over normalized vectors; lower is better.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub chunk_id: usize,
    pub text: String,
    pub distance: f32,
}
