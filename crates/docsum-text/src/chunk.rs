//! Sliding-window chunker.
//!
//! The full text is tokenized once, then a window of `chunk_size` tokens
//! slides across the token sequence advancing by `chunk_size - overlap`
//! per step. Each window is decoded back to text; the trailing partial
//! window is kept when non-empty. Chunk emission order is document order
//! and later becomes the `chunk_id` assignment.

use docsum_core::error::{Error, Result, Stage};
use docsum_core::traits::TextTokenizer;

pub fn chunk_text(
    text: &str,
    tokenizer: &dyn TextTokenizer,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>> {
    if chunk_size == 0 {
        return Err(Error::InvalidConfig("chunk_size must be greater than 0".to_string()));
    }
    if overlap >= chunk_size {
        // a zero or negative stride would never advance the window
        return Err(Error::InvalidConfig(format!(
            "overlap ({overlap}) must be smaller than chunk_size ({chunk_size})"
        )));
    }
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let ids = tokenizer
        .encode(text)
        .map_err(|e| Error::stage(Stage::Tokenize, e))?;
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let stride = chunk_size - overlap;
    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < ids.len() {
        let end = (start + chunk_size).min(ids.len());
        let piece = tokenizer
            .decode(&ids[start..end])
            .map_err(|e| Error::stage(Stage::Tokenize, e))?;
        if !piece.trim().is_empty() {
            chunks.push(piece);
        }
        if end == ids.len() {
            break;
        }
        start += stride;
    }
    Ok(chunks)
}
