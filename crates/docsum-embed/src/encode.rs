//! Batched encoding of chunk texts into an embedding matrix.
//!
//! Batch size affects only call granularity against the embedder; the
//! output matrix is identical for any valid batch size. Rows come back
//! in input order and every row is L2-normalized before indexing.

use docsum_core::error::{Error, Result, Stage};
use docsum_core::traits::Embedder;
use tracing::debug;

pub fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt().max(1e-12);
    for x in v.iter_mut() {
        *x /= norm;
    }
}

pub fn encode_chunks(
    texts: &[String],
    embedder: &dyn Embedder,
    batch_size: usize,
) -> Result<Vec<Vec<f32>>> {
    if batch_size == 0 {
        return Err(Error::InvalidConfig("batch_size must be greater than 0".to_string()));
    }
    let mut matrix = Vec::with_capacity(texts.len());
    for batch in texts.chunks(batch_size) {
        let vectors = embedder
            .embed_batch(batch)
            .map_err(|e| Error::stage(Stage::Embed, e))?;
        if vectors.len() != batch.len() {
            return Err(Error::Inconsistency(format!(
                "embedder returned {} vectors for a batch of {}",
                vectors.len(),
                batch.len()
            )));
        }
        for mut v in vectors {
            if v.len() != embedder.dim() {
                return Err(Error::Inconsistency(format!(
                    "embedding dimension {} does not match model dimension {}",
                    v.len(),
                    embedder.dim()
                )));
            }
            l2_normalize(&mut v);
            matrix.push(v);
        }
    }
    debug!(rows = matrix.len(), batch_size, "encoded chunk batch");
    Ok(matrix)
}

/// Encode a single query string; always batch size 1.
pub fn encode_query(text: &str, embedder: &dyn Embedder) -> Result<Vec<f32>> {
    let mut matrix = encode_chunks(&[text.to_string()], embedder, 1)?;
    matrix
        .pop()
        .ok_or_else(|| Error::Inconsistency("embedder returned no vector for the query".to_string()))
}
