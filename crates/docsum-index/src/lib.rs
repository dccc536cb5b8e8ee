//! Flat brute-force L2 nearest-neighbor index.
//!
//! Row *i* corresponds to chunk *i* in the parallel chunk list; the index
//! is always rebuilt together with that list and never patched in place.
//! Search returns squared L2 distances in ascending order, ties broken by
//! insertion order, with position `-1` as the sentinel for missing slots
//! when fewer rows exist than `top_k` asks for.

use docsum_core::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sentinel position for "no further result available".
pub const NO_RESULT: i64 = -1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlatL2Index {
    dim: usize,
    rows: usize,
    // row-major, rows * dim
    data: Vec<f32>,
}

impl FlatL2Index {
    /// Build from an embedding matrix. Empty and single-row matrices are
    /// valid degenerate indexes.
    pub fn build(embeddings: &[Vec<f32>]) -> Result<Self> {
        let dim = embeddings.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(embeddings.len() * dim);
        for (i, row) in embeddings.iter().enumerate() {
            if row.len() != dim {
                return Err(Error::Inconsistency(format!(
                    "embedding row {i} has dimension {} but row 0 has {dim}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        debug!(rows = embeddings.len(), dim, "built flat L2 index");
        Ok(Self { dim, rows: embeddings.len(), data })
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Exhaustive search: per query, the `top_k` nearest rows by squared
    /// L2 distance, closest first, padded with `NO_RESULT` positions
    /// (distance infinity) when the index holds fewer rows. Callers must
    /// filter sentinels before mapping positions to chunks.
    pub fn search(&self, queries: &[Vec<f32>], top_k: usize) -> Result<(Vec<Vec<f32>>, Vec<Vec<i64>>)> {
        if top_k == 0 {
            return Err(Error::InvalidConfig("top_k must be at least 1".to_string()));
        }
        let mut all_scores = Vec::with_capacity(queries.len());
        let mut all_positions = Vec::with_capacity(queries.len());
        for (qi, query) in queries.iter().enumerate() {
            if self.rows > 0 && query.len() != self.dim {
                return Err(Error::Inconsistency(format!(
                    "query {qi} has dimension {} but the index has {}",
                    query.len(),
                    self.dim
                )));
            }
            let mut ranked: Vec<(f32, usize)> = (0..self.rows)
                .map(|row| (self.squared_l2(row, query), row))
                .collect();
            // ascending distance; equal distances keep insertion order
            ranked.sort_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.1.cmp(&b.1))
            });
            ranked.truncate(top_k);

            let mut scores: Vec<f32> = ranked.iter().map(|&(d, _)| d).collect();
            let mut positions: Vec<i64> = ranked.iter().map(|&(_, p)| p as i64).collect();
            while positions.len() < top_k {
                scores.push(f32::INFINITY);
                positions.push(NO_RESULT);
            }
            all_scores.push(scores);
            all_positions.push(positions);
        }
        Ok((all_scores, all_positions))
    }

    fn squared_l2(&self, row: usize, query: &[f32]) -> f32 {
        let start = row * self.dim;
        self.data[start..start + self.dim]
            .iter()
            .zip(query.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum()
    }
}
