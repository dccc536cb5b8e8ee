//! The two user-facing operations: Index and Search.
//!
//! Every failure is returned before the session state is touched; the
//! previous corpus survives any failed re-index attempt.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use docsum_core::error::{Error, Result};
use docsum_core::types::{IndexedChunk, SearchHit};
use docsum_embed::encode_chunks;
use docsum_extract::extract_text;
use docsum_index::FlatL2Index;
use docsum_text::chunk_text;

use crate::params::{IndexParams, SearchParams};
use crate::retrieve::retrieve;
use crate::session::{IndexedCorpus, Models, SessionState};
use crate::summary::summarize_chunks;

/// Index one document into the session: extract, chunk, encode, build the
/// flat index, then commit the whole triple at once. Returns the chunk
/// count on success.
pub fn index_document(
    state: &mut SessionState,
    path: &Path,
    params: &IndexParams,
    models: &Models,
) -> Result<usize> {
    params.validate()?;
    let doc_id = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    info!(doc = %doc_id, chunk_size = params.chunk_size, overlap = params.overlap, "indexing document");

    let text = extract_text(path)?;
    let chunk_texts = chunk_text(&text, models.tokenizer.as_ref(), params.chunk_size, params.overlap)?;
    if chunk_texts.is_empty() {
        return Err(Error::NoChunks(doc_id));
    }

    let pb = ProgressBar::new(chunk_texts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%)")
            .unwrap()
            .progress_chars("#>-"),
    );
    let mut embeddings = Vec::with_capacity(chunk_texts.len());
    for batch in chunk_texts.chunks(params.batch_size) {
        embeddings.extend(encode_chunks(batch, models.embedder.as_ref(), params.batch_size)?);
        pb.inc(batch.len() as u64);
    }
    pb.finish_and_clear();

    let index = FlatL2Index::build(&embeddings)?;
    let chunks: Vec<IndexedChunk> = chunk_texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| IndexedChunk { text, doc_id: doc_id.clone(), chunk_id: i })
        .collect();
    let count = chunks.len();

    // single commit point; nothing above mutated the session
    state.commit(IndexedCorpus::new(index, chunks, embeddings)?);
    info!(chunks = count, "index committed");
    Ok(count)
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    /// `None` exactly when `hits` is empty; the summarizer is never
    /// invoked on an empty retrieved set.
    pub summary: Option<String>,
}

/// Search the indexed document and synthesize one summary of the hits.
pub fn search(
    state: &SessionState,
    query: &str,
    params: &SearchParams,
    models: &Models,
) -> Result<SearchOutcome> {
    params.validate()?;
    let retrieved = retrieve(query, state, models, params.top_k)?;
    if retrieved.is_empty() {
        return Ok(SearchOutcome { hits: Vec::new(), summary: None });
    }

    let hits: Vec<SearchHit> = retrieved
        .iter()
        .map(|(chunk, distance)| SearchHit {
            doc_id: chunk.doc_id.clone(),
            chunk_id: chunk.chunk_id,
            text: chunk.text.clone(),
            distance: *distance,
        })
        .collect();
    let ranked: Vec<IndexedChunk> = retrieved.into_iter().map(|(chunk, _)| chunk).collect();
    let summary = summarize_chunks(&ranked, models.summarizer.as_ref())?;
    Ok(SearchOutcome { hits, summary: Some(summary) })
}
