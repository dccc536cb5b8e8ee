//! Session-scoped mutable state and the injected model handles.

use docsum_core::error::{Error, Result};
use docsum_core::traits::{Embedder, Summarizer, TextTokenizer};
use docsum_core::types::IndexedChunk;
use docsum_index::FlatL2Index;

/// The models the pipeline depends on, constructed once at startup and
/// passed by reference into operations. No globals, no lazy singletons.
pub struct Models {
    pub tokenizer: Box<dyn TextTokenizer>,
    pub embedder: Box<dyn Embedder>,
    pub summarizer: Box<dyn Summarizer>,
}

impl Models {
    pub fn load_default() -> anyhow::Result<Self> {
        Ok(Self {
            tokenizer: docsum_text::get_default_tokenizer()?,
            embedder: docsum_embed::get_default_embedder()?,
            summarizer: docsum_summarize::get_default_summarizer()?,
        })
    }
}

/// Index, chunk list, and embedding matrix for one indexed document.
/// The three always travel together; row *i* of the index and of the
/// matrix describe `chunks[i]`.
pub struct IndexedCorpus {
    pub index: FlatL2Index,
    pub chunks: Vec<IndexedChunk>,
    pub embeddings: Vec<Vec<f32>>,
}

impl IndexedCorpus {
    pub fn new(index: FlatL2Index, chunks: Vec<IndexedChunk>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if chunks.len() != embeddings.len() || chunks.len() != index.len() {
            return Err(Error::Inconsistency(format!(
                "misaligned corpus: {} chunks, {} embeddings, {} index rows",
                chunks.len(),
                embeddings.len(),
                index.len()
            )));
        }
        Ok(Self { index, chunks, embeddings })
    }
}

/// One user session's state. Starts empty and is only ever replaced
/// wholesale through [`SessionState::commit`] after an indexing operation
/// fully succeeds; there are no partial setters.
#[derive(Default)]
pub struct SessionState {
    corpus: Option<IndexedCorpus>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn corpus(&self) -> Option<&IndexedCorpus> {
        self.corpus.as_ref()
    }

    pub fn has_index(&self) -> bool {
        self.corpus.is_some()
    }

    pub fn chunk_count(&self) -> usize {
        self.corpus.as_ref().map_or(0, |c| c.chunks.len())
    }

    /// Atomically replace the whole (index, chunks, embeddings) triple.
    pub fn commit(&mut self, corpus: IndexedCorpus) {
        self.corpus = Some(corpus);
    }
}
