//! Boundaries to the external models. Each has a real implementation backed
//! by local model files and a deterministic fake selected with
//! `APP_USE_FAKE_MODELS=1` so the pipeline is testable offline.

pub trait TextTokenizer: Send + Sync {
    fn encode(&self, text: &str) -> anyhow::Result<Vec<u32>>;
    fn decode(&self, ids: &[u32]) -> anyhow::Result<String>;
}

pub trait Embedder: Send + Sync {
    fn dim(&self) -> usize;
    fn max_len(&self) -> usize;
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}

pub trait Summarizer: Send + Sync {
    fn summarize(&self, text: &str) -> anyhow::Result<String>;
}
