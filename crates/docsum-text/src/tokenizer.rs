//! Tokenizer implementations behind [`TextTokenizer`].
//!
//! The real tokenizer is the embedding model's own `tokenizer.json`
//! loaded through the `tokenizers` crate, so chunk boundaries line up
//! with what the embedder actually sees. The whitespace tokenizer is a
//! deterministic, decodable stand-in for offline tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use docsum_core::config::resolve_model_dir;
use docsum_core::traits::TextTokenizer;
use tokenizers::Tokenizer;
use tracing::info;

pub struct HfTokenizer {
    inner: Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = Tokenizer::from_file(path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", path.display(), e))?;
        Ok(Self { inner })
    }
}

impl TextTokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        // no special tokens: chunk windows are plain content spans
        let enc = self
            .inner
            .encode(text, false)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        Ok(enc.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| anyhow!("Detokenization failed: {}", e))
    }
}

/// Splits on whitespace and interns each distinct word, so `decode` is
/// the exact inverse of `encode` for a given instance.
#[derive(Default)]
pub struct WhitespaceTokenizer {
    vocab: Mutex<Vocab>,
}

#[derive(Default)]
struct Vocab {
    ids: HashMap<String, u32>,
    words: Vec<String>,
}

impl TextTokenizer for WhitespaceTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let mut vocab = self.vocab.lock().map_err(|_| anyhow!("tokenizer vocab poisoned"))?;
        let mut ids = Vec::new();
        for word in text.split_whitespace() {
            if !vocab.ids.contains_key(word) {
                let id = u32::try_from(vocab.words.len())?;
                vocab.ids.insert(word.to_string(), id);
                vocab.words.push(word.to_string());
            }
            ids.push(vocab.ids[word]);
        }
        Ok(ids)
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        let vocab = self.vocab.lock().map_err(|_| anyhow!("tokenizer vocab poisoned"))?;
        let mut words = Vec::with_capacity(ids.len());
        for &id in ids {
            let word = vocab
                .words
                .get(id as usize)
                .ok_or_else(|| anyhow!("unknown token id {id}"))?;
            words.push(word.as_str());
        }
        Ok(words.join(" "))
    }
}

pub fn get_default_tokenizer() -> Result<Box<dyn TextTokenizer>> {
    let use_fake = std::env::var("APP_USE_FAKE_MODELS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        info!("using whitespace tokenizer");
        return Ok(Box::new(WhitespaceTokenizer::default()));
    }
    let model_dir = resolve_model_dir("APP_MODEL_DIR", "bge-m3")?;
    info!(dir = %model_dir.display(), "loading tokenizer");
    Ok(Box::new(HfTokenizer::from_file(&model_dir.join("tokenizer.json"))?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_round_trip() {
        let tok = WhitespaceTokenizer::default();
        let ids = tok.encode("the quick brown fox the fox").expect("encode");
        assert_eq!(ids.len(), 6);
        assert_eq!(ids[0], ids[4], "repeated words share an id");
        let text = tok.decode(&ids).expect("decode");
        assert_eq!(text, "the quick brown fox the fox");
    }

    #[test]
    fn decode_rejects_unknown_ids() {
        let tok = WhitespaceTokenizer::default();
        assert!(tok.decode(&[42]).is_err());
    }
}
