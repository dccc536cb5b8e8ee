//! Summarization model boundary.
//!
//! The real summarizer is T5 (t5-small weights) run through candle with
//! greedy decoding and a `summarize: ` task prefix. `APP_USE_FAKE_MODELS=1`
//! swaps in a leading-sentence extractive fake.

use anyhow::{anyhow, Result};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5;
use tokenizers::Tokenizer;
use tracing::{debug, info};

use docsum_core::config::resolve_model_dir;
use docsum_core::traits::Summarizer;

const MAX_INPUT_TOKENS: usize = 512;
const MAX_SUMMARY_TOKENS: usize = 142;

pub struct T5Summarizer {
    model: std::sync::Mutex<t5::T5ForConditionalGeneration>,
    config: t5::Config,
    tokenizer: Tokenizer,
    device: Device,
}

impl T5Summarizer {
    pub fn new() -> Result<Self> {
        let device = Device::Cpu;
        let model_dir = resolve_model_dir("APP_SUMMARIZER_DIR", "t5-small")?;
        info!(dir = %model_dir.display(), "loading T5 summarizer");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let config: t5::Config = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let weights_path = model_dir.join("model.safetensors");
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? };
        let model = t5::T5ForConditionalGeneration::load(vb, &config)?;
        info!("summarizer ready");
        Ok(Self { model: std::sync::Mutex::new(model), config, tokenizer, device })
    }

    fn generate(&self, prompt: &str) -> Result<String> {
        let enc = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;
        let mut input_ids = enc.get_ids().to_vec();
        if input_ids.len() > MAX_INPUT_TOKENS {
            input_ids.truncate(MAX_INPUT_TOKENS);
        }

        let mut model = self.model.lock().map_err(|_| anyhow!("summarizer model poisoned"))?;
        model.clear_kv_cache();
        let input = Tensor::new(input_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let encoder_output = model.encode(&input)?;

        // Greedy decoding: temperature None makes the sampler an argmax.
        let mut logits_processor = LogitsProcessor::new(299792458, None, None);
        let decoder_start = self.config.decoder_start_token_id.unwrap_or(self.config.pad_token_id) as u32;
        let mut output_token_ids = vec![decoder_start];
        for index in 0..MAX_SUMMARY_TOKENS {
            let decoder_token_ids = if index == 0 || !self.config.use_cache {
                Tensor::new(output_token_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = output_token_ids[output_token_ids.len() - 1];
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };
            let logits = model.decode(&decoder_token_ids, &encoder_output)?.squeeze(0)?;
            let next_token_id = logits_processor.sample(&logits)?;
            if next_token_id as usize == self.config.eos_token_id {
                break;
            }
            output_token_ids.push(next_token_id);
        }

        let text = self
            .tokenizer
            .decode(&output_token_ids[1..], true)
            .map_err(|e| anyhow!("Detokenization failed: {}", e))?;
        debug!(tokens = output_token_ids.len(), "generated summary");
        Ok(text.trim().to_string())
    }
}

impl Summarizer for T5Summarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        self.generate(&format!("summarize: {text}"))
    }
}

/// Extractive stand-in: the first few sentences of the input, clipped.
pub struct FakeSummarizer {
    max_sentences: usize,
}

impl Default for FakeSummarizer {
    fn default() -> Self {
        Self { max_sentences: 3 }
    }
}

impl Summarizer for FakeSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        let mut out = String::new();
        let mut sentences = 0usize;
        for part in text.split_inclusive(['.', '!', '?']) {
            out.push_str(part);
            sentences += 1;
            if sentences >= self.max_sentences {
                break;
            }
        }
        if out.is_empty() {
            out = text.chars().take(200).collect();
        }
        Ok(out.trim().to_string())
    }
}

pub fn get_default_summarizer() -> Result<Box<dyn Summarizer>> {
    let use_fake = std::env::var("APP_USE_FAKE_MODELS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        info!("using FakeSummarizer");
        return Ok(Box::new(FakeSummarizer::default()));
    }
    Ok(Box::new(T5Summarizer::new()?))
}
