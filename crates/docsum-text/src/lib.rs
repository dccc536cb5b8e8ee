//! Token-aware chunking and the tokenizer boundary behind it.

pub mod chunk;
pub mod tokenizer;

pub use chunk::chunk_text;
pub use tokenizer::{get_default_tokenizer, HfTokenizer, WhitespaceTokenizer};
