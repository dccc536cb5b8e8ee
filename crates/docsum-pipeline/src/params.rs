//! Operation parameters and their boundary validation.
//!
//! The ranges mirror the surrounding tool's policy knobs, not algorithmic
//! limits: chunk_size 100-400 tokens, overlap 0-100 tokens (and below
//! chunk_size), batch_size one of {2, 4, 8}, top_k 1-10.

use docsum_core::config::Config;
use docsum_core::error::{Error, Result};

pub const CHUNK_SIZE_MIN: usize = 100;
pub const CHUNK_SIZE_MAX: usize = 400;
pub const OVERLAP_MAX: usize = 100;
pub const BATCH_SIZES: [usize; 3] = [2, 4, 8];
pub const TOP_K_MIN: usize = 1;
pub const TOP_K_MAX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexParams {
    pub chunk_size: usize,
    pub overlap: usize,
    pub batch_size: usize,
}

impl Default for IndexParams {
    fn default() -> Self {
        Self { chunk_size: 250, overlap: 30, batch_size: 4 }
    }
}

impl IndexParams {
    pub fn from_config(config: &Config) -> Self {
        let d = Self::default();
        Self {
            chunk_size: config.get_or("pipeline.chunk_size", d.chunk_size),
            overlap: config.get_or("pipeline.overlap", d.overlap),
            batch_size: config.get_or("pipeline.batch_size", d.batch_size),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(CHUNK_SIZE_MIN..=CHUNK_SIZE_MAX).contains(&self.chunk_size) {
            return Err(Error::InvalidConfig(format!(
                "chunk_size {} outside [{CHUNK_SIZE_MIN}, {CHUNK_SIZE_MAX}]",
                self.chunk_size
            )));
        }
        if self.overlap > OVERLAP_MAX {
            return Err(Error::InvalidConfig(format!(
                "overlap {} outside [0, {OVERLAP_MAX}]",
                self.overlap
            )));
        }
        if self.overlap >= self.chunk_size {
            return Err(Error::InvalidConfig(format!(
                "overlap ({}) must be smaller than chunk_size ({})",
                self.overlap, self.chunk_size
            )));
        }
        if !BATCH_SIZES.contains(&self.batch_size) {
            return Err(Error::InvalidConfig(format!(
                "batch_size {} not one of {BATCH_SIZES:?}",
                self.batch_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    pub top_k: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

impl SearchParams {
    pub fn from_config(config: &Config) -> Self {
        Self { top_k: config.get_or("pipeline.top_k", Self::default().top_k) }
    }

    pub fn validate(&self) -> Result<()> {
        if !(TOP_K_MIN..=TOP_K_MAX).contains(&self.top_k) {
            return Err(Error::InvalidConfig(format!(
                "top_k {} outside [{TOP_K_MIN}, {TOP_K_MAX}]",
                self.top_k
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        IndexParams::default().validate().expect("index defaults");
        SearchParams::default().validate().expect("search defaults");
    }

    #[test]
    fn out_of_range_values_rejected() {
        let mut p = IndexParams::default();
        p.chunk_size = 50;
        assert!(p.validate().is_err());
        p.chunk_size = 500;
        assert!(p.validate().is_err());

        let mut p = IndexParams::default();
        p.overlap = 150;
        assert!(p.validate().is_err());

        let mut p = IndexParams { chunk_size: 100, overlap: 100, batch_size: 4 };
        assert!(p.validate().is_err(), "overlap must stay below chunk_size");
        p.overlap = 99;
        p.validate().expect("99/100 is allowed");

        let mut p = IndexParams::default();
        p.batch_size = 3;
        assert!(p.validate().is_err());

        assert!(SearchParams { top_k: 0 }.validate().is_err());
        assert!(SearchParams { top_k: 11 }.validate().is_err());
        SearchParams { top_k: 10 }.validate().expect("10 is allowed");
    }
}
