use std::fmt;
use thiserror::Error;

/// The pipeline stage that originated an external failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Tokenize,
    Embed,
    IndexBuild,
    Search,
    Summarize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extract => "extraction",
            Stage::Tokenize => "tokenization",
            Stage::Embed => "embedding",
            Stage::IndexBuild => "index build",
            Stage::Search => "search",
            Stage::Summarize => "summarization",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("No text detected in {0}")]
    NoTextDetected(String),

    #[error("No chunks produced from {0}")]
    NoChunks(String),

    #[error("No index available; index a document first")]
    NoIndex,

    #[error("Query is empty")]
    EmptyQuery,

    #[error("Internal consistency violated: {0}")]
    Inconsistency(String),

    #[error("{stage} failed: {source}")]
    Stage { stage: Stage, source: anyhow::Error },
}

impl Error {
    pub fn stage(stage: Stage, source: impl Into<anyhow::Error>) -> Self {
        Error::Stage { stage, source: source.into() }
    }

    /// Input errors abort the operation but are expected user conditions,
    /// as opposed to internal or external-model failures.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidConfig(_)
                | Error::UnsupportedFile(_)
                | Error::NoTextDetected(_)
                | Error::NoChunks(_)
                | Error::NoIndex
                | Error::EmptyQuery
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
