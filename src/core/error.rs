// Error handling for the Nexus plot reader and summary conversion

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, NexusError>;

#[derive(Error, Debug)]
pub enum NexusError {
    #[error("Could not open file {path:?}: {source}")]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad header: {0}")]
    BadHeader(String),

    #[error("Truncated input while reading {section}: needed {needed} more bytes")]
    TruncatedInput { section: &'static str, needed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decompression failed: {0}")]
    Decompression(String),

    #[error("Invalid conversion options: {0}")]
    Config(String),

    #[error("Summary sink error: {0}")]
    Sink(String),
}

impl NexusError {
    pub fn bad_header(msg: impl Into<String>) -> Self {
        NexusError::BadHeader(msg.into())
    }

    /// True for the failures that mean the file itself is unusable.
    pub fn is_corrupt_input(&self) -> bool {
        matches!(
            self,
            NexusError::BadHeader(_) | NexusError::TruncatedInput { .. }
        )
    }
}
