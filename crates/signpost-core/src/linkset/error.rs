//! Structural failures of Link Set parsing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParsingError {
    /// Input was empty or whitespace only; nothing was parsed.
    #[error("link set document is empty")]
    Empty,

    /// Malformed JSON or a document that violates the RFC 9264 shape.
    #[error("invalid link set JSON: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("read link set {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ParsingError {
    /// 1-based line of the failure, when the parser got that far.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParsingError::Invalid(e) if e.line() > 0 => Some(e.line()),
            _ => None,
        }
    }

    /// 1-based column of the failure, when known.
    pub fn column(&self) -> Option<usize> {
        match self {
            ParsingError::Invalid(e) if e.line() > 0 => Some(e.column()),
            _ => None,
        }
    }
}
