//! Error types for template extraction and generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while extracting widget metadata or writing templates.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The document is not well-formed markup.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A heading or table the extractor depends on is absent.
    #[error("section not found: {0}")]
    SectionNotFound(String),

    /// A section was found but a required sub-element is missing.
    #[error("missing field: {0}")]
    FieldExtraction(String),

    /// A widget document violated a structural assumption under the fail-fast policy.
    #[error("malformed widget document {}: {reason}", path.display())]
    MalformedWidget { path: PathBuf, reason: String },

    #[error("invalid widget document pattern: {0}")]
    Pattern(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
