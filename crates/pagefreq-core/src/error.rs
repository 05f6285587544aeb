//! Error types for the pagefreq-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the pagefreq library.
#[derive(Error, Debug)]
pub enum PagefreqError {
    /// Document text extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Persisted record write error.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// Persisted record parse error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the page text source.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract the text layer.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised while writing a persisted frequency record.
#[derive(Error, Debug)]
pub enum WriteError {
    /// The underlying storage is unwritable.
    #[error("record I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// Pages must arrive in strictly increasing order.
    #[error("page {got} out of order, expected at least page {min}")]
    PageOrder { min: u32, got: u32 },

    /// The token contains characters reserved by the record format.
    #[error("token {0:?} contains reserved characters")]
    InvalidToken(String),

    /// The finished record could not be moved into place.
    #[error("failed to finalize record at {path}: {source}")]
    Finalize {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while reading a persisted frequency record back.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The underlying storage is unreadable.
    #[error("record I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// A line that should introduce a page block is not a valid marker.
    #[error("line {line}: expected page marker, found {content:?}")]
    BadMarker { line: usize, content: String },

    /// A frequency entry line is malformed.
    #[error("line {line}: malformed frequency entry {content:?}")]
    BadEntry { line: usize, content: String },

    /// The same token appears twice within one record block.
    #[error("line {line}: duplicate token {token:?}")]
    DuplicateToken { line: usize, token: String },

    /// Page markers must be strictly increasing.
    #[error("line {line}: page {got} out of order after page {prev}")]
    PageOrder { line: usize, prev: u32, got: u32 },
}

/// Result type for the pagefreq library.
pub type Result<T> = std::result::Result<T, PagefreqError>;
