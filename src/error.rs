//! Error types for PDF annotation extraction

use thiserror::Error;

/// Result type alias for PDF annotation extraction
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for PDF annotation extraction
///
/// Only document-level failures are errors. Malformed rectangles, missing media boxes and
/// non-link annotations are recovered where they occur and never surface here.
#[derive(Error, Debug)]
pub enum Error {
    /// PDF file not found
    #[error("PDF not found: {path}")]
    PdfNotFound { path: String },

    /// Invalid PDF file
    #[error("Invalid PDF file: {reason}")]
    InvalidPdf { reason: String },

    /// Incorrect password provided
    #[error("Incorrect password")]
    IncorrectPassword,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// qpdf error
    #[error("qpdf error: {reason}")]
    QpdfError { reason: String },
}
