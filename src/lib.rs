//! PDF link annotation extractor
//!
//! This crate extracts link annotations and page geometry from PDFs:
//! - `pdf`: owned object model plus qpdf-backed and in-memory object sources
//! - `links`: link classification, page assembly and the document walk
//! - `output`: deterministic JSON writer
//! - `source`: loading PDF bytes from files or readers

pub mod error;
pub mod links;
pub mod output;
pub mod pdf;
pub mod source;

pub use error::{Error, Result};
pub use links::{extract_document, DocumentResult, LinkAnnotation, PageResult, Rectangle};
pub use output::{write_json, OutputConfig, OutputStyle};

/// Open PDF bytes with qpdf and extract the links of every page
pub fn extract_pdf(data: &[u8], password: Option<&str>) -> Result<DocumentResult> {
    let document = pdf::QpdfDocument::open_bytes(data, password)?;
    extract_document(&document)
}
