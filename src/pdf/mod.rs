//! PDF object layer
//!
//! This module provides the owned object model the extractor works on, an in-memory source,
//! and a qpdf-backed source for real documents.

mod memory;
mod object;
mod qpdf;

pub use memory::MemoryDocument;
pub use object::{Dictionary, Key, ObjectRef, ObjectSource, PdfNode};
pub use self::qpdf::QpdfDocument;
