//! qpdf-backed object source
//!
//! This module loads PDFs (including encrypted ones) with the qpdf crate (vendored FFI) and
//! exposes the resulting object graph as [`PdfNode`] values.

use crate::error::{Error, Result};
use crate::pdf::object::{Dictionary, ObjectRef, ObjectSource, PdfNode};
use qpdf::{
    QPdf, QPdfArray, QPdfDictionary, QPdfObject, QPdfObjectLike, QPdfObjectType,
    QPdfScalar,
};
use std::path::Path;

/// A PDF document opened through qpdf
pub struct QpdfDocument {
    qpdf: QPdf,
}

/// Helper: open a QPdf from memory, optionally with password
fn open_qpdf(data: &[u8], password: Option<&str>) -> Result<QPdf> {
    match password {
        Some(pwd) => QPdf::read_from_memory_encrypted(data, pwd).map_err(map_qpdf_error),
        None => QPdf::read_from_memory(data).map_err(map_qpdf_error),
    }
}

/// Map qpdf crate errors to our error types
fn map_qpdf_error(e: qpdf::QPdfError) -> Error {
    match e.error_code() {
        qpdf::QPdfErrorCode::InvalidPassword => Error::IncorrectPassword,
        _ => Error::QpdfError {
            reason: e.to_string(),
        },
    }
}

impl QpdfDocument {
    /// Open a PDF from a file path
    pub fn open<P: AsRef<Path>>(path: P, password: Option<&str>) -> Result<Self> {
        let resolved = crate::source::resolve_path(path)?;
        Self::open_bytes(&resolved.data, password)
    }

    /// Open a PDF from bytes
    ///
    /// # Arguments
    /// * `data` - Raw PDF bytes
    /// * `password` - Optional password for encrypted PDFs
    pub fn open_bytes(data: &[u8], password: Option<&str>) -> Result<Self> {
        let qpdf = open_qpdf(data, password)?;
        tracing::debug!(bytes = data.len(), "opened PDF with qpdf");
        Ok(Self { qpdf })
    }

    /// Number of pages in the document
    pub fn page_count(&self) -> Result<u32> {
        self.qpdf.get_num_pages().map_err(map_qpdf_error)
    }
}

impl ObjectSource for QpdfDocument {
    fn pages(&self) -> Result<Vec<PdfNode>> {
        let pages = self.qpdf.get_pages().map_err(map_qpdf_error)?;
        Ok(pages.iter().map(|page| convert_direct(page.as_object())).collect())
    }

    fn object(&self, reference: ObjectRef) -> Option<PdfNode> {
        self.qpdf
            .get_object_by_id(reference.id, reference.generation)
            .map(|object| convert_direct(&object))
    }
}

/// Convert a child value: indirect objects stay references and are resolved on demand.
fn convert_child(object: &QPdfObject) -> PdfNode {
    if object.is_indirect() {
        PdfNode::reference(object.get_id(), object.get_generation())
    } else {
        convert_direct(object)
    }
}

/// Convert the value an object handle points at, one level deep.
fn convert_direct(object: &QPdfObject) -> PdfNode {
    match object.get_type() {
        QPdfObjectType::Boolean => PdfNode::Boolean(object.as_bool()),
        QPdfObjectType::Integer => PdfNode::Integer(QPdfScalar::from(object.clone()).as_i64()),
        // qpdf keeps reals in their original textual form
        QPdfObjectType::Real => PdfNode::real(object.to_string()),
        QPdfObjectType::Name => PdfNode::name(object.as_name()),
        QPdfObjectType::String => PdfNode::String(object.as_binary_string()),
        QPdfObjectType::Array => {
            let array = QPdfArray::from(object.clone());
            PdfNode::Array(array.iter().map(|item| convert_child(&item)).collect())
        }
        QPdfObjectType::Dictionary => {
            let dict = QPdfDictionary::from(object.clone());
            let converted: Dictionary = dict
                .keys()
                .into_iter()
                .filter_map(|key| {
                    let value = dict.get(&key)?;
                    Some((key, convert_child(&value)))
                })
                .collect();
            PdfNode::Dictionary(converted)
        }
        QPdfObjectType::Stream => PdfNode::Stream,
        _ => PdfNode::Null,
    }
}
