//! Source resolution for PDF data

use crate::error::{Error, Result};
use std::io::Read;
use std::path::Path;

/// Resolved PDF data
pub struct ResolvedPdf {
    pub data: Vec<u8>,
    pub source_name: String,
}

/// Resolve a file path to PDF data
pub fn resolve_path<P: AsRef<Path>>(path: P) -> Result<ResolvedPdf> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::PdfNotFound {
            path: path.display().to_string(),
        });
    }

    let data = std::fs::read(path).map_err(Error::Io)?;
    validate_header(&data, "Not a valid PDF file")?;

    Ok(ResolvedPdf {
        data,
        source_name: path.display().to_string(),
    })
}

/// Resolve PDF data from an arbitrary reader (e.g. standard input)
pub fn resolve_reader<R: Read>(mut reader: R, source_name: &str) -> Result<ResolvedPdf> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    validate_header(&data, "Input is not a valid PDF file")?;

    Ok(ResolvedPdf {
        data,
        source_name: source_name.to_string(),
    })
}

// Validate PDF header
fn validate_header(data: &[u8], reason: &str) -> Result<()> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::InvalidPdf {
            reason: reason.to_string(),
        });
    }
    Ok(())
}
