//! Shared helpers for building small PDF files in tests

#![allow(dead_code)]

use std::io::Write;
use tempfile::NamedTempFile;

/// Assemble a classic (xref table) PDF from object bodies.
///
/// Object `n` in the output is `objects[n - 1]`; object 1 must be the catalog.
pub fn build_pdf(objects: &[String]) -> Vec<u8> {
    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

/// Build a document whose pages are the given page dictionaries (object numbers start at 3,
/// after the catalog and page tree), followed by `extra` objects.
///
/// Page bodies get `/Type /Page /Parent 2 0 R` prepended.
pub fn pdf_with_pages(pages: &[&str], extra: &[&str]) -> Vec<u8> {
    let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", i + 3)).collect();
    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        ),
    ];
    objects.extend(
        pages
            .iter()
            .map(|body| format!("<< /Type /Page /Parent 2 0 R {} >>", body)),
    );
    objects.extend(extra.iter().map(|body| body.to_string()));
    build_pdf(&objects)
}

/// Write PDF bytes to a temporary file
pub fn write_temp_pdf(bytes: &[u8]) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
    tmp.write_all(bytes).expect("Failed to write temp PDF");
    tmp.flush().expect("Failed to flush temp PDF");
    tmp
}
