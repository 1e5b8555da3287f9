//! JSON output
//!
//! Results are written with sorted object keys (page keys sort as strings) and, by default,
//! with every non-ASCII character escaped, so output is byte-stable across runs.

use crate::error::Result;
use crate::links::DocumentResult;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};
use std::io::{self, Write};

/// Layout of the emitted JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputStyle {
    /// No insignificant whitespace
    #[default]
    Compact,
    /// Four-space indentation
    Pretty,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub style: OutputStyle,
    /// Escape non-ASCII characters as `\uXXXX` (default: true)
    pub ensure_ascii: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            style: OutputStyle::Compact,
            ensure_ascii: true,
        }
    }
}

impl OutputConfig {
    pub fn pretty() -> Self {
        Self {
            style: OutputStyle::Pretty,
            ..Self::default()
        }
    }
}

/// Write the document as JSON followed by a newline
pub fn write_json<W: Write>(
    writer: &mut W,
    result: &DocumentResult,
    config: &OutputConfig,
) -> Result<()> {
    let value = result.to_json()?;
    match config.style {
        OutputStyle::Compact => {
            write_with(writer, &value, CompactFormatter, config.ensure_ascii)?
        }
        OutputStyle::Pretty => write_with(
            writer,
            &value,
            PrettyFormatter::with_indent(b"    "),
            config.ensure_ascii,
        )?,
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Render the document as a JSON string (with trailing newline)
pub fn to_json_string(result: &DocumentResult, config: &OutputConfig) -> Result<String> {
    let mut buf = Vec::new();
    write_json(&mut buf, result, config)?;
    // Serializer output is always UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_with<W: Write, F: Formatter>(
    writer: &mut W,
    value: &serde_json::Value,
    formatter: F,
    ensure_ascii: bool,
) -> Result<()> {
    let formatter = AsciiFormatter {
        inner: formatter,
        enabled: ensure_ascii,
    };
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

/// Formatter that escapes non-ASCII characters and delegates layout to `inner`
struct AsciiFormatter<F> {
    inner: F,
    enabled: bool,
}

impl<F: Formatter> Formatter for AsciiFormatter<F> {
    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        if !self.enabled || fragment.is_ascii() {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04X}", unit)?;
                }
            }
        }
        Ok(())
    }

    fn begin_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn end_object_key<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_key(writer)
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::extract_document;
    use crate::pdf::{Dictionary, MemoryDocument, PdfNode};

    fn document_with_uri(uri: &str) -> DocumentResult {
        let mut doc = MemoryDocument::new();
        let action = Dictionary::new().with("/URI", PdfNode::string(uri));
        let annot: PdfNode = Dictionary::new()
            .with("/Subtype", PdfNode::name("Link"))
            .with("/Rect", PdfNode::integers(&[0, 0, 1, 1]))
            .with("/A", action.into())
            .into();
        doc.push_page(
            Dictionary::new()
                .with("/Annots", PdfNode::Array(vec![annot]))
                .into(),
        );
        extract_document(&doc).unwrap()
    }

    #[test]
    fn test_compact_output_sorted_keys() {
        let result = document_with_uri("http://x");
        let json = to_json_string(&result, &OutputConfig::default()).unwrap();

        assert_eq!(
            json,
            "{\"0\":{\"mediabox\":[0,0,612,792],\"urls\":[{\"data\":\"<< /A << /URI (http://x) >> /Rect [ 0 0 1 1 ] /Subtype /Link >>\",\"rect\":[0,0,1,1],\"uri\":\"http://x\"}]}}\n"
        );
    }

    #[test]
    fn test_pretty_output_uses_four_space_indent() {
        let result = document_with_uri("http://x");
        let json = to_json_string(&result, &OutputConfig::pretty()).unwrap();

        assert!(json.starts_with("{\n    \"0\": {\n        \"mediabox\": ["));
        assert!(json.ends_with("}\n"));
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let result = document_with_uri("http://caf\u{e9}.example/\u{1F600}");
        let json = to_json_string(&result, &OutputConfig::default()).unwrap();

        assert!(json.is_ascii());
        assert!(json.contains("\"uri\":\"http://caf\\u00E9.example/\\uD83D\\uDE00\""));
    }

    #[test]
    fn test_non_ascii_kept_when_disabled() {
        let result = document_with_uri("http://caf\u{e9}.example");
        let config = OutputConfig {
            ensure_ascii: false,
            ..OutputConfig::default()
        };
        let json = to_json_string(&result, &config).unwrap();

        assert!(json.contains("\"uri\":\"http://caf\u{e9}.example\""));
    }

    #[test]
    fn test_empty_document() {
        let result = DocumentResult::default();
        let json = to_json_string(&result, &OutputConfig::default()).unwrap();
        assert_eq!(json, "{}\n");
    }
}
