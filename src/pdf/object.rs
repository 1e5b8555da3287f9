//! Owned PDF object model
//!
//! Annotation extraction never talks to a PDF library directly. Backends convert their objects
//! into [`PdfNode`] values and hand out referenced objects on demand through [`ObjectSource`].

use crate::error::Result;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Maximum number of reference hops followed before a chain is treated as broken
const MAX_REFERENCE_DEPTH: usize = 32;

/// Indirect object identifier (`id generation R`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef {
    pub id: u32,
    pub generation: u32,
}

impl ObjectRef {
    pub fn new(id: u32, generation: u32) -> Self {
        Self { id, generation }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.id, self.generation)
    }
}

/// Dictionary keys the extractor inspects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Subtype,
    Rect,
    Action,
    Dest,
    Uri,
    Annots,
    MediaBox,
}

impl Key {
    /// PDF name of the key, including the leading slash
    pub fn name(self) -> &'static str {
        match self {
            Key::Subtype => "/Subtype",
            Key::Rect => "/Rect",
            Key::Action => "/A",
            Key::Dest => "/Dest",
            Key::Uri => "/URI",
            Key::Annots => "/Annots",
            Key::MediaBox => "/MediaBox",
        }
    }
}

/// A PDF dictionary with keys kept in sorted order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: BTreeMap<String, PdfNode>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A missing leading slash on `name` is added.
    pub fn insert(&mut self, name: impl Into<String>, value: PdfNode) {
        self.entries.insert(normalize_name(name.into()), value);
    }

    /// Builder-style [`Dictionary::insert`]
    pub fn with(mut self, name: impl Into<String>, value: PdfNode) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a recognized key. A `null` value counts as absent.
    pub fn get(&self, key: Key) -> Option<&PdfNode> {
        self.entries
            .get(key.name())
            .filter(|value| !matches!(value, PdfNode::Null))
    }

    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PdfNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>> FromIterator<(K, PdfNode)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, PdfNode)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        for (name, value) in iter {
            dict.insert(name, value);
        }
        dict
    }
}

/// A PDF object value
#[derive(Debug, Clone, PartialEq)]
pub enum PdfNode {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Real number in the textual form it was written with
    Real(String),
    /// Name including its leading slash, e.g. `/Link`
    Name(String),
    /// Raw string bytes, without delimiters
    String(Vec<u8>),
    Array(Vec<PdfNode>),
    Dictionary(Dictionary),
    /// Stream object; only its presence is modelled
    Stream,
    Reference(ObjectRef),
}

impl PdfNode {
    pub fn name(name: impl Into<String>) -> Self {
        PdfNode::Name(normalize_name(name.into()))
    }

    pub fn string(value: impl Into<Vec<u8>>) -> Self {
        PdfNode::String(value.into())
    }

    pub fn real(text: impl Into<String>) -> Self {
        PdfNode::Real(text.into())
    }

    pub fn reference(id: u32, generation: u32) -> Self {
        PdfNode::Reference(ObjectRef::new(id, generation))
    }

    pub fn integers(values: &[i64]) -> Self {
        PdfNode::Array(values.iter().copied().map(PdfNode::Integer).collect())
    }

    pub fn as_array(&self) -> Option<&[PdfNode]> {
        match self {
            PdfNode::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            PdfNode::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Text content of a string node. UTF-16BE strings (with BOM) are decoded, anything else
    /// is read as UTF-8 with lossy replacement.
    pub fn as_text(&self) -> Option<String> {
        match self {
            PdfNode::String(bytes) => Some(decode_text_string(bytes)),
            _ => None,
        }
    }

    /// PDF syntax for this node. Nested references are kept as `id generation R`.
    pub fn unparse(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

impl From<Dictionary> for PdfNode {
    fn from(dict: Dictionary) -> Self {
        PdfNode::Dictionary(dict)
    }
}

/// Provider of a parsed PDF object graph
pub trait ObjectSource {
    /// Page dictionaries (or references to them) in document order
    fn pages(&self) -> Result<Vec<PdfNode>>;

    /// Look up an indirect object
    fn object(&self, reference: ObjectRef) -> Option<PdfNode>;

    /// Follow references until a direct value is reached. Dangling or cyclic chains resolve to
    /// `null`, as PDF readers treat references to missing objects.
    fn resolve<'a>(&self, node: &'a PdfNode) -> Cow<'a, PdfNode> {
        let PdfNode::Reference(mut reference) = node else {
            return Cow::Borrowed(node);
        };
        for _ in 0..MAX_REFERENCE_DEPTH {
            match self.object(reference) {
                Some(PdfNode::Reference(next)) => reference = next,
                Some(value) => return Cow::Owned(value),
                None => {
                    tracing::debug!(%reference, "dangling object reference");
                    return Cow::Owned(PdfNode::Null);
                }
            }
        }
        tracing::debug!(%reference, "reference chain too deep");
        Cow::Owned(PdfNode::Null)
    }
}

fn normalize_name(name: String) -> String {
    if name.starts_with('/') {
        name
    } else {
        format!("/{}", name)
    }
}

fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(body) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = body
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn write_node(out: &mut String, node: &PdfNode) {
    match node {
        PdfNode::Null => out.push_str("null"),
        PdfNode::Boolean(value) => out.push_str(if *value { "true" } else { "false" }),
        PdfNode::Integer(value) => {
            let _ = write!(out, "{}", value);
        }
        PdfNode::Real(text) => out.push_str(text),
        PdfNode::Name(name) => write_name(out, name),
        PdfNode::String(bytes) => write_string(out, bytes),
        PdfNode::Array(items) => {
            out.push_str("[ ");
            for item in items {
                write_node(out, item);
                out.push(' ');
            }
            out.push(']');
        }
        PdfNode::Dictionary(dict) => {
            out.push_str("<< ");
            for (name, value) in dict.iter() {
                write_name(out, name);
                out.push(' ');
                write_node(out, value);
                out.push(' ');
            }
            out.push_str(">>");
        }
        PdfNode::Stream => out.push_str("stream"),
        PdfNode::Reference(reference) => {
            let _ = write!(out, "{}", reference);
        }
    }
}

fn write_name(out: &mut String, name: &str) {
    let body = name.strip_prefix('/').unwrap_or(name);
    out.push('/');
    for byte in body.bytes() {
        let delimiter = matches!(
            byte,
            b'#' | b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
        );
        if (b'!'..=b'~').contains(&byte) && !delimiter {
            out.push(byte as char);
        } else {
            let _ = write!(out, "#{:02x}", byte);
        }
    }
}

fn write_string(out: &mut String, bytes: &[u8]) {
    if use_hex_string(bytes) {
        out.push('<');
        for byte in bytes {
            let _ = write!(out, "{:02x}", byte);
        }
        out.push('>');
        return;
    }
    out.push('(');
    for &byte in bytes {
        match byte {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x08 => out.push_str("\\b"),
            0x0c => out.push_str("\\f"),
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{:03o}", byte);
            }
        }
    }
    out.push(')');
}

/// Hex form is used for strings with control characters, or when more than a fifth of the
/// bytes fall outside printable ASCII.
fn use_hex_string(bytes: &[u8]) -> bool {
    let mut non_ascii = 0usize;
    for &byte in bytes {
        match byte {
            0x20..=0x7e => {}
            b'\n' | b'\r' | b'\t' | 0x08 | 0x0c => {}
            0x00..=0x17 => return true,
            _ => non_ascii += 1,
        }
    }
    5 * non_ascii > bytes.len()
}
