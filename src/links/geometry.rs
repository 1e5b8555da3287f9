//! Rectangle extraction for `/Rect` and `/MediaBox` arrays

use crate::pdf::{ObjectSource, PdfNode};
use serde::Serialize;

/// Media box used when a page declares none (US Letter, in PDF units)
pub const DEFAULT_MEDIA_BOX: Rectangle = Rectangle([0, 0, 612, 792]);

/// Integer rectangle `[x0, y0, x1, y1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Rectangle(pub [i64; 4]);

/// Outcome of reading a rectangle array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Valid(Rectangle),
    /// The node was an array, but not four integer-prefixed elements
    Invalid,
    /// The node was not an array at all
    NotArray,
}

impl Geometry {
    pub fn valid(self) -> Option<Rectangle> {
        match self {
            Geometry::Valid(rect) => Some(rect),
            Geometry::Invalid | Geometry::NotArray => None,
        }
    }
}

/// Read a rectangle from an array node.
///
/// Each element is resolved and its PDF text parsed with base-10 prefix semantics: leading
/// whitespace and a sign are allowed, at least one digit is required, and anything after the
/// digits is ignored (`12.7` reads as `12`). One unparsable element invalidates the whole
/// rectangle.
pub fn extract_rectangle<S: ObjectSource + ?Sized>(source: &S, node: &PdfNode) -> Geometry {
    let resolved = source.resolve(node);
    let Some(items) = resolved.as_array() else {
        return Geometry::NotArray;
    };
    if items.len() != 4 {
        return Geometry::Invalid;
    }

    let mut coords = [0i64; 4];
    for (slot, item) in coords.iter_mut().zip(items) {
        match parse_integer_prefix(&source.resolve(item).unparse()) {
            Some(value) => *slot = value,
            None => return Geometry::Invalid,
        }
    }
    Geometry::Valid(Rectangle(coords))
}

/// Page media box, or the default when the page has none
pub fn media_box_or_default<S: ObjectSource + ?Sized>(
    source: &S,
    media_box: Option<&PdfNode>,
) -> Rectangle {
    media_box
        .and_then(|node| extract_rectangle(source, node).valid())
        .unwrap_or_else(fallback_media_box)
}

pub fn fallback_media_box() -> Rectangle {
    tracing::info!("Fall back to default mediabox");
    DEFAULT_MEDIA_BOX
}

/// Parse the leading base-10 integer of `text`. Out-of-range values saturate.
pub(crate) fn parse_integer_prefix(text: &str) -> Option<i64> {
    let rest = text.trim_start();
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = rest[..digits].bytes().fold(0i64, |acc, digit| {
        let digit = i64::from(digit - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::{MemoryDocument, ObjectRef};

    #[test]
    fn test_parse_integer_prefix() {
        assert_eq!(parse_integer_prefix("612"), Some(612));
        assert_eq!(parse_integer_prefix("-3"), Some(-3));
        assert_eq!(parse_integer_prefix("+8"), Some(8));
        assert_eq!(parse_integer_prefix("  42"), Some(42));
        assert_eq!(parse_integer_prefix("12.7"), Some(12)); // trailing text ignored
        assert_eq!(parse_integer_prefix("-0.5"), Some(0));
    }

    #[test]
    fn test_parse_integer_prefix_rejects_non_numeric() {
        assert_eq!(parse_integer_prefix(""), None);
        assert_eq!(parse_integer_prefix("-"), None);
        assert_eq!(parse_integer_prefix(".5"), None);
        assert_eq!(parse_integer_prefix("/Name"), None);
        assert_eq!(parse_integer_prefix("(12)"), None);
        assert_eq!(parse_integer_prefix("null"), None);
    }

    #[test]
    fn test_parse_integer_prefix_saturates() {
        assert_eq!(parse_integer_prefix("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_integer_prefix("-99999999999999999999"), Some(i64::MIN));
    }

    #[test]
    fn test_extract_rectangle_integers_and_reals() {
        let doc = MemoryDocument::new();
        let node = PdfNode::Array(vec![
            PdfNode::Integer(0),
            PdfNode::real("0.0"),
            PdfNode::real("612.9"),
            PdfNode::Integer(792),
        ]);
        assert_eq!(
            extract_rectangle(&doc, &node),
            Geometry::Valid(Rectangle([0, 0, 612, 792]))
        );
    }

    #[test]
    fn test_extract_rectangle_resolves_references() {
        let mut doc = MemoryDocument::new();
        doc.insert_object(ObjectRef::new(5, 0), PdfNode::Integer(100));
        doc.insert_object(
            ObjectRef::new(6, 0),
            PdfNode::Array(vec![
                PdfNode::Integer(1),
                PdfNode::Integer(2),
                PdfNode::reference(5, 0),
                PdfNode::Integer(4),
            ]),
        );

        let rect = extract_rectangle(&doc, &PdfNode::reference(6, 0));
        assert_eq!(rect, Geometry::Valid(Rectangle([1, 2, 100, 4])));
    }

    #[test]
    fn test_extract_rectangle_invalid_element_discards_all() {
        let doc = MemoryDocument::new();
        let node = PdfNode::Array(vec![
            PdfNode::Integer(0),
            PdfNode::Integer(0),
            PdfNode::name("Wide"),
            PdfNode::Integer(50),
        ]);
        assert_eq!(extract_rectangle(&doc, &node), Geometry::Invalid);
    }

    #[test]
    fn test_extract_rectangle_wrong_length() {
        let doc = MemoryDocument::new();
        assert_eq!(
            extract_rectangle(&doc, &PdfNode::integers(&[0, 0, 10])),
            Geometry::Invalid
        );
        assert_eq!(
            extract_rectangle(&doc, &PdfNode::integers(&[0, 0, 10, 10, 10])),
            Geometry::Invalid
        );
        assert_eq!(
            extract_rectangle(&doc, &PdfNode::Array(Vec::new())),
            Geometry::Invalid
        );
    }

    #[test]
    fn test_extract_rectangle_not_array() {
        let doc = MemoryDocument::new();
        assert_eq!(
            extract_rectangle(&doc, &PdfNode::Integer(4)),
            Geometry::NotArray
        );
        // Dangling reference resolves to null
        assert_eq!(
            extract_rectangle(&doc, &PdfNode::reference(40, 0)),
            Geometry::NotArray
        );
    }

    #[test]
    fn test_geometry_valid() {
        let rect = Rectangle([1, 2, 3, 4]);
        assert_eq!(Geometry::Valid(rect).valid(), Some(rect));
        assert_eq!(Geometry::Invalid.valid(), None);
        assert_eq!(Geometry::NotArray.valid(), None);
    }

    #[test]
    fn test_media_box_fallback() {
        let doc = MemoryDocument::new();
        assert_eq!(media_box_or_default(&doc, None), DEFAULT_MEDIA_BOX);
        assert_eq!(
            media_box_or_default(&doc, Some(&PdfNode::string("bogus"))),
            DEFAULT_MEDIA_BOX
        );
        assert_eq!(
            media_box_or_default(&doc, Some(&PdfNode::integers(&[0, 0, 595, 842]))),
            Rectangle([0, 0, 595, 842])
        );
    }
}
