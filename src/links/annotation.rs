//! Link annotation classification and per-page collection

use crate::links::geometry::{extract_rectangle, Geometry, Rectangle};
use crate::pdf::{Key, ObjectSource, PdfNode};
use serde::Serialize;
use std::fmt;

/// A link annotation that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkAnnotation {
    pub rect: Rectangle,
    /// PDF text of the whole annotation dictionary
    #[serde(rename = "data")]
    pub raw_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// Why an annotation produced no output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotDictionary,
    MissingSubtype,
    MissingRect,
    NotLink,
    InvalidGeometry,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            SkipReason::NotDictionary => "not a dictionary",
            SkipReason::MissingSubtype => "no /Subtype",
            SkipReason::MissingRect => "no /Rect",
            SkipReason::NotLink => "subtype is not /Link",
            SkipReason::InvalidGeometry => "invalid /Rect",
        };
        f.write_str(reason)
    }
}

/// Classification of a single annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Skip(SkipReason),
    /// Link whose action carries an explicit `/URI`
    UrlLink(LinkAnnotation),
    /// Internal link: a `/Dest`, a non-URI action, or no target at all.
    /// Destinations are not resolved to a page or position.
    BookmarkLink(LinkAnnotation),
}

/// Classify one annotation node (resolved first if it is a reference).
pub fn classify_annotation<S: ObjectSource + ?Sized>(
    source: &S,
    annotation: &PdfNode,
) -> Classification {
    let resolved = source.resolve(annotation);
    let Some(dict) = resolved.as_dict() else {
        return Classification::Skip(SkipReason::NotDictionary);
    };

    let Some(subtype) = dict.get(Key::Subtype) else {
        return Classification::Skip(SkipReason::MissingSubtype);
    };
    let Some(rect_node) = dict.get(Key::Rect) else {
        return Classification::Skip(SkipReason::MissingRect);
    };
    if source.resolve(subtype).unparse() != "/Link" {
        return Classification::Skip(SkipReason::NotLink);
    }
    let rect = match extract_rectangle(source, rect_node) {
        Geometry::Valid(rect) => rect,
        Geometry::Invalid | Geometry::NotArray => {
            return Classification::Skip(SkipReason::InvalidGeometry);
        }
    };

    let uri = dict
        .get(Key::Action)
        .map(|action| source.resolve(action))
        .and_then(|action| {
            let uri = action.as_dict()?.get(Key::Uri)?;
            let resolved_uri = source.resolve(uri);
            Some(uri_text(&resolved_uri))
        });

    if uri.is_none() && dict.contains(Key::Dest) {
        tracing::trace!("internal destination left unresolved");
    }

    let link = LinkAnnotation {
        rect,
        raw_description: resolved.unparse(),
        uri,
    };
    match link.uri {
        Some(_) => Classification::UrlLink(link),
        None => Classification::BookmarkLink(link),
    }
}

/// String URIs are reported by their text; any other node by its PDF syntax.
fn uri_text(node: &PdfNode) -> String {
    node.as_text().unwrap_or_else(|| node.unparse())
}

/// Link annotations of one page, split by kind, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    pub urls: Vec<LinkAnnotation>,
    pub bookmarks: Vec<LinkAnnotation>,
}

impl PageLinks {
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.bookmarks.is_empty()
    }
}

/// Collect the link annotations of a page's `/Annots` node.
///
/// A node that does not resolve to an array yields no links.
pub fn collect_links<S: ObjectSource + ?Sized>(source: &S, annots: &PdfNode) -> PageLinks {
    let mut links = PageLinks::default();
    let resolved = source.resolve(annots);
    let Some(items) = resolved.as_array() else {
        tracing::debug!("/Annots is not an array");
        return links;
    };

    for (index, item) in items.iter().enumerate() {
        match classify_annotation(source, item) {
            Classification::UrlLink(link) => links.urls.push(link),
            Classification::BookmarkLink(link) => links.bookmarks.push(link),
            Classification::Skip(reason) => {
                tracing::debug!(annotation = index, %reason, "skipping annotation");
            }
        }
    }
    links
}
