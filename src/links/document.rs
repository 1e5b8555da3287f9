//! Page and document assembly

use crate::error::Result;
use crate::links::annotation::{collect_links, LinkAnnotation};
use crate::links::geometry::{media_box_or_default, Rectangle};
use crate::pdf::{Key, ObjectSource, PdfNode};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Links and geometry of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<LinkAnnotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bookmarks: Vec<LinkAnnotation>,
    pub mediabox: Rectangle,
}

/// Per-page results keyed by 0-based page index, in page order.
/// Pages without link annotations are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentResult {
    pages: Vec<(usize, PageResult)>,
}

impl DocumentResult {
    pub fn pages(&self) -> &[(usize, PageResult)] {
        &self.pages
    }

    pub fn get(&self, index: usize) -> Option<&PageResult> {
        self.pages
            .iter()
            .find(|(page, _)| *page == index)
            .map(|(_, result)| result)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Owned JSON tree of the result
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Serialize for DocumentResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pages.len()))?;
        for (index, page) in &self.pages {
            map.serialize_entry(&index.to_string(), page)?;
        }
        map.end()
    }
}

/// Build the result for one page.
///
/// Returns `None` when the page has no `/Annots` entry or none of its annotations is a valid
/// link. The media box alone never makes a page visible.
pub fn extract_page<S: ObjectSource + ?Sized>(source: &S, page: &PdfNode) -> Option<PageResult> {
    let resolved = source.resolve(page);
    let Some(dict) = resolved.as_dict() else {
        tracing::warn!("page object is not a dictionary");
        return None;
    };
    let annots = dict.get(Key::Annots)?;

    let mediabox = media_box_or_default(source, dict.get(Key::MediaBox));
    let links = collect_links(source, annots);
    if links.is_empty() {
        return None;
    }

    Some(PageResult {
        urls: links.urls,
        bookmarks: links.bookmarks,
        mediabox,
    })
}

/// Walk every page of the document in order.
///
/// Fails only if the page list itself cannot be read.
pub fn extract_document<S: ObjectSource + ?Sized>(source: &S) -> Result<DocumentResult> {
    let pages = source.pages()?;
    let mut result = DocumentResult::default();

    for (index, page) in pages.iter().enumerate() {
        if let Some(page_result) = extract_page(source, page) {
            tracing::debug!(
                page = index,
                urls = page_result.urls.len(),
                bookmarks = page_result.bookmarks.len(),
                "page has links"
            );
            result.pages.push((index, page_result));
        }
    }

    tracing::debug!(
        pages = pages.len(),
        pages_with_links = result.len(),
        "document processed"
    );
    Ok(result)
}
