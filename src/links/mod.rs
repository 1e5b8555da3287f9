//! Link annotation extraction
//!
//! Pages are processed independently: each page's `/Annots` array is classified into URL links
//! and bookmark links, and combined with the page's media box. Pages without link annotations
//! produce nothing.

mod annotation;
mod document;
mod geometry;

pub use annotation::{
    classify_annotation, collect_links, Classification, LinkAnnotation, PageLinks, SkipReason,
};
pub use document::{extract_document, extract_page, DocumentResult, PageResult};
pub use geometry::{
    extract_rectangle, fallback_media_box, media_box_or_default, Geometry, Rectangle,
    DEFAULT_MEDIA_BOX,
};
