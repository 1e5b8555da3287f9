//! Source resolution

pub mod resolver;

pub use resolver::{resolve_path, resolve_reader, ResolvedPdf};
