//! In-memory object graph

use crate::error::Result;
use crate::pdf::object::{ObjectRef, ObjectSource, PdfNode};
use std::collections::HashMap;

/// An object table plus page list held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    objects: HashMap<ObjectRef, PdfNode>,
    pages: Vec<PdfNode>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an indirect object
    pub fn insert_object(&mut self, reference: ObjectRef, value: PdfNode) {
        self.objects.insert(reference, value);
    }

    /// Append a page. The page may be a dictionary or a reference to one.
    pub fn push_page(&mut self, page: PdfNode) {
        self.pages.push(page);
    }

    /// Add an indirect object under the next free object number and return a reference to it
    pub fn add_object(&mut self, value: PdfNode) -> PdfNode {
        let id = self.objects.keys().map(|r| r.id).max().unwrap_or(0) + 1;
        let reference = ObjectRef::new(id, 0);
        self.objects.insert(reference, value);
        PdfNode::Reference(reference)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

impl ObjectSource for MemoryDocument {
    fn pages(&self) -> Result<Vec<PdfNode>> {
        Ok(self.pages.clone())
    }

    fn object(&self, reference: ObjectRef) -> Option<PdfNode> {
        self.objects.get(&reference).cloned()
    }
}
