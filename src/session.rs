//! Session state — the committed record and its derived render tree.
//!
//! A successful submission commits a new record; normalization and tree
//! building happen together so observers only ever see a fully-resolved,
//! consistent pair. The previous state is replaced wholesale, never patched,
//! and a failed submission or export leaves it untouched.

use crate::model::DocumentationRecord;
use crate::normalize::{normalize, ProjectDoc};
use crate::tree::{build, RenderTree};

#[derive(Default)]
pub struct Session {
    doc: Option<ProjectDoc>,
    tree: Option<RenderTree>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Commit a freshly received record, replacing any previous one.
    pub fn commit(&mut self, record: &DocumentationRecord) {
        let doc = normalize(record);
        self.tree = Some(build(&doc));
        self.doc = Some(doc);
    }

    /// The committed render tree, shared read-only between the on-screen
    /// renderers and the export capture.
    pub fn tree(&self) -> Option<&RenderTree> {
        self.tree.as_ref()
    }

    pub fn doc(&self) -> Option<&ProjectDoc> {
        self.doc.as_ref()
    }

    pub fn project_name(&self) -> Option<&str> {
        self.doc.as_ref().map(|doc| doc.project_name.as_str())
    }
}
