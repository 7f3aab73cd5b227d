//! Render tree builder — deterministic ordering, section suppression,
//! empty-state placeholder.
//!
//! The tree is a pure derived view of a normalized record: it is rebuilt
//! whenever the record changes and never mutated in place. Files, functions,
//! parameters and returns keep the exact order the backend supplied; nothing
//! is sorted, filtered or deduplicated.

use crate::normalize::{FileEntry, FunctionEntry, ProjectDoc};

/// Empty-state message shown when the record documents no files.
pub const NO_FILES_MESSAGE: &str = "No Python files found in the directory";

/// The presentation-ready tree for one documentation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderTree {
    pub title: String,
    pub subtitle: String,
    pub body: Body,
    /// "Generated on ..." footer text.
    pub generated_at: String,
}

/// Either real content or the terminal "no content" state. The placeholder is
/// a rendering state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Placeholder(String),
    Files(Vec<FileSection>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSection {
    pub heading: String,
    pub path: Option<String>,
    /// Present iff the file has at least one overview paragraph.
    pub overview: Option<Vec<String>>,
    /// Present iff the file has at least one function.
    pub functions: Option<Vec<FunctionSection>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSection {
    pub name: String,
    pub description: Option<Vec<String>>,
    pub parameters: Option<Vec<String>>,
    pub returns: Option<Vec<String>>,
}

/// Build the render tree for a normalized record. Pure, total, idempotent.
pub fn build(doc: &ProjectDoc) -> RenderTree {
    let body = if doc.files.is_empty() {
        Body::Placeholder(NO_FILES_MESSAGE.to_string())
    } else {
        Body::Files(doc.files.iter().map(build_file).collect())
    };

    RenderTree {
        title: doc.project_name.clone(),
        subtitle: doc.project_description.clone(),
        body,
        generated_at: doc.timestamp.clone(),
    }
}

fn build_file(file: &FileEntry) -> FileSection {
    FileSection {
        heading: file.file_name.clone(),
        path: file.file_path.clone(),
        overview: non_empty(file.overview.clone()),
        functions: non_empty(file.functions.iter().map(build_function).collect()),
    }
}

fn build_function(func: &FunctionEntry) -> FunctionSection {
    FunctionSection {
        name: func.name.clone(),
        description: non_empty(func.description.clone()),
        parameters: non_empty(func.parameters.clone()),
        returns: non_empty(func.returns.clone()),
    }
}

/// Section presence is gated strictly on the resolved sequence being
/// non-empty: an empty section is omitted entirely, never rendered blank.
fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}
