//! Documentation normalizer — resolves every optional field to a concrete value.
//!
//! Pure functions of the wire record: no mutation, no I/O, no failure path.
//! Everything downstream (tree builder, renderers, export) works on the
//! normalized types and never checks for field presence again.

use crate::model::{DocumentationRecord, FileDoc, FunctionDoc};

pub const DEFAULT_PROJECT_NAME: &str = "Project Documentation";
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "Generated documentation for the project";

/// Timestamp format used by the backend; the fallback matches it.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A fully resolved documentation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDoc {
    pub project_name: String,
    pub project_description: String,
    pub timestamp: String,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub file_name: String,
    pub file_path: Option<String>,
    /// Overview paragraphs in original order; empty when the record had no
    /// overview text.
    pub overview: Vec<String>,
    pub functions: Vec<FunctionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionEntry {
    pub name: String,
    pub description: Vec<String>,
    pub parameters: Vec<String>,
    pub returns: Vec<String>,
}

/// Resolve a wire record into a `ProjectDoc`.
///
/// Absent scalars take their documented defaults, absent sequences become
/// empty, and the overview text is segmented into paragraphs. The timestamp
/// falls back to the current local wall clock in the backend's own format.
pub fn normalize(record: &DocumentationRecord) -> ProjectDoc {
    ProjectDoc {
        project_name: record
            .project_name
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        project_description: record
            .project_description
            .clone()
            .unwrap_or_else(|| DEFAULT_PROJECT_DESCRIPTION.to_string()),
        timestamp: record
            .timestamp
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()),
        files: record
            .files
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_file)
            .collect(),
    }
}

fn normalize_file(file: &FileDoc) -> FileEntry {
    FileEntry {
        file_name: file.file_name.clone().unwrap_or_default(),
        file_path: file.file_path.clone(),
        overview: file
            .overview
            .as_deref()
            .map(split_paragraphs)
            .unwrap_or_default(),
        functions: file
            .functions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(normalize_function)
            .collect(),
    }
}

fn normalize_function(func: &FunctionDoc) -> FunctionEntry {
    FunctionEntry {
        name: func.name.clone().unwrap_or_default(),
        description: func.description.clone().unwrap_or_default(),
        parameters: func.parameters.clone().unwrap_or_default(),
        returns: func.returns.clone().unwrap_or_default(),
    }
}

/// Split free text into paragraphs on line breaks.
///
/// Order is preserved and empty lines stay as empty paragraphs, so joining
/// the result with `'\n'` reproduces the input exactly. The empty string
/// yields no paragraphs at all — an empty overview suppresses its section
/// the same way an absent one does.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_gets_all_defaults() {
        let doc = normalize(&DocumentationRecord::default());
        assert_eq!(doc.project_name, DEFAULT_PROJECT_NAME);
        assert_eq!(doc.project_description, DEFAULT_PROJECT_DESCRIPTION);
        assert!(!doc.timestamp.is_empty());
        assert!(doc.files.is_empty());
    }

    #[test]
    fn present_fields_pass_through() {
        let record: DocumentationRecord = serde_json::from_str(
            r#"{"projectName": "p", "projectDescription": "d", "timestamp": "2025-03-14 09:21:55"}"#,
        )
        .unwrap();
        let doc = normalize(&record);
        assert_eq!(doc.project_name, "p");
        assert_eq!(doc.project_description, "d");
        assert_eq!(doc.timestamp, "2025-03-14 09:21:55");
    }

    #[test]
    fn absent_file_fields_become_empty() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"files": [{"fileName": "a.py"}]}"#).unwrap();
        let doc = normalize(&record);
        let file = &doc.files[0];
        assert_eq!(file.file_name, "a.py");
        assert!(file.file_path.is_none());
        assert!(file.overview.is_empty());
        assert!(file.functions.is_empty());
    }

    #[test]
    fn absent_function_fields_become_empty() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"files": [{"functions": [{"name": "f"}]}]}"#).unwrap();
        let func = &normalize(&record).files[0].functions[0];
        assert_eq!(func.name, "f");
        assert!(func.description.is_empty());
        assert!(func.parameters.is_empty());
        assert!(func.returns.is_empty());
    }

    #[test]
    fn normalize_is_pure() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"projectName": "p", "timestamp": "t", "files": []}"#).unwrap();
        assert_eq!(normalize(&record), normalize(&record));
    }

    #[test]
    fn paragraphs_preserve_empty_lines() {
        assert_eq!(
            split_paragraphs("first\n\nthird"),
            vec!["first", "", "third"]
        );
    }

    #[test]
    fn paragraph_round_trip() {
        for text in ["one line", "a\nb\nc", "lead\n\n\ntrail\n", "\n", "x\n"] {
            assert_eq!(split_paragraphs(text).join("\n"), text);
        }
    }

    #[test]
    fn empty_overview_yields_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
        assert_eq!(split_paragraphs("").join("\n"), "");
    }
}
