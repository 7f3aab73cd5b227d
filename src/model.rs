//! Wire model for documentation records — every field optional at the boundary.
//!
//! The analysis backend assembles these records from per-file LLM output, so
//! any field may be missing or carry the wrong JSON type. Deserialization is
//! lenient: a wrong-shaped field becomes absent, a wrong-shaped array element
//! is dropped, and unknown fields are ignored. Nothing here fails.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A documentation record as received from the backend.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DocumentationRecord {
    #[serde(rename = "projectName", deserialize_with = "lenient_string")]
    pub project_name: Option<String>,
    #[serde(rename = "projectDescription", deserialize_with = "lenient_string")]
    pub project_description: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    /// Files in backend order. Order is preserved through the whole pipeline.
    #[serde(deserialize_with = "lenient_seq")]
    pub files: Option<Vec<FileDoc>>,
}

/// Documentation for a single source file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileDoc {
    #[serde(rename = "fileName", deserialize_with = "lenient_string")]
    pub file_name: Option<String>,
    /// Absolute path the backend scanned; shown as secondary info.
    #[serde(rename = "filePath", deserialize_with = "lenient_string")]
    pub file_path: Option<String>,
    /// Multi-line free text; split into paragraphs by the normalizer.
    #[serde(deserialize_with = "lenient_string")]
    pub overview: Option<String>,
    #[serde(deserialize_with = "lenient_seq")]
    pub functions: Option<Vec<FunctionDoc>>,
}

/// Documentation for a single function.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FunctionDoc {
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string_seq")]
    pub description: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_string_seq")]
    pub parameters: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient_string_seq")]
    pub returns: Option<Vec<String>>,
}

/// Accept a JSON string; coerce anything else (null, number, object...) to absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Accept a JSON array of strings, dropping non-string elements; coerce
/// anything else to absent.
fn lenient_string_seq<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Accept a JSON array of objects, dropping elements that are not objects;
/// coerce anything else to absent. The element types are themselves fully
/// lenient, so per-element deserialization only rejects non-objects.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_a_record() {
        let record: DocumentationRecord = serde_json::from_str("{}").unwrap();
        assert!(record.project_name.is_none());
        assert!(record.files.is_none());
    }

    #[test]
    fn wrong_typed_scalars_become_absent() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"projectName": 42, "timestamp": ["x"]}"#).unwrap();
        assert!(record.project_name.is_none());
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn wrong_typed_files_become_absent() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"files": "not a list"}"#).unwrap();
        assert!(record.files.is_none());
    }

    #[test]
    fn non_object_file_entries_are_dropped() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"files": [{"fileName": "a.py"}, 7, "x"]}"#).unwrap();
        let files = record.files.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name.as_deref(), Some("a.py"));
    }

    #[test]
    fn non_string_sequence_elements_are_dropped() {
        let func: FunctionDoc =
            serde_json::from_str(r#"{"name": "f", "parameters": ["a", 1, null, "b"]}"#).unwrap();
        assert_eq!(func.parameters.unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn null_fields_become_absent() {
        let file: FileDoc =
            serde_json::from_str(r#"{"fileName": null, "overview": null, "functions": null}"#)
                .unwrap();
        assert!(file.file_name.is_none());
        assert!(file.overview.is_none());
        assert!(file.functions.is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record: DocumentationRecord =
            serde_json::from_str(r#"{"projectName": "p", "extra": {"deep": true}}"#).unwrap();
        assert_eq!(record.project_name.as_deref(), Some("p"));
    }
}
