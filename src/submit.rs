//! Submission workflow — thin async client for the analysis backend.
//!
//! The core does not validate the directory path, does not retry, and does
//! not interpret backend error codes beyond success/failure: it only
//! distinguishes "got a usable record" from "did not". Cancellation is not
//! supported; a hung request blocks its caller until it resolves.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::model::DocumentationRecord;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/generate-documentation";

/// Where the backend is asked to drop its own JSON copy of the record.
/// Fixed by the caller, never user-controlled.
pub const DEFAULT_OUTPUT_PATH: &str = "./output/README.MD";

const GENERIC_FAILURE: &str = "Failed to generate documentation";

#[derive(Debug, Error)]
pub enum SubmitError {
    /// Network failure, non-success HTTP status, or an unreadable body.
    #[error("could not reach the documentation backend: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered but did not produce a usable record.
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    directory_path: &'a str,
    output_path: &'a str,
}

/// Backend response envelope.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    documentation: Option<DocumentationRecord>,
    #[serde(default)]
    output_path: Option<String>,
}

pub struct SubmissionClient {
    http: reqwest::Client,
    endpoint: String,
    output_path: String,
}

impl SubmissionClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        SubmissionClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }

    /// Submit a directory path for analysis and wait for the record.
    pub async fn submit(&self, directory_path: &str) -> Result<DocumentationRecord, SubmitError> {
        info!(
            directory = directory_path,
            endpoint = %self.endpoint,
            "submitting directory for analysis"
        );
        let response = self
            .http
            .post(&self.endpoint)
            .json(&SubmitRequest {
                directory_path,
                output_path: &self.output_path,
            })
            .send()
            .await?
            .error_for_status()?;
        let envelope: SubmitResponse = response.json().await?;
        resolve(envelope)
    }
}

/// Accept the envelope only when it carries `success == true` and a non-null
/// record; anything else is a failure with the backend's message when it
/// sent one.
fn resolve(envelope: SubmitResponse) -> Result<DocumentationRecord, SubmitError> {
    if let Some(ref path) = envelope.output_path {
        info!(output_path = %path, "backend reported its own output copy");
    }
    match envelope {
        SubmitResponse {
            success: true,
            documentation: Some(record),
            ..
        } => {
            info!(
                files = record.files.as_ref().map_or(0, Vec::len),
                "received documentation record"
            );
            Ok(record)
        }
        SubmitResponse { message, .. } => {
            let message = message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(%message, "submission did not produce a record");
            Err(SubmitError::Backend(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};

    fn parse(json: &str) -> SubmitResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn success_with_record_resolves() {
        let record = resolve(parse(
            r#"{"success": true, "message": "Documentation generated successfully",
                "documentation": {"projectName": "P", "files": []},
                "output_path": "./output/README.MD"}"#,
        ))
        .unwrap();
        assert_eq!(record.project_name.as_deref(), Some("P"));
    }

    #[test]
    fn failure_carries_backend_message() {
        let err = resolve(parse(
            r#"{"success": false, "message": "No documentation generated", "documentation": {}}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, SubmitError::Backend(ref m) if m == "No documentation generated"));
    }

    #[test]
    fn null_documentation_is_a_failure() {
        let err = resolve(parse(r#"{"success": true, "documentation": null}"#)).unwrap_err();
        assert!(matches!(err, SubmitError::Backend(_)));
    }

    #[test]
    fn missing_message_falls_back_to_generic() {
        let err = resolve(parse(r#"{"success": false}"#)).unwrap_err();
        assert!(matches!(err, SubmitError::Backend(ref m) if m == GENERIC_FAILURE));
    }

    // -- end-to-end against a single-shot local HTTP listener --

    fn read_request(stream: &mut TcpStream) -> Vec<u8> {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            if let Some(header_end) = data.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&data[..header_end]).to_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        data
    }

    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let request = read_request(&mut stream);
            assert!(String::from_utf8_lossy(&request).contains("directory_path"));
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/generate-documentation")
    }

    #[tokio::test]
    async fn submit_round_trip() {
        let endpoint = serve_once(
            "200 OK",
            r#"{"success": true, "message": "ok",
                "documentation": {"projectName": "P", "files": [{"fileName": "a.py"}]}}"#,
        );
        let record = SubmissionClient::new(endpoint)
            .submit("/tmp/project")
            .await
            .unwrap();
        assert_eq!(record.project_name.as_deref(), Some("P"));
        assert_eq!(record.files.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let endpoint = serve_once("500 Internal Server Error", r#"{"detail": "boom"}"#);
        let err = SubmissionClient::new(endpoint)
            .submit("/tmp/project")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        let err = SubmissionClient::new("http://127.0.0.1:1/generate-documentation")
            .submit("/tmp/project")
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
    }
}
