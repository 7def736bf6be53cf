use serde::Deserialize;
use thiserror::Error;

pub type SubmissionId = u64;

/// File payload handed to the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    /// Declared MIME type; empty means unknown.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Body of a `/resumir` response.
///
/// Exactly one of the two fields is expected; anything else is handled as a
/// protocol violation by [`crate::interpret_response`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerResponse {
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub erro: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("server rejected upload with status {status}")]
    ServerRejected { status: u16, message: Option<String> },
    #[error("malformed response (status {status}): {detail}")]
    MalformedResponse { status: u16, detail: String },
    #[error("{0}")]
    Network(String),
    #[error("timeout: {0}")]
    Timeout(String),
    #[error("invalid request: {0}")]
    Request(String),
    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    UploadCompleted {
        submission: SubmissionId,
        /// Redirect target on success.
        result: Result<String, UploadError>,
    },
    UploadCancelled {
        submission: SubmissionId,
    },
    SummaryLoaded {
        url: String,
        result: Result<String, crate::SummaryError>,
    },
}
