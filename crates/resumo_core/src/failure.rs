use thiserror::Error;

use crate::{GENERIC_FAILURE_MESSAGE, INVALID_FORMAT_MESSAGE, UNEXPECTED_RESPONSE_MESSAGE};

/// Why a submission did not end in a redirect.
///
/// The `Display` text is what the widget shows in its error message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadFailure {
    #[error("{}", INVALID_FORMAT_MESSAGE)]
    InvalidFormat,
    #[error("{}", .message.as_deref().unwrap_or(GENERIC_FAILURE_MESSAGE))]
    ServerRejected {
        status: u16,
        message: Option<String>,
    },
    #[error("{}", UNEXPECTED_RESPONSE_MESSAGE)]
    MalformedResponse,
    #[error("{detail}")]
    NetworkFailure { detail: String },
}

impl UploadFailure {
    pub fn message(&self) -> String {
        self.to_string()
    }
}
