use crate::{SelectedFile, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the file to the upload endpoint.
    Upload {
        submission: SubmissionId,
        file: SelectedFile,
    },
    /// Replace the current location.
    Navigate { url: String },
    /// Go back to the referring page.
    HistoryBack,
    CopyToClipboard { text: String },
    /// Offer `content` as a client-side download.
    DownloadText {
        filename: String,
        mime_type: String,
        content: String,
    },
}
