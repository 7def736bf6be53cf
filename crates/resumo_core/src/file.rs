/// MIME type a browser declares for PDF documents.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A user-chosen file, alive for the duration of one submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared type; empty when the host could not tell.
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }
}

/// Accepts a file declared as PDF or named `*.pdf` (any case).
pub fn validate(file: Option<&SelectedFile>) -> bool {
    let Some(file) = file else {
        return false;
    };
    let by_type = file.mime_type == PDF_MIME_TYPE;
    let by_ext = file.name.to_lowercase().ends_with(".pdf");
    by_type || by_ext
}
