//! Resumo core: pure upload-widget state machine, view-model helpers and
//! summary-page actions.
mod effect;
mod failure;
mod file;
mod msg;
mod page;
mod state;
mod summary;
mod update;
mod view_model;

pub use effect::Effect;
pub use failure::UploadFailure;
pub use file::{validate, SelectedFile, PDF_MIME_TYPE};
pub use msg::Msg;
pub use page::{MissingElement, PageElements};
pub use state::{
    AppState, Dropzone, Indicator, MessageLabel, SubmissionId, SubmissionStage, TextLabel, UiState,
};
pub use summary::{ResumoActions, SUMMARY_FILENAME, SUMMARY_MIME_TYPE};
pub use update::update;
pub use view_model::AppViewModel;

/// Drag-hint text of the neutral baseline.
pub const DRAG_HINT_IDLE: &str = "ARRASTE AQUI";
/// Drag-hint text after a failed upload.
pub const DRAG_HINT_FAILED: &str = "upload failed";
/// Message shown when the chosen file is not a PDF.
pub const INVALID_FORMAT_MESSAGE: &str = "Formato inválido";
/// Message shown when a successful response lacks a redirect.
pub const UNEXPECTED_RESPONSE_MESSAGE: &str = "unexpected server response.";
/// Message shown when the server rejects an upload without saying why.
pub const GENERIC_FAILURE_MESSAGE: &str = "error processing file";
/// Where the back control goes when there is no referring page.
pub const SITE_ROOT: &str = "/";
