//! Resumo engine: upload IO and effect execution.
mod client;
mod download;
mod engine;
mod persist;
mod summary_page;
mod types;
mod upload;

pub use client::build_client;
pub use download::{DownloadError, TextDownloader};
pub use engine::{EngineError, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use summary_page::{extract_summary_text, SummaryError, SummaryPageLoader, SUMMARY_SELECTOR};
pub use types::{EngineEvent, ServerResponse, SubmissionId, UploadError, UploadFile};
pub use upload::{interpret_response, ReqwestUploader, UploadSettings, Uploader};
