use std::collections::HashMap;
use std::path::PathBuf;

use resumo_core::{Effect, Msg, SubmissionId, UploadFailure};
use resumo_engine::{EngineEvent, EngineHandle, TextDownloader, UploadError, UploadFile};
use resumo_logging::{resumo_debug, resumo_error, resumo_info, resumo_warn};

use super::clipboard::ClipboardSink;

/// Where the host should go after running effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(String),
    Back,
}

/// Result of an engine event, translated for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Msg(Msg),
    SummaryLoaded { url: String, text: String },
    SummaryFailed { url: String, reason: String },
}

/// Executes effects of the current page.
///
/// Submission ids restart with every page, so uploads get their own engine
/// ids. Results of uploads that belong to a page no longer shown are dropped.
pub struct EffectRunner {
    engine: EngineHandle,
    downloader: TextDownloader,
    clipboard: Box<dyn ClipboardSink>,
    next_upload: u64,
    live_uploads: HashMap<u64, SubmissionId>,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        download_dir: PathBuf,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            engine,
            downloader: TextDownloader::new(download_dir),
            clipboard,
            next_upload: 1,
            live_uploads: HashMap::new(),
        }
    }

    pub fn load_summary(&self, location: &str) {
        self.engine.load_summary(location);
    }

    pub fn uploads_in_flight(&self) -> usize {
        self.live_uploads.len()
    }

    /// The page is going away: abort its uploads.
    pub fn unload_page(&mut self) {
        for (upload, submission) in self.live_uploads.drain() {
            resumo_debug!("Aborting upload {} (submission {})", upload, submission);
            self.engine.cancel(upload);
        }
    }

    /// Runs side effects and returns the last navigation they asked for.
    pub fn run(&mut self, effects: Vec<Effect>) -> Option<Navigation> {
        let mut navigation = None;
        for effect in effects {
            match effect {
                Effect::Upload { submission, file } => {
                    let upload = self.next_upload;
                    self.next_upload += 1;
                    self.live_uploads.insert(upload, submission);
                    resumo_info!(
                        "Upload {} submission={} name={} type={:?} bytes={}",
                        upload,
                        submission,
                        file.name,
                        file.mime_type,
                        file.content.len()
                    );
                    self.engine.upload(
                        upload,
                        UploadFile {
                            name: file.name,
                            mime_type: file.mime_type,
                            bytes: file.content,
                        },
                    );
                }
                Effect::Navigate { url } => {
                    resumo_debug!("Navigate to {}", url);
                    navigation = Some(Navigation::To(url));
                }
                Effect::HistoryBack => {
                    navigation = Some(Navigation::Back);
                }
                Effect::CopyToClipboard { text } => {
                    // Not surfaced to the page.
                    if let Err(err) = self.clipboard.set_text(&text) {
                        resumo_warn!("Clipboard copy failed: {}", err);
                    }
                }
                Effect::DownloadText {
                    filename,
                    mime_type,
                    content,
                } => {
                    if let Err(err) = self.downloader.download(&filename, &mime_type, &content) {
                        resumo_error!("Download of {} failed: {}", filename, err);
                    }
                }
            }
        }
        navigation
    }

    pub fn poll(&mut self) -> Option<HostEvent> {
        loop {
            let event = self.engine.try_recv()?;
            if let Some(host_event) = self.translate(event) {
                return Some(host_event);
            }
        }
    }

    fn translate(&mut self, event: EngineEvent) -> Option<HostEvent> {
        match event {
            EngineEvent::UploadCompleted { submission: upload, result } => {
                let Some(submission) = self.live_uploads.remove(&upload) else {
                    resumo_debug!("Dropping result of unloaded upload {}", upload);
                    return None;
                };
                Some(HostEvent::Msg(Msg::UploadFinished {
                    submission,
                    outcome: result.map_err(map_failure),
                }))
            }
            EngineEvent::UploadCancelled { submission: upload } => {
                resumo_info!("Upload {} cancelled", upload);
                self.live_uploads.remove(&upload);
                None
            }
            EngineEvent::SummaryLoaded { url, result } => Some(match result {
                Ok(text) => HostEvent::SummaryLoaded { url, text },
                Err(err) => HostEvent::SummaryFailed {
                    url,
                    reason: err.to_string(),
                },
            }),
        }
    }
}

pub fn map_failure(err: UploadError) -> UploadFailure {
    match err {
        UploadError::ServerRejected { status, message } => {
            UploadFailure::ServerRejected { status, message }
        }
        UploadError::MalformedResponse { .. } => UploadFailure::MalformedResponse,
        other @ (UploadError::Network(_)
        | UploadError::Timeout(_)
        | UploadError::Request(_)
        | UploadError::Cancelled) => UploadFailure::NetworkFailure {
            detail: other.to_string(),
        },
    }
}
