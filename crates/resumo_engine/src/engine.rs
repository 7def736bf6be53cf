use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use resumo_logging::{resumo_debug, resumo_error, resumo_trace, resumo_warn};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::client::build_client;
use crate::{
    EngineEvent, ReqwestUploader, SubmissionId, SummaryPageLoader, UploadFile, UploadSettings,
    Uploader,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not build http client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("could not start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

enum EngineCommand {
    Upload {
        submission: SubmissionId,
        file: UploadFile,
    },
    Cancel {
        submission: SubmissionId,
    },
    LoadSummary {
        url: String,
    },
}

type InFlight = Arc<Mutex<HashMap<SubmissionId, CancellationToken>>>;

/// Runs uploads and page loads on a background runtime.
///
/// Uploads are independent tasks: nothing orders or deduplicates them, and
/// each one can be cancelled by its submission id.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: UploadSettings) -> Result<Self, EngineError> {
        let client = build_client(settings.connect_timeout)?;
        let loader = SummaryPageLoader::new(client.clone(), settings.base_url.clone());
        let uploader = Arc::new(ReqwestUploader::with_client(client, settings));
        Self::with_parts(uploader, loader)
    }

    pub fn with_parts(
        uploader: Arc<dyn Uploader>,
        loader: SummaryPageLoader,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Upload { submission, file } => {
                        let token = CancellationToken::new();
                        lock(&in_flight).insert(submission, token.clone());
                        runtime.spawn(run_upload(
                            uploader.clone(),
                            submission,
                            file,
                            token,
                            in_flight.clone(),
                            event_tx.clone(),
                        ));
                    }
                    EngineCommand::Cancel { submission } => {
                        match lock(&in_flight).remove(&submission) {
                            Some(token) => token.cancel(),
                            None => resumo_debug!("No upload in flight for {}", submission),
                        }
                    }
                    EngineCommand::LoadSummary { url } => {
                        let loader = loader.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = loader.load(&url).await;
                            if let Err(err) = &result {
                                resumo_error!("Summary page {} failed: {}", url, err);
                            }
                            let _ = event_tx.send(EngineEvent::SummaryLoaded { url, result });
                        });
                    }
                }
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn upload(&self, submission: SubmissionId, file: UploadFile) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Upload { submission, file });
    }

    pub fn cancel(&self, submission: SubmissionId) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel { submission });
    }

    pub fn load_summary(&self, url: impl Into<String>) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::LoadSummary { url: url.into() });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_upload(
    uploader: Arc<dyn Uploader>,
    submission: SubmissionId,
    file: UploadFile,
    token: CancellationToken,
    in_flight: InFlight,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = tokio::select! {
        _ = token.cancelled() => {
            resumo_trace!("Upload {} cancelled before completion", submission);
            EngineEvent::UploadCancelled { submission }
        }
        result = uploader.upload(submission, file) => {
            if let Err(err) = &result {
                resumo_warn!("Upload {} failed: {}", submission, err);
            }
            EngineEvent::UploadCompleted { submission, result }
        }
    };
    lock(&in_flight).remove(&submission);
    let _ = event_tx.send(event);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
