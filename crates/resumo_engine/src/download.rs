use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use resumo_logging::resumo_info;
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("invalid download filename {0:?}")]
    InvalidFilename(String),
    #[error("could not stage download: {0}")]
    Stage(#[from] std::io::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Delivers text content as a file in the download directory.
///
/// Each call stages the content in a temporary blob, hands the blob to the
/// download directory under the requested name and releases the blob
/// before returning.
#[derive(Debug, Clone)]
pub struct TextDownloader {
    writer: AtomicFileWriter,
    live_blobs: Arc<AtomicUsize>,
}

/// Temporary resource standing in for the content while a download is
/// delivered. Dropping it releases the resource.
struct Blob {
    file: NamedTempFile,
    live: Arc<AtomicUsize>,
}

impl Blob {
    fn create(content: &[u8], live: Arc<AtomicUsize>) -> Result<Self, DownloadError> {
        let mut file = NamedTempFile::new()?;
        file.write_all(content)?;
        file.flush()?;
        live.fetch_add(1, Ordering::SeqCst);
        Ok(Self { file, live })
    }

    fn read(&self) -> Result<Vec<u8>, DownloadError> {
        Ok(fs::read(self.file.path())?)
    }
}

impl Drop for Blob {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

impl TextDownloader {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(download_dir),
            live_blobs: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of staged blobs not yet released.
    pub fn live_blobs(&self) -> usize {
        self.live_blobs.load(Ordering::SeqCst)
    }

    pub fn download(
        &self,
        filename: &str,
        mime_type: &str,
        content: &str,
    ) -> Result<PathBuf, DownloadError> {
        validate_filename(filename)?;
        let blob = Blob::create(content.as_bytes(), self.live_blobs.clone())?;
        let delivered = blob
            .read()
            .and_then(|bytes| Ok(self.writer.write(filename, &bytes)?));
        drop(blob);

        let path = delivered?;
        resumo_info!(
            "Downloaded {} ({}, {} bytes) to {:?}",
            filename,
            mime_type,
            content.len(),
            path
        );
        Ok(path)
    }
}

fn validate_filename(filename: &str) -> Result<(), DownloadError> {
    let forbidden = |c: char| matches!(c, '\\' | '/' | ':' | '\0'..='\u{1F}');
    if filename.is_empty() || filename == "." || filename == ".." || filename.contains(forbidden)
    {
        return Err(DownloadError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
