use std::fs;

use resumo_engine::{DownloadError, TextDownloader};
use tempfile::TempDir;

#[test]
fn writes_named_file_with_content() {
    let temp = TempDir::new().unwrap();
    let downloader = TextDownloader::new(temp.path().join("downloads"));

    let path = downloader
        .download("resumo.txt", "text/plain;charset=utf-8", "Resumo: ação e reação.")
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "resumo.txt");
    assert_eq!(fs::read_to_string(&path).unwrap(), "Resumo: ação e reação.");
    assert_eq!(downloader.live_blobs(), 0);
}

#[test]
fn repeated_downloads_release_blobs_and_replace_file() {
    let temp = TempDir::new().unwrap();
    let downloader = TextDownloader::new(temp.path().to_path_buf());

    for round in 0..5 {
        let content = format!("version {round}");
        let path = downloader
            .download("resumo.txt", "text/plain;charset=utf-8", &content)
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
        assert_eq!(downloader.live_blobs(), 0);
    }

    let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn blob_is_released_when_delivery_fails() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("file");
    fs::write(&not_a_dir, "x").unwrap();
    let downloader = TextDownloader::new(not_a_dir);

    let result = downloader.download("resumo.txt", "text/plain", "content");

    assert!(matches!(result, Err(DownloadError::Persist(_))));
    assert_eq!(downloader.live_blobs(), 0);
}

#[test]
fn rejects_path_like_names() {
    let temp = TempDir::new().unwrap();
    let downloader = TextDownloader::new(temp.path().to_path_buf());

    for name in ["", "..", "../resumo.txt", "a/b.txt", "c:\\x.txt"] {
        assert!(matches!(
            downloader.download(name, "text/plain", "x"),
            Err(DownloadError::InvalidFilename(_))
        ));
    }
}
