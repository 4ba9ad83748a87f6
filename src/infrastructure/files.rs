// SPDX-License-Identifier: MPL-2.0
//! Loading report files from disk.

use crate::domain::report::{is_supported_extension, AcquiredFile, ReportSource, REPORT_EXTENSIONS};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Infers the MIME type from the file extension.
#[must_use]
pub fn mime_for_path(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// Returns `true` if the path has an accepted report extension.
#[must_use]
pub fn is_report_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_supported_extension)
}

/// Reads a report from disk.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFile`] for extensions outside the accepted
/// set, or [`Error::Io`] if the file cannot be read.
pub async fn load_report(path: PathBuf) -> Result<AcquiredFile> {
    if !is_report_path(&path) {
        return Err(Error::UnsupportedFile(path.display().to_string()));
    }

    let bytes = tokio::fs::read(&path).await?;
    let name = path
        .file_name()
        .map_or_else(|| "report".to_string(), |n| n.to_string_lossy().into_owned());
    let mime = mime_for_path(&path);

    tracing::info!(file = %name, %mime, size = bytes.len(), "report loaded");
    Ok(AcquiredFile::new(name, mime, bytes, ReportSource::Uploaded))
}

/// Opens the native file dialog filtered to report types.
pub async fn pick_report() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .add_filter("Reports", REPORT_EXTENSIONS)
        .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp"])
        .add_filter("PDF", &["pdf"])
        .pick_file()
        .await
        .map(|handle| handle.path().to_path_buf())
}

/// Opens a URL in the system browser.
///
/// # Errors
///
/// Returns [`Error::Io`] if the platform opener cannot be spawned.
pub fn open_in_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "linux")]
    let mut command = std::process::Command::new("xdg-open");
    #[cfg(target_os = "macos")]
    let mut command = std::process::Command::new("open");
    #[cfg(target_os = "windows")]
    let mut command = std::process::Command::new("explorer");
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    let mut command = std::process::Command::new("xdg-open");

    command.arg(url).spawn()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{ReportKind, PDF_MIME};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn mime_is_inferred_from_extension() {
        assert_eq!(mime_for_path(Path::new("scan.PDF")), PDF_MIME);
        assert_eq!(mime_for_path(Path::new("scan.jpg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("scan.webp")), "image/webp");
    }

    #[test]
    fn report_paths_filter_extensions() {
        assert!(is_report_path(Path::new("/tmp/lab.png")));
        assert!(!is_report_path(Path::new("/tmp/lab.docx")));
        assert!(!is_report_path(Path::new("/tmp/lab")));
    }

    #[tokio::test]
    async fn load_report_reads_bytes_and_tags_upload() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("report.pdf");
        let mut file = std::fs::File::create(&path).expect("create");
        file.write_all(b"%PDF-1.4").expect("write");

        let report = load_report(path).await.expect("load");
        assert_eq!(report.name(), "report.pdf");
        assert_eq!(report.kind(), ReportKind::Document);
        assert_eq!(report.source(), ReportSource::Uploaded);
        assert_eq!(report.bytes(), b"%PDF-1.4");
    }

    #[tokio::test]
    async fn load_report_rejects_unsupported_files() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").expect("write");
        assert!(matches!(load_report(path).await, Err(Error::UnsupportedFile(_))));
    }

    #[tokio::test]
    async fn load_report_missing_file_is_io_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("missing.png");
        assert!(matches!(load_report(path).await, Err(Error::Io(_))));
    }
}
