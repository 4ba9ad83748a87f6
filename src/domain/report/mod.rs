// SPDX-License-Identifier: MPL-2.0
//! Report files acquired from disk or from the camera.
//!
//! An [`AcquiredFile`] is the single source of truth for "the current report".
//! Payload bytes are reference-counted so the file can be handed to the
//! extraction collaborator without copying while the preview keeps showing it.

use bytes::Bytes;
use std::fmt;

/// MIME type reported for PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type of still frames captured from the camera.
pub const CAPTURE_MIME: &str = "image/jpeg";

/// File name given to camera captures when they are uploaded.
pub const CAPTURE_FILE_NAME: &str = "capture.jpg";

/// Extensions accepted by the file picker and drag-and-drop.
pub const REPORT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "pdf"];

/// Where the active report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSource {
    /// Picked in the file dialog or dropped on the window.
    Uploaded,
    /// Snapshot of the live camera stream.
    Captured,
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::Uploaded => write!(f, "uploaded"),
            ReportSource::Captured => write!(f, "captured"),
        }
    }
}

/// How a report is rendered in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Paged document shown in the document viewer.
    Document,
    /// Raster image shown inline.
    Image,
}

impl ReportKind {
    /// Selects the rendering mode from a MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        if mime.eq_ignore_ascii_case(PDF_MIME) {
            ReportKind::Document
        } else {
            ReportKind::Image
        }
    }
}

/// A report file ready to be previewed and sent for extraction.
#[derive(Clone, PartialEq, Eq)]
pub struct AcquiredFile {
    name: String,
    mime: String,
    bytes: Bytes,
    source: ReportSource,
}

impl AcquiredFile {
    /// Creates a file from its parts.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: Vec<u8>,
        source: ReportSource,
    ) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: Bytes::from(bytes),
            source,
        }
    }

    /// Wraps an encoded camera frame.
    #[must_use]
    pub fn captured_jpeg(bytes: Vec<u8>) -> Self {
        Self::new(CAPTURE_FILE_NAME, CAPTURE_MIME, bytes, ReportSource::Captured)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn mime(&self) -> &str {
        &self.mime
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns a cheap shared handle to the payload.
    #[must_use]
    pub fn shared_bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    #[must_use]
    pub fn source(&self) -> ReportSource {
        self.source
    }

    #[must_use]
    pub fn kind(&self) -> ReportKind {
        ReportKind::from_mime(&self.mime)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// Payloads can be megabytes; keep debug output readable.
impl fmt::Debug for AcquiredFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcquiredFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .field("source", &self.source)
            .finish()
    }
}

/// Returns `true` if the extension (without dot) is an accepted report type.
#[must_use]
pub fn is_supported_extension(ext: &str) -> bool {
    REPORT_EXTENSIONS
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_mime_selects_document_viewer() {
        assert_eq!(ReportKind::from_mime("application/pdf"), ReportKind::Document);
        assert_eq!(ReportKind::from_mime("APPLICATION/PDF"), ReportKind::Document);
    }

    #[test]
    fn other_mimes_render_inline() {
        assert_eq!(ReportKind::from_mime("image/png"), ReportKind::Image);
        assert_eq!(ReportKind::from_mime("image/jpeg"), ReportKind::Image);
        assert_eq!(ReportKind::from_mime(""), ReportKind::Image);
    }

    #[test]
    fn captured_jpeg_is_tagged_captured() {
        let file = AcquiredFile::captured_jpeg(vec![0xFF, 0xD8]);
        assert_eq!(file.source(), ReportSource::Captured);
        assert_eq!(file.mime(), CAPTURE_MIME);
        assert_eq!(file.name(), CAPTURE_FILE_NAME);
        assert_eq!(file.kind(), ReportKind::Image);
    }

    #[test]
    fn debug_output_omits_payload() {
        let file = AcquiredFile::new("r.pdf", PDF_MIME, vec![1; 4096], ReportSource::Uploaded);
        let debug = format!("{file:?}");
        assert!(debug.contains("len: 4096"));
        assert!(debug.len() < 200);
    }

    #[test]
    fn supported_extensions_are_case_insensitive() {
        assert!(is_supported_extension("PDF"));
        assert!(is_supported_extension("jpeg"));
        assert!(!is_supported_extension("docx"));
    }

    #[test]
    fn shared_bytes_point_at_the_same_payload() {
        let file = AcquiredFile::new("scan.png", "image/png", vec![1, 2, 3], ReportSource::Uploaded);
        let shared = file.shared_bytes();
        assert_eq!(shared.as_ptr(), file.bytes().as_ptr());
        assert_eq!(shared.len(), file.len());
    }
}
