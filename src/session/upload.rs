// SPDX-License-Identifier: MPL-2.0
//! Report acquisition from disk, extraction and smart fill.

use super::{Effect, Session, UploadMessage};
use crate::application::port::ServiceError;
use crate::application::smart_fill;
use crate::domain::report::AcquiredFile;
use crate::domain::risk::ExtractedData;
use crate::domain::ui::{Generation, RequestId};
use crate::error::Error;
use crate::infrastructure::files;
use crate::ui::notifications::Notification;
use crate::ui::status::{Region, StatusMessage};
use std::path::PathBuf;
use std::time::Instant;

impl Session {
    pub(super) fn handle_upload(&mut self, message: UploadMessage) -> Effect {
        match message {
            UploadMessage::PickFile => Effect::PickFile,
            UploadMessage::FilePicked(None) => Effect::None,
            UploadMessage::FilePicked(Some(path)) | UploadMessage::FileDropped(path) => {
                self.begin_load(path)
            }
            UploadMessage::FileLoaded { generation, result } => {
                self.file_loaded(generation, result);
                Effect::None
            }
            UploadMessage::Submit => self.submit_report(),
            UploadMessage::ExtractionFinished {
                request,
                generation,
                result,
            } => {
                self.extraction_finished(request, generation, result);
                Effect::None
            }
            UploadMessage::RemoveFile => {
                self.remove_file();
                Effect::None
            }
            UploadMessage::ClearAll => {
                self.clear_all();
                Effect::None
            }
        }
    }

    /// Starts reading a selected or dropped file. The camera closes and the
    /// previous report is released right away.
    fn begin_load(&mut self, path: PathBuf) -> Effect {
        if !files::is_report_path(&path) {
            tracing::info!(path = %path.display(), "unsupported file ignored");
            let name = path
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            self.notify(Notification::warning("notification-file-unsupported").with_arg("file", name));
            return Effect::None;
        }

        self.camera.stop();
        self.discard_report();
        Effect::LoadFile {
            path,
            generation: self.generation,
        }
    }

    fn file_loaded(&mut self, generation: Generation, result: Result<AcquiredFile, Error>) {
        if generation != self.generation {
            tracing::debug!(?generation, current = ?self.generation, "stale file load dropped");
            return;
        }
        match result {
            Ok(file) => self.show_report(file),
            Err(err) => {
                tracing::warn!(error = %err, "report could not be loaded");
                self.notify(Notification::error(err.i18n_key()));
            }
        }
    }

    /// "Upload & Extract".
    fn submit_report(&mut self) -> Effect {
        let Some(file) = self.report.clone() else {
            self.show_alert("alert-no-file");
            return Effect::None;
        };
        if self.extraction.is_some() {
            return Effect::None;
        }

        self.assessment = None;
        self.hospital = None;
        self.prediction = None;
        self.status.clear(Region::Result);
        self.overlay.show(Instant::now());

        let request = self.issue_request();
        self.extraction = Some(request);
        tracing::info!(%request, file = file.name(), size = file.len(), "extraction requested");
        Effect::Extract {
            file,
            request,
            generation: self.generation,
        }
    }

    fn extraction_finished(
        &mut self,
        request: RequestId,
        generation: Generation,
        result: Result<ExtractedData, ServiceError>,
    ) {
        if self.extraction != Some(request) {
            tracing::debug!(%request, "unexpected extraction completion ignored");
            return;
        }
        self.extraction = None;
        self.overlay.hide();

        if generation != self.generation {
            tracing::info!(%request, "extraction for a replaced report dropped");
            return;
        }

        match result {
            Ok(extracted) => {
                tracing::info!(%request, fields = extracted.len(), "extraction finished");
                self.form = smart_fill::merge(&extracted, self.profile.as_ref());
                self.form_issues.clear();
                self.status
                    .show(Region::Upload, StatusMessage::success("status-extracted"));
            }
            Err(err) => {
                tracing::warn!(%request, error = %err, "extraction failed");
                self.status.show(
                    Region::Upload,
                    StatusMessage::from_service_error(
                        &err,
                        "status-error-reason",
                        "status-extraction-failed",
                    ),
                );
            }
        }
    }

    /// Drops the report, closes the camera and hides every result.
    pub(super) fn remove_file(&mut self) {
        self.discard_report();
        self.status.clear(Region::Upload);
        self.camera.stop();
        self.assessment = None;
        self.hospital = None;
        self.prediction = None;
        self.status.clear(Region::Result);
    }

    fn clear_all(&mut self) {
        self.form.clear();
        self.form_issues.clear();
        self.remove_file();
    }
}

#[cfg(test)]
mod tests {
    use crate::application::port::ServiceError;
    use crate::domain::report::{AcquiredFile, ReportSource, PDF_MIME};
    use crate::domain::risk::{ExtractedData, FieldName};
    use crate::session::{Effect, Message, Session, UploadMessage};
    use crate::ui::status::{Region, StatusKind};
    use std::path::PathBuf;

    fn pdf() -> AcquiredFile {
        AcquiredFile::new("report.pdf", PDF_MIME, b"%PDF-1.4".to_vec(), ReportSource::Uploaded)
    }

    fn load(session: &mut Session, file: AcquiredFile) {
        let effect = session.update(Message::Upload(UploadMessage::FilePicked(Some(
            PathBuf::from("report.pdf"),
        ))));
        let Effect::LoadFile { generation, .. } = effect else {
            panic!("expected LoadFile, got {effect:?}");
        };
        let _ = session.update(Message::Upload(UploadMessage::FileLoaded {
            generation,
            result: Ok(file),
        }));
    }

    fn submit(session: &mut Session) -> (crate::domain::ui::RequestId, crate::domain::ui::Generation) {
        match session.update(Message::Upload(UploadMessage::Submit)) {
            Effect::Extract {
                request, generation, ..
            } => (request, generation),
            other => panic!("expected Extract, got {other:?}"),
        }
    }

    #[test]
    fn submit_without_file_alerts_and_sends_nothing() {
        let mut session = Session::default();
        let effect = session.update(Message::Upload(UploadMessage::Submit));
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.alert().map(|a| a.message_key()), Some("alert-no-file"));
        assert!(!session.overlay().is_visible());
    }

    #[test]
    fn loaded_file_is_previewed() {
        let mut session = Session::default();
        load(&mut session, pdf());
        assert_eq!(session.report().map(AcquiredFile::name), Some("report.pdf"));
        assert!(session.is_preview_visible());
    }

    #[test]
    fn unsupported_drop_is_rejected() {
        let mut session = Session::default();
        let effect = session.update(Message::Upload(UploadMessage::FileDropped(PathBuf::from(
            "notes.docx",
        ))));
        assert!(matches!(effect, Effect::None));
        assert_eq!(session.notifications().visible_count(), 1);
    }

    #[test]
    fn submit_shows_overlay_and_disables_button() {
        let mut session = Session::default();
        load(&mut session, pdf());
        let _ = submit(&mut session);
        assert!(session.overlay().is_visible());
        assert!(!session.can_submit_report());

        assert!(matches!(
            session.update(Message::Upload(UploadMessage::Submit)),
            Effect::None
        ));
    }

    #[test]
    fn extraction_success_fills_form() {
        let mut session = Session::default();
        load(&mut session, pdf());
        let (request, generation) = submit(&mut session);

        let data = ExtractedData::new()
            .with(FieldName::Age, "45")
            .with(FieldName::Gender, "F");
        let _ = session.update(Message::Upload(UploadMessage::ExtractionFinished {
            request,
            generation,
            result: Ok(data),
        }));

        assert!(!session.overlay().is_visible());
        assert!(session.can_submit_report());
        assert_eq!(session.form().get(FieldName::Age), "45");
        assert_eq!(session.form().get(FieldName::Gender), "female");
        let status = session.status().get(Region::Upload).expect("upload status");
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.key, "status-extracted");
    }

    #[test]
    fn extraction_failure_reports_reason_and_finalizes() {
        let mut session = Session::default();
        load(&mut session, pdf());
        let (request, generation) = submit(&mut session);

        let _ = session.update(Message::Upload(UploadMessage::ExtractionFinished {
            request,
            generation,
            result: Err(ServiceError::Rejected {
                status: Some(400),
                reason: Some("OCR Failed".into()),
            }),
        }));

        assert!(!session.overlay().is_visible());
        assert!(session.can_submit_report());
        let status = session.status().get(Region::Upload).expect("upload status");
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.key, "status-error-reason");
    }

    #[test]
    fn extraction_for_replaced_report_does_not_fill_form() {
        let mut session = Session::default();
        load(&mut session, pdf());
        let (request, generation) = submit(&mut session);

        let _ = session.update(Message::Upload(UploadMessage::RemoveFile));
        let _ = session.update(Message::Upload(UploadMessage::ExtractionFinished {
            request,
            generation,
            result: Ok(ExtractedData::new().with(FieldName::Age, "45")),
        }));

        assert!(!session.overlay().is_visible());
        assert!(session.can_submit_report());
        assert!(session.form().is_blank());
        assert!(session.status().get(Region::Upload).is_none());
    }

    #[test]
    fn stale_file_load_is_dropped() {
        let mut session = Session::default();
        let first = session.update(Message::Upload(UploadMessage::FileDropped(PathBuf::from(
            "a.png",
        ))));
        let _second = session.update(Message::Upload(UploadMessage::FileDropped(PathBuf::from(
            "b.png",
        ))));
        let Effect::LoadFile { generation, .. } = first else {
            panic!("expected LoadFile");
        };
        let _ = session.update(Message::Upload(UploadMessage::FileLoaded {
            generation,
            result: Ok(pdf()),
        }));
        assert!(session.report().is_none());
    }

    #[test]
    fn clear_all_resets_form_and_file() {
        let mut session = Session::default();
        load(&mut session, pdf());
        let _ = session.update(Message::Form(crate::session::FormMessage::FieldChanged(
            FieldName::Age,
            "60".into(),
        )));

        let _ = session.update(Message::Upload(UploadMessage::ClearAll));
        assert!(session.report().is_none());
        assert!(!session.is_preview_visible());
        assert!(session.form().is_blank());
    }

    #[test]
    fn remove_file_keeps_form() {
        let mut session = Session::default();
        load(&mut session, pdf());
        let _ = session.update(Message::Form(crate::session::FormMessage::FieldChanged(
            FieldName::Age,
            "60".into(),
        )));

        let _ = session.update(Message::Upload(UploadMessage::RemoveFile));
        assert!(session.report().is_none());
        assert_eq!(session.form().get(FieldName::Age), "60");
    }
}
