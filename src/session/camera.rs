// SPDX-License-Identifier: MPL-2.0
//! Live camera capture.

use super::{CameraMessage, Effect, Session};
use crate::application::port::CameraError;
use crate::ui::capture::OpenOutcome;
use crate::ui::notifications::Notification;

impl Session {
    pub(super) fn handle_camera(&mut self, message: CameraMessage) -> Effect {
        match message {
            CameraMessage::Start => self.start_camera(),
            CameraMessage::Opened { attempt, result } => {
                match result {
                    Ok(stream) => match self.camera.opened(attempt, stream) {
                        OpenOutcome::Active => {
                            tracing::info!(%attempt, "camera opened");
                            self.notifications.clear_with_prefix("camera-error-");
                        }
                        OpenOutcome::Discarded => {
                            tracing::debug!(%attempt, "late camera stream released");
                        }
                    },
                    Err(err) => {
                        if self.camera.open_failed(attempt) {
                            tracing::warn!(%attempt, error = %err, "camera could not be opened");
                            self.show_alert(err.i18n_key());
                        }
                    }
                }
                Effect::None
            }
            CameraMessage::Capture => self.capture(),
            CameraMessage::Captured { generation, result } => {
                if generation != self.generation {
                    tracing::debug!(?generation, "stale capture dropped");
                    return Effect::None;
                }
                match result {
                    Ok(file) => self.show_report(file),
                    Err(err) => {
                        tracing::warn!(error = %err, "capture could not be encoded");
                        self.notify(Notification::error(err.i18n_key()));
                    }
                }
                Effect::None
            }
            CameraMessage::Close => {
                self.camera.stop();
                Effect::None
            }
        }
    }

    /// Discards the current report, then asks for the camera.
    fn start_camera(&mut self) -> Effect {
        if !self.capabilities.camera {
            self.show_alert(CameraError::Unavailable.i18n_key());
            return Effect::None;
        }
        if self.camera.is_active() || self.camera.is_opening() {
            return Effect::None;
        }

        self.remove_file();
        let attempt = self.issue_request();
        self.camera.begin_opening(attempt);
        tracing::info!(%attempt, "camera requested");
        Effect::OpenCamera { attempt }
    }

    /// Snapshots the current frame and releases the camera.
    fn capture(&mut self) -> Effect {
        let Some(frame) = self.camera.snapshot() else {
            self.notify(Notification::warning("camera-no-frame"));
            return Effect::None;
        };
        self.camera.stop();
        self.discard_report();
        Effect::EncodeCapture {
            frame,
            generation: self.generation,
        }
    }
}
