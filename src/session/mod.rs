// SPDX-License-Identifier: MPL-2.0
//! Application session: every piece of UI state and the rules that move it.
//!
//! [`Session::update`] is synchronous. Work that has to wait (dialogs, file
//! reads, requests, camera and location access) is returned as an
//! [`Effect`]; its result comes back later as another [`Message`].
//!
//! Handlers are grouped by workflow:
//!
//! - `upload`: file acquisition, extraction, remove and clear
//! - `camera`: live capture
//! - `prediction`: form validation, prediction, specialist search
//! - `feedback`: feedback submission
//!
//! # Late completions
//!
//! Requests cannot be cancelled. Each completion carries the [`RequestId`]
//! it was issued with, and acquisitions carry the [`Generation`] of the
//! report they belong to. A completion that no longer matches still runs its
//! finalization (overlay hidden, buttons re-enabled) but never overwrites
//! newer state.

mod camera;
mod effect;
mod feedback;
mod message;
mod prediction;
mod upload;

pub use effect::Effect;
pub use message::{
    CameraMessage, FeedbackMessage, FormMessage, Message, PredictionMessage, UploadMessage,
};

use crate::app::services::Capabilities;
use crate::application::hospital::HospitalLinks;
use crate::domain::report::AcquiredFile;
use crate::domain::risk::{FieldIssue, FormState, UserProfile};
use crate::domain::ui::{Generation, RequestId};
use crate::ui::alert::Alert;
use crate::ui::notifications::{self, Notification};
use crate::ui::result::{Assessment, Hospital};
use crate::ui::status::{LoadingOverlay, StatusBoard};
use crate::ui::{capture, feedback as feedback_form, preview};
use std::time::Instant;

#[derive(Debug)]
pub struct Session {
    capabilities: Capabilities,
    profile: Option<UserProfile>,
    hospital_links: HospitalLinks,

    last_request: RequestId,
    generation: Generation,

    report: Option<AcquiredFile>,
    preview: Option<preview::State>,
    camera: capture::State,
    /// Extraction in flight.
    extraction: Option<RequestId>,

    form: FormState,
    form_issues: Vec<FieldIssue>,
    /// Prediction in flight.
    prediction: Option<RequestId>,
    assessment: Option<Assessment>,
    hospital: Option<Hospital>,

    feedback: feedback_form::State,

    status: StatusBoard,
    overlay: LoadingOverlay,
    alert: Option<Alert>,
    notifications: notifications::Manager,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Capabilities::default(), None, HospitalLinks::default())
    }
}

impl Session {
    #[must_use]
    pub fn new(
        capabilities: Capabilities,
        profile: Option<UserProfile>,
        hospital_links: HospitalLinks,
    ) -> Self {
        Self {
            capabilities,
            profile,
            hospital_links,
            last_request: RequestId::default(),
            generation: Generation::default(),
            report: None,
            preview: None,
            camera: capture::State::default(),
            extraction: None,
            form: FormState::new(),
            form_issues: Vec::new(),
            prediction: None,
            assessment: None,
            hospital: None,
            feedback: feedback_form::State::default(),
            status: StatusBoard::default(),
            overlay: LoadingOverlay::default(),
            alert: None,
            notifications: notifications::Manager::new(),
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::Upload(message) => self.handle_upload(message),
            Message::Camera(message) => self.handle_camera(message),
            Message::Preview(message) => {
                if let Some(preview) = &mut self.preview {
                    preview.handle(message);
                }
                Effect::None
            }
            Message::Form(FormMessage::FieldChanged(field, value)) => {
                self.form.set(field, value);
                self.form_issues.retain(|issue| issue.field != field);
                Effect::None
            }
            Message::Prediction(message) => self.handle_prediction(message),
            Message::Feedback(message) => self.handle_feedback(message),
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Effect::None
            }
            Message::DismissAlert => {
                self.alert = None;
                Effect::None
            }
            Message::Tick(now) => {
                self.tick(now);
                Effect::None
            }
            Message::UrlOpened(result) => {
                if let Err(err) = result {
                    tracing::warn!(error = %err, "could not open link");
                    self.notify(Notification::warning("notification-open-link-error"));
                }
                Effect::None
            }
        }
    }

    fn tick(&mut self, now: Instant) {
        self.overlay.tick(now);
        self.notifications.tick(now);
        if !self.camera.refresh() {
            tracing::warn!("camera stream ended unexpectedly");
            self.camera.stop();
            self.notify(Notification::error("camera-error-stream-ended"));
        }
    }

    /// Whether the UI needs periodic ticks right now.
    #[must_use]
    pub fn needs_tick(&self) -> bool {
        self.overlay.is_visible()
            || self.camera.is_active()
            || self.notifications.visible_count() > 0
    }

    /// Shows a toast.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn show_alert(&mut self, message_key: &str) {
        tracing::debug!(key = message_key, "blocking alert");
        self.alert = Some(Alert::new(message_key));
    }

    fn issue_request(&mut self) -> RequestId {
        self.last_request = self.last_request.next();
        self.last_request
    }

    /// Drops the active report and its preview; anything still computed
    /// against it becomes stale.
    fn discard_report(&mut self) {
        self.generation = self.generation.next();
        if let Some(file) = self.report.take() {
            tracing::debug!(file = file.name(), "report discarded");
        }
        self.preview = None;
    }

    fn show_report(&mut self, file: AcquiredFile) {
        tracing::info!(file = file.name(), source = %file.source(), "report ready");
        self.preview = Some(preview::State::show(&file));
        self.report = Some(file);
    }

    // =========================================================================
    // Read access for views and tests
    // =========================================================================

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[must_use]
    pub fn report(&self) -> Option<&AcquiredFile> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&preview::State> {
        self.preview.as_ref()
    }

    #[must_use]
    pub fn is_preview_visible(&self) -> bool {
        self.preview.is_some()
    }

    #[must_use]
    pub fn camera(&self) -> &capture::State {
        &self.camera
    }

    #[must_use]
    pub fn is_camera_active(&self) -> bool {
        self.camera.is_active()
    }

    /// Whether "Upload & Extract" can be pressed.
    #[must_use]
    pub fn can_submit_report(&self) -> bool {
        self.extraction.is_none()
    }

    #[must_use]
    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[must_use]
    pub fn form_issues(&self) -> &[FieldIssue] {
        &self.form_issues
    }

    #[must_use]
    pub fn is_analysing(&self) -> bool {
        self.prediction.is_some()
    }

    #[must_use]
    pub fn assessment(&self) -> Option<&Assessment> {
        self.assessment.as_ref()
    }

    #[must_use]
    pub fn hospital(&self) -> Option<&Hospital> {
        self.hospital.as_ref()
    }

    #[must_use]
    pub fn is_hospital_visible(&self) -> bool {
        self.hospital.is_some()
    }

    #[must_use]
    pub fn feedback(&self) -> &feedback_form::State {
        &self.feedback
    }

    #[must_use]
    pub fn status(&self) -> &StatusBoard {
        &self.status
    }

    #[must_use]
    pub fn overlay(&self) -> &LoadingOverlay {
        &self.overlay
    }

    #[must_use]
    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    #[must_use]
    pub fn notifications(&self) -> &notifications::Manager {
        &self.notifications
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }
}
