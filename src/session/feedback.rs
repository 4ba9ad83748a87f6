// SPDX-License-Identifier: MPL-2.0
//! Feedback submission.

use super::{Effect, FeedbackMessage, Session};
use crate::application::port::ServiceError;
use crate::domain::ui::RequestId;
use crate::ui::status::{Region, StatusMessage};

impl Session {
    pub(super) fn handle_feedback(&mut self, message: FeedbackMessage) -> Effect {
        match message {
            FeedbackMessage::NameChanged(name) => {
                self.feedback.name = name;
                Effect::None
            }
            FeedbackMessage::ReviewChanged(review) => {
                self.feedback.review = review;
                Effect::None
            }
            FeedbackMessage::Submit => self.submit_feedback(),
            FeedbackMessage::Finished { request, result } => {
                self.feedback_finished(request, result);
                Effect::None
            }
        }
    }

    fn submit_feedback(&mut self) -> Effect {
        if self.feedback.pending.is_some() {
            return Effect::None;
        }
        let Some(entry) = self.feedback.entry() else {
            self.status
                .show(Region::Feedback, StatusMessage::error("status-review-required"));
            return Effect::None;
        };

        self.status
            .show(Region::Feedback, StatusMessage::loading("status-submitting"));
        let request = self.issue_request();
        self.feedback.pending = Some(request);
        tracing::info!(%request, "feedback submitted");
        Effect::SubmitFeedback { entry, request }
    }

    fn feedback_finished(&mut self, request: RequestId, result: Result<(), ServiceError>) {
        if self.feedback.pending != Some(request) {
            tracing::debug!(%request, "stale feedback completion ignored");
            return;
        }
        self.feedback.pending = None;

        let status = match result {
            Ok(()) => {
                self.feedback.reset();
                StatusMessage::success("status-feedback-thanks")
            }
            Err(err) if err.is_transport() => {
                tracing::warn!(error = %err, "feedback not delivered");
                StatusMessage::error("status-network-error")
            }
            Err(err) => {
                tracing::warn!(error = %err, "feedback rejected");
                StatusMessage::error("status-feedback-failed")
            }
        };
        self.status.show(Region::Feedback, status);
    }
}
