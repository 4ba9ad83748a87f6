// SPDX-License-Identifier: MPL-2.0
//! Risk prediction and the specialist search.

use super::{Effect, PredictionMessage, Session};
use crate::application::port::{Coordinates, LocationError, ServiceError};
use crate::domain::risk::PredictionResult;
use crate::domain::ui::RequestId;
use crate::ui::result::{Assessment, Hospital};
use crate::ui::status::{Region, StatusMessage};

impl Session {
    pub(super) fn handle_prediction(&mut self, message: PredictionMessage) -> Effect {
        match message {
            PredictionMessage::Submit => self.submit_prediction(),
            PredictionMessage::Finished { request, result } => self.prediction_finished(request, result),
            PredictionMessage::Located { request, result } => {
                self.located(request, result);
                Effect::None
            }
            PredictionMessage::OpenHospitalLink => match &self.hospital {
                Some(hospital) => {
                    tracing::info!(link = hospital.link(), "opening specialist search");
                    Effect::OpenUrl(hospital.link().to_string())
                }
                None => Effect::None,
            },
        }
    }

    /// "Analyse Risk".
    fn submit_prediction(&mut self) -> Effect {
        if self.prediction.is_some() {
            return Effect::None;
        }
        if let Err(issues) = self.form.validate() {
            tracing::debug!(count = issues.len(), "form incomplete");
            self.form_issues = issues;
            self.status
                .show(Region::Result, StatusMessage::error("status-fill-required"));
            return Effect::None;
        }

        self.form_issues.clear();
        self.assessment = None;
        self.hospital = None;
        self.status
            .show(Region::Result, StatusMessage::loading("status-analysing"));

        let request = self.issue_request();
        self.prediction = Some(request);
        tracing::info!(%request, "prediction requested");
        Effect::Predict {
            form: self.form.clone(),
            request,
        }
    }

    fn prediction_finished(
        &mut self,
        request: RequestId,
        result: Result<PredictionResult, ServiceError>,
    ) -> Effect {
        if self.prediction != Some(request) {
            tracing::debug!(%request, "stale prediction ignored");
            return Effect::None;
        }
        self.prediction = None;

        match result {
            Ok(result) => {
                let assessment = Assessment::new(result);
                tracing::info!(
                    probability = result.probability,
                    tier = %assessment.tier(),
                    "prediction received"
                );
                self.status.clear(Region::Result);
                self.assessment = Some(assessment);
                self.offer_specialist(result)
            }
            Err(err) => {
                tracing::warn!(error = %err, "prediction failed");
                self.status.show(
                    Region::Result,
                    StatusMessage::from_service_error(&err, "status-reason", "status-prediction-failed"),
                );
                Effect::None
            }
        }
    }

    /// Shows the specialist search for high probabilities and starts an
    /// optional location lookup to anchor it.
    fn offer_specialist(&mut self, result: PredictionResult) -> Effect {
        if !result.needs_specialist() {
            self.hospital = None;
            return Effect::None;
        }

        let link = self.hospital_links.default_link().to_string();
        if !self.capabilities.location {
            self.hospital = Some(Hospital::new(link, None));
            return Effect::None;
        }
        let request = self.issue_request();
        self.hospital = Some(Hospital::new(link, Some(request)));
        Effect::Locate { request }
    }

    fn located(&mut self, request: RequestId, result: Result<Coordinates, LocationError>) {
        let Some(hospital) = &mut self.hospital else {
            return;
        };
        let position = match result {
            Ok(coords) => Some(coords),
            Err(err) => {
                tracing::info!(error = %err, "location unavailable; generic search kept");
                None
            }
        };
        let link = position.map(|coords| self.hospital_links.resolve(Some(coords)));
        if !hospital.located(request, link) {
            tracing::debug!(%request, "stale location ignored");
        }
    }
}
