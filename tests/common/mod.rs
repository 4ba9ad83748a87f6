// SPDX-License-Identifier: MPL-2.0
//! Scripted collaborators and an effect runner shared by the integration
//! tests.

#![allow(dead_code)]

use futures_util::future::{BoxFuture, FutureExt};
use heartshield::app::Services;
use heartshield::application::port::{
    Coordinates, FeedbackEntry, FeedbackSink, LocationError, LocationProvider, ReportExtractor,
    RiskPredictor, ServiceError,
};
use heartshield::domain::report::AcquiredFile;
use heartshield::domain::risk::{ExtractedData, FormState, PredictionResult};
use heartshield::session::{Message, Session};
use std::sync::{Arc, Mutex};

/// Collaborators whose answers the test sets up front.
#[derive(Default)]
pub struct Scripted {
    pub extraction: Mutex<Option<Result<ExtractedData, ServiceError>>>,
    pub probability: Mutex<Option<f64>>,
    pub extracted_files: Mutex<Vec<String>>,
    pub predicted_forms: Mutex<Vec<FormState>>,
    pub feedback: Mutex<Vec<FeedbackEntry>>,
}

impl Scripted {
    pub fn extracting(self, data: ExtractedData) -> Self {
        *self.extraction.lock().expect("lock") = Some(Ok(data));
        self
    }

    pub fn predicting(self, probability: f64) -> Self {
        self.set_probability(probability);
        self
    }

    pub fn set_probability(&self, probability: f64) {
        *self.probability.lock().expect("lock") = Some(probability);
    }
}

impl ReportExtractor for Scripted {
    fn extract(&self, file: &AcquiredFile) -> BoxFuture<'static, Result<ExtractedData, ServiceError>> {
        self.extracted_files
            .lock()
            .expect("lock")
            .push(file.name().to_string());
        let result = self
            .extraction
            .lock()
            .expect("lock")
            .clone()
            .unwrap_or_else(|| Err(ServiceError::Transport("not scripted".into())));
        async move { result }.boxed()
    }
}

impl RiskPredictor for Scripted {
    fn predict(&self, form: &FormState) -> BoxFuture<'static, Result<PredictionResult, ServiceError>> {
        self.predicted_forms.lock().expect("lock").push(form.clone());
        let result = match *self.probability.lock().expect("lock") {
            Some(probability) => Ok(PredictionResult::new(probability)),
            None => Err(ServiceError::Rejected {
                status: Some(400),
                reason: Some("Missing age. Please fill all fields.".into()),
            }),
        };
        async move { result }.boxed()
    }
}

impl FeedbackSink for Scripted {
    fn submit(&self, entry: &FeedbackEntry) -> BoxFuture<'static, Result<(), ServiceError>> {
        self.feedback.lock().expect("lock").push(entry.clone());
        async { Ok(()) }.boxed()
    }
}

pub struct FixedPosition(pub Coordinates);

impl LocationProvider for FixedPosition {
    fn locate(&self) -> BoxFuture<'static, Result<Coordinates, LocationError>> {
        let position = self.0;
        async move { Ok(position) }.boxed()
    }
}

pub fn services(scripted: Arc<Scripted>) -> Services {
    Services {
        extractor: scripted.clone(),
        predictor: scripted.clone(),
        feedback: scripted,
        camera: None,
        location: None,
    }
}

/// Feeds `message` to the session and runs every resulting effect until the
/// session settles.
pub async fn drive(session: &mut Session, services: &Services, message: impl Into<Message>) {
    let mut queue = vec![message.into()];
    while let Some(message) = queue.pop() {
        if let Some(future) = session.update(message).into_future(services) {
            queue.push(future.await);
        }
    }
}
