// SPDX-License-Identifier: MPL-2.0
//! Messages handled by the [`Session`](super::Session).
//!
//! User actions and async completions share one enum per workflow.
//! Completions echo the [`RequestId`] (and, for acquisitions, the
//! [`Generation`]) they were issued with so that stale ones can be recognized.

use crate::application::port::{
    CameraError, CameraStream, Coordinates, LocationError, ServiceError,
};
use crate::domain::report::AcquiredFile;
use crate::domain::risk::{ExtractedData, FieldName, PredictionResult};
use crate::domain::ui::{Generation, RequestId};
use crate::error::Error;
use crate::ui::notifications::NotificationMessage;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone)]
pub enum Message {
    Upload(UploadMessage),
    Camera(CameraMessage),
    Preview(crate::ui::preview::Message),
    Form(FormMessage),
    Prediction(PredictionMessage),
    Feedback(FeedbackMessage),
    Notification(NotificationMessage),
    DismissAlert,
    /// Periodic tick while something animates.
    Tick(Instant),
    /// Result of handing a link to the system browser.
    UrlOpened(Result<(), Error>),
}

#[derive(Debug, Clone)]
pub enum UploadMessage {
    /// "Choose file" pressed.
    PickFile,
    /// The dialog closed; `None` when cancelled.
    FilePicked(Option<PathBuf>),
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    FileLoaded {
        generation: Generation,
        result: Result<AcquiredFile, Error>,
    },
    /// "Upload & Extract" pressed.
    Submit,
    ExtractionFinished {
        request: RequestId,
        generation: Generation,
        result: Result<ExtractedData, ServiceError>,
    },
    RemoveFile,
    ClearAll,
}

#[derive(Debug, Clone)]
pub enum CameraMessage {
    Start,
    Opened {
        attempt: RequestId,
        result: Result<CameraStream, CameraError>,
    },
    Capture,
    Captured {
        generation: Generation,
        result: Result<AcquiredFile, Error>,
    },
    Close,
}

#[derive(Debug, Clone)]
pub enum FormMessage {
    FieldChanged(FieldName, String),
}

#[derive(Debug, Clone)]
pub enum PredictionMessage {
    /// "Analyse Risk" pressed.
    Submit,
    Finished {
        request: RequestId,
        result: Result<PredictionResult, ServiceError>,
    },
    Located {
        request: RequestId,
        result: Result<Coordinates, LocationError>,
    },
    OpenHospitalLink,
}

#[derive(Debug, Clone)]
pub enum FeedbackMessage {
    NameChanged(String),
    ReviewChanged(String),
    Submit,
    Finished {
        request: RequestId,
        result: Result<(), ServiceError>,
    },
}

impl From<UploadMessage> for Message {
    fn from(message: UploadMessage) -> Self {
        Message::Upload(message)
    }
}

impl From<CameraMessage> for Message {
    fn from(message: CameraMessage) -> Self {
        Message::Camera(message)
    }
}

impl From<FormMessage> for Message {
    fn from(message: FormMessage) -> Self {
        Message::Form(message)
    }
}

impl From<PredictionMessage> for Message {
    fn from(message: PredictionMessage) -> Self {
        Message::Prediction(message)
    }
}

impl From<FeedbackMessage> for Message {
    fn from(message: FeedbackMessage) -> Self {
        Message::Feedback(message)
    }
}
