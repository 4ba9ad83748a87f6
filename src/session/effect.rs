// SPDX-License-Identifier: MPL-2.0
//! Side effects requested by the session.
//!
//! [`Session::update`](super::Session::update) never awaits. Every suspension
//! point (dialogs, file reads, network calls, camera and location access)
//! is returned as an [`Effect`] and turned into futures that resolve to the
//! next [`Message`].

use super::message::{CameraMessage, FeedbackMessage, Message, PredictionMessage, UploadMessage};
use crate::app::services::Services;
use crate::application::port::{CameraError, CameraFrame, FeedbackEntry, LocationError};
use crate::domain::report::AcquiredFile;
use crate::domain::risk::FormState;
use crate::domain::ui::{Generation, RequestId};
use crate::error::Error;
use crate::infrastructure::{camera, files};
use futures_util::future::{BoxFuture, FutureExt};
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub enum Effect {
    #[default]
    None,
    PickFile,
    LoadFile {
        path: PathBuf,
        generation: Generation,
    },
    OpenCamera {
        attempt: RequestId,
    },
    EncodeCapture {
        frame: CameraFrame,
        generation: Generation,
    },
    Extract {
        file: AcquiredFile,
        request: RequestId,
        generation: Generation,
    },
    Predict {
        form: FormState,
        request: RequestId,
    },
    Locate {
        request: RequestId,
    },
    SubmitFeedback {
        entry: FeedbackEntry,
        request: RequestId,
    },
    OpenUrl(String),
}

impl Effect {
    /// Turns the effect into a future run against `services`.
    ///
    /// Returns `None` for [`Effect::None`].
    pub fn into_future(self, services: &Services) -> Option<BoxFuture<'static, Message>> {
        let future = match self {
            Effect::None => return None,
            Effect::PickFile => async {
                Message::Upload(UploadMessage::FilePicked(files::pick_report().await))
            }
            .boxed(),
            Effect::LoadFile { path, generation } => async move {
                let result = files::load_report(path).await;
                Message::Upload(UploadMessage::FileLoaded { generation, result })
            }
            .boxed(),
            Effect::OpenCamera { attempt } => {
                let open = services.camera.as_ref().map(|camera| camera.open());
                async move {
                    let result = match open {
                        Some(open) => open.await,
                        None => Err(CameraError::Unavailable),
                    };
                    Message::Camera(CameraMessage::Opened { attempt, result })
                }
                .boxed()
            }
            Effect::EncodeCapture { frame, generation } => async move {
                let result = tokio::task::spawn_blocking(move || camera::encode_capture(&frame))
                    .await
                    .unwrap_or_else(|e| Err(Error::Image(e.to_string())));
                Message::Camera(CameraMessage::Captured { generation, result })
            }
            .boxed(),
            Effect::Extract {
                file,
                request,
                generation,
            } => services
                .extractor
                .extract(&file)
                .map(move |result| {
                    Message::Upload(UploadMessage::ExtractionFinished {
                        request,
                        generation,
                        result,
                    })
                })
                .boxed(),
            Effect::Predict { form, request } => services
                .predictor
                .predict(&form)
                .map(move |result| Message::Prediction(PredictionMessage::Finished { request, result }))
                .boxed(),
            Effect::Locate { request } => {
                let locate = services.location.as_ref().map(|location| location.locate());
                async move {
                    let result = match locate {
                        Some(locate) => locate.await,
                        None => Err(LocationError::Unavailable),
                    };
                    Message::Prediction(PredictionMessage::Located { request, result })
                }
                .boxed()
            }
            Effect::SubmitFeedback { entry, request } => services
                .feedback
                .submit(&entry)
                .map(move |result| Message::Feedback(FeedbackMessage::Finished { request, result }))
                .boxed(),
            Effect::OpenUrl(url) => {
                async move { Message::UrlOpened(files::open_in_browser(&url)) }.boxed()
            }
        };
        Some(future)
    }
}
