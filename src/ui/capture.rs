// SPDX-License-Identifier: MPL-2.0
//! Live camera view.
//!
//! At most one stream is held. [`State::stop`] is safe to call on every exit
//! path, including when nothing is open.

use crate::application::port::{CameraFrame, CameraStream};
use crate::domain::ui::RequestId;
use crate::i18n::fluent::I18n;
use crate::session::{CameraMessage, Message};
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, image, Column, Container, Row, Text};
use iced::{Element, Length};

#[derive(Debug, Default)]
pub struct State {
    stream: Option<CameraStream>,
    /// Open request in flight.
    opening: Option<RequestId>,
    frame: Option<image::Handle>,
}

/// What happened to an open attempt that completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenOutcome {
    Active,
    /// The attempt was cancelled or superseded; the stream was released.
    Discarded,
}

impl State {
    pub fn begin_opening(&mut self, attempt: RequestId) {
        self.stop();
        self.opening = Some(attempt);
    }

    /// Adopts `stream` if `attempt` is the one in flight; otherwise stops it.
    pub fn opened(&mut self, attempt: RequestId, stream: CameraStream) -> OpenOutcome {
        if self.opening != Some(attempt) {
            stream.stop();
            return OpenOutcome::Discarded;
        }
        self.opening = None;
        self.frame = None;
        self.stream = Some(stream);
        OpenOutcome::Active
    }

    /// Forgets a failed attempt. Returns `false` if it was not the pending one.
    pub fn open_failed(&mut self, attempt: RequestId) -> bool {
        if self.opening == Some(attempt) {
            self.opening = None;
            true
        } else {
            false
        }
    }

    /// Releases the stream and cancels any pending open. Idempotent.
    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop();
            tracing::info!("camera released");
        }
        self.opening = None;
        self.frame = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stream.is_some()
    }

    #[must_use]
    pub fn is_opening(&self) -> bool {
        self.opening.is_some()
    }

    /// Current frame for capture.
    #[must_use]
    pub fn snapshot(&self) -> Option<CameraFrame> {
        self.stream.as_ref()?.latest_frame()
    }

    /// Pulls the newest frame for display.
    ///
    /// Returns `false` when the stream died on its own.
    pub fn refresh(&mut self) -> bool {
        let Some(stream) = &self.stream else {
            return true;
        };
        if !stream.is_running() {
            return false;
        }
        if let Some(frame) = stream.latest_frame() {
            self.frame = Some(image::Handle::from_rgba(
                frame.width(),
                frame.height(),
                frame.rgba().to_vec(),
            ));
        }
        true
    }
}

pub fn view<'a>(state: &'a State, i18n: &I18n) -> Element<'a, Message> {
    let surface: Element<'a, Message> = match &state.frame {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => Container::new(Text::new(i18n.tr("camera-waiting")).size(typography::BODY))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into(),
    };

    let buttons = Row::new()
        .spacing(spacing::XS)
        .push(
            button(Text::new(i18n.tr("camera-capture")))
                .on_press_maybe(
                    state
                        .frame
                        .is_some()
                        .then_some(Message::Camera(CameraMessage::Capture)),
                )
                .style(styles::button::primary),
        )
        .push(
            button(Text::new(i18n.tr("camera-close")))
                .on_press(Message::Camera(CameraMessage::Close))
                .style(styles::button::danger),
        );

    Column::new()
        .spacing(spacing::XS)
        .push(
            Container::new(surface)
                .width(Length::Fill)
                .height(Length::Fixed(sizing::CAMERA_HEIGHT))
                .style(styles::container::placeholder),
        )
        .push(buttons)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::LiveStream;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Probe {
        stops: AtomicUsize,
        stopped: AtomicBool,
    }

    struct FakeStream(Arc<Probe>);

    impl LiveStream for FakeStream {
        fn latest_frame(&self) -> Option<CameraFrame> {
            CameraFrame::new(1, 1, vec![1, 2, 3, 255])
        }
        fn stop(&self) {
            self.0.stops.fetch_add(1, Ordering::SeqCst);
            self.0.stopped.store(true, Ordering::SeqCst);
        }
        fn is_running(&self) -> bool {
            !self.0.stopped.load(Ordering::SeqCst)
        }
    }

    fn stream() -> (CameraStream, Arc<Probe>) {
        let probe = Arc::new(Probe::default());
        (CameraStream::new(FakeStream(probe.clone())), probe)
    }

    #[test]
    fn stop_without_stream_is_noop() {
        let mut state = State::default();
        state.stop();
        state.stop();
        assert!(!state.is_active());
    }

    #[test]
    fn pending_attempt_becomes_active() {
        let mut state = State::default();
        let attempt = RequestId::default().next();
        state.begin_opening(attempt);
        let (stream, probe) = stream();

        assert_eq!(state.opened(attempt, stream), OpenOutcome::Active);
        assert!(state.is_active());
        assert!(state.snapshot().is_some());

        state.stop();
        assert_eq!(probe.stops.load(Ordering::SeqCst), 1);
        assert!(!state.is_active());
    }

    #[test]
    fn late_stream_is_released() {
        let mut state = State::default();
        let attempt = RequestId::default().next();
        state.begin_opening(attempt);
        state.stop();

        let (stream, probe) = stream();
        assert_eq!(state.opened(attempt, stream), OpenOutcome::Discarded);
        assert!(!state.is_active());
        assert_eq!(probe.stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn refresh_reports_dead_stream() {
        let mut state = State::default();
        let attempt = RequestId::default().next();
        state.begin_opening(attempt);
        let (stream, probe) = stream();
        state.opened(attempt, stream);

        assert!(state.refresh());
        assert!(state.frame.is_some());
        probe.stopped.store(true, Ordering::SeqCst);
        assert!(!state.refresh());
    }
}
