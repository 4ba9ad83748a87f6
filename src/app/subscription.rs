// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use crate::app::config::TICK_INTERVAL_MS;
use crate::session::{Message, UploadMessage};
use iced::{event, time, Subscription};
use std::time::Duration;

/// Routes files dropped on the window to the upload workflow.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::FileDropped(path)) = event {
            return Some(Message::Upload(UploadMessage::FileDropped(path)));
        }
        None
    })
}

/// Periodic tick for the loading overlay, the camera view and toast
/// auto-dismiss. Idle sessions do not tick.
pub fn create_tick_subscription(needs_tick: bool) -> Subscription<Message> {
    if needs_tick {
        time::every(Duration::from_millis(TICK_INTERVAL_MS)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
