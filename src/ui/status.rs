// SPDX-License-Identifier: MPL-2.0
//! Status regions and the loading overlay.
//!
//! Each workflow owns one [`Region`]; a region is either hidden or shows one
//! [`StatusMessage`]. The [`LoadingOverlay`] covers the window while a report
//! is being extracted and rotates encouraging phrases.

use crate::app::config::{LOADING_FADE_MS, LOADING_PHRASE_INTERVAL_MS};
use crate::application::port::ServiceError;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{text, Column, Container, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::{Duration, Instant};

/// Status region owned by one workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Upload,
    Result,
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

impl StatusKind {
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            StatusKind::Loading => palette::INFO_500,
            StatusKind::Success => palette::SUCCESS_500,
            StatusKind::Error => palette::ERROR_500,
        }
    }
}

/// Text shown in a region: an i18n key plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub key: String,
    pub args: Vec<(String, String)>,
}

impl StatusMessage {
    pub fn new(kind: StatusKind, key: impl Into<String>) -> Self {
        Self {
            kind,
            key: key.into(),
            args: Vec::new(),
        }
    }

    pub fn loading(key: impl Into<String>) -> Self {
        Self::new(StatusKind::Loading, key)
    }

    pub fn success(key: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, key)
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, key)
    }

    #[must_use]
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), value.into()));
        self
    }

    /// Error status for a failed request.
    ///
    /// A server-supplied reason is shown through `reason_key` (which takes a
    /// `reason` argument); a transport failure shows the network error;
    /// anything else shows `fallback_key`.
    pub fn from_service_error(err: &ServiceError, reason_key: &str, fallback_key: &str) -> Self {
        if err.is_transport() {
            return Self::error("status-network-error");
        }
        match err.reason() {
            Some(reason) => Self::error(reason_key).with_arg("reason", reason),
            None => Self::error(fallback_key),
        }
    }

    /// Resolves the text through `i18n`.
    pub fn text(&self, i18n: &I18n) -> String {
        if self.args.is_empty() {
            i18n.tr(&self.key)
        } else {
            let args: Vec<(&str, &str)> = self
                .args
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            i18n.tr_with_args(&self.key, &args)
        }
    }
}

/// The three status regions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBoard {
    upload: Option<StatusMessage>,
    result: Option<StatusMessage>,
    feedback: Option<StatusMessage>,
}

impl StatusBoard {
    fn slot(&mut self, region: Region) -> &mut Option<StatusMessage> {
        match region {
            Region::Upload => &mut self.upload,
            Region::Result => &mut self.result,
            Region::Feedback => &mut self.feedback,
        }
    }

    /// Replaces the region's content and makes it visible.
    pub fn show(&mut self, region: Region, message: StatusMessage) {
        *self.slot(region) = Some(message);
    }

    pub fn clear(&mut self, region: Region) {
        *self.slot(region) = None;
    }

    #[must_use]
    pub fn get(&self, region: Region) -> Option<&StatusMessage> {
        match region {
            Region::Upload => self.upload.as_ref(),
            Region::Result => self.result.as_ref(),
            Region::Feedback => self.feedback.as_ref(),
        }
    }

    #[must_use]
    pub fn is_visible(&self, region: Region) -> bool {
        self.get(region).is_some()
    }
}

/// Renders a region's message, or nothing when it is hidden.
pub fn view<'a, M: 'a>(message: Option<&StatusMessage>, i18n: &I18n) -> Element<'a, M> {
    let Some(message) = message else {
        return Column::new().into();
    };
    let accent = message.kind.color();
    Container::new(Text::new(message.text(i18n)).size(typography::BODY))
        .width(Length::Fill)
        .padding(spacing::SM)
        .style(styles::container::status(accent))
        .into()
}

// =============================================================================
// Loading overlay
// =============================================================================

/// Phrases rotated while the overlay is visible, in order.
pub const LOADING_PHRASE_KEYS: [&str; 6] = [
    "loading-phrase-1",
    "loading-phrase-2",
    "loading-phrase-3",
    "loading-phrase-4",
    "loading-phrase-5",
    "loading-phrase-6",
];

/// Frame of the phrase rotation at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhraseFrame {
    pub index: usize,
    pub opacity: f32,
}

/// Window-covering overlay with rotating phrases.
///
/// The rotation has no timer of its own: it is a function of the time since
/// [`show`](Self::show), sampled by [`tick`](Self::tick). The application
/// only subscribes to ticks while [`is_visible`](Self::is_visible).
#[derive(Debug, Clone, Default)]
pub struct LoadingOverlay {
    shown_at: Option<Instant>,
    now: Option<Instant>,
}

impl LoadingOverlay {
    /// Shows the overlay starting from the first phrase.
    pub fn show(&mut self, now: Instant) {
        self.shown_at = Some(now);
        self.now = Some(now);
    }

    pub fn hide(&mut self) {
        self.shown_at = None;
        self.now = None;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown_at.is_some()
    }

    pub fn tick(&mut self, now: Instant) {
        if self.shown_at.is_some() {
            self.now = Some(now);
        }
    }

    /// Current frame, or `None` while hidden.
    #[must_use]
    pub fn frame(&self) -> Option<PhraseFrame> {
        let shown_at = self.shown_at?;
        let now = self.now.unwrap_or(shown_at);
        Some(frame_at(now.saturating_duration_since(shown_at)))
    }
}

/// Phrase rotation: each slot lasts the phrase interval. At a slot boundary
/// the previous phrase fades out, then the next one fades in.
fn frame_at(elapsed: Duration) -> PhraseFrame {
    let interval = u128::from(LOADING_PHRASE_INTERVAL_MS);
    let fade = u128::from(LOADING_FADE_MS);
    let elapsed = elapsed.as_millis();
    let slot = elapsed / interval;
    let offset = elapsed % interval;
    let count = LOADING_PHRASE_KEYS.len() as u128;

    if slot == 0 || offset >= 2 * fade {
        return PhraseFrame {
            index: (slot % count) as usize,
            opacity: 1.0,
        };
    }
    if offset < fade {
        PhraseFrame {
            index: ((slot - 1) % count) as usize,
            opacity: 1.0 - offset as f32 / fade as f32,
        }
    } else {
        PhraseFrame {
            index: (slot % count) as usize,
            opacity: (offset - fade) as f32 / fade as f32,
        }
    }
}

/// Renders the overlay; callers stack it above the page only while visible.
pub fn view_overlay<'a, M: 'a>(overlay: &LoadingOverlay, i18n: &I18n) -> Element<'a, M> {
    let Some(frame) = overlay.frame() else {
        return Column::new().into();
    };
    let phrase = i18n.tr(LOADING_PHRASE_KEYS[frame.index]);
    let alpha = frame.opacity;

    let card = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new(i18n.tr("loading-title")).size(typography::TITLE_SM))
        .push(
            Text::new(phrase)
                .size(typography::BODY_LG)
                .align_x(alignment::Horizontal::Center)
                .style(move |theme: &Theme| text::Style {
                    color: Some(Color {
                        a: alpha,
                        ..theme.palette().text
                    }),
                }),
        );

    Container::new(
        Container::new(card)
            .width(Length::Fixed(sizing::OVERLAY_CARD_WIDTH))
            .padding(spacing::LG)
            .style(styles::container::card),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .style(styles::container::backdrop)
    .into()
}
