// SPDX-License-Identifier: MPL-2.0
//! Zoomable preview of the active report.
//!
//! Images are drawn inline; documents get a card with their name and size.
//! Dropping the [`State`] releases the image handle of the previous file.

use crate::domain::report::{AcquiredFile, ReportKind};
use crate::domain::ui::newtypes::zoom_bounds::STEP_FACTOR;
use crate::domain::ui::ZoomLevel;
use crate::i18n::fluent::I18n;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{button, image, scrollable, Column, Container, Row, Text};
use iced::{alignment, Element, Length};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    ZoomIn,
    ZoomOut,
}

#[derive(Debug, Clone)]
pub struct State {
    name: String,
    kind: ReportKind,
    size: usize,
    image: Option<image::Handle>,
    dimensions: Option<(u32, u32)>,
    zoom: ZoomLevel,
}

impl State {
    /// Prepares the preview for `file` at 100% zoom.
    #[must_use]
    pub fn show(file: &AcquiredFile) -> Self {
        let kind = file.kind();
        let (image, dimensions) = match kind {
            ReportKind::Image => (
                Some(image::Handle::from_bytes(file.shared_bytes())),
                image_dimensions(file.bytes()),
            ),
            ReportKind::Document => (None, None),
        };
        Self {
            name: file.name().to_string(),
            kind,
            size: file.len(),
            image,
            dimensions,
            zoom: ZoomLevel::default(),
        }
    }

    pub fn handle(&mut self, message: Message) {
        self.zoom = match message {
            Message::ZoomIn => self.zoom.adjust(STEP_FACTOR),
            Message::ZoomOut => self.zoom.adjust(-STEP_FACTOR),
        };
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    #[must_use]
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size the image is drawn at for the current zoom.
    fn scaled_size(&self) -> Option<(f32, f32)> {
        let (w, h) = self.dimensions?;
        if w == 0 || h == 0 {
            return None;
        }
        let (w, h) = (w as f32, h as f32);
        let fit = (sizing::PREVIEW_MAX_WIDTH / w).min(1.0);
        let factor = fit * self.zoom.as_factor();
        Some((w * factor, h * factor))
    }
}

fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image_rs::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

pub fn view<'a>(state: &'a State, i18n: &I18n) -> Element<'a, Message> {
    let zoom = state.zoom();
    let controls = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(Text::new(i18n.tr("preview-title")).size(typography::BODY_LG))
        .push(Container::new(Text::new("")).width(Length::Fill))
        .push(
            button(Text::new("−"))
                .on_press_maybe((!zoom.is_min()).then_some(Message::ZoomOut))
                .style(styles::button::secondary),
        )
        .push(Text::new(zoom.to_string()).size(typography::BODY))
        .push(
            button(Text::new("+"))
                .on_press_maybe((!zoom.is_max()).then_some(Message::ZoomIn))
                .style(styles::button::secondary),
        );

    let content: Element<'a, Message> = match (&state.image, state.scaled_size()) {
        (Some(handle), Some((width, height))) => image(handle.clone())
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .into(),
        (Some(handle), None) => image(handle.clone()).width(Length::Fill).into(),
        (None, _) => document_card(state, i18n),
    };

    let viewport = Container::new(
        scrollable(
            Container::new(content)
                .padding(spacing::XS)
                .center_x(Length::Shrink),
        )
        .direction(Direction::Both {
            vertical: Scrollbar::default(),
            horizontal: Scrollbar::default(),
        })
        .width(Length::Fill)
        .height(Length::Fill),
    )
    .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
    .width(Length::Fill)
    .style(styles::container::placeholder);

    Column::new()
        .spacing(spacing::XS)
        .push(controls)
        .push(viewport)
        .into()
}

fn document_card<'a>(state: &'a State, i18n: &I18n) -> Element<'a, Message> {
    let scale = state.zoom().as_factor();
    let size_kb = format!("{:.1}", state.size as f64 / 1024.0);
    Column::new()
        .spacing(spacing::XS * scale)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("PDF").size(typography::TITLE_LG * scale))
        .push(Text::new(state.name()).size(typography::BODY_LG * scale))
        .push(
            Text::new(i18n.tr_with_args("preview-document-size", &[("size", size_kb.as_str())]))
                .size(typography::CAPTION * scale),
        )
        .into()
}
