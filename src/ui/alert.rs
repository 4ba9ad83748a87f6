// SPDX-License-Identifier: MPL-2.0
//! Blocking alert shown above the page until acknowledged.

use crate::i18n::fluent::I18n;
use crate::session::Message;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    message_key: String,
}

impl Alert {
    pub fn new(message_key: impl Into<String>) -> Self {
        Self {
            message_key: message_key.into(),
        }
    }

    #[must_use]
    pub fn message_key(&self) -> &str {
        &self.message_key
    }
}

pub fn view<'a>(alert: &Alert, i18n: &I18n) -> Element<'a, Message> {
    let card = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(
            Text::new("!")
                .size(typography::TITLE_LG)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::ERROR_500),
                }),
        )
        .push(
            Text::new(i18n.tr(alert.message_key()))
                .size(typography::BODY_LG)
                .align_x(alignment::Horizontal::Center),
        )
        .push(
            button(Text::new(i18n.tr("alert-ok")))
                .on_press(Message::DismissAlert)
                .style(styles::button::primary),
        );

    Container::new(
        Container::new(card)
            .width(Length::Fixed(sizing::ALERT_WIDTH))
            .padding(spacing::LG)
            .style(styles::container::card),
    )
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .style(styles::container::backdrop)
    .into()
}
