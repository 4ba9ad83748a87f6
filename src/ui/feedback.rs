// SPDX-License-Identifier: MPL-2.0
//! Feedback form.

use crate::application::port::FeedbackEntry;
use crate::domain::risk::is_blank;
use crate::domain::ui::RequestId;
use crate::i18n::fluent::I18n;
use crate::session::{FeedbackMessage, Message};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::status::{self, StatusMessage};
use crate::ui::styles;
use iced::widget::{button, text_input, Column, Container, Text};
use iced::{Element, Length};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub name: String,
    pub review: String,
    /// Submission in flight.
    pub pending: Option<RequestId>,
}

impl State {
    /// Entry to send, or `None` when the review is blank.
    #[must_use]
    pub fn entry(&self) -> Option<FeedbackEntry> {
        if is_blank(&self.review) {
            return None;
        }
        Some(FeedbackEntry {
            name: self.name.clone(),
            review: self.review.clone(),
        })
    }

    /// Resets both inputs.
    pub fn reset(&mut self) {
        self.name.clear();
        self.review.clear();
    }
}

pub fn view<'a>(state: &'a State, status: Option<&StatusMessage>, i18n: &I18n) -> Element<'a, Message> {
    let submitting = state.pending.is_some();
    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(i18n.tr("feedback-title")).size(typography::TITLE_MD))
            .push(
                text_input(&i18n.tr("feedback-name-placeholder"), &state.name)
                    .on_input(|name| Message::Feedback(FeedbackMessage::NameChanged(name))),
            )
            .push(
                text_input(&i18n.tr("feedback-review-placeholder"), &state.review)
                    .on_input(|review| Message::Feedback(FeedbackMessage::ReviewChanged(review)))
                    .on_submit(Message::Feedback(FeedbackMessage::Submit)),
            )
            .push(
                button(Text::new(i18n.tr("feedback-submit")))
                    .on_press_maybe((!submitting).then_some(Message::Feedback(FeedbackMessage::Submit)))
                    .style(styles::button::primary),
            )
            .push(status::view(status, i18n)),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::card)
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_review_has_no_entry() {
        let state = State {
            name: "Ana".into(),
            review: "   ".into(),
            pending: None,
        };
        assert!(state.entry().is_none());
    }

    #[test]
    fn entry_keeps_name_as_typed() {
        let state = State {
            name: String::new(),
            review: "Great app".into(),
            pending: None,
        };
        assert_eq!(
            state.entry(),
            Some(FeedbackEntry {
                name: String::new(),
                review: "Great app".into()
            })
        );
    }
}
