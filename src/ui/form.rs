// SPDX-License-Identifier: MPL-2.0
//! Risk-factor form.
//!
//! Numeric fields are free text inputs; gender and the yes/no habits are
//! pick lists. Validation issues are shown under their field.

use crate::domain::risk::{FieldIssue, FieldName, FormState};
use crate::i18n::fluent::I18n;
use crate::session::{FormMessage, Message, PredictionMessage, UploadMessage};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, pick_list, text, text_input, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Theme};
use std::fmt;

/// Pick-list entry: wire value plus translated label.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Choice {
    value: &'static str,
    label: String,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn choices(field: FieldName, i18n: &I18n) -> Option<Vec<Choice>> {
    let options = field.value_kind().choices()?;
    Some(
        options
            .iter()
            .map(|value| Choice {
                value,
                label: i18n.tr(&format!("form-choice-{value}")),
            })
            .collect(),
    )
}

fn field_input<'a>(field: FieldName, value: &str, i18n: &I18n) -> Element<'a, Message> {
    match choices(field, i18n) {
        Some(options) => {
            let selected = options
                .iter()
                .find(|choice| choice.value.eq_ignore_ascii_case(value.trim()))
                .cloned();
            pick_list(options, selected, move |choice: Choice| {
                Message::Form(FormMessage::FieldChanged(field, choice.value.to_string()))
            })
            .placeholder(i18n.tr("form-select-placeholder"))
            .width(Length::Fill)
            .into()
        }
        None => text_input(&i18n.tr(&format!("{}-hint", field.label_key())), value)
            .on_input(move |input| Message::Form(FormMessage::FieldChanged(field, input)))
            .width(Length::Fill)
            .into(),
    }
}

fn field_row<'a>(
    field: FieldName,
    value: &str,
    issue: Option<&FieldIssue>,
    i18n: &I18n,
) -> Element<'a, Message> {
    let row = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new(i18n.tr(&field.label_key()))
                .size(typography::BODY)
                .width(Length::Fixed(sizing::FORM_LABEL_WIDTH)),
        )
        .push(field_input(field, value, i18n));

    let mut column = Column::new().spacing(spacing::XXS).push(row);
    if let Some(issue) = issue {
        column = column.push(
            Text::new(i18n.tr(issue.problem.i18n_key()))
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::ERROR_500),
                }),
        );
    }
    column.into()
}

pub fn view<'a>(
    form: &FormState,
    issues: &[FieldIssue],
    analysing: bool,
    i18n: &I18n,
) -> Element<'a, Message> {
    let mut fields = Column::new().spacing(spacing::SM);
    for (field, value) in form.iter() {
        let issue = issues.iter().find(|issue| issue.field == field);
        fields = fields.push(field_row(field, value, issue, i18n));
    }

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(Text::new(i18n.tr("form-analyse")))
                .on_press_maybe((!analysing).then_some(Message::Prediction(PredictionMessage::Submit)))
                .style(styles::button::primary),
        )
        .push(
            button(Text::new(i18n.tr("form-clear-all")))
                .on_press(Message::Upload(UploadMessage::ClearAll))
                .style(styles::button::danger),
        );

    Container::new(
        Column::new()
            .spacing(spacing::MD)
            .push(Text::new(i18n.tr("form-title")).size(typography::TITLE_MD))
            .push(fields)
            .push(actions),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::card)
    .into()
}
