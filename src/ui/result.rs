// SPDX-License-Identifier: MPL-2.0
//! Risk result and specialist search sections.

use crate::domain::risk::{PredictionResult, RiskTier};
use crate::domain::ui::RequestId;
use crate::i18n::fluent::I18n;
use crate::session::{Message, PredictionMessage};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::status::{self, StatusMessage};
use crate::ui::styles;
use iced::widget::{button, text, Column, Container, Text};
use iced::{Color, Element, Length, Theme};

/// A classified prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    result: PredictionResult,
    tier: RiskTier,
}

impl Assessment {
    #[must_use]
    pub fn new(result: PredictionResult) -> Self {
        Self {
            tier: RiskTier::from_probability(result.probability),
            result,
        }
    }

    #[must_use]
    pub fn tier(&self) -> RiskTier {
        self.tier
    }

    #[must_use]
    pub fn result(&self) -> PredictionResult {
        self.result
    }

    /// The probability as the service returned it (`80`, `72.5`).
    #[must_use]
    pub fn probability_text(&self) -> String {
        self.result.probability.to_string()
    }
}

#[must_use]
pub fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::High => palette::RISK_HIGH,
        RiskTier::Moderate => palette::RISK_MODERATE,
        RiskTier::Low => palette::RISK_LOW,
    }
}

/// The visible specialist search section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hospital {
    link: String,
    /// Location request in flight.
    locating: Option<RequestId>,
}

impl Hospital {
    #[must_use]
    pub fn new(link: impl Into<String>, locating: Option<RequestId>) -> Self {
        Self {
            link: link.into(),
            locating,
        }
    }

    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[must_use]
    pub fn is_locating(&self) -> bool {
        self.locating.is_some()
    }

    /// Applies a finished location request; stale requests are ignored.
    ///
    /// `link` is `None` when the lookup failed and the current link stays.
    pub fn located(&mut self, request: RequestId, link: Option<String>) -> bool {
        if self.locating != Some(request) {
            return false;
        }
        self.locating = None;
        if let Some(link) = link {
            self.link = link;
        }
        true
    }
}

pub fn view<'a>(
    status: Option<&StatusMessage>,
    assessment: Option<&Assessment>,
    i18n: &I18n,
) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr("result-title")).size(typography::TITLE_MD));

    if let Some(message) = status {
        column = column.push(status::view(Some(message), i18n));
    } else if let Some(assessment) = assessment {
        let color = tier_color(assessment.tier());
        let probability = assessment.probability_text();
        column = column
            .push(
                Text::new(i18n.tr(assessment.tier().i18n_key()))
                    .size(typography::TITLE_MD)
                    .style(move |_theme: &Theme| text::Style { color: Some(color) }),
            )
            .push(
                Text::new(i18n.tr_with_args(
                    "result-probability",
                    &[("probability", probability.as_str())],
                ))
                .size(typography::BODY_LG),
            );
    }

    Container::new(column)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::card)
        .into()
}

pub fn view_hospital<'a>(hospital: &'a Hospital, i18n: &I18n) -> Element<'a, Message> {
    let caption = if hospital.is_locating() {
        i18n.tr("hospital-locating")
    } else {
        hospital.link().to_string()
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(i18n.tr("hospital-title")).size(typography::TITLE_SM))
            .push(Text::new(i18n.tr("hospital-body")).size(typography::BODY))
            .push(
                button(Text::new(i18n.tr("hospital-find")))
                    .on_press(Message::Prediction(PredictionMessage::OpenHospitalLink))
                    .style(styles::button::primary),
            )
            .push(Text::new(caption).size(typography::CAPTION)),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::card)
    .into()
}
