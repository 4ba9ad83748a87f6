// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{border, opacity, palette, radius, shadow, with_alpha};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Section card (upload, form, result, feedback).
pub fn card(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();
    container::Style {
        background: Some(Background::Color(palette.background.base.color)),
        border: Border {
            color: palette::GRAY_100,
            width: border::WIDTH_SM,
            radius: radius::LG.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}

/// Tinted box around a status line; `accent` is the status color.
pub fn status(accent: Color) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(Background::Color(with_alpha(accent, opacity::OVERLAY_SUBTLE))),
        border: Border {
            color: accent,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        text_color: Some(accent),
        ..Default::default()
    }
}

/// Dimmed full-window backdrop behind the loading overlay and alerts.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(with_alpha(
            palette::BLACK,
            opacity::OVERLAY_STRONG,
        ))),
        ..Default::default()
    }
}

/// Placeholder surface for documents and the camera before a frame arrives.
pub fn placeholder(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.weak.color;
    container::Style {
        background: Some(Background::Color(base)),
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..Default::default()
    }
}
