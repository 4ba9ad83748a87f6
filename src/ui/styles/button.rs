// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    border, opacity,
    palette::{self, WHITE},
    radius, shadow, with_alpha,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn filled(fill: Color, hover: Color, status: button::Status) -> button::Style {
    let (background, text_color, shadow) = match status {
        button::Status::Active | button::Status::Pressed => (fill, WHITE, shadow::NONE),
        button::Status::Hovered => (hover, WHITE, shadow::MD),
        button::Status::Disabled => (
            with_alpha(fill, opacity::OVERLAY_MEDIUM),
            with_alpha(WHITE, opacity::OVERLAY_STRONG),
            shadow::NONE,
        ),
    };
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: Border {
            color: fill,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow,
        snap: true,
    }
}

/// Main action of a section (submit, analyse, capture).
pub fn primary(_theme: &Theme, status: button::Status) -> button::Style {
    filled(palette::PRIMARY_500, palette::PRIMARY_700, status)
}

/// Destructive action (remove file, clear all, close camera).
pub fn danger(_theme: &Theme, status: button::Status) -> button::Style {
    filled(palette::GRAY_700, palette::ERROR_500, status)
}

/// Outlined button following the theme's text color (zoom controls).
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered => Some(with_alpha(palette::GRAY_400, opacity::OVERLAY_SUBTLE)),
        button::Status::Pressed => Some(with_alpha(palette::GRAY_400, opacity::OVERLAY_MEDIUM)),
        button::Status::Active | button::Status::Disabled => None,
    };
    let text_color = if status == button::Status::Disabled {
        with_alpha(base.text, opacity::OVERLAY_MEDIUM)
    } else {
        base.text
    };
    button::Style {
        background: background.map(Background::Color),
        text_color,
        border: Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}
