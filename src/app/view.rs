// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! One scrollable page holds the workflow sections top to bottom. The
//! loading overlay, the blocking alert and the toasts are stacked above it.

use crate::i18n::fluent::I18n;
use crate::session::{CameraMessage, Message, Session, UploadMessage};
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::notifications::Toast;
use crate::ui::status::{self, Region};
use crate::ui::{alert, capture, feedback, form, preview, result, styles};
use iced::widget::{button, scrollable, Column, Container, Row, Stack, Text};
use iced::{alignment, Element, Length};

/// Width of the page column.
const PAGE_WIDTH: f32 = 760.0;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub i18n: &'a I18n,
    pub session: &'a Session,
}

/// Renders the page and its overlays.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let ViewContext { i18n, session } = ctx;

    let mut page = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .max_width(PAGE_WIDTH)
        .push(Text::new(i18n.tr("app-title")).size(typography::TITLE_LG))
        .push(Text::new(i18n.tr("app-subtitle")).size(typography::BODY))
        .push(view_upload(session, i18n))
        .push(form::view(
            session.form(),
            session.form_issues(),
            session.is_analysing(),
            i18n,
        ));

    let result_status = session.status().get(Region::Result);
    if result_status.is_some() || session.assessment().is_some() {
        page = page.push(result::view(result_status, session.assessment(), i18n));
    }
    if let Some(hospital) = session.hospital() {
        page = page.push(result::view_hospital(hospital, i18n));
    }
    page = page.push(feedback::view(
        session.feedback(),
        session.status().get(Region::Feedback),
        i18n,
    ));

    let body = scrollable(
        Container::new(page)
            .width(Length::Fill)
            .center_x(Length::Fill),
    )
    .width(Length::Fill)
    .height(Length::Fill);

    let mut stack = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(body);

    if session.overlay().is_visible() {
        stack = stack.push(status::view_overlay(session.overlay(), i18n));
    }
    if let Some(current) = session.alert() {
        stack = stack.push(alert::view(current, i18n));
    }
    if session.notifications().has_notifications() {
        stack = stack.push(
            Toast::view_overlay(session.notifications(), i18n).map(Message::Notification),
        );
    }

    stack.into()
}

/// Acquisition buttons, the camera or preview, and the upload status.
fn view_upload<'a>(session: &'a Session, i18n: &'a I18n) -> Element<'a, Message> {
    let has_report = session.report().is_some();
    let camera_busy = session.is_camera_active() || session.camera().is_opening();

    let mut actions = Row::new()
        .spacing(spacing::XS)
        .align_y(alignment::Vertical::Center)
        .push(
            button(Text::new(i18n.tr("upload-choose-file")))
                .on_press(Message::Upload(UploadMessage::PickFile))
                .style(styles::button::secondary),
        );

    if session.capabilities().camera {
        actions = actions.push(
            button(Text::new(i18n.tr("upload-use-camera")))
                .on_press_maybe(
                    (!camera_busy).then_some(Message::Camera(CameraMessage::Start)),
                )
                .style(styles::button::secondary),
        );
    }

    actions = actions.push(
        button(Text::new(i18n.tr("upload-submit")))
            .on_press_maybe(
                session
                    .can_submit_report()
                    .then_some(Message::Upload(UploadMessage::Submit)),
            )
            .style(styles::button::primary),
    );

    if has_report {
        actions = actions.push(
            button(Text::new(i18n.tr("upload-remove-file")))
                .on_press(Message::Upload(UploadMessage::RemoveFile))
                .style(styles::button::danger),
        );
    }

    let file_line = match session.report() {
        Some(file) => i18n.tr_with_args("upload-selected-file", &[("file", file.name())]),
        None => i18n.tr("upload-no-file"),
    };

    let mut column = Column::new()
        .spacing(spacing::SM)
        .push(Text::new(i18n.tr("upload-title")).size(typography::TITLE_MD))
        .push(Text::new(i18n.tr("upload-hint")).size(typography::CAPTION))
        .push(actions)
        .push(Text::new(file_line).size(typography::BODY));

    if camera_busy {
        column = column.push(capture::view(session.camera(), i18n));
    } else if let Some(state) = session.preview() {
        column = column.push(preview::view(state, i18n).map(Message::Preview));
    }

    column = column.push(status::view(session.status().get(Region::Upload), i18n));

    Container::new(column)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::card)
        .into()
}
