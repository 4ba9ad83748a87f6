// SPDX-License-Identifier: MPL-2.0
//! Application root state and the bridge between the session and Iced.
//!
//! The `App` struct owns the [`Session`], the registered [`Services`] and the
//! localization bundle. Every message goes to [`Session::update`]; the
//! [`Effect`](crate::session::Effect) it returns is turned into Iced tasks
//! here, so the session itself never touches the runtime.

pub mod config;
mod message;
pub mod paths;
pub mod profile;
pub mod services;
mod subscription;
mod view;

pub use message::{Boot, Flags};
pub use services::{Capabilities, Services};

use crate::application::hospital::HospitalLinks;
use crate::i18n::fluent::I18n;
use crate::session::{Message, Session};
use crate::ui::notifications::Notification;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    session: Session,
    services: Services,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", &self.i18n.current_locale().to_string())
            .field("services", &self.services)
            .field("has_report", &self.session.report().is_some())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 860;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 600;
pub const MIN_WINDOW_WIDTH: u32 = 640;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(boot: Boot) -> iced::Result {
    use std::cell::RefCell;

    // iced 0.14 requires an Fn boot closure; the bundle is consumed once.
    let boot_state = RefCell::new(Some(boot));
    let boot = move || {
        let boot = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        (App::new(boot), Task::none())
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Builds the session from the startup bundle. Non-fatal startup
    /// problems (unreadable settings or profile) become warning toasts.
    pub fn new(boot: Boot) -> Self {
        let Boot {
            flags,
            config,
            config_warning,
            services,
        } = boot;

        let i18n = I18n::new(flags.lang.clone(), &config);
        let (profile, profile_warning) = profile::load(flags.profile.clone());
        let links = HospitalLinks::new(
            config.hospital_search_url(),
            config.hospital_nearby_template(),
        );

        let mut session = Session::new(services.capabilities(), profile, links);
        for key in [config_warning, profile_warning].into_iter().flatten() {
            session.notify(Notification::warning(&key));
        }

        tracing::info!(locale = %i18n.current_locale(), "application started");
        App {
            i18n,
            session,
            services,
        }
    }

    fn title(&self) -> String {
        self.i18n.tr("window-title")
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.session.needs_tick()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match self.session.update(message).into_future(&self.services) {
            Some(future) => Task::future(future),
            None => Task::none(),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            i18n: &self.i18n,
            session: &self.session,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::application::port::{
        FeedbackEntry, FeedbackSink, ReportExtractor, RiskPredictor, ServiceError,
    };
    use crate::domain::report::AcquiredFile;
    use crate::domain::risk::{ExtractedData, FormState, PredictionResult};
    use crate::session::UploadMessage;
    use futures_util::future::{BoxFuture, FutureExt};
    use std::sync::Arc;

    struct Offline;

    impl ReportExtractor for Offline {
        fn extract(&self, _file: &AcquiredFile) -> BoxFuture<'static, Result<ExtractedData, ServiceError>> {
            async { Err(ServiceError::Transport("offline".into())) }.boxed()
        }
    }

    impl RiskPredictor for Offline {
        fn predict(&self, _form: &FormState) -> BoxFuture<'static, Result<PredictionResult, ServiceError>> {
            async { Err(ServiceError::Transport("offline".into())) }.boxed()
        }
    }

    impl FeedbackSink for Offline {
        fn submit(&self, _entry: &FeedbackEntry) -> BoxFuture<'static, Result<(), ServiceError>> {
            async { Err(ServiceError::Transport("offline".into())) }.boxed()
        }
    }

    fn boot(config_warning: Option<String>) -> Boot {
        let offline = Arc::new(Offline);
        Boot {
            flags: Flags {
                lang: Some("en-US".into()),
                profile: Some(std::path::PathBuf::from("/nonexistent/profile.toml")),
                ..Flags::default()
            },
            config: Config::default(),
            config_warning,
            services: Services {
                extractor: offline.clone(),
                predictor: offline.clone(),
                feedback: offline,
                camera: None,
                location: None,
            },
        }
    }

    #[test]
    fn startup_warnings_become_toasts() {
        let app = App::new(boot(Some("notification-config-load-error".into())));
        // config warning plus the unreadable explicit profile
        assert_eq!(app.session().notifications().visible_count(), 2);
    }

    #[test]
    fn capabilities_follow_services() {
        let app = App::new(boot(None));
        assert!(!app.session().capabilities().camera);
        assert!(!app.session().capabilities().location);
    }

    #[test]
    fn title_is_localized() {
        let app = App::new(boot(None));
        assert_eq!(app.title(), "HeartShield");
    }

    #[test]
    fn update_forwards_to_session() {
        let mut app = App::new(boot(None));
        let _task = app.update(Message::Upload(UploadMessage::Submit));
        assert_eq!(
            app.session().alert().map(|a| a.message_key()),
            Some("alert-no-file")
        );
    }
}
