// SPDX-License-Identifier: MPL-2.0
//! Transient toasts for events that do not belong to a status region.
//!
//! Startup warnings (unreadable settings or profile), camera and location
//! failures, and rejected file drops surface here. Request outcomes tied to
//! a workflow step go to the status regions instead.
//!
//! # Usage
//!
//! ```ignore
//! use crate::ui::notifications::{Manager, Notification};
//!
//! let mut manager = Manager::new();
//! manager.push(Notification::warning("notification-config-load-error"));
//!
//! let overlay = Toast::view_overlay(&manager, &i18n).map(Message::Notification);
//! ```
//!
//! Success and info toasts disappear after 3s, warnings after 5s. Errors
//! stay until dismissed. At most three are visible; the rest queue.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
