// SPDX-License-Identifier: MPL-2.0
//! User interface sections and shared styling.
//!
//! Sections follow the Elm-style "state down, messages up" pattern: each one
//! renders from state owned by the [`Session`](crate::session::Session) and
//! emits session messages.
//!
//! # Sections
//!
//! - [`preview`] - Selected report with zoom controls
//! - [`capture`] - Live camera view
//! - [`form`] - Risk-factor form
//! - [`result`] - Risk result and specialist search
//! - [`feedback`] - Feedback form
//!
//! # Shared Infrastructure
//!
//! - [`status`] - Status regions and the loading overlay
//! - [`alert`] - Blocking alerts
//! - [`notifications`] - Toast notification system
//! - [`styles`] - Button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod alert;
pub mod capture;
pub mod design_tokens;
pub mod feedback;
pub mod form;
pub mod notifications;
pub mod preview;
pub mod result;
pub mod status;
pub mod styles;
