// SPDX-License-Identifier: MPL-2.0
//! `heartshield` is a desktop client for cardiovascular risk assessment built
//! with the Iced GUI framework.
//!
//! A medical report is taken from a file or the camera, sent to an
//! extraction service, and the extracted values (merged over a stored user
//! profile) pre-fill the risk-factor form. The prediction service returns a
//! probability that is shown as a risk tier, with a specialist search offered
//! for high probabilities.
//!
//! # Layers
//!
//! - [`domain`]: pure types and rules (form, tiers, reports)
//! - [`application`]: ports and policies (smart fill, hospital links)
//! - [`infrastructure`]: adapters (HTTP, camera, location, files)
//! - [`session`]: UI state machine, synchronous and runtime-free
//! - [`ui`] and [`app`]: Iced rendering and wiring

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod session;
pub mod ui;
