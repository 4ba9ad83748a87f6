// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like
//! `reqwest`, `FFmpeg` and the system file dialog.
//!
//! # Available Adapters
//!
//! - [`http`]: Extraction, prediction and feedback over HTTP (implements
//!   [`ReportExtractor`], [`RiskPredictor`] and [`FeedbackSink`])
//! - [`camera`]: Live capture via `FFmpeg` (implements [`CameraDevice`]) and
//!   JPEG encoding of captured frames
//! - [`location`]: Fixed and IP-based positions (implement [`LocationProvider`])
//! - [`files`]: File dialog, report loading and opening links
//!
//! [`ReportExtractor`]: crate::application::port::ReportExtractor
//! [`RiskPredictor`]: crate::application::port::RiskPredictor
//! [`FeedbackSink`]: crate::application::port::FeedbackSink
//! [`CameraDevice`]: crate::application::port::CameraDevice
//! [`LocationProvider`]: crate::application::port::LocationProvider

pub mod camera;
pub mod files;
pub mod http;
pub mod location;
