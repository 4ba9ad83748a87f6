// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! Abstract interfaces that infrastructure adapters implement. These traits
//! use only domain types, so the session never depends on HTTP or `FFmpeg`.
//!
//! # Available Ports
//!
//! - [`service`]: report extraction, risk prediction, feedback storage
//! - [`camera`]: live camera capture
//! - [`location`]: approximate user position
//!
//! # Design Notes
//!
//! - Traits are `Send + Sync` and shared behind `Arc`
//! - Asynchronous calls return `BoxFuture<'static, _>`; the session turns them
//!   into messages

pub mod camera;
pub mod location;
pub mod service;

pub use camera::{CameraDevice, CameraError, CameraFrame, CameraStream, LiveStream};
pub use location::{Coordinates, LocationError, LocationProvider};
pub use service::{FeedbackEntry, FeedbackSink, ReportExtractor, RiskPredictor, ServiceError};
