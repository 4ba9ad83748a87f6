// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`report`]: Acquired report files ([`AcquiredFile`](report::AcquiredFile),
//!   [`ReportSource`](report::ReportSource), [`ReportKind`](report::ReportKind))
//! - [`risk`]: Risk-factor form, extracted data, profile and prediction types
//!   ([`FormState`](risk::FormState), [`RiskTier`](risk::RiskTier))
//! - [`ui`]: UI value objects ([`ZoomLevel`](ui::newtypes::ZoomLevel),
//!   [`RequestId`](ui::newtypes::RequestId), [`Generation`](ui::newtypes::Generation))

pub mod report;
pub mod risk;
pub mod ui;
