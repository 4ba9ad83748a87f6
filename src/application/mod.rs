// SPDX-License-Identifier: MPL-2.0
//! Application layer - ports and pure policies.
//!
//! - [`port`]: Trait definitions (interfaces) for the remote services, the
//!   camera and geolocation
//! - [`smart_fill`]: merge of extracted report values over the user profile
//! - [`hospital`]: specialist-search link resolution
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The session and UI use application layer services

pub mod hospital;
pub mod port;
pub mod smart_fill;
