// SPDX-License-Identifier: MPL-2.0
//! Geolocation port definition.
//!
//! Location is strictly optional: every failure degrades silently to the
//! generic specialist search.

use futures_util::future::BoxFuture;
use std::fmt;

/// A position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns coordinates if both values are finite and within range.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Errors that can occur while locating the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    /// The user or system refused location access.
    Denied,
    /// No provider is configured.
    Unavailable,
    /// The provider failed.
    Failed(String),
}

impl LocationError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            LocationError::Denied => "location-error-denied",
            LocationError::Unavailable => "location-error-unavailable",
            LocationError::Failed(_) => "location-error-failed",
        }
    }
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::Denied => write!(f, "Location access denied"),
            LocationError::Unavailable => write!(f, "Location unavailable"),
            LocationError::Failed(msg) => write!(f, "Location lookup failed: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Port for resolving the user's approximate position.
pub trait LocationProvider: Send + Sync {
    /// Resolves the current position.
    ///
    /// # Errors
    ///
    /// Returns a [`LocationError`] when no position can be obtained.
    fn locate(&self) -> BoxFuture<'static, Result<Coordinates, LocationError>>;
}
