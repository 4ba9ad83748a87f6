// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Service**: collaborator base URL and request timeout
//! - **Location**: geolocation lookup
//! - **Loading overlay**: phrase rotation timing
//! - **Logging**: default tracing filter

// ==========================================================================
// Service Defaults
// ==========================================================================

/// Base URL of the extraction, prediction and feedback services.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000/";

/// Default request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Minimum request timeout in seconds.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout in seconds (OCR on large PDFs is slow).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

// ==========================================================================
// Camera Defaults
// ==========================================================================

/// Whether the camera capability is registered when the build supports it.
pub const DEFAULT_CAMERA_ENABLED: bool = true;

// ==========================================================================
// Location Defaults
// ==========================================================================

/// IP geolocation endpoint used by the `ip-lookup` provider.
pub const DEFAULT_LOCATION_LOOKUP_URL: &str = "http://ip-api.com/json";

/// Timeout for the location lookup in seconds. Kept short: the hospital
/// link falls back to the generic search anyway.
pub const LOCATION_TIMEOUT_SECS: u64 = 5;

// ==========================================================================
// Loading Overlay Defaults
// ==========================================================================

/// Time each loading phrase stays on screen, in milliseconds.
pub const LOADING_PHRASE_INTERVAL_MS: u64 = 2500;

/// Duration of the fade between phrases, in milliseconds.
pub const LOADING_FADE_MS: u64 = 300;

/// UI tick period while something animates, in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 100;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Tracing filter used when neither `RUST_LOG` nor the settings file set one.
pub const DEFAULT_LOG_FILTER: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_REQUEST_TIMEOUT_SECS > 0);
    assert!(MAX_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS >= MIN_REQUEST_TIMEOUT_SECS);
    assert!(DEFAULT_REQUEST_TIMEOUT_SECS <= MAX_REQUEST_TIMEOUT_SECS);

    assert!(LOCATION_TIMEOUT_SECS > 0);

    // The fade must fit inside one phrase slot, and the tick must be fine
    // enough to animate it.
    assert!(LOADING_FADE_MS * 2 < LOADING_PHRASE_INTERVAL_MS);
    assert!(TICK_INTERVAL_MS > 0);
    assert!(TICK_INTERVAL_MS <= LOADING_FADE_MS);
};
