// SPDX-License-Identifier: MPL-2.0
//! Internationalization support built on Fluent.
//!
//! Translation files are embedded from `assets/i18n/*.ftl` at compile time.
//! The locale is resolved from the CLI, then the settings file, then the
//! operating system, falling back to `en-US`. Messages missing from the
//! active locale fall back to the `en-US` bundle.

pub mod fluent;
