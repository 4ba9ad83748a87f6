// SPDX-License-Identifier: MPL-2.0
//! Smart fill: merges extracted report values over the stored user profile.
//!
//! Precedence per field:
//!
//! | Field                                   | Source                                 |
//! |-----------------------------------------|----------------------------------------|
//! | `age`, `height`, `weight`               | extracted, else profile, else blank    |
//! | `gender`                                | extracted, else profile, normalized    |
//! | `ap_hi`, `ap_lo`, `cholesterol`, ...    | extracted only                         |
//!
//! "Present" always means non-blank after trimming. Values are copied as
//! given; only gender is normalized.

use crate::domain::risk::{is_blank, ExtractedData, FieldName, FormState, UserProfile};

/// Builds a fresh form from extracted data and an optional profile.
///
/// Pure and deterministic: the same inputs always give the same form.
#[must_use]
pub fn merge(extracted: &ExtractedData, profile: Option<&UserProfile>) -> FormState {
    let mut form = FormState::new();

    for field in FieldName::ALL {
        let from_report = Some(extracted.get(field)).filter(|v| !is_blank(v));
        let from_profile = profile
            .filter(|_| field.has_profile_fallback())
            .and_then(|p| p.get(field))
            .filter(|v| !is_blank(v));

        let Some(value) = from_report.or(from_profile) else {
            continue;
        };

        if field == FieldName::Gender {
            form.set(field, normalize_gender(value));
        } else {
            form.set(field, value);
        }
    }

    form
}

/// Maps any spelling to `male` or `female`: values starting with `m`
/// (case-insensitive, after trimming) are male, everything else female.
#[must_use]
pub fn normalize_gender(raw: &str) -> &'static str {
    let lowered = raw.trim().to_lowercase();
    if lowered.starts_with('m') {
        "male"
    } else {
        "female"
    }
}
