// SPDX-License-Identifier: MPL-2.0
//! Specialist-search link resolution.
//!
//! The generic search link is always available. When a position is known the
//! link is anchored on it; any location failure keeps the generic link.

use crate::application::port::Coordinates;

/// Generic cardiologist search.
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/maps/search/cardiologist+near+me";

/// Coordinate-anchored search; `{lat}` and `{lng}` are substituted.
pub const DEFAULT_NEARBY_TEMPLATE: &str =
    "https://www.google.com/maps/search/cardiologist/@{lat},{lng},13z";

/// Builds specialist-search links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalLinks {
    search_url: String,
    nearby_template: String,
}

impl Default for HospitalLinks {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL, DEFAULT_NEARBY_TEMPLATE)
    }
}

impl HospitalLinks {
    #[must_use]
    pub fn new(search_url: impl Into<String>, nearby_template: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            nearby_template: nearby_template.into(),
        }
    }

    /// The link used when no position is available.
    #[must_use]
    pub fn default_link(&self) -> &str {
        &self.search_url
    }

    /// Resolves the link for an optional position.
    #[must_use]
    pub fn resolve(&self, position: Option<Coordinates>) -> String {
        match position {
            Some(coords) if self.nearby_template.contains("{lat}") => self
                .nearby_template
                .replace("{lat}", &coords.latitude.to_string())
                .replace("{lng}", &coords.longitude.to_string()),
            _ => self.search_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_position_uses_generic_search() {
        assert_eq!(HospitalLinks::default().resolve(None), DEFAULT_SEARCH_URL);
    }

    #[test]
    fn position_anchors_search() {
        let coords = Coordinates::new(48.8566, 2.3522);
        assert_eq!(
            HospitalLinks::default().resolve(coords),
            "https://www.google.com/maps/search/cardiologist/@48.8566,2.3522,13z"
        );
    }

    #[test]
    fn template_without_placeholders_keeps_default() {
        let links = HospitalLinks::new("https://example.org/search", "https://example.org/");
        assert_eq!(
            links.resolve(Coordinates::new(1.0, 2.0)),
            "https://example.org/search"
        );
    }
}
