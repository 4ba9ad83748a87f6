// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! Type-safe wrappers for UI values, always within valid ranges.

use std::fmt;

// =============================================================================
// Zoom Bounds
// =============================================================================

/// Preview zoom bounds (50% to 300%).
pub mod zoom_bounds {
    /// Minimum zoom percentage.
    pub const MIN_PERCENT: u16 = 50;
    /// Maximum zoom percentage.
    pub const MAX_PERCENT: u16 = 300;
    /// Zoom percentage of a freshly shown preview.
    pub const DEFAULT_PERCENT: u16 = 100;
    /// Zoom change applied by the zoom buttons, as a factor.
    pub const STEP_FACTOR: f32 = 0.1;
}

// =============================================================================
// ZoomLevel
// =============================================================================

/// Preview zoom, guaranteed to be within `[0.5, 3.0]`.
///
/// Stored as a whole percentage so that symmetric steps cancel exactly:
/// `+0.1` followed by `-0.1` always lands back on the starting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZoomLevel(u16);

impl ZoomLevel {
    /// Creates a zoom level from a factor, clamping to the valid range.
    #[must_use]
    pub fn from_factor(factor: f32) -> Self {
        if !factor.is_finite() {
            return Self::default();
        }
        Self::from_percent((factor * 100.0).round() as i32)
    }

    /// Creates a zoom level from a percentage, clamping to the valid range.
    #[must_use]
    pub fn from_percent(percent: i32) -> Self {
        let clamped = percent.clamp(
            i32::from(zoom_bounds::MIN_PERCENT),
            i32::from(zoom_bounds::MAX_PERCENT),
        );
        // Clamped into u16 range above.
        Self(clamped as u16)
    }

    /// Adds `delta` (as a factor) and clamps.
    ///
    /// Zoom has a resolution of 1%: `delta` is rounded to the nearest whole
    /// percent, so any `|delta| < 0.005` leaves the level unchanged.
    #[must_use]
    pub fn adjust(self, delta: f32) -> Self {
        if !delta.is_finite() {
            return self;
        }
        let delta_percent = (delta * 100.0).round() as i32;
        Self::from_percent(i32::from(self.0) + delta_percent)
    }

    /// Rounded percentage shown next to the zoom controls.
    #[must_use]
    pub fn percent(self) -> u16 {
        self.0
    }

    /// Returns the zoom as a multiplier (100% → 1.0).
    #[must_use]
    pub fn as_factor(self) -> f32 {
        f32::from(self.0) / 100.0
    }

    #[must_use]
    pub fn is_min(self) -> bool {
        self.0 <= zoom_bounds::MIN_PERCENT
    }

    #[must_use]
    pub fn is_max(self) -> bool {
        self.0 >= zoom_bounds::MAX_PERCENT
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        Self(zoom_bounds::DEFAULT_PERCENT)
    }
}

impl fmt::Display for ZoomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Request tracking
// =============================================================================

/// Identifier of one outgoing collaborator request.
///
/// Completions echo the id they were issued with; a completion whose id no
/// longer matches the pending request is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counter bumped every time the active report changes.
///
/// Anything computed against an older generation (extraction results,
/// camera captures) must not overwrite state derived from a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_clamps_to_bounds() {
        assert_eq!(ZoomLevel::from_factor(0.1).percent(), zoom_bounds::MIN_PERCENT);
        assert_eq!(ZoomLevel::from_factor(9.0).percent(), zoom_bounds::MAX_PERCENT);
        assert_eq!(ZoomLevel::from_factor(1.5).percent(), 150);
    }

    #[test]
    fn zoom_adjust_has_one_percent_resolution() {
        let zoom = ZoomLevel::default();
        assert_eq!(zoom.adjust(0.004), zoom);
        assert_eq!(zoom.adjust(-0.004).percent(), 100);
        assert_eq!(zoom.adjust(0.006).percent(), 101);
        assert_eq!(zoom.adjust(0.25).percent(), 125);
    }

    #[test]
    fn zoom_defaults_to_one() {
        assert_eq!(ZoomLevel::default().as_factor(), 1.0);
        assert_eq!(ZoomLevel::default().to_string(), "100%");
    }

    #[test]
    fn symmetric_steps_return_to_start() {
        let start = ZoomLevel::default();
        let mut zoom = start;
        for _ in 0..7 {
            zoom = zoom.adjust(0.1);
        }
        for _ in 0..7 {
            zoom = zoom.adjust(-0.1);
        }
        assert_eq!(zoom, start);
        assert_eq!(start.adjust(0.1).adjust(-0.1), start);
    }

    #[test]
    fn adjust_never_leaves_range() {
        let mut zoom = ZoomLevel::default();
        for _ in 0..100 {
            zoom = zoom.adjust(0.1);
            assert!(zoom.percent() <= zoom_bounds::MAX_PERCENT);
        }
        assert!(zoom.is_max());
        for _ in 0..100 {
            zoom = zoom.adjust(-0.1);
            assert!(zoom.percent() >= zoom_bounds::MIN_PERCENT);
        }
        assert!(zoom.is_min());
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let zoom = ZoomLevel::from_factor(2.0);
        assert_eq!(zoom.adjust(f32::NAN), zoom);
        assert_eq!(ZoomLevel::from_factor(f32::INFINITY), ZoomLevel::default());
    }

    #[test]
    fn request_ids_advance() {
        let id = RequestId::default();
        assert_ne!(id, id.next());
        assert_eq!(id.next().value(), 1);
        assert!(Generation::default() < Generation::default().next());
    }
}
