//! Angle arithmetic and sector geometry for the spin wheel.
//!
//! Angles are in degrees and grow clockwise, the way a CSS `rotate()` does.
//! Sector 0 starts at the 9 o'clock position (a fixed -90° offset from the top)
//! and sectors run clockwise from there.

/// Degrees in one full turn.
pub const FULL_TURN: f64 = 360.0;

/// Angle of the pointer in the wheel's local frame, before sign adjustment.
pub const POINTER_ANGLE: f64 = 90.0;

/// Offset of sector 0's leading edge, measured clockwise from the top.
pub const SECTOR_OFFSET: f64 = -90.0;

/// Reduces an angle into `[0, 360)`.
pub fn normalize(degrees: f64) -> f64 {
    let r = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round tiny negatives up to exactly 360
    if r >= FULL_TURN { 0.0 } else { r }
}

/// Non-negative clockwise rotation needed to get from `from` to `to`.
///
/// Both angles may be unnormalized. The result is always in `[0, 360)`:
/// `((360 + (to - normalize(from))) mod 360) mod 360`.
pub fn forward_delta(from: f64, to: f64) -> f64 {
    normalize(normalize(to) - normalize(from))
}

/// Ordered, contiguous sectors of equal width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectorLayout {
    labels: Vec<String>,
}

impl SectorLayout {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Angular width of every sector, `360 / count`. Zero for an empty layout.
    pub fn sector_width(&self) -> f64 {
        if self.labels.is_empty() {
            0.0
        } else {
            FULL_TURN / self.labels.len() as f64
        }
    }

    /// Leading edge of a sector in the wheel's local frame.
    pub fn sector_start(&self, index: usize) -> f64 {
        index as f64 * self.sector_width()
    }

    /// Midpoint of a sector in the wheel's local frame.
    pub fn sector_midpoint(&self, index: usize) -> f64 {
        self.sector_start(index) + self.sector_width() / 2.0
    }

    /// Wheel rotation (before extra turns) that puts the middle of `index` under the pointer.
    pub fn resting_angle(&self, index: usize) -> f64 {
        POINTER_ANGLE - self.sector_midpoint(index)
    }

    /// Sector currently under the pointer for a wheel rotated by `rotation` degrees.
    pub fn sector_under_pointer(&self, rotation: f64) -> Option<usize> {
        if self.labels.is_empty() {
            return None;
        }
        let local = normalize(POINTER_ANGLE - rotation);
        let index = (local / self.sector_width()).floor() as usize;
        Some(index.min(self.labels.len() - 1))
    }

    /// On-screen leading edge of a sector, clockwise from the top, for a given rotation.
    pub fn screen_start(&self, index: usize, rotation: f64) -> f64 {
        SECTOR_OFFSET + self.sector_start(index) + rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(360.0), 0.0);
        assert_eq!(normalize(-90.0), 270.0);
        assert_eq!(normalize(2430.0), 270.0);
        assert!(normalize(-1e-18) < FULL_TURN);
    }

    #[test]
    fn test_forward_delta_wraps_forward() {
        assert_eq!(forward_delta(350.0, 10.0), 20.0);
        assert_eq!(forward_delta(10.0, 350.0), 340.0);
        assert_eq!(forward_delta(720.0, 0.0), 0.0);
        assert_eq!(forward_delta(-10.0, 10.0), 20.0);
    }

    #[test]
    fn test_five_sector_geometry() {
        let layout = SectorLayout::new(["a", "b", "c", "d", "e"]);
        assert_eq!(layout.sector_width(), 72.0);
        assert_eq!(layout.sector_midpoint(2), 180.0);
        assert_eq!(layout.resting_angle(2), -90.0);
        assert_eq!(normalize(layout.resting_angle(2)), 270.0);
    }

    #[test]
    fn test_resting_angle_lands_under_pointer() {
        let layout = SectorLayout::new((0..10).map(|i| format!("item {i}")));
        for index in 0..layout.len() {
            let rotation = layout.resting_angle(index) + 6.0 * FULL_TURN;
            assert_eq!(layout.sector_under_pointer(rotation), Some(index));
        }
    }

    #[test]
    fn test_empty_layout() {
        let layout = SectorLayout::default();
        assert_eq!(layout.sector_width(), 0.0);
        assert_eq!(layout.sector_under_pointer(42.0), None);
        assert_eq!(layout.label(0), None);
    }
}
