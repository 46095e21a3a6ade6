//! Half-open interval on a single axis.

use std::cmp::Ordering;
use std::fmt::Display;

/// Half-open range `[low, high)` covering one axis of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub low: f64,
    pub high: f64,
}

impl Extent {
    /// Creates extent `[low, high)`.
    ///
    /// No ordering check is made here; the factories reject bins whose
    /// edges are not increasing.
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Midpoint of the extent.
    pub fn center(&self) -> f64 {
        (self.high + self.low) / 2.0
    }

    /// Returns true if `x` ∈ `[low, high)`.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.low && x < self.high
    }

    /// Checks whether two half-open extents intersect. An extent always
    /// overlaps itself; extents that only touch at an edge do not overlap.
    pub fn overlaps(&self, other: &Extent) -> bool {
        if other.low < self.low {
            return other.high > self.low;
        }
        if other.high > self.high {
            return other.low < self.high;
        }
        // other lies entirely within self
        true
    }
}

impl PartialOrd for Extent {
    /// Orders by `low`, then by `high`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.low.partial_cmp(&other.low)? {
            Ordering::Equal => self.high.partial_cmp(&other.high),
            ord => Some(ord),
        }
    }
}

impl From<(f64, f64)> for Extent {
    fn from((low, high): (f64, f64)) -> Self {
        Self::new(low, high)
    }
}

impl Display for Extent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2} - {:.2})", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(low: f64, high: f64) -> Extent {
        Extent::new(low, high)
    }

    #[test]
    fn test_width() {
        assert_eq!(ex(1.0, 2.0).width(), 1.0);
        assert_eq!(ex(1.0, 3.0).center(), 2.0);
    }

    #[test]
    fn test_equality() {
        assert_eq!(ex(1.0, 2.0), ex(1.0, 2.0));
        assert_ne!(ex(1.0, 2.0), ex(0.9, 2.0));
    }

    #[test]
    fn test_ordering() {
        let se1 = ex(1.0, 2.0);
        let se3 = ex(0.9, 2.0);
        let se4 = ex(0.9, 1.8);
        let se5 = ex(1.0, 2.2);
        let se6 = ex(1.1, 2.2);

        assert!(!(se1 < se1));
        assert!(se3 < se1);
        assert!(se4 < se1);
        assert!(se1 < se5);
        assert!(!(se5 < se1));
        assert!(se1 < se6);
        assert!(!(se6 < se1));
    }

    #[test]
    fn test_overlaps() {
        let base = ex(1.0, 2.0);
        let overlapping = [
            ex(1.0, 2.0),
            ex(0.9, 2.0),
            ex(0.9, 1.8),
            ex(1.0, 2.2),
            ex(1.1, 2.2),
            ex(1.2, 1.4),
        ];
        for other in overlapping {
            assert!(base.overlaps(&other), "{} should overlap {}", base, other);
            assert!(other.overlaps(&base), "{} should overlap {}", other, base);
        }

        // abutting extents do not overlap
        for other in [ex(0.0, 1.0), ex(2.0, 3.0)] {
            assert!(!base.overlaps(&other));
            assert!(!other.overlaps(&base));
        }
    }

    #[test]
    fn test_contains_is_half_open() {
        let e = ex(1.0, 2.0);
        assert!(e.contains(1.0));
        assert!(e.contains(1.5));
        assert!(!e.contains(0.0));
        assert!(!e.contains(2.0));
        assert!(!e.contains(3.0));
        assert!(!e.contains(f64::NAN));
    }

    #[test]
    fn test_display() {
        assert_eq!(ex(0.0, 1.5).to_string(), "(0.00 - 1.50)");
    }
}
