//! 2-D geometry primitives.

use serde::{Deserialize, Serialize};

/// A point in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.hypot(dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_axis_aligned() {
        let a = Point::new(80.0, 100.0);
        let b = Point::new(120.0, 100.0);
        assert!((a.distance(&b) - 40.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_pythagorean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
        assert!((b.distance(&a) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(12.5, -3.0);
        assert!(p.distance(&p).abs() < f64::EPSILON);
    }
}
