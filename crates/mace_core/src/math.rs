//! Vector math utilities.
//!
//! Positions and velocities are double precision, matching the host
//! engine's world coordinates. Spatial queries are expressed as
//! axis-aligned volumes the host can answer directly.

use serde::{Deserialize, Serialize};

pub use glam::DVec3;

/// Axis-aligned bounding volume in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner.
    pub min: DVec3,
    /// Maximum corner.
    pub max: DVec3,
}

impl Aabb {
    /// Create a volume from its two corners.
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Cube centred on `center` extending `half_extent` along every axis.
    #[must_use]
    pub fn around(center: DVec3, half_extent: f64) -> Self {
        let half = DVec3::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Check whether a point lies inside the volume (inclusive).
    #[must_use]
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Unit vector pointing from `from` to `to`.
///
/// Returns `None` when the points coincide or the result is not finite,
/// so callers never push an actor along a NaN direction.
#[must_use]
pub fn direction_between(from: DVec3, to: DVec3) -> Option<DVec3> {
    (to - from).try_normalize()
}

/// Horizontal (x/z) part of a vector, with the vertical axis zeroed.
#[must_use]
pub fn horizontal(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_around_contains() {
        let volume = Aabb::around(DVec3::new(10.0, 64.0, -5.0), 2.0);
        assert!(volume.contains(DVec3::new(10.0, 64.0, -5.0)));
        assert!(volume.contains(DVec3::new(12.0, 66.0, -3.0)));
        assert!(!volume.contains(DVec3::new(12.1, 64.0, -5.0)));
    }

    #[test]
    fn test_direction_between() {
        let dir = direction_between(DVec3::ZERO, DVec3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((dir.length() - 1.0).abs() < 1e-12);
        assert!((dir.x - 0.6).abs() < 1e-12);
        assert!((dir.z - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_direction_between_coincident_points() {
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(direction_between(p, p), None);
    }

    #[test]
    fn test_horizontal() {
        assert_eq!(
            horizontal(DVec3::new(1.5, -9.0, 2.5)),
            DVec3::new(1.5, 0.0, 2.5)
        );
    }
}
