//! Area knockback around an impact point.
//!
//! Given the point of impact and the actors the host found near it, work
//! out how hard and in which direction each one is pushed. Closer actors
//! are pushed harder; the push fades to nothing at the edge of the radius.
//!
//! The engine never searches the world itself. The host runs the spatial
//! query and passes the candidates in.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::components::ActorId;
use crate::math::{direction_between, DVec3};

/// One area knockback to compute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaEffectRequest {
    /// Point of impact.
    pub center: DVec3,
    /// Maximum distance an actor can be pushed from.
    pub radius: f64,
    /// Actors never pushed (the attacker and the struck target).
    pub excluded: BTreeSet<ActorId>,
    /// Push per block of distance inside the radius.
    pub base_power: f64,
    /// Doubles every push.
    pub heavy: bool,
    /// Vertical velocity given to every pushed actor.
    pub lift: f64,
}

impl AreaEffectRequest {
    /// Create a request with no exclusions and no heavy doubling.
    #[must_use]
    pub fn new(center: DVec3, radius: f64, base_power: f64, lift: f64) -> Self {
        Self {
            center,
            radius,
            excluded: BTreeSet::new(),
            base_power,
            heavy: false,
            lift,
        }
    }

    /// Builder method to exclude an actor.
    #[must_use]
    pub fn excluding(mut self, actor: ActorId) -> Self {
        self.excluded.insert(actor);
        self
    }

    /// Builder method to set heavy mode.
    #[must_use]
    pub fn with_heavy(mut self, heavy: bool) -> Self {
        self.heavy = heavy;
        self
    }

    /// Push strength for an actor `distance` blocks from the center.
    #[must_use]
    pub fn strength_at(&self, distance: f64) -> f64 {
        let strength = (self.radius - distance) * self.base_power;
        if self.heavy {
            strength * 2.0
        } else {
            strength
        }
    }
}

/// Push applied to one actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnockbackAssignment {
    /// Actor being pushed.
    pub actor: ActorId,
    /// Unit vector from the impact point to the actor.
    pub direction: DVec3,
    /// Horizontal push strength.
    pub magnitude: f64,
    /// Vertical velocity, independent of distance.
    pub lift: f64,
}

impl KnockbackAssignment {
    /// Velocity to set on the actor.
    ///
    /// Only the horizontal part of the direction is scaled; the vertical
    /// component is always the fixed lift.
    #[must_use]
    pub fn velocity(&self) -> DVec3 {
        DVec3::new(
            self.direction.x * self.magnitude,
            self.lift,
            self.direction.z * self.magnitude,
        )
    }
}

/// Compute the knockback for every candidate the request reaches.
///
/// Candidates are skipped when excluded, farther than the radius, or
/// sitting exactly on the center (no direction to push along). Output
/// keeps the candidates' order.
#[must_use]
pub fn compute_knockback(
    request: &AreaEffectRequest,
    candidates: &[(ActorId, DVec3)],
) -> Vec<KnockbackAssignment> {
    let mut assignments = Vec::with_capacity(candidates.len());

    for &(actor, position) in candidates {
        if request.excluded.contains(&actor) {
            continue;
        }

        let distance = position.distance(request.center);
        if distance.is_nan() || distance > request.radius {
            continue;
        }

        let Some(direction) = direction_between(request.center, position) else {
            trace!(actor, "Skipping knockback for actor at impact center");
            continue;
        };

        let magnitude = request.strength_at(distance);
        trace!(actor, distance, magnitude, "Area knockback");

        assignments.push(KnockbackAssignment {
            actor,
            direction,
            magnitude,
            lift: request.lift,
        });
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AreaEffectRequest {
        AreaEffectRequest::new(DVec3::ZERO, 3.5, 0.7, 0.7)
    }

    #[test]
    fn test_strength_falls_off_with_distance() {
        let req = request();
        let result = compute_knockback(
            &req,
            &[(1, DVec3::new(1.0, 0.0, 0.0)), (2, DVec3::new(3.0, 0.0, 0.0))],
        );
        assert_eq!(result.len(), 2);
        assert!((result[0].magnitude - 2.5 * 0.7).abs() < 1e-12);
        assert!((result[1].magnitude - 0.5 * 0.7).abs() < 1e-12);
        assert!(result[0].magnitude > result[1].magnitude);
    }

    #[test]
    fn test_out_of_radius_excluded() {
        let result = compute_knockback(&request(), &[(1, DVec3::new(3.6, 0.0, 0.0))]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_edge_of_radius_included_with_zero_strength() {
        let result = compute_knockback(&request(), &[(1, DVec3::new(0.0, 0.0, 3.5))]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].magnitude, 0.0);
        assert_eq!(result[0].velocity().y, 0.7);
    }

    #[test]
    fn test_excluded_actors_skipped() {
        let req = request().excluding(1).excluding(2);
        let result = compute_knockback(
            &req,
            &[
                (1, DVec3::new(1.0, 0.0, 0.0)),
                (2, DVec3::new(0.0, 0.0, 1.0)),
                (3, DVec3::new(-1.0, 0.0, 0.0)),
            ],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].actor, 3);
    }

    #[test]
    fn test_actor_at_center_skipped() {
        let result = compute_knockback(&request(), &[(1, DVec3::ZERO)]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_heavy_doubles_strength() {
        let candidates = [(1, DVec3::new(2.0, 0.0, 0.0))];
        let normal = compute_knockback(&request(), &candidates);
        let heavy = compute_knockback(&request().with_heavy(true), &candidates);
        assert!((heavy[0].magnitude - normal[0].magnitude * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_points_away_with_fixed_lift() {
        let result = compute_knockback(&request(), &[(1, DVec3::new(0.0, 1.0, -1.0))]);
        let velocity = result[0].velocity();
        assert_eq!(velocity.x, 0.0);
        assert!(velocity.z < 0.0);
        assert_eq!(velocity.y, 0.7);
    }

    #[test]
    fn test_direction_is_unit_length() {
        let result = compute_knockback(&request(), &[(1, DVec3::new(1.0, 1.0, 1.0))]);
        assert!((result[0].direction.length() - 1.0).abs() < 1e-12);
    }
}
