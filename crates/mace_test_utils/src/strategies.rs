//! Proptest strategies for impact rules.
//!
//! These strategies generate random but reproducible inputs for
//! property-based testing of the resolution math.

use glam::DVec3;
use mace_core::components::{ActorId, DamageModifiers};
use proptest::prelude::*;

/// Fall distances that never trigger a smash (0 to 1.5 inclusive).
pub fn arb_short_fall() -> impl Strategy<Value = f64> {
    0.0f64..=1.5
}

/// Fall distances that always trigger a smash.
///
/// Range: just over 1.5 to 100 blocks.
pub fn arb_smash_fall() -> impl Strategy<Value = f64> {
    1.5001f64..100.0
}

/// Base weapon damage.
pub fn arb_base_damage() -> impl Strategy<Value = f64> {
    0.0f64..20.0
}

/// Worn armor points (full diamond is 20).
pub fn arb_armor_points() -> impl Strategy<Value = u32> {
    0u32..=20
}

/// Any combination of enchant levels, including out-of-table levels.
pub fn arb_modifiers() -> impl Strategy<Value = DamageModifiers> {
    (0u8..=7, 0u8..=6, 0u8..=4).prop_map(|(density, breach, wind_burst)| DamageModifiers {
        density,
        breach,
        wind_burst,
    })
}

/// A coordinate in a small arena around the origin.
pub fn arb_coordinate() -> impl Strategy<Value = f64> {
    -8.0f64..8.0
}

/// A position in a small arena around the origin.
pub fn arb_position() -> impl Strategy<Value = DVec3> {
    (arb_coordinate(), arb_coordinate(), arb_coordinate()).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

/// A list of candidate actors with unique IDs starting at 10.
pub fn arb_candidates(max: usize) -> impl Strategy<Value = Vec<(ActorId, DVec3)>> {
    proptest::collection::vec(arb_position(), 0..max).prop_map(|positions| {
        positions
            .into_iter()
            .enumerate()
            .map(|(i, p)| (10 + i as ActorId, p))
            .collect()
    })
}
