//! Property-based tests for the impact rules.

use mace_core::prelude::*;
use mace_test_utils::proptest::prelude::*;
use mace_test_utils::strategies::{
    arb_armor_points, arb_base_damage, arb_candidates, arb_modifiers, arb_position,
    arb_short_fall, arb_smash_fall,
};

fn strike(
    fall_distance: f64,
    modifiers: DamageModifiers,
    base_damage: f64,
    armor: u32,
) -> StrikeInput {
    StrikeInput {
        fall_distance,
        modifiers,
        base_damage,
        target_armor_points: armor,
        target_on_ground: true,
        attacker_velocity: DVec3::ZERO,
    }
}

proptest! {
    #[test]
    fn short_falls_never_smash(
        fall in arb_short_fall(),
        modifiers in arb_modifiers(),
        base in arb_base_damage(),
        armor in arb_armor_points(),
    ) {
        let resolver = ImpactResolver::default();
        prop_assert!(resolver.resolve(&strike(fall, modifiers, base, armor)).is_none());
    }

    #[test]
    fn smash_damage_is_never_negative(
        fall in arb_smash_fall(),
        modifiers in arb_modifiers(),
        base in arb_base_damage(),
        armor in arb_armor_points(),
    ) {
        let resolver = ImpactResolver::default();
        let result = resolver.resolve(&strike(fall, modifiers, base, armor));
        prop_assert!(result.is_some());
        prop_assert!(result.map_or(0.0, |r| r.damage) >= 0.0);
    }

    #[test]
    fn bonus_damage_grows_with_fall(a in 0.0f64..60.0, b in 0.0f64..60.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(calculate_bonus_damage(low) <= calculate_bonus_damage(high));
    }

    #[test]
    fn wind_burst_lift_ignores_fall(fall in arb_smash_fall(), level in 1u8..=3) {
        let resolver = ImpactResolver::default();
        let modifiers = DamageModifiers::NONE.with_wind_burst(level);
        let lift = resolver
            .resolve(&strike(fall, modifiers, 6.0, 0))
            .map(|r| r.knockback.y);
        let expected = [1.2, 2.0, 3.1][usize::from(level - 1)];
        prop_assert_eq!(lift, Some(expected));
    }

    #[test]
    fn heavy_tier_only_above_five(fall in arb_smash_fall()) {
        let resolver = ImpactResolver::default();
        let tier = resolver
            .resolve(&strike(fall, DamageModifiers::NONE, 6.0, 0))
            .map(|r| r.tier);
        let expected = if fall > 5.0 { EffectTier::HeavyGround } else { EffectTier::Ground };
        prop_assert_eq!(tier, Some(expected));
    }

    #[test]
    fn knockback_respects_radius_and_exclusions(
        center in arb_position(),
        candidates in arb_candidates(24),
    ) {
        let excluded = candidates.first().map(|(id, _)| *id);
        let mut request = AreaEffectRequest::new(center, 3.5, 0.7, 0.7);
        if let Some(id) = excluded {
            request = request.excluding(id);
        }

        let pushes = compute_knockback(&request, &candidates);

        for push in &pushes {
            prop_assert!(Some(push.actor) != excluded);
            let (_, position) = candidates
                .iter()
                .find(|(id, _)| *id == push.actor)
                .copied()
                .unwrap_or((0, DVec3::splat(f64::INFINITY)));
            prop_assert!(position.distance(center) <= 3.5);
            prop_assert!(push.magnitude >= 0.0);
            prop_assert!((push.direction.length() - 1.0).abs() < 1e-9);
            prop_assert_eq!(push.lift, 0.7);
        }
    }

    #[test]
    fn tracker_forgets_after_landing(drops in proptest::collection::vec(0.01f64..4.0, 1..10)) {
        let mut tracker = FallTracker::new();
        for drop in &drops {
            tracker.on_descend(7, *drop);
        }
        prop_assert!(tracker.distance(7).is_some());
        tracker.on_grounded(7);
        prop_assert_eq!(tracker.consume(7), None);
        prop_assert!(tracker.is_empty());
    }
}
