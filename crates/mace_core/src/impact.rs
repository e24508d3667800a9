//! Fall-smash damage resolution.
//!
//! This module turns one mace strike into numbers:
//! - Piecewise bonus damage from fall distance
//! - Density bonus proportional to fall distance
//! - Breach armor penetration against percentage armor reduction
//! - Effect tier (air, ground, heavy ground) for feedback selection
//! - Attacker knockback, with wind burst overriding the launch height
//!
//! Everything here is pure. The caller applies the result to the host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::components::DamageModifiers;
use crate::config::SmashConfig;
use crate::math::{horizontal, DVec3};

/// How hard the smash landed, used to pick sound and particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTier {
    /// Target was airborne.
    Air,
    /// Target was grounded.
    Ground,
    /// Target was grounded and the fall exceeded the heavy threshold.
    HeavyGround,
}

impl EffectTier {
    /// Pick the tier for a strike.
    ///
    /// The heavy threshold is exclusive: a fall of exactly the threshold
    /// is still a plain ground smash.
    #[must_use]
    pub fn classify(target_on_ground: bool, fall_distance: f64, heavy_threshold: f64) -> Self {
        match (target_on_ground, fall_distance > heavy_threshold) {
            (false, _) => Self::Air,
            (true, false) => Self::Ground,
            (true, true) => Self::HeavyGround,
        }
    }

    /// Whether the target was standing when hit.
    #[must_use]
    pub const fn is_grounded(self) -> bool {
        matches!(self, Self::Ground | Self::HeavyGround)
    }
}

/// Inputs describing one strike.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrikeInput {
    /// Distance the attacker fell before the hit.
    pub fall_distance: f64,
    /// Enchantments on the weapon.
    pub modifiers: DamageModifiers,
    /// Damage the host computed before any smash bonus.
    pub base_damage: f64,
    /// Total armor defense points worn by the target.
    pub target_armor_points: u32,
    /// Whether the target is standing on a block.
    pub target_on_ground: bool,
    /// Attacker motion at the moment of the hit.
    pub attacker_velocity: DVec3,
}

/// Outcome of a successful smash.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    /// Final damage to deal, never negative.
    pub damage: f64,
    /// Feedback tier.
    pub tier: EffectTier,
    /// Velocity to give the attacker after the hit.
    pub knockback: DVec3,
}

/// Bonus damage for a fall of `fall_distance` blocks.
///
/// Four per block for the first three blocks, two per block up to eight,
/// then one per block. The pieces meet at 12 and 22.
#[must_use]
pub fn calculate_bonus_damage(fall_distance: f64) -> f64 {
    if fall_distance <= 3.0 {
        4.0 * fall_distance
    } else if fall_distance <= 8.0 {
        12.0 + 2.0 * (fall_distance - 3.0)
    } else {
        22.0 + (fall_distance - 8.0)
    }
}

/// Resolves strikes against a fixed tuning.
#[derive(Debug, Clone, Default)]
pub struct ImpactResolver {
    config: SmashConfig,
}

impl ImpactResolver {
    /// Create a resolver with the given tuning.
    #[must_use]
    pub fn new(config: SmashConfig) -> Self {
        Self { config }
    }

    /// The tuning in use.
    #[must_use]
    pub fn config(&self) -> &SmashConfig {
        &self.config
    }

    /// Density bonus per block fallen for an enchant level.
    ///
    /// Levels without a table entry (0, or above 5) contribute nothing.
    #[must_use]
    pub fn density_multiplier(&self, level: u8) -> f64 {
        usize::from(level)
            .checked_sub(1)
            .and_then(|i| self.config.density_multipliers.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Launch height for the attacker given a wind burst level.
    #[must_use]
    pub fn attacker_lift(&self, wind_burst: u8) -> f64 {
        usize::from(wind_burst)
            .checked_sub(1)
            .and_then(|i| self.config.wind_burst_lift.get(i))
            .copied()
            .unwrap_or(self.config.attacker_lift)
    }

    /// Fraction of damage that survives the target's armor.
    ///
    /// Armor only matters when the weapon has breach; without it the
    /// host's own armor handling applies and this returns 1.
    #[must_use]
    pub fn armor_multiplier(&self, breach: u8, armor_points: u32) -> f64 {
        if breach == 0 || armor_points == 0 {
            return 1.0;
        }

        let reduction = armor_points.saturating_mul(self.config.armor_percent_per_point);
        let ignored = u32::from(breach).saturating_mul(self.config.breach_percent_per_level);
        let effective = reduction.saturating_sub(ignored);

        (100.0 - f64::from(effective)).max(0.0) / 100.0
    }

    /// Resolve a strike, or `None` if the fall was too short to smash.
    #[must_use]
    pub fn resolve(&self, strike: &StrikeInput) -> Option<ImpactResult> {
        let fall = strike.fall_distance;
        if fall.is_nan() || fall <= self.config.fall_threshold {
            return None;
        }

        let bonus = calculate_bonus_damage(fall);
        let density_bonus = fall * self.density_multiplier(strike.modifiers.density);
        let pre_armor = strike.base_damage + bonus + density_bonus;
        let damage = pre_armor
            * self.armor_multiplier(strike.modifiers.breach, strike.target_armor_points);

        let tier = EffectTier::classify(
            strike.target_on_ground,
            fall,
            self.config.heavy_threshold,
        );

        let knockback = horizontal(strike.attacker_velocity) / 2.0
            + DVec3::Y * self.attacker_lift(strike.modifiers.wind_burst);

        debug!(
            fall_distance = fall,
            bonus,
            density_bonus,
            damage,
            ?tier,
            "Resolved fall smash"
        );

        Some(ImpactResult {
            damage,
            tier,
            knockback,
        })
    }
}
