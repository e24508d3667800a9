//! Tuning data for the mace and wind charge.
//!
//! Every constant the resolution rules use lives here so a server can
//! retune the weapons without a rebuild. All structs deserialize from RON
//! and fall back to the vanilla values for any field left out.
//!
//! **Note:** This module contains no IO - it only parses strings.
//! File loading is handled by `mace_headless`.
//!
//! # Example RON
//!
//! ```ron
//! MaceConfig(
//!     smash: SmashConfig(
//!         fall_threshold: 1.5,
//!         heavy_threshold: 5.0,
//!         knockback_range: 3.5,
//!     ),
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{MaceError, Result};

/// Most rings a smash debris column may have.
pub const MAX_PARTICLE_RINGS: usize = 1024;

/// Complete tuning set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MaceConfig {
    /// Fall-smash (mace) tuning.
    pub smash: SmashConfig,
    /// Wind charge projectile tuning.
    pub wind_charge: WindChargeConfig,
}

/// Fall-smash tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmashConfig {
    /// Fall distance at or below which a strike is a plain hit.
    pub fall_threshold: f64,
    /// Fall distance above which a grounded hit becomes a heavy smash.
    pub heavy_threshold: f64,
    /// Radius around the target in which bystanders are pushed.
    pub knockback_range: f64,
    /// Knockback per block of distance inside the range.
    pub knockback_power: f64,
    /// Vertical lift applied to pushed bystanders.
    pub knockback_lift: f64,
    /// Attacker lift when the mace has no wind burst.
    pub attacker_lift: f64,
    /// Attacker lift for wind burst levels 1, 2 and 3.
    pub wind_burst_lift: [f64; 3],
    /// Density bonus per block fallen for density levels 1 to 5.
    pub density_multipliers: [f64; 5],
    /// Armor reduction percent per armor point.
    pub armor_percent_per_point: u32,
    /// Armor reduction percent ignored per breach level.
    pub breach_percent_per_level: u32,
    /// Half extent of the cube in which players hear the smash.
    pub sound_radius: f64,
    /// Smash particle column tuning.
    pub particles: SmashParticleConfig,
}

impl Default for SmashConfig {
    fn default() -> Self {
        Self {
            fall_threshold: 1.5,
            heavy_threshold: 5.0,
            knockback_range: 3.5,
            knockback_power: 0.7,
            knockback_lift: 0.7,
            attacker_lift: 0.01,
            wind_burst_lift: [1.2, 2.0, 3.1],
            density_multipliers: [0.5, 1.0, 1.5, 2.0, 2.5],
            armor_percent_per_point: 4,
            breach_percent_per_level: 15,
            sound_radius: 20.0,
            particles: SmashParticleConfig::default(),
        }
    }
}

/// Shape of the debris column spawned around a grounded smash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmashParticleConfig {
    /// Height of the column above the target's feet.
    pub max_height: f64,
    /// Vertical spacing between rings.
    pub step: f64,
    /// Horizontal offset of each ring point from the target.
    pub offset: f64,
    /// Block used for debris when the target stands on air.
    pub fallback_block: String,
}

impl Default for SmashParticleConfig {
    fn default() -> Self {
        Self {
            max_height: 4.0,
            step: 0.5,
            offset: 1.5,
            fallback_block: "grass".to_string(),
        }
    }
}

/// Wind charge tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindChargeConfig {
    /// Radius of the burst.
    pub burst_radius: f64,
    /// Knockback per block of distance inside the burst.
    pub burst_power: f64,
    /// Vertical lift applied by the burst.
    pub burst_lift: f64,
    /// Damage dealt to every living actor caught in the burst.
    pub burst_damage: f64,
    /// Half extent of the cube in which players hear the burst.
    pub sound_radius: f64,
    /// Speed of a charge knocked away by an attack.
    pub deflect_speed: f64,
    /// Velocity multiplier applied each tick inside water or lava.
    pub fluid_drag: f64,
    /// Velocity multiplier applied every `drag_interval` ticks.
    pub periodic_drag: f64,
    /// Tick interval for `periodic_drag`.
    pub drag_interval: u32,
}

impl Default for WindChargeConfig {
    fn default() -> Self {
        Self {
            burst_radius: 2.0,
            burst_power: 0.2,
            burst_lift: 0.4,
            burst_damage: 1.0,
            sound_radius: 15.0,
            deflect_speed: 0.5,
            fluid_drag: 0.65,
            periodic_drag: 0.98,
            drag_interval: 5,
        }
    }
}

impl MaceConfig {
    /// Parse tuning data from a RON string and validate it.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let config: Self = ron::from_str(source)?;
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(MaceError::InvalidConfig(errors))
        }
    }

    /// Check the tuning for values the rules cannot work with.
    ///
    /// Returns one message per problem; an empty list means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let smash = &self.smash;
        let charge = &self.wind_charge;

        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite"));
            }
        }

        if !is_non_negative(smash.fall_threshold) {
            errors.push("smash.fall_threshold must be non-negative".to_string());
        }
        if smash.heavy_threshold < smash.fall_threshold {
            errors.push("smash.heavy_threshold must not be below fall_threshold".to_string());
        }
        if !is_positive(smash.knockback_range) {
            errors.push("smash.knockback_range must be positive".to_string());
        }
        if smash.knockback_power < 0.0 {
            errors.push("smash.knockback_power must be non-negative".to_string());
        }
        if !is_positive(smash.sound_radius) {
            errors.push("smash.sound_radius must be positive".to_string());
        }
        if smash.density_multipliers.iter().any(|m| *m < 0.0) {
            errors.push("smash.density_multipliers must be non-negative".to_string());
        }
        if !is_positive(smash.particles.step) {
            errors.push("smash.particles.step must be positive".to_string());
        }
        if smash.particles.max_height < 0.0 {
            errors.push("smash.particles.max_height must be non-negative".to_string());
        }
        if smash.particles.max_height / smash.particles.step > MAX_PARTICLE_RINGS as f64 {
            errors.push(format!(
                "smash.particles.max_height / step must not exceed {MAX_PARTICLE_RINGS} rings"
            ));
        }
        if smash.particles.fallback_block.is_empty() {
            errors.push("smash.particles.fallback_block must not be empty".to_string());
        }

        if !is_positive(charge.burst_radius) {
            errors.push("wind_charge.burst_radius must be positive".to_string());
        }
        if charge.burst_damage < 0.0 {
            errors.push("wind_charge.burst_damage must be non-negative".to_string());
        }
        if !is_positive(charge.sound_radius) {
            errors.push("wind_charge.sound_radius must be positive".to_string());
        }
        if !(0.0..=1.0).contains(&charge.fluid_drag) {
            errors.push("wind_charge.fluid_drag must be within 0..=1".to_string());
        }
        if !(0.0..=1.0).contains(&charge.periodic_drag) {
            errors.push("wind_charge.periodic_drag must be within 0..=1".to_string());
        }
        if charge.drag_interval == 0 {
            errors.push("wind_charge.drag_interval must be at least 1".to_string());
        }

        errors
    }

    /// Every floating point tuning value with its dotted name.
    fn float_fields(&self) -> Vec<(String, f64)> {
        let smash = &self.smash;
        let charge = &self.wind_charge;

        let mut fields: Vec<(String, f64)> = [
            ("smash.fall_threshold", smash.fall_threshold),
            ("smash.heavy_threshold", smash.heavy_threshold),
            ("smash.knockback_range", smash.knockback_range),
            ("smash.knockback_power", smash.knockback_power),
            ("smash.knockback_lift", smash.knockback_lift),
            ("smash.attacker_lift", smash.attacker_lift),
            ("smash.sound_radius", smash.sound_radius),
            ("smash.particles.max_height", smash.particles.max_height),
            ("smash.particles.step", smash.particles.step),
            ("smash.particles.offset", smash.particles.offset),
            ("wind_charge.burst_radius", charge.burst_radius),
            ("wind_charge.burst_power", charge.burst_power),
            ("wind_charge.burst_lift", charge.burst_lift),
            ("wind_charge.burst_damage", charge.burst_damage),
            ("wind_charge.sound_radius", charge.sound_radius),
            ("wind_charge.deflect_speed", charge.deflect_speed),
            ("wind_charge.fluid_drag", charge.fluid_drag),
            ("wind_charge.periodic_drag", charge.periodic_drag),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        for (i, lift) in smash.wind_burst_lift.iter().enumerate() {
            fields.push((format!("smash.wind_burst_lift[{i}]"), *lift));
        }
        for (i, multiplier) in smash.density_multipliers.iter().enumerate() {
            fields.push((format!("smash.density_multipliers[{i}]"), *multiplier));
        }
        fields
    }
}

/// Positive and not NaN.
fn is_positive(value: f64) -> bool {
    value > 0.0
}

/// Zero or above and not NaN.
fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}
