//! Sound and particle feedback for strikes and bursts.

use tracing::trace;

use crate::components::{BlockKind, BlockPos, Particle, Sound};
use crate::config::{SmashParticleConfig, MAX_PARTICLE_RINGS};
use crate::host::HostWorld;
use crate::impact::EffectTier;
use crate::math::{Aabb, DVec3};

/// Sound played for a smash of the given tier.
#[must_use]
pub const fn smash_sound(tier: EffectTier) -> Sound {
    match tier {
        EffectTier::Air => Sound::SmashAir,
        EffectTier::Ground => Sound::SmashGround,
        EffectTier::HeavyGround => Sound::HeavySmashGround,
    }
}

/// Send `sound` to every player inside the cube of half extent `radius`
/// around `position`. Returns how many players heard it.
pub fn broadcast_sound<H: HostWorld + ?Sized>(
    host: &mut H,
    sound: Sound,
    position: DVec3,
    radius: f64,
) -> usize {
    let listeners: Vec<_> = host
        .actors_in(&Aabb::around(position, radius))
        .into_iter()
        .filter(|actor| actor.kind.is_player())
        .map(|actor| actor.id)
        .collect();

    for &player in &listeners {
        host.send_sound(player, sound, position);
    }

    trace!(sound = sound.name(), listeners = listeners.len(), "Broadcast sound");
    listeners.len()
}

/// Points of the debris column around a grounded smash.
///
/// Rings of four points at `offset` on either side along x and z, stacked
/// from the feet up to `max_height` in `step` increments, capped at
/// [`MAX_PARTICLE_RINGS`] rings above the first.
#[must_use]
pub fn smash_particle_positions(center: DVec3, config: &SmashParticleConfig) -> Vec<DVec3> {
    if config.step.is_nan() || config.step <= 0.0 || config.max_height < 0.0 {
        return Vec::new();
    }

    let rings = (config.max_height / config.step).floor();
    if rings.is_nan() {
        return Vec::new();
    }
    let rings = (rings as usize).min(MAX_PARTICLE_RINGS);
    let offset = config.offset;
    let mut points = Vec::with_capacity((rings + 1) * 4);

    for ring in 0..=rings {
        let y = center.y + ring as f64 * config.step;
        points.push(DVec3::new(center.x + offset, y, center.z));
        points.push(DVec3::new(center.x - offset, y, center.z));
        points.push(DVec3::new(center.x, y, center.z + offset));
        points.push(DVec3::new(center.x, y, center.z - offset));
    }

    points
}

/// Spawn block debris around a target standing at `position`.
///
/// Debris takes the texture of the block under the target, or the
/// configured fallback when that block is air or not loaded.
pub fn spawn_smash_particles<H: HostWorld + ?Sized>(
    host: &mut H,
    position: DVec3,
    config: &SmashParticleConfig,
) -> usize {
    let below = BlockPos::containing(position).below();
    let name = match host.block_at(below) {
        Some(block) if block.kind != BlockKind::Air => block.name,
        _ => config.fallback_block.clone(),
    };

    let points = smash_particle_positions(position, config);
    for &point in &points {
        host.spawn_particle(Particle::BlockBreak(name.clone()), point);
    }
    points.len()
}
