//! Event handlers the host calls into.
//!
//! [`MaceListener`] owns the tuning and the fall tracker and turns host
//! events into mutation calls:
//!
//! - movement events feed the fall tracker
//! - melee damage events with a mace become fall smashes
//! - wind charge ticks, hits and deflections drive the projectile rules
//!
//! Handlers take `&self`; the fall tracker is locked internally so one
//! listener can be shared by every worker thread of the host.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::area::{compute_knockback, AreaEffectRequest, KnockbackAssignment};
use crate::components::{ActorId, BlockPos, DamageCause, ItemKind, Sound};
use crate::config::MaceConfig;
use crate::effects::{broadcast_sound, smash_sound, spawn_smash_particles};
use crate::error::Result;
use crate::fall::SharedFallTracker;
use crate::host::HostWorld;
use crate::impact::{ImpactResolver, ImpactResult, StrikeInput};
use crate::math::{Aabb, DVec3};
use crate::projectile::{
    BurstCandidate, BurstEffect, ProjectileHit, ProjectileImpactEngine, TickReport, WindCharge,
};

/// An actor moved between two positions this tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// Actor that moved.
    pub actor: ActorId,
    /// Position before the move.
    pub from: DVec3,
    /// Position after the move.
    pub to: DVec3,
    /// Whether the actor is on the ground after the move.
    pub on_ground: bool,
}

/// One actor hit another in melee.
///
/// `base_damage` is rewritten in place when the hit becomes a smash, the
/// same way the host's own event would be modified before it applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityDamageByEntityEvent {
    /// Actor dealing the hit.
    pub damager: ActorId,
    /// Actor receiving the hit.
    pub target: ActorId,
    /// Damage the host will deal.
    pub base_damage: f64,
}

/// Everything a smash did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmashOutcome {
    /// Damage, tier and attacker knockback.
    pub impact: ImpactResult,
    /// Fall distance that was consumed.
    pub fall_distance: f64,
    /// Bystanders pushed away from the target.
    pub bystanders: Vec<KnockbackAssignment>,
    /// Players who heard the smash.
    pub listeners: usize,
    /// Debris particles spawned.
    pub particles: usize,
}

/// Host-facing entry point for all mace and wind charge rules.
#[derive(Debug, Clone, Default)]
pub struct MaceListener {
    config: MaceConfig,
    resolver: ImpactResolver,
    burst: ProjectileImpactEngine,
    falls: SharedFallTracker,
}

impl MaceListener {
    /// Create a listener with the given tuning.
    #[must_use]
    pub fn new(config: MaceConfig) -> Self {
        Self {
            resolver: ImpactResolver::new(config.smash.clone()),
            burst: ProjectileImpactEngine::new(config.wind_charge.clone()),
            falls: SharedFallTracker::new(),
            config,
        }
    }

    /// The tuning in use.
    #[must_use]
    pub fn config(&self) -> &MaceConfig {
        &self.config
    }

    /// Fall distances of airborne actors.
    #[must_use]
    pub fn falls(&self) -> &SharedFallTracker {
        &self.falls
    }

    /// Track an actor's fall.
    ///
    /// Downward moves add to the fall distance; landing clears it. Both
    /// can happen in the same move.
    pub fn on_move(&self, event: &MoveEvent) {
        let drop = event.from.y - event.to.y;
        if drop > 0.0 {
            self.falls.on_descend(event.actor, drop);
        }
        if event.on_ground {
            self.falls.on_grounded(event.actor);
        }
    }

    /// Turn a melee hit into a fall smash when the attacker is a player
    /// swinging a mace after a long enough fall.
    ///
    /// Returns `None` when the hit stays an ordinary hit. The attacker's
    /// fall is consumed by any mace hit, even one too short to smash.
    pub fn on_entity_damage_by_entity<H: HostWorld + ?Sized>(
        &self,
        host: &mut H,
        event: &mut EntityDamageByEntityEvent,
    ) -> Option<SmashOutcome> {
        let attacker = host.actor(event.damager)?;
        if !attacker.kind.is_player() {
            return None;
        }

        let item = host.held_item(attacker.id)?;
        if item.kind != ItemKind::Mace {
            return None;
        }

        let fall_distance = self.falls.consume(attacker.id)?;

        let Some(target) = host.actor(event.target) else {
            warn!(target = event.target, "Smash target vanished before resolution");
            return None;
        };

        let target_armor_points = if target.kind.is_player() {
            host.armor_points(target.id)
        } else {
            0
        };

        let strike = StrikeInput {
            fall_distance,
            modifiers: item.modifiers,
            base_damage: event.base_damage,
            target_armor_points,
            target_on_ground: target.on_ground,
            attacker_velocity: attacker.velocity,
        };

        let Some(impact) = self.resolver.resolve(&strike) else {
            debug!(attacker = attacker.id, fall_distance, "Fall too short to smash");
            return None;
        };

        event.base_damage = impact.damage;

        let smash = &self.config.smash;
        let listeners = broadcast_sound(
            host,
            smash_sound(impact.tier),
            target.position,
            smash.sound_radius,
        );

        let particles = if impact.tier.is_grounded() {
            spawn_smash_particles(host, target.position, &smash.particles)
        } else {
            0
        };

        let request = AreaEffectRequest::new(
            target.position,
            smash.knockback_range,
            smash.knockback_power,
            smash.knockback_lift,
        )
        .excluding(attacker.id)
        .excluding(target.id)
        .with_heavy(fall_distance > smash.heavy_threshold);

        let candidates: Vec<_> = host
            .actors_in(&Aabb::around(target.position, smash.knockback_range))
            .into_iter()
            .filter(|actor| actor.kind.is_living())
            .map(|actor| (actor.id, actor.position))
            .collect();

        let bystanders = compute_knockback(&request, &candidates);
        for push in &bystanders {
            host.set_velocity(push.actor, push.velocity());
        }

        host.set_velocity(attacker.id, impact.knockback);

        debug!(
            attacker = attacker.id,
            target = target.id,
            fall_distance,
            damage = impact.damage,
            tier = ?impact.tier,
            bystanders = bystanders.len(),
            "Fall smash"
        );

        Some(SmashOutcome {
            impact,
            fall_distance,
            bystanders,
            listeners,
            particles,
        })
    }

    /// Run one in-flight tick of a wind charge.
    pub fn tick_wind_charge<H: HostWorld + ?Sized>(
        &self,
        host: &mut H,
        charge: &mut WindCharge,
    ) -> TickReport {
        let in_fluid = host
            .block_at(BlockPos::containing(charge.position))
            .is_some_and(|block| block.kind.is_fluid());

        let report = charge.advance_tick(&self.config.wind_charge, in_fluid);

        if report.extinguished {
            broadcast_sound(
                host,
                Sound::FireExtinguish,
                charge.position,
                self.config.wind_charge.sound_radius,
            );
        }
        if report.slowed {
            host.set_velocity(charge.id, charge.velocity);
        }

        report
    }

    /// A wind charge was hit by `damager` before bursting.
    ///
    /// Returns whether the charge changed course.
    pub fn on_wind_charge_attacked<H: HostWorld + ?Sized>(
        &self,
        host: &mut H,
        charge: &mut WindCharge,
        damager: ActorId,
    ) -> bool {
        let Some(attacker) = host.actor(damager) else {
            warn!(damager, projectile = charge.id, "Unknown actor attacked wind charge");
            return false;
        };

        let deflected = charge.deflect(&self.config.wind_charge, attacker.facing);
        if deflected {
            host.set_velocity(charge.id, charge.velocity);
        }
        deflected
    }

    /// Burst a wind charge that struck something.
    ///
    /// Fails if the charge already burst.
    pub fn on_wind_charge_hit<H: HostWorld + ?Sized>(
        &self,
        host: &mut H,
        charge: &mut WindCharge,
        hit: &ProjectileHit,
    ) -> Result<BurstEffect> {
        charge.resolve()?;

        let config = &self.config.wind_charge;
        let candidates: Vec<_> = host
            .actors_in(&Aabb::around(charge.position, config.burst_radius))
            .into_iter()
            .map(|actor| BurstCandidate {
                id: actor.id,
                position: actor.position,
                living: actor.kind.is_living(),
            })
            .collect();

        let interactor = charge
            .owner
            .and_then(|owner| host.actor(owner))
            .filter(|owner| owner.kind.is_player())
            .map(|owner| owner.id);

        let effect = self.burst.on_impact(
            charge.id,
            charge.owner,
            interactor,
            charge.position,
            hit,
            &candidates,
        );

        apply_burst(host, &effect, charge.id, config.sound_radius);
        Ok(effect)
    }
}

/// Apply a computed burst to the host.
pub fn apply_burst<H: HostWorld + ?Sized>(
    host: &mut H,
    effect: &BurstEffect,
    source: ActorId,
    sound_radius: f64,
) {
    host.spawn_particle(effect.particle.clone(), effect.position);
    broadcast_sound(host, effect.sound, effect.position, sound_radius);

    if let Some((pos, interaction)) = effect.block {
        host.interact_block(pos, interaction, effect.interactor);
    }

    for hit in &effect.damage {
        host.apply_damage(hit.actor, hit.amount, DamageCause::Projectile, Some(source));
    }

    for push in &effect.knockback {
        host.set_velocity(push.actor, push.velocity());
    }
}
