//! Test fixtures and helpers.
//!
//! Pre-built sandbox worlds and actor configurations for consistent
//! testing. Every fixture places actors on flat ground at y = 64 above a
//! stone floor.

use glam::DVec3;
use mace_core::components::{
    ActorId, ActorKind, ActorState, Block, BlockKind, BlockPos, DamageModifiers, HeldItem,
};
use mace_core::listener::{EntityDamageByEntityEvent, MaceListener, MoveEvent};
use mace_core::sandbox::{SandboxActor, SandboxWorld};

/// Height of the floor surface in fixtures.
pub const GROUND_Y: f64 = 64.0;

/// Attacking player in [`smash_arena`].
pub const ATTACKER: ActorId = 1;
/// Struck target in [`smash_arena`].
pub const TARGET: ActorId = 2;
/// Living bystander close to the target in [`smash_arena`].
pub const NEAR_MOB: ActorId = 3;
/// Living bystander outside knockback range in [`smash_arena`].
pub const FAR_MOB: ActorId = 4;
/// Player spectator inside sound range in [`smash_arena`].
pub const SPECTATOR: ActorId = 5;

/// Point on the floor at the given horizontal coordinates.
#[must_use]
pub fn ground(x: f64, z: f64) -> DVec3 {
    DVec3::new(x, GROUND_Y, z)
}

/// A grounded player at `position`.
#[must_use]
pub fn player(id: ActorId, position: DVec3) -> SandboxActor {
    SandboxActor::new(ActorState::new(id, ActorKind::Player, position))
}

/// A grounded non-player creature at `position`.
#[must_use]
pub fn mob(id: ActorId, position: DVec3) -> SandboxActor {
    SandboxActor::new(ActorState::new(id, ActorKind::Living, position))
}

/// A non-living object at `position`.
#[must_use]
pub fn object(id: ActorId, position: DVec3) -> SandboxActor {
    SandboxActor::new(ActorState::new(id, ActorKind::Object, position))
}

/// Fill a square of stone under the fixtures' ground level.
pub fn lay_floor(world: &mut SandboxWorld, half_size: i32) {
    let y = GROUND_Y as i32 - 1;
    for x in -half_size..=half_size {
        for z in -half_size..=half_size {
            world.set_block(BlockPos::new(x, y, z), Block::new(BlockKind::Solid, "stone"));
        }
    }
}

/// A world set up for a mace smash.
///
/// The attacker hovers above the origin holding a mace with `modifiers`;
/// the target stands one block east. One mob stands 1.5 blocks beyond the
/// target, another well out of range, and a spectating player watches
/// from ten blocks away.
#[must_use]
pub fn smash_arena(modifiers: DamageModifiers) -> SandboxWorld {
    let mut world = SandboxWorld::new();
    lay_floor(&mut world, 16);

    let mut attacker = player(ATTACKER, DVec3::new(0.0, GROUND_Y + 1.0, 0.0))
        .holding(HeldItem::mace(modifiers));
    attacker.state.on_ground = false;
    attacker.state.velocity = DVec3::new(0.4, -1.0, 0.2);
    world.spawn(attacker);

    world.spawn(player(TARGET, ground(1.0, 0.0)));
    world.spawn(mob(NEAR_MOB, ground(2.5, 0.0)));
    world.spawn(mob(FAR_MOB, ground(12.0, 0.0)));
    world.spawn(player(SPECTATOR, ground(-10.0, 0.0)));
    world
}

/// Feed the listener a straight drop of `distance` blocks for `actor`.
///
/// The drop is split into one-block steps the way a host would report
/// it tick by tick, ending airborne.
pub fn drop_actor(listener: &MaceListener, actor: ActorId, distance: f64) {
    let mut remaining = distance;
    let mut y = GROUND_Y + 1.0 + distance;
    while remaining > 0.0 {
        let step = remaining.min(1.0);
        listener.on_move(&MoveEvent {
            actor,
            from: DVec3::new(0.0, y, 0.0),
            to: DVec3::new(0.0, y - step, 0.0),
            on_ground: false,
        });
        y -= step;
        remaining -= step;
    }
}

/// A melee hit of `base_damage` from [`ATTACKER`] on [`TARGET`].
#[must_use]
pub fn strike(base_damage: f64) -> EntityDamageByEntityEvent {
    EntityDamageByEntityEvent {
        damager: ATTACKER,
        target: TARGET,
        base_damage,
    }
}
