//! Capabilities the host engine provides to the core.
//!
//! The core never sees the host's own entity or world types. Everything
//! it needs to read or change goes through [`HostWorld`], which a server
//! implements once over its real world and tests implement over
//! [`crate::sandbox::SandboxWorld`].

use crate::components::{
    ActorId, ActorState, Block, BlockPos, DamageCause, HeldItem, Particle, Sound,
};
use crate::math::{Aabb, DVec3};
use crate::projectile::BlockInteraction;

/// Query and mutation surface of a live world.
pub trait HostWorld {
    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Current snapshot of an actor, or `None` if it no longer exists.
    fn actor(&self, id: ActorId) -> Option<ActorState>;

    /// Every actor whose position lies inside `volume`.
    fn actors_in(&self, volume: &Aabb) -> Vec<ActorState>;

    /// Total armor defense points worn by an actor (0 when none).
    fn armor_points(&self, id: ActorId) -> u32;

    /// Item in the actor's main hand, or `None` when empty.
    fn held_item(&self, id: ActorId) -> Option<HeldItem>;

    /// Block at a position, or `None` in unloaded terrain.
    fn block_at(&self, pos: BlockPos) -> Option<Block>;

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Replace an actor's motion.
    fn set_velocity(&mut self, id: ActorId, velocity: DVec3);

    /// Deal damage to an actor.
    fn apply_damage(
        &mut self,
        id: ActorId,
        amount: f64,
        cause: DamageCause,
        source: Option<ActorId>,
    );

    /// Play a named sound at a position for one player.
    fn send_sound(&mut self, player: ActorId, sound: Sound, position: DVec3);

    /// Spawn a particle effect at a position.
    fn spawn_particle(&mut self, particle: Particle, position: DVec3);

    /// Change a block's state as if `by` had interacted with it.
    fn interact_block(
        &mut self,
        pos: BlockPos,
        interaction: BlockInteraction,
        by: Option<ActorId>,
    );
}
