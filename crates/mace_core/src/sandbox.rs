//! In-memory reference host.
//!
//! [`SandboxWorld`] implements [`HostWorld`] over plain maps and records
//! every mutation it receives as a [`HostEffect`]. The headless runner
//! drives scenarios through it, and tests assert on its effect log.
//!
//! Iteration is always in actor ID order so runs are reproducible.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::components::{
    ActorId, ActorState, Block, BlockKind, BlockPos, DamageCause, HeldItem, Particle, Sound,
};
use crate::error::{MaceError, Result};
use crate::host::HostWorld;
use crate::math::{Aabb, DVec3};
use crate::projectile::BlockInteraction;

/// Default health for sandbox actors.
pub const DEFAULT_HEALTH: f64 = 20.0;

/// An actor living in the sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandboxActor {
    /// Position, motion and classification.
    pub state: ActorState,
    /// Worn armor defense points.
    pub armor_points: u32,
    /// Main-hand item.
    pub held: Option<HeldItem>,
    /// Remaining health.
    pub health: f64,
}

impl SandboxActor {
    /// Wrap a state with no armor, empty hands and full health.
    #[must_use]
    pub fn new(state: ActorState) -> Self {
        Self {
            state,
            armor_points: 0,
            held: None,
            health: DEFAULT_HEALTH,
        }
    }

    /// Builder method to set armor points.
    #[must_use]
    pub fn with_armor(mut self, armor_points: u32) -> Self {
        self.armor_points = armor_points;
        self
    }

    /// Builder method to set the held item.
    #[must_use]
    pub fn holding(mut self, item: HeldItem) -> Self {
        self.held = Some(item);
        self
    }
}

/// A mutation the sandbox received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostEffect {
    /// An actor's motion was replaced.
    VelocitySet {
        /// Actor affected.
        actor: ActorId,
        /// New motion.
        velocity: DVec3,
    },
    /// An actor took damage.
    Damaged {
        /// Actor affected.
        actor: ActorId,
        /// Damage dealt.
        amount: f64,
        /// Cause of the damage.
        cause: DamageCause,
        /// Actor credited with the damage.
        source: Option<ActorId>,
    },
    /// A player was sent a sound.
    SoundSent {
        /// Player who hears it.
        player: ActorId,
        /// Sound identifier.
        sound: String,
        /// Where it plays.
        position: DVec3,
    },
    /// A particle was spawned.
    ParticleSpawned {
        /// Particle spawned.
        particle: Particle,
        /// Where it appeared.
        position: DVec3,
    },
    /// A block changed state.
    BlockInteracted {
        /// Block position.
        pos: BlockPos,
        /// What happened to it.
        interaction: BlockInteraction,
        /// Player credited with the interaction.
        by: Option<ActorId>,
    },
}

/// In-memory world implementing [`HostWorld`].
#[derive(Debug, Clone, Default)]
pub struct SandboxWorld {
    actors: BTreeMap<ActorId, SandboxActor>,
    blocks: HashMap<BlockPos, Block>,
    open_blocks: HashMap<BlockPos, bool>,
    effects: Vec<HostEffect>,
}

impl SandboxWorld {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an actor.
    pub fn spawn(&mut self, actor: SandboxActor) {
        self.actors.insert(actor.state.id, actor);
    }

    /// Remove an actor.
    pub fn despawn(&mut self, id: ActorId) -> Option<SandboxActor> {
        self.actors.remove(&id)
    }

    /// Look up an actor.
    #[must_use]
    pub fn get(&self, id: ActorId) -> Option<&SandboxActor> {
        self.actors.get(&id)
    }

    /// Look up an actor for modification.
    pub fn get_mut(&mut self, id: ActorId) -> Result<&mut SandboxActor> {
        self.actors.get_mut(&id).ok_or(MaceError::UnknownActor(id))
    }

    /// Move an actor, updating its grounded flag.
    pub fn teleport(&mut self, id: ActorId, position: DVec3, on_ground: bool) -> Result<()> {
        let actor = self.get_mut(id)?;
        actor.state.position = position;
        actor.state.on_ground = on_ground;
        Ok(())
    }

    /// All actors, in ID order.
    pub fn actors(&self) -> impl Iterator<Item = &SandboxActor> {
        self.actors.values()
    }

    /// Place a block.
    pub fn set_block(&mut self, pos: BlockPos, block: Block) {
        self.blocks.insert(pos, block);
    }

    /// Remaining health of an actor.
    #[must_use]
    pub fn health(&self, id: ActorId) -> Option<f64> {
        self.actors.get(&id).map(|a| a.health)
    }

    /// Whether an openable block is currently open.
    #[must_use]
    pub fn is_open(&self, pos: BlockPos) -> bool {
        self.open_blocks.get(&pos).copied().unwrap_or(false)
    }

    /// Every mutation recorded so far.
    #[must_use]
    pub fn effects(&self) -> &[HostEffect] {
        &self.effects
    }

    /// Drain the mutation log.
    pub fn take_effects(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.effects)
    }

    /// Number of actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the world has no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}

impl HostWorld for SandboxWorld {
    fn actor(&self, id: ActorId) -> Option<ActorState> {
        self.actors.get(&id).map(|a| a.state)
    }

    fn actors_in(&self, volume: &Aabb) -> Vec<ActorState> {
        self.actors
            .values()
            .filter(|a| volume.contains(a.state.position))
            .map(|a| a.state)
            .collect()
    }

    fn armor_points(&self, id: ActorId) -> u32 {
        self.actors.get(&id).map_or(0, |a| a.armor_points)
    }

    fn held_item(&self, id: ActorId) -> Option<HeldItem> {
        self.actors.get(&id).and_then(|a| a.held)
    }

    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        self.blocks.get(&pos).cloned()
    }

    fn set_velocity(&mut self, id: ActorId, velocity: DVec3) {
        // Projectiles are tracked by the caller, not as sandbox actors.
        if let Some(actor) = self.actors.get_mut(&id) {
            actor.state.velocity = velocity;
        }
        self.effects.push(HostEffect::VelocitySet {
            actor: id,
            velocity,
        });
    }

    fn apply_damage(
        &mut self,
        id: ActorId,
        amount: f64,
        cause: DamageCause,
        source: Option<ActorId>,
    ) {
        let Some(actor) = self.actors.get_mut(&id) else {
            warn!(actor = id, "Damage dealt to unknown sandbox actor");
            return;
        };
        actor.health = (actor.health - amount).max(0.0);
        self.effects.push(HostEffect::Damaged {
            actor: id,
            amount,
            cause,
            source,
        });
    }

    fn send_sound(&mut self, player: ActorId, sound: Sound, position: DVec3) {
        self.effects.push(HostEffect::SoundSent {
            player,
            sound: sound.name().to_string(),
            position,
        });
    }

    fn spawn_particle(&mut self, particle: Particle, position: DVec3) {
        self.effects
            .push(HostEffect::ParticleSpawned { particle, position });
    }

    fn interact_block(
        &mut self,
        pos: BlockPos,
        interaction: BlockInteraction,
        by: Option<ActorId>,
    ) {
        match interaction {
            BlockInteraction::ToggleOpen => {
                let open = self.open_blocks.entry(pos).or_insert(false);
                *open = !*open;
            }
            BlockInteraction::Extinguish => {
                if let Some(block) = self.blocks.get_mut(&pos) {
                    block.kind = match block.kind {
                        BlockKind::Candle { .. } => BlockKind::Candle { lit: false },
                        BlockKind::CandleCake { .. } => BlockKind::CandleCake { lit: false },
                        BlockKind::Campfire { .. } => BlockKind::Campfire { lit: false },
                        other => other,
                    };
                }
            }
            BlockInteraction::Press | BlockInteraction::ToggleLever => {}
        }
        self.effects.push(HostEffect::BlockInteracted {
            pos,
            interaction,
            by,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ActorKind;

    fn world() -> SandboxWorld {
        let mut world = SandboxWorld::new();
        world.spawn(SandboxActor::new(ActorState::new(
            1,
            ActorKind::Player,
            DVec3::ZERO,
        )));
        world.spawn(SandboxActor::new(ActorState::new(
            2,
            ActorKind::Living,
            DVec3::new(5.0, 0.0, 0.0),
        )));
        world
    }

    #[test]
    fn test_volume_query() {
        let world = world();
        let near: Vec<_> = world
            .actors_in(&Aabb::around(DVec3::ZERO, 2.0))
            .iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(near, vec![1]);
    }

    #[test]
    fn test_damage_reduces_health_and_records() {
        let mut world = world();
        world.apply_damage(2, 4.5, DamageCause::EntityAttack, Some(1));
        assert_eq!(world.health(2), Some(15.5));
        assert_eq!(world.effects().len(), 1);
    }

    #[test]
    fn test_damage_unknown_actor_ignored() {
        let mut world = world();
        world.apply_damage(99, 1.0, DamageCause::Projectile, None);
        assert!(world.effects().is_empty());
    }

    #[test]
    fn test_extinguish_updates_block() {
        let mut world = world();
        let pos = BlockPos::new(0, 64, 0);
        world.set_block(pos, Block::new(BlockKind::Campfire { lit: true }, "campfire"));
        world.interact_block(pos, BlockInteraction::Extinguish, None);
        assert_eq!(
            world.block_at(pos).map(|b| b.kind),
            Some(BlockKind::Campfire { lit: false })
        );
    }

    #[test]
    fn test_toggle_open_flips() {
        let mut world = world();
        let pos = BlockPos::new(1, 64, 1);
        world.interact_block(pos, BlockInteraction::ToggleOpen, Some(1));
        assert!(world.is_open(pos));
        world.interact_block(pos, BlockInteraction::ToggleOpen, Some(1));
        assert!(!world.is_open(pos));
        assert_eq!(world.take_effects().len(), 2);
        assert!(world.effects().is_empty());
    }

    #[test]
    fn test_get_mut_unknown_actor() {
        let mut world = world();
        assert!(matches!(world.get_mut(7), Err(MaceError::UnknownActor(7))));
    }
}
