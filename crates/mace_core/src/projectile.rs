//! Wind charge projectile rules.
//!
//! A wind charge flies until it hits a block or an entity, bursts once,
//! and is removed:
//!
//! ```text
//! InFlight --hit block / hit entity--> Resolved
//! ```
//!
//! The burst damages living actors nearby (never the thrower), pushes
//! everything nearby away from the impact, and pokes the block it hit:
//! doors swing, buttons press, levers flip, candles and campfires go out.
//!
//! While in flight the charge also reacts to being hit (it is batted away
//! from the attacker) and slows down in fluids and over time.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::area::{compute_knockback, AreaEffectRequest, KnockbackAssignment};
use crate::components::{ActorId, Block, BlockKind, BlockPos, Particle, Sound};
use crate::config::WindChargeConfig;
use crate::error::{MaceError, Result};
use crate::math::{Aabb, DVec3};

/// Fixed physical profile of a wind charge entity.
pub mod profile {
    /// Entity type identifier sent to clients.
    pub const NETWORK_ID: &str = "minecraft:wind_charge_projectile";
    /// Display name.
    pub const NAME: &str = "Wind Charge Projectile";
    /// Hit box width and height.
    pub const HITBOX_SIZE: f64 = 0.3125;
    /// Charges fly straight.
    pub const GRAVITY: f64 = 0.0;
    /// Host-side drag multiplier; slowing is handled by the tick rules.
    pub const DRAG: f64 = 1.0;
}

/// Lifecycle of a thrown charge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectilePhase {
    /// Still travelling.
    #[default]
    InFlight,
    /// Burst and removed from the world.
    Resolved,
}

/// What the charge collided with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ProjectileHit {
    /// A block face.
    Block {
        /// Position of the block.
        pos: BlockPos,
        /// Block state at the time of the hit.
        block: Block,
    },
    /// An entity.
    Entity(ActorId),
}

/// Host-side change to a block struck by a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockInteraction {
    /// Open a closed door, trapdoor or gate, or close an open one.
    ToggleOpen,
    /// Press a button.
    Press,
    /// Flip a lever.
    ToggleLever,
    /// Put out a lit candle, candle cake or campfire.
    Extinguish,
}

impl BlockInteraction {
    /// How a burst affects a block, or `None` for blocks it leaves alone.
    ///
    /// Light sources are only affected while lit.
    #[must_use]
    pub const fn for_block(kind: BlockKind) -> Option<Self> {
        match kind {
            BlockKind::Door | BlockKind::Trapdoor | BlockKind::FenceGate => Some(Self::ToggleOpen),
            BlockKind::Button => Some(Self::Press),
            BlockKind::Lever => Some(Self::ToggleLever),
            BlockKind::Candle { lit: true }
            | BlockKind::CandleCake { lit: true }
            | BlockKind::Campfire { lit: true } => Some(Self::Extinguish),
            _ => None,
        }
    }
}

/// An actor near the burst, as found by the host's volume query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BurstCandidate {
    /// Actor identifier.
    pub id: ActorId,
    /// Actor position.
    pub position: DVec3,
    /// Whether the actor can take damage.
    pub living: bool,
}

/// Damage to deal to one actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageInstruction {
    /// Actor to damage.
    pub actor: ActorId,
    /// Amount of damage.
    pub amount: f64,
}

/// Everything a burst does, for the host to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BurstEffect {
    /// Where the charge burst.
    pub position: DVec3,
    /// Sound to broadcast.
    pub sound: Sound,
    /// Particle to spawn.
    pub particle: Particle,
    /// Actor acting on struck blocks, if it is a player.
    pub interactor: Option<ActorId>,
    /// Burst damage per living actor.
    pub damage: Vec<DamageInstruction>,
    /// Push per affected actor.
    pub knockback: Vec<KnockbackAssignment>,
    /// Change to the struck block, if any.
    pub block: Option<(BlockPos, BlockInteraction)>,
}

/// What happened during one in-flight tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickReport {
    /// The charge was burning and got put out.
    pub extinguished: bool,
    /// Velocity changed this tick.
    pub slowed: bool,
}

/// Computes burst effects for a fixed tuning.
#[derive(Debug, Clone, Default)]
pub struct ProjectileImpactEngine {
    config: WindChargeConfig,
}

impl ProjectileImpactEngine {
    /// Create an engine with the given tuning.
    #[must_use]
    pub fn new(config: WindChargeConfig) -> Self {
        Self { config }
    }

    /// The tuning in use.
    #[must_use]
    pub fn config(&self) -> &WindChargeConfig {
        &self.config
    }

    /// Work out the burst of charge `self_id` thrown by `owner`.
    ///
    /// `candidates` is whatever the host found around `position`; the
    /// charge itself and anything outside the burst radius are ignored.
    /// `interactor` is the player credited with block interactions.
    #[must_use]
    pub fn on_impact(
        &self,
        self_id: ActorId,
        owner: Option<ActorId>,
        interactor: Option<ActorId>,
        position: DVec3,
        hit: &ProjectileHit,
        candidates: &[BurstCandidate],
    ) -> BurstEffect {
        let radius = self.config.burst_radius;

        let damage = candidates
            .iter()
            .filter(|c| c.id != self_id && c.living && Some(c.id) != owner)
            .filter(|c| c.position.distance(position) <= radius)
            .map(|c| DamageInstruction {
                actor: c.id,
                amount: self.config.burst_damage,
            })
            .collect();

        let request = AreaEffectRequest::new(
            position,
            radius,
            self.config.burst_power,
            self.config.burst_lift,
        )
        .excluding(self_id);
        let positions: Vec<_> = candidates.iter().map(|c| (c.id, c.position)).collect();
        let knockback = compute_knockback(&request, &positions);

        let block = match hit {
            ProjectileHit::Block { pos, block } => {
                BlockInteraction::for_block(block.kind).map(|interaction| (*pos, interaction))
            }
            ProjectileHit::Entity(_) => None,
        };

        BurstEffect {
            position,
            sound: Sound::WindBurst,
            particle: Particle::Wind,
            interactor,
            damage,
            knockback,
            block,
        }
    }
}

/// A thrown wind charge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindCharge {
    /// Entity ID of the charge itself.
    pub id: ActorId,
    /// Actor that threw it.
    pub owner: Option<ActorId>,
    /// Current position.
    pub position: DVec3,
    /// Current motion (blocks per tick).
    pub velocity: DVec3,
    /// Whether the charge is burning.
    pub on_fire: bool,
    /// Ticks since it was thrown.
    pub ticks_lived: u32,
    phase: ProjectilePhase,
}

impl WindCharge {
    /// Create a charge in flight.
    #[must_use]
    pub fn new(id: ActorId, owner: Option<ActorId>, position: DVec3, velocity: DVec3) -> Self {
        Self {
            id,
            owner,
            position,
            velocity,
            on_fire: false,
            ticks_lived: 0,
            phase: ProjectilePhase::InFlight,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> ProjectilePhase {
        self.phase
    }

    /// Whether the charge is still travelling.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.phase == ProjectilePhase::InFlight
    }

    /// Advance one tick of in-flight behaviour.
    ///
    /// Fire is put out immediately; fluids slow the charge every tick and
    /// air slows it slightly every `drag_interval` ticks.
    pub fn advance_tick(&mut self, config: &WindChargeConfig, in_fluid: bool) -> TickReport {
        let mut report = TickReport::default();
        if !self.is_in_flight() {
            return report;
        }

        self.ticks_lived = self.ticks_lived.wrapping_add(1);

        if self.on_fire {
            self.on_fire = false;
            report.extinguished = true;
        }

        if in_fluid {
            self.velocity *= config.fluid_drag;
            report.slowed = true;
        }

        if config.drag_interval > 0 && self.ticks_lived % config.drag_interval == 0 {
            self.velocity *= config.periodic_drag;
            report.slowed = true;
        }

        report
    }

    /// Bat the charge away from an attacker looking along `facing`.
    ///
    /// Returns `false` (and leaves the velocity alone) when the charge
    /// already burst or the facing has no usable direction.
    pub fn deflect(&mut self, config: &WindChargeConfig, facing: DVec3) -> bool {
        if !self.is_in_flight() {
            return false;
        }
        let Some(away) = (-facing).try_normalize() else {
            return false;
        };
        self.velocity = away * config.deflect_speed;
        true
    }

    /// Volume the charge occupies.
    #[must_use]
    pub fn hitbox(&self) -> Aabb {
        let half = DVec3::splat(profile::HITBOX_SIZE / 2.0);
        Aabb::new(self.position - half, self.position + half)
    }

    /// Move the charge along its velocity for one tick.
    ///
    /// Wind charges ignore gravity and keep their speed, so this is a
    /// straight line unless the tick rule or a deflection changed the
    /// velocity.
    pub fn step(&mut self) {
        if !self.is_in_flight() {
            return;
        }
        self.position += self.velocity;
        self.velocity.y -= profile::GRAVITY;
        self.velocity *= profile::DRAG;
    }

    /// Mark the charge as burst.
    pub fn resolve(&mut self) -> Result<()> {
        if !self.is_in_flight() {
            return Err(MaceError::ProjectileResolved(self.id));
        }
        self.phase = ProjectilePhase::Resolved;
        debug!(projectile = self.id, ticks = self.ticks_lived, "Wind charge burst");
        Ok(())
    }
}
