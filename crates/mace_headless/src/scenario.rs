//! Scenario loading.
//!
//! A scenario is a scripted sequence of host events played against a
//! sandbox world: the actors and blocks it starts with, then moves,
//! strikes and wind charge throws in order.

use std::collections::BTreeSet;
use std::path::Path;

use mace_core::components::{ActorId, ActorKind, Block, BlockPos, HeldItem};
use mace_core::config::MaceConfig;
use mace_core::error::MaceError;
use mace_core::math::DVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// Scenario references things that don't exist.
    #[error("Invalid scenario: {}", .0.join("; "))]
    Invalid(Vec<String>),
    /// An event referred to a projectile that was never thrown.
    #[error("Event {index}: no projectile with id {projectile}")]
    UnknownProjectile {
        /// Position of the event in the script.
        index: usize,
        /// Projectile ID the event named.
        projectile: ActorId,
    },
    /// The core rejected an event.
    #[error("Event {index}: {source}")]
    Event {
        /// Position of the event in the script.
        index: usize,
        /// Underlying core error.
        source: MaceError,
    },
}

/// An actor present when the scenario starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorSetup {
    /// Actor ID.
    pub id: ActorId,
    /// What kind of actor this is.
    #[serde(default)]
    pub kind: ActorKind,
    /// Starting position.
    pub position: DVec3,
    /// Starting velocity.
    #[serde(default)]
    pub velocity: DVec3,
    /// Whether the actor starts on the ground.
    #[serde(default = "default_on_ground")]
    pub on_ground: bool,
    /// Worn armor points.
    #[serde(default)]
    pub armor: u32,
    /// Item in hand.
    #[serde(default)]
    pub held: Option<HeldItem>,
    /// Look direction, defaults to +z.
    #[serde(default)]
    pub facing: Option<DVec3>,
}

fn default_on_ground() -> bool {
    true
}

/// A block placed before the scenario starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSetup {
    /// Where the block goes.
    pub pos: BlockPos,
    /// The block.
    pub block: Block,
}

/// What a wind charge struck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioHit {
    /// An actor.
    Entity(ActorId),
    /// Whatever block is at this position (air when none was placed).
    Block(BlockPos),
}

fn default_ticks() -> u32 {
    1
}

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScenarioEvent {
    /// An actor moves from where it is to `to`.
    Move {
        /// Moving actor.
        actor: ActorId,
        /// Destination.
        to: DVec3,
        /// Whether the actor is grounded after the move.
        #[serde(default)]
        on_ground: bool,
    },
    /// A melee hit.
    Strike {
        /// Attacking actor.
        attacker: ActorId,
        /// Struck actor.
        target: ActorId,
        /// Weapon damage before any smash bonus.
        base_damage: f64,
    },
    /// A wind charge is thrown.
    Throw {
        /// ID for the new projectile.
        projectile: ActorId,
        /// Thrower.
        #[serde(default)]
        owner: Option<ActorId>,
        /// Launch position.
        position: DVec3,
        /// Launch velocity in blocks per tick.
        velocity: DVec3,
        /// Whether the charge is burning.
        #[serde(default)]
        on_fire: bool,
    },
    /// Advance a wind charge in flight.
    TickProjectile {
        /// Projectile to advance.
        projectile: ActorId,
        /// Number of ticks.
        #[serde(default = "default_ticks")]
        ticks: u32,
    },
    /// A wind charge strikes something and bursts.
    HitProjectile {
        /// Projectile that hit.
        projectile: ActorId,
        /// What it hit.
        hit: ScenarioHit,
    },
    /// A wind charge is hit by an actor before bursting.
    AttackProjectile {
        /// Projectile being hit.
        projectile: ActorId,
        /// Actor hitting it.
        attacker: ActorId,
    },
}

/// A complete scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Tuning override; defaults when absent.
    #[serde(default)]
    pub config: Option<MaceConfig>,
    /// Starting actors.
    #[serde(default)]
    pub actors: Vec<ActorSetup>,
    /// Starting blocks.
    #[serde(default)]
    pub blocks: Vec<BlockSetup>,
    /// Scripted events, in order.
    #[serde(default)]
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from a RON string.
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// Tuning used to run this scenario.
    #[must_use]
    pub fn effective_config(&self) -> MaceConfig {
        self.config.clone().unwrap_or_default()
    }

    /// Check the scenario for problems before running it.
    ///
    /// Returns one message per problem; empty means the scenario is
    /// runnable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if let Some(config) = &self.config {
            problems.extend(config.validate().into_iter().map(|p| format!("config: {p}")));
        }

        let mut actors = BTreeSet::new();
        for actor in &self.actors {
            if !actors.insert(actor.id) {
                problems.push(format!("actor {} defined twice", actor.id));
            }
        }

        let mut projectiles = BTreeSet::new();
        for (index, event) in self.events.iter().enumerate() {
            let mut required = Vec::new();
            match event {
                ScenarioEvent::Move { actor, .. } => required.push((*actor, "actor")),
                ScenarioEvent::Strike {
                    attacker, target, ..
                } => {
                    required.push((*attacker, "attacker"));
                    required.push((*target, "target"));
                }
                ScenarioEvent::Throw {
                    projectile, owner, ..
                } => {
                    if let Some(owner) = owner {
                        required.push((*owner, "owner"));
                    }
                    if actors.contains(projectile) || !projectiles.insert(*projectile) {
                        problems.push(format!(
                            "event {index}: projectile id {projectile} already in use"
                        ));
                    }
                }
                ScenarioEvent::TickProjectile { projectile, .. }
                | ScenarioEvent::HitProjectile { projectile, .. } => {
                    if !projectiles.contains(projectile) {
                        problems.push(format!(
                            "event {index}: projectile {projectile} not thrown yet"
                        ));
                    }
                }
                ScenarioEvent::AttackProjectile {
                    projectile,
                    attacker,
                } => {
                    required.push((*attacker, "attacker"));
                    if !projectiles.contains(projectile) {
                        problems.push(format!(
                            "event {index}: projectile {projectile} not thrown yet"
                        ));
                    }
                }
            }

            for (id, role) in required {
                if !actors.contains(&id) {
                    problems.push(format!("event {index}: unknown {role} {id}"));
                }
            }
        }

        problems
    }
}
