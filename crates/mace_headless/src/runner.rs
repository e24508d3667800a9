//! Scenario runner.
//!
//! Plays a [`Scenario`]'s events against a [`SandboxWorld`] through a
//! [`MaceListener`] and collects everything the core asked the host to do.

use std::collections::BTreeMap;

use mace_core::components::{ActorId, ActorState, Block, DamageCause};
use mace_core::error::MaceError;
use mace_core::host::HostWorld;
use mace_core::listener::{EntityDamageByEntityEvent, MaceListener, MoveEvent, SmashOutcome};
use mace_core::projectile::{ProjectileHit, WindCharge};
use mace_core::sandbox::{HostEffect, SandboxActor, SandboxWorld};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::scenario::{Scenario, ScenarioError, ScenarioEvent, ScenarioHit};

/// Result of running one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Number of events played.
    pub events_processed: usize,
    /// Every host mutation, in order.
    pub effects: Vec<HostEffect>,
    /// Smashes that landed.
    pub smashes: Vec<SmashOutcome>,
    /// Fall distances still tracked at the end.
    pub fall_states_remaining: Vec<(ActorId, f64)>,
    /// Health of every actor at the end.
    pub final_health: BTreeMap<ActorId, f64>,
}

impl ScenarioReport {
    /// Pretty JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Drives one scenario.
pub struct ScenarioRunner {
    listener: MaceListener,
    world: SandboxWorld,
    charges: BTreeMap<ActorId, WindCharge>,
    smashes: Vec<SmashOutcome>,
    events_processed: usize,
}

impl ScenarioRunner {
    /// Set up the world a scenario starts in.
    #[must_use]
    pub fn new(scenario: &Scenario) -> Self {
        let mut world = SandboxWorld::new();

        for setup in &scenario.actors {
            let mut state = ActorState::new(setup.id, setup.kind, setup.position);
            state.velocity = setup.velocity;
            state.on_ground = setup.on_ground;
            if let Some(facing) = setup.facing {
                state.facing = facing;
            }
            let mut actor = SandboxActor::new(state).with_armor(setup.armor);
            actor.held = setup.held;
            world.spawn(actor);
        }

        for setup in &scenario.blocks {
            world.set_block(setup.pos, setup.block.clone());
        }

        Self {
            listener: MaceListener::new(scenario.effective_config()),
            world,
            charges: BTreeMap::new(),
            smashes: Vec::new(),
            events_processed: 0,
        }
    }

    /// The sandbox host.
    #[must_use]
    pub fn world(&self) -> &SandboxWorld {
        &self.world
    }

    /// Wind charges thrown so far, burst or not.
    #[must_use]
    pub fn charges(&self) -> &BTreeMap<ActorId, WindCharge> {
        &self.charges
    }

    /// Play one event.
    pub fn apply(&mut self, index: usize, event: &ScenarioEvent) -> Result<(), ScenarioError> {
        let event_error = |source| ScenarioError::Event { index, source };

        match event {
            ScenarioEvent::Move {
                actor,
                to,
                on_ground,
            } => {
                let from = self
                    .world
                    .actor(*actor)
                    .map(|state| state.position)
                    .ok_or_else(|| event_error(MaceError::UnknownActor(*actor)))?;
                self.world
                    .teleport(*actor, *to, *on_ground)
                    .map_err(event_error)?;
                self.listener.on_move(&MoveEvent {
                    actor: *actor,
                    from,
                    to: *to,
                    on_ground: *on_ground,
                });
            }
            ScenarioEvent::Strike {
                attacker,
                target,
                base_damage,
            } => {
                let mut hit = EntityDamageByEntityEvent {
                    damager: *attacker,
                    target: *target,
                    base_damage: *base_damage,
                };
                let outcome = self
                    .listener
                    .on_entity_damage_by_entity(&mut self.world, &mut hit);
                // The host deals the (possibly rewritten) melee damage itself.
                self.world.apply_damage(
                    *target,
                    hit.base_damage,
                    DamageCause::EntityAttack,
                    Some(*attacker),
                );
                if let Some(outcome) = outcome {
                    self.smashes.push(outcome);
                }
            }
            ScenarioEvent::Throw {
                projectile,
                owner,
                position,
                velocity,
                on_fire,
            } => {
                let mut charge = WindCharge::new(*projectile, *owner, *position, *velocity);
                charge.on_fire = *on_fire;
                self.charges.insert(*projectile, charge);
            }
            ScenarioEvent::TickProjectile { projectile, ticks } => {
                let charge = charge_mut(&mut self.charges, index, *projectile)?;
                for _ in 0..*ticks {
                    if !charge.is_in_flight() {
                        break;
                    }
                    self.listener.tick_wind_charge(&mut self.world, charge);
                    charge.step();
                }
            }
            ScenarioEvent::HitProjectile { projectile, hit } => {
                let hit = match *hit {
                    ScenarioHit::Entity(actor) => ProjectileHit::Entity(actor),
                    ScenarioHit::Block(pos) => ProjectileHit::Block {
                        pos,
                        block: self.world.block_at(pos).unwrap_or_else(Block::air),
                    },
                };
                let charge = charge_mut(&mut self.charges, index, *projectile)?;
                self.listener
                    .on_wind_charge_hit(&mut self.world, charge, &hit)
                    .map_err(event_error)?;
            }
            ScenarioEvent::AttackProjectile {
                projectile,
                attacker,
            } => {
                let charge = charge_mut(&mut self.charges, index, *projectile)?;
                self.listener
                    .on_wind_charge_attacked(&mut self.world, charge, *attacker);
            }
        }

        self.events_processed += 1;
        debug!(index, "Event applied");
        Ok(())
    }

    /// Finish the run and build its report.
    #[must_use]
    pub fn into_report(mut self, name: &str) -> ScenarioReport {
        let final_health = self
            .world
            .actors()
            .map(|actor| (actor.state.id, actor.health))
            .collect();

        ScenarioReport {
            name: name.to_string(),
            events_processed: self.events_processed,
            effects: self.world.take_effects(),
            smashes: self.smashes,
            fall_states_remaining: self.listener.falls().with(|falls| falls.snapshot()),
            final_health,
        }
    }
}

fn charge_mut(
    charges: &mut BTreeMap<ActorId, WindCharge>,
    index: usize,
    projectile: ActorId,
) -> Result<&mut WindCharge, ScenarioError> {
    charges
        .get_mut(&projectile)
        .ok_or(ScenarioError::UnknownProjectile { index, projectile })
}

/// Run a scenario from start to finish.
pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
    let problems = scenario.validate();
    if !problems.is_empty() {
        return Err(ScenarioError::Invalid(problems));
    }

    let mut runner = ScenarioRunner::new(scenario);
    for (index, event) in scenario.events.iter().enumerate() {
        runner.apply(index, event)?;
    }

    let report = runner.into_report(&scenario.name);
    info!(
        scenario = %report.name,
        events = report.events_processed,
        effects = report.effects.len(),
        smashes = report.smashes.len(),
        "Scenario complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mace_core::components::{BlockKind, BlockPos};
    use mace_core::math::DVec3;

    const SMASH: &str = r#"(
        name: "smash",
        actors: [
            (id: 1, kind: Player, position: (0.0, 70.0, 0.0), on_ground: false,
             held: Some((kind: Mace, modifiers: (density: 0, breach: 0, wind_burst: 0)))),
            (id: 2, position: (1.0, 64.0, 0.0)),
        ],
        events: [
            Move(actor: 1, to: (0.0, 68.0, 0.0)),
            Move(actor: 1, to: (0.0, 66.0, 0.0)),
            Strike(attacker: 1, target: 2, base_damage: 6.0),
        ],
    )"#;

    const BURST: &str = r#"(
        name: "burst",
        actors: [
            (id: 1, kind: Player, position: (0.0, 64.0, 0.0)),
            (id: 2, position: (6.0, 64.0, 0.0)),
        ],
        blocks: [
            (pos: (x: 6, y: 64, z: 1), block: (kind: Door, name: "oak_door")),
        ],
        events: [
            Throw(
                projectile: 50,
                owner: Some(1),
                position: (2.0, 64.0, 0.0),
                velocity: (1.0, 0.0, 0.0),
                on_fire: true,
            ),
            TickProjectile(projectile: 50, ticks: 3),
            HitProjectile(projectile: 50, hit: Block((x: 6, y: 64, z: 1))),
        ],
    )"#;

    #[test]
    fn test_smash_scenario() {
        let scenario = Scenario::from_ron_str(SMASH).unwrap();
        let report = run_scenario(&scenario).unwrap();

        assert_eq!(report.events_processed, 3);
        assert_eq!(report.smashes.len(), 1);
        assert_eq!(report.smashes[0].impact.damage, 20.0);
        assert_eq!(report.final_health[&2], 0.0);
        assert!(report.fall_states_remaining.is_empty());
    }

    #[test]
    fn test_burst_scenario() {
        let scenario = Scenario::from_ron_str(BURST).unwrap();
        let mut runner = ScenarioRunner::new(&scenario);
        for (index, event) in scenario.events.iter().enumerate() {
            runner.apply(index, event).unwrap();
        }

        let charge = &runner.charges()[&50];
        assert!(!charge.is_in_flight());
        assert!(!charge.on_fire);
        assert_eq!(charge.position, DVec3::new(5.0, 64.0, 0.0));
        assert!(runner.world().is_open(BlockPos::new(6, 64, 1)));

        let report = runner.into_report("burst");
        assert_eq!(report.final_health[&2], 19.0);
        assert!(report.effects.iter().any(|e| matches!(
            e,
            HostEffect::SoundSent { sound, .. } if sound == "random.fizz"
        )));
    }

    #[test]
    fn test_second_hit_is_an_error() {
        let mut scenario = Scenario::from_ron_str(BURST).unwrap();
        scenario.events.push(ScenarioEvent::HitProjectile {
            projectile: 50,
            hit: ScenarioHit::Entity(2),
        });

        let err = run_scenario(&scenario).unwrap_err();
        assert!(matches!(err, ScenarioError::Event { index: 3, .. }));
    }

    #[test]
    fn test_hit_on_empty_block_is_air() {
        let mut scenario = Scenario::from_ron_str(BURST).unwrap();
        scenario.blocks.clear();
        scenario.blocks.push(crate::scenario::BlockSetup {
            pos: BlockPos::new(9, 64, 9),
            block: Block::new(BlockKind::Lever, "lever"),
        });

        let report = run_scenario(&scenario).unwrap();
        assert!(!report
            .effects
            .iter()
            .any(|e| matches!(e, HostEffect::BlockInteracted { .. })));
    }

    #[test]
    fn test_invalid_scenario_rejected() {
        let scenario = Scenario {
            name: "bad".to_string(),
            events: vec![ScenarioEvent::Move {
                actor: 7,
                to: DVec3::ZERO,
                on_ground: true,
            }],
            ..Scenario::default()
        };

        assert!(matches!(
            run_scenario(&scenario),
            Err(ScenarioError::Invalid(_))
        ));
    }
}
