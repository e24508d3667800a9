//! End-to-end wind charge tests.
//!
//! A player throws a charge into a small arena; the tests check what the
//! burst does to actors and blocks around it.

use mace_core::prelude::*;
use mace_test_utils::fixtures::{ground, lay_floor, mob, object, player};

const THROWER: ActorId = 1;
const MOB: ActorId = 2;
const FAR_MOB: ActorId = 3;
const ARMOR_STAND: ActorId = 4;
const CHARGE: ActorId = 100;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Thrower stands at the origin, the burst lands at x = 5.
fn arena() -> SandboxWorld {
    let mut world = SandboxWorld::new();
    lay_floor(&mut world, 12);
    world.spawn(player(THROWER, ground(0.0, 0.0)));
    world.spawn(mob(MOB, ground(6.0, 0.0)));
    world.spawn(mob(FAR_MOB, ground(9.0, 0.0)));
    world.spawn(object(ARMOR_STAND, ground(5.0, 1.0)));
    world
}

fn thrown_charge() -> WindCharge {
    WindCharge::new(CHARGE, Some(THROWER), ground(5.0, 0.0), DVec3::new(1.0, 0.0, 0.0))
}

fn damaged(world: &SandboxWorld) -> Vec<ActorId> {
    world
        .effects()
        .iter()
        .filter_map(|e| match e {
            HostEffect::Damaged { actor, .. } => Some(*actor),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Burst
// =============================================================================

mod burst {
    use super::*;

    #[test]
    fn test_burst_damages_nearby_living_only() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        listener
            .on_wind_charge_hit(&mut world, &mut charge, &ProjectileHit::Entity(MOB))
            .expect("first hit bursts");

        assert_eq!(damaged(&world), vec![MOB]);
        assert_eq!(world.health(MOB), Some(19.0));
        assert_eq!(world.health(FAR_MOB), Some(20.0));
    }

    #[test]
    fn test_burst_damage_credits_charge() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        listener
            .on_wind_charge_hit(&mut world, &mut charge, &ProjectileHit::Entity(MOB))
            .expect("first hit bursts");

        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::Damaged {
                actor: MOB,
                cause: DamageCause::Projectile,
                source: Some(CHARGE),
                ..
            }
        )));
    }

    #[test]
    fn test_burst_pushes_objects_too() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        let effect = listener
            .on_wind_charge_hit(&mut world, &mut charge, &ProjectileHit::Entity(MOB))
            .expect("first hit bursts");

        let pushed: Vec<_> = effect.knockback.iter().map(|k| k.actor).collect();
        assert!(pushed.contains(&MOB));
        assert!(pushed.contains(&ARMOR_STAND));
        assert!(!pushed.contains(&FAR_MOB));
        assert!(!pushed.contains(&CHARGE));

        // (2 - 1) * 0.2 along +x, fixed 0.4 lift
        let push = effect
            .knockback
            .iter()
            .find(|k| k.actor == MOB)
            .expect("mob pushed");
        let v = push.velocity();
        assert!(approx(v.x, 0.2));
        assert!(approx(v.y, 0.4));
    }

    #[test]
    fn test_thrower_in_radius_is_pushed_not_hurt() {
        let mut world = arena();
        world.teleport(THROWER, ground(4.0, 0.0), true).expect("thrower exists");
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        let effect = listener
            .on_wind_charge_hit(&mut world, &mut charge, &ProjectileHit::Entity(MOB))
            .expect("first hit bursts");

        assert!(!damaged(&world).contains(&THROWER));
        assert!(effect.knockback.iter().any(|k| k.actor == THROWER));
    }

    #[test]
    fn test_burst_sound_and_particle() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        listener
            .on_wind_charge_hit(&mut world, &mut charge, &ProjectileHit::Entity(MOB))
            .expect("first hit bursts");

        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::ParticleSpawned { particle: Particle::Wind, .. }
        )));
        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::SoundSent { player: THROWER, sound, .. } if sound == "wind_charge.burst"
        )));
    }

    #[test]
    fn test_charge_bursts_once() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();
        let hit = ProjectileHit::Entity(MOB);

        assert!(listener.on_wind_charge_hit(&mut world, &mut charge, &hit).is_ok());
        let again = listener.on_wind_charge_hit(&mut world, &mut charge, &hit);

        assert!(matches!(again, Err(MaceError::ProjectileResolved(CHARGE))));
        assert_eq!(world.health(MOB), Some(19.0));
    }
}

// =============================================================================
// Block Interactions
// =============================================================================

mod blocks {
    use super::*;

    fn burst_on(world: &mut SandboxWorld, pos: BlockPos, block: Block) {
        world.set_block(pos, block.clone());
        let listener = MaceListener::default();
        let mut charge = thrown_charge();
        listener
            .on_wind_charge_hit(world, &mut charge, &ProjectileHit::Block { pos, block })
            .expect("first hit bursts");
    }

    #[test]
    fn test_door_opens() {
        let mut world = arena();
        let pos = BlockPos::new(6, 64, 0);
        burst_on(&mut world, pos, Block::new(BlockKind::Door, "oak_door"));

        assert!(world.is_open(pos));
        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::BlockInteracted {
                interaction: BlockInteraction::ToggleOpen,
                by: Some(THROWER),
                ..
            }
        )));
    }

    #[test]
    fn test_lit_campfire_is_put_out() {
        let mut world = arena();
        let pos = BlockPos::new(6, 64, 0);
        burst_on(&mut world, pos, Block::new(BlockKind::Campfire { lit: true }, "campfire"));

        let block = world.block_at(pos).expect("campfire placed");
        assert_eq!(block.kind, BlockKind::Campfire { lit: false });
    }

    #[test]
    fn test_unlit_candle_ignored() {
        let mut world = arena();
        let pos = BlockPos::new(6, 64, 0);
        burst_on(&mut world, pos, Block::new(BlockKind::Candle { lit: false }, "candle"));

        assert!(!world
            .effects()
            .iter()
            .any(|e| matches!(e, HostEffect::BlockInteracted { .. })));
    }

    #[test]
    fn test_plain_block_ignored() {
        let mut world = arena();
        let pos = BlockPos::new(6, 64, 0);
        burst_on(&mut world, pos, Block::new(BlockKind::Solid, "stone"));

        assert!(!world
            .effects()
            .iter()
            .any(|e| matches!(e, HostEffect::BlockInteracted { .. })));
    }

    #[test]
    fn test_ownerless_charge_interacts_anonymously() {
        let mut world = arena();
        let pos = BlockPos::new(6, 64, 0);
        let block = Block::new(BlockKind::Lever, "lever");
        world.set_block(pos, block.clone());

        let listener = MaceListener::default();
        let mut charge = WindCharge::new(CHARGE, None, ground(5.0, 0.0), DVec3::X);
        listener
            .on_wind_charge_hit(&mut world, &mut charge, &ProjectileHit::Block { pos, block })
            .expect("first hit bursts");

        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::BlockInteracted { interaction: BlockInteraction::ToggleLever, by: None, .. }
        )));
    }
}

// =============================================================================
// Flight
// =============================================================================

mod flight {
    use super::*;

    #[test]
    fn test_burning_charge_fizzles_out() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();
        charge.on_fire = true;

        let report = listener.tick_wind_charge(&mut world, &mut charge);

        assert!(report.extinguished);
        assert!(!charge.on_fire);
        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::SoundSent { sound, .. } if sound == "random.fizz"
        )));
    }

    #[test]
    fn test_charge_slows_in_water() {
        let mut world = arena();
        world.set_block(BlockPos::new(5, 64, 0), Block::new(BlockKind::Water, "water"));
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        let report = listener.tick_wind_charge(&mut world, &mut charge);

        assert!(report.slowed);
        assert!(approx(charge.velocity.x, 0.65));
        assert!(world.effects().iter().any(|e| matches!(
            e,
            HostEffect::VelocitySet { actor: CHARGE, .. }
        )));
    }

    #[test]
    fn test_air_drag_every_fifth_tick() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        for _ in 0..4 {
            assert!(!listener.tick_wind_charge(&mut world, &mut charge).slowed);
        }
        assert!(listener.tick_wind_charge(&mut world, &mut charge).slowed);
        assert!(approx(charge.velocity.x, 0.98));
    }

    #[test]
    fn test_deflected_away_from_attacker_facing() {
        let mut world = arena();
        world.get_mut(MOB).expect("mob exists").state.facing = DVec3::new(0.0, 0.0, 2.0);
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        assert!(listener.on_wind_charge_attacked(&mut world, &mut charge, MOB));
        assert!(approx(charge.velocity.z, -0.5));
        assert!(approx(charge.velocity.x, 0.0));
    }

    #[test]
    fn test_unknown_attacker_does_not_deflect() {
        let mut world = arena();
        let listener = MaceListener::default();
        let mut charge = thrown_charge();

        assert!(!listener.on_wind_charge_attacked(&mut world, &mut charge, 999));
        assert_eq!(charge.velocity, DVec3::X);
    }
}
