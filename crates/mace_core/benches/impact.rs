//! Impact resolution benchmarks for mace_core.
//!
//! Run with: `cargo bench -p mace_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mace_core::prelude::*;
use mace_test_utils::fixtures::{drop_actor, smash_arena, strike, ATTACKER};

/// Pure resolution and area knockback.
pub fn resolve_benchmark(c: &mut Criterion) {
    let resolver = ImpactResolver::default();
    let input = StrikeInput {
        fall_distance: 12.0,
        modifiers: DamageModifiers::NONE.with_density(5).with_breach(4),
        base_damage: 6.0,
        target_armor_points: 20,
        target_on_ground: true,
        attacker_velocity: DVec3::new(0.3, -2.0, 0.1),
    };
    c.bench_function("resolve_strike", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&input))));
    });

    let request = AreaEffectRequest::new(DVec3::ZERO, 3.5, 0.7, 0.7).excluding(0);
    let candidates: Vec<_> = (0..64u64)
        .map(|i| {
            let angle = i as f64 * 0.3;
            (i, DVec3::new(angle.cos() * 3.0, 0.0, angle.sin() * 3.0) * (i % 4) as f64 / 3.0)
        })
        .collect();
    c.bench_function("compute_knockback_64", |b| {
        b.iter(|| black_box(compute_knockback(black_box(&request), black_box(&candidates))));
    });
}

/// Full listener path against the sandbox host.
pub fn listener_benchmark(c: &mut Criterion) {
    c.bench_function("smash_end_to_end", |b| {
        b.iter_batched(
            || {
                let listener = MaceListener::default();
                drop_actor(&listener, ATTACKER, 8.0);
                (listener, smash_arena(DamageModifiers::NONE))
            },
            |(listener, mut world)| {
                let mut event = strike(6.0);
                black_box(listener.on_entity_damage_by_entity(&mut world, &mut event))
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, resolve_benchmark, listener_benchmark);
criterion_main!(benches);
