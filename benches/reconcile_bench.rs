use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use glam::Vec2;

use volterria::core::config::ViewConfig;
use volterria::core::types::{Role, Sex, SimId};
use volterria::engine::{CreatureSnapshot, GrassPatchSnapshot, WorldBounds};
use volterria::render::{CoordinateMapper, Reconciler, SceneCanvas, VisualPools};

fn creatures(count: usize, offset: SimId) -> Vec<CreatureSnapshot> {
    (0..count as SimId)
        .map(|i| CreatureSnapshot {
            id: i + offset,
            x: (i % 1000) as f32,
            y: (i / 1000) as f32,
            role: if i % 5 == 0 { Role::Predator } else { Role::Prey },
            sex: if i % 2 == 0 { Sex::Male } else { Sex::Female },
        })
        .collect()
}

fn grass(count: usize) -> Vec<GrassPatchSnapshot> {
    (0..count as SimId)
        .map(|i| GrassPatchSnapshot {
            id: i,
            x: (i * 37 % 1000) as f32,
            y: (i * 91 % 1000) as f32,
            radius: 20.0,
            health: (i % 8) as f32,
            normalized_health: (i % 8) as f32 / 7.0,
        })
        .collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    let mapper = CoordinateMapper::new(
        WorldBounds::new(0.0, 1000.0, 0.0, 1000.0),
        Vec2::new(1920.0, 1080.0),
    );
    let config = ViewConfig::default();
    let patches = grass(64);

    for &count in &[100usize, 1_000, 10_000] {
        let steady = creatures(count, 0);
        // half the population replaced every frame
        let churned = creatures(count, count as SimId / 2);

        group.bench_function(format!("steady_{count}"), |b| {
            let mut canvas = SceneCanvas::default();
            let mut pools = VisualPools::new();
            let mut reconciler = Reconciler::new();
            reconciler.sync_creatures(
                &mut pools.prey,
                &mut pools.predators,
                &steady,
                &mapper,
                &config,
                &mut canvas,
            );
            b.iter(|| {
                reconciler.sync_grass(&mut pools.grass, &patches, &mapper, &config, &mut canvas);
                black_box(reconciler.sync_creatures(
                    &mut pools.prey,
                    &mut pools.predators,
                    black_box(&steady),
                    &mapper,
                    &config,
                    &mut canvas,
                ))
            });
        });

        group.bench_function(format!("churn_{count}"), |b| {
            b.iter_batched(
                || {
                    let mut canvas = SceneCanvas::default();
                    let mut pools = VisualPools::new();
                    let mut reconciler = Reconciler::new();
                    reconciler.sync_creatures(
                        &mut pools.prey,
                        &mut pools.predators,
                        &steady,
                        &mapper,
                        &config,
                        &mut canvas,
                    );
                    (canvas, pools, reconciler)
                },
                |(mut canvas, mut pools, mut reconciler)| {
                    black_box(reconciler.sync_creatures(
                        &mut pools.prey,
                        &mut pools.predators,
                        &churned,
                        &mapper,
                        &config,
                        &mut canvas,
                    ))
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reconcile);
criterion_main!(benches);
