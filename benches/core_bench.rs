use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::hint::black_box;
use traffic_way_sim::engine::{
    NodeKind, PathCursor, WayGraph, WayGraphDefinition, WayPointDef,
};
use traffic_way_sim::{SimOptions, Simulation};

/// Zickzack-Strecke aus `count` Way-Points; jeder zweite Outbound wird zur Kurve.
fn build_zigzag_definition(count: u64) -> WayGraphDefinition {
    let mut points = Vec::with_capacity(count as usize);
    for id in 1..=count {
        let z = id as f32 * 20.0;
        let x = if id % 2 == 0 { 10.0 } else { 0.0 };
        let forward = if id % 2 == 0 { Vec3::X } else { Vec3::Z };
        let kind = match id {
            1 => NodeKind::Spawn,
            _ if id == count => NodeKind::End,
            _ => NodeKind::Normal,
        };
        let mut point = WayPointDef::new(id, Vec3::new(x, 0.0, z), forward).with_kind(kind);
        if id < count {
            point = point.with_outbounds(vec![id + 1]);
        }
        points.push(point);
    }

    let mut definition = WayGraphDefinition {
        lights: Vec::new(),
        points,
    };
    definition.derive_missing_curves();
    definition
}

fn bench_graph_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph_build");

    for &count in &[100u64, 1_000u64] {
        let definition = build_zigzag_definition(count);
        group.bench_with_input(BenchmarkId::new("zigzag", count), &definition, |b, def| {
            b.iter(|| {
                let graph = WayGraph::build(black_box(def)).expect("Wegnetz baut");
                black_box(graph.curve_count())
            })
        });
    }

    group.finish();
}

fn bench_cursor_advance(c: &mut Criterion) {
    let graph = WayGraph::build(&build_zigzag_definition(1_000)).expect("Wegnetz baut");

    c.bench_function("cursor_advance_full_route", |b| {
        b.iter(|| {
            let mut cursor = PathCursor::new(Vec3::new(0.0, 0.0, 20.0), Vec3::Z, 4.0);
            cursor.attach(&graph, 1);
            let mut steps = 0u32;
            while !cursor.is_arrived() && steps < 1_000_000 {
                cursor.advance(&graph, black_box(0.17));
                cursor.refresh(&graph);
                steps += 1;
            }
            black_box(steps)
        })
    });
}

fn bench_simulation_round(c: &mut Criterion) {
    let graph = WayGraph::build(&build_zigzag_definition(50)).expect("Wegnetz baut");
    let options = SimOptions {
        seed: Some(1),
        round_time: 30.0,
        ..SimOptions::default()
    };

    c.bench_function("simulation_round_30s", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(graph.clone(), options.clone());
            black_box(sim.run_to_end(1.0 / 60.0))
        })
    });
}

criterion_group!(
    benches,
    bench_graph_build,
    bench_cursor_advance,
    bench_simulation_round
);
criterion_main!(benches);
