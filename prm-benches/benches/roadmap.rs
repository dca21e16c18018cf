//! Roadmap construction and query benchmarks.
//!
//! Construction is measured from an empty roadmap for several sample counts.
//! Queries run against a prebuilt roadmap so only splicing, the connectivity
//! check, and the search are timed.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};

use prm_benches::{
    error::BenchSetupError,
    params::RoadmapBenchParams,
    world::{DiscWorld, GOAL, START, planner},
};
use prm_core::{Configuration, SearchStrategy};

/// Seed used for obstacle placement and sampling.
const SEED: u64 = 42;

/// Obstacles scattered over the unit square.
const DISCS: usize = 24;

/// Radius of every obstacle.
const DISC_RADIUS: f64 = 0.06;

/// Construction attempts to benchmark.
const SAMPLE_COUNTS: &[usize] = &[250, 500, 1_000];

/// Candidate neighbours examined per insertion.
const MAX_NEIGHBOURS: usize = 15;

fn construct_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("construct");
    group.sample_size(10);
    let world = DiscWorld::random(DISCS, DISC_RADIUS, SEED)?;

    for &samples in SAMPLE_COUNTS {
        let params = RoadmapBenchParams {
            samples,
            max_neighbours: MAX_NEIGHBOURS,
        };
        // Fail during setup rather than inside the timed closure.
        planner(world.clone(), params, SEED)?;
        group.bench_with_input(BenchmarkId::from_parameter(params), &params, |b, params| {
            b.iter_batched(
                || planner(world.clone(), *params, SEED),
                |prm| {
                    if let Ok(mut prm) = prm {
                        let _report = prm.construct(params.samples);
                    }
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
    Ok(())
}

fn solve_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("solve");
    let params = RoadmapBenchParams {
        samples: 1_000,
        max_neighbours: MAX_NEIGHBOURS,
    };
    let mut prm = planner(DiscWorld::random(DISCS, DISC_RADIUS, SEED)?, params, SEED)?;
    prm.construct(params.samples)?;
    let start = Configuration::from(START);
    let goal = Configuration::from(GOAL);

    for strategy in [SearchStrategy::AStar, SearchStrategy::Dijkstra] {
        prm.set_search(strategy);
        prm.solve(&start, &goal)?;
        group.bench_function(BenchmarkId::from_parameter(format!("{strategy:?}")), |b| {
            b.iter(|| {
                let _found = prm.solve(&start, &goal);
            });
        });
    }

    group.finish();
    Ok(())
}

fn construct(c: &mut Criterion) {
    if let Err(err) = construct_impl(c) {
        panic!("construct benchmark setup failed: {err}");
    }
}

fn solve(c: &mut Criterion) {
    if let Err(err) = solve_impl(c) {
        panic!("solve benchmark setup failed: {err}");
    }
}

criterion_group!(benches, construct, solve);
criterion_main!(benches);
