//! Draw Engine Benchmarks
//!
//! Eligibility filtering over large rosters and full festival sessions.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ld_core::{CategoryCatalog, RosterEntry};
use ld_engine::{DrawEngine, DrawError, DrawPhase, RngSource, festival_categories};

const ROSTER_SIZES: &[usize] = &[1_000, 10_000, 50_000];

fn roster(size: usize) -> Vec<RosterEntry> {
    (0..size)
        .map(|i| {
            RosterEntry::new(format!("CPN-{:06}", i), format!("Participant {}", i / 3))
                .with_total_coupons((i % 12) as u32)
        })
        .collect()
}

fn festival_engine(size: usize, seed: u64) -> DrawEngine {
    let catalog = CategoryCatalog::new(festival_categories()).unwrap_or_default();
    let mut engine = DrawEngine::with_source(catalog, RngSource::seeded(seed));
    engine.load_roster(roster(size)).unwrap();
    engine
}

fn bench_eligibility(c: &mut Criterion) {
    let mut group = c.benchmark_group("eligibility");

    for &size in ROSTER_SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let mut engine = festival_engine(size, 7);
        for _ in 0..20 {
            if engine.phase() == DrawPhase::CategoryComplete {
                engine.advance().unwrap();
            }
            engine.draw().unwrap();
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(engine.eligible().len()))
        });
    }

    group.finish();
}

fn bench_full_event(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_event");
    group.sample_size(20);

    for &size in ROSTER_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut engine = festival_engine(size, 42);
                loop {
                    match engine.phase() {
                        DrawPhase::EventComplete => break,
                        DrawPhase::CategoryComplete => {
                            engine.advance().unwrap();
                        }
                        _ => match engine.draw() {
                            Err(DrawError::NoEligibleCandidates { .. }) => {
                                engine.advance_incomplete().unwrap();
                            }
                            other => {
                                black_box(other.unwrap());
                            }
                        },
                    }
                }
                black_box(engine.winners().len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eligibility, bench_full_event);
criterion_main!(benches);
