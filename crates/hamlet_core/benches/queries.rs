//! Registry query benchmarks for hamlet_core.
//!
//! Run with: `cargo bench -p hamlet_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hamlet_core::prelude::*;
use hamlet_test_utils::fixtures::{building, house, px, standard_registry};

/// Fills every other grid column with 1×1 cells and scatters houses.
fn populated_registry() -> CellRegistry {
    let mut registry = standard_registry();
    for row in 0..18 {
        for col in (0..25).step_by(2) {
            let blueprint = if (row + col) % 7 == 0 {
                house(((row + col) % 3) as u8 + 1, 4)
            } else {
                building("hut", 1, 1)
            };
            let _ = registry.place_cell(Cell::from_blueprint(&blueprint), Some(px(col * 32, row * 32)));
        }
    }
    registry
}

/// Spatial query benchmarks over a populated registry.
pub fn query_benchmark(c: &mut Criterion) {
    let registry = populated_registry();

    c.bench_function("cell_at_hit", |b| {
        b.iter(|| black_box(registry.cell_at(black_box(px(770, 540)))))
    });

    c.bench_function("cell_at_miss", |b| {
        b.iter(|| black_box(registry.cell_at(black_box(px(40, 40)))))
    });

    c.bench_function("is_empty_at_3x3", |b| {
        b.iter(|| black_box(registry.is_empty_at(black_box(px(32, 32)), Footprint::square(3))))
    });

    c.bench_function("nearest_houses_to", |b| {
        b.iter(|| black_box(registry.nearest_houses_to(black_box(px(400, 300)), None).len()))
    });
}

criterion_group!(benches, query_benchmark);
criterion_main!(benches);
