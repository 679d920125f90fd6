//! Criterion benchmarks for the material resolver.
//!
//! - `incense`: the bundled three-level tree under each method.
//! - `wide_dag`: a layered catalog where every item uses four items from the
//!   next layer, so the tree grows as 4^depth.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use reagent_core::test_utils::*;
use reagent_core::*;

fn build_wide_dag(layers: usize, width: usize) -> Catalog {
    let mut b = CatalogBuilder::new();
    let key = |layer: usize, i: usize| format!("l{layer}_{i}");

    for layer in 0..layers {
        for i in 0..width {
            let mut item = Item::new(&key(layer, i), &key(layer, i), AcquisitionMethod::Market)
                .with_market_price(silver(10));
            if layer + 1 < layers {
                item = item.craftable();
            }
            b.register_item(item).expect("bench catalog");
        }
    }
    for layer in 0..layers.saturating_sub(1) {
        for i in 0..width {
            let ingredients = (0..4)
                .map(|k| RecipeEntry::new(&key(layer + 1, (i + k) % width), 2))
                .collect();
            b.register_recipe(&key(layer, i), None, ingredients);
        }
    }
    b.build().expect("bench catalog")
}

fn bench_incense(c: &mut Criterion) {
    let cat = incense_catalog();
    let inv: Inventory = [(PLATINUM_ESSENCE, 250), ("flame_dust", 10)]
        .into_iter()
        .collect();
    let prices = PriceBook::new();
    let mut group = c.benchmark_group("incense");
    for method in [METHOD_CHEAP, METHOD_STANDARD, METHOD_FAST] {
        group.bench_with_input(BenchmarkId::from_parameter(method), &method, |b, &m| {
            b.iter(|| resolve_all(&cat, DREAM_INCENSE, 5, Some(m), &inv, &prices))
        });
    }
    group.finish();
}

fn bench_wide_dag(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_dag");
    for layers in [4usize, 6, 8] {
        let cat = build_wide_dag(layers, 16);
        let inv = Inventory::new();
        let prices = PriceBook::new();
        group.bench_with_input(BenchmarkId::from_parameter(layers), &layers, |b, _| {
            b.iter(|| Resolver::new(&cat).resolve("l0_0", 3, None, &inv, &prices))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_incense, bench_wide_dag);
criterion_main!(benches);
