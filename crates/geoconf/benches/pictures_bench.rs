//! Criterion benchmarks for registration across pictures.
//! Focus: picture count N in {2, 5, 10}, sequential vs rayon.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use geoconf::config::{Configuration, ConfigurationObject, Construction, LooseObjectLayout};
use geoconf::construct::composed;
use geoconf::registry::GeometryCore;
use geoconf::CoreCfg;

fn triangle_centers() -> Configuration {
    let base = Configuration::from_layout(LooseObjectLayout::Triangle);
    let l = base.loose_objects().to_vec();
    let objects = composed::library()
        .unwrap()
        .into_iter()
        .map(|c| ConfigurationObject::construct(Construction::Composed(c), &l).unwrap())
        .collect();
    base.extend(objects).unwrap()
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("pictures");
    for &n in &[2usize, 5, 10] {
        for parallel in [false, true] {
            let cfg = CoreCfg {
                pictures: n,
                parallel,
                ..CoreCfg::default()
            };
            let label = if parallel { "register_par" } else { "register_seq" };
            group.bench_with_input(BenchmarkId::new(label, n), &cfg, |b, cfg| {
                b.iter_batched(
                    || (GeometryCore::new(*cfg), triangle_centers()),
                    |(core, config)| core.try_register(&config),
                    BatchSize::SmallInput,
                )
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_register);
criterion_main!(benches);
