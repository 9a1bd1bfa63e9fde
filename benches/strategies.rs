//! Benchmarks for the formatting strategies.
//!
//! Every strategy renders every catalog pattern with freshly generated
//! arguments; criterion's `black_box` consumes the result.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use messageformat_bench::{ArgumentSource, Catalog, Strategy};
use std::sync::Arc;

fn bench_strategies(c: &mut Criterion) {
    let catalog = Catalog::new(Arc::new(ArgumentSource::seeded(0x5eed)));

    for pattern in catalog.iter() {
        let mut group = c.benchmark_group(pattern.id().name());
        for strategy in Strategy::ALL {
            let instance = strategy.build();
            let syntax = pattern.syntax(instance.variant());
            group.bench_with_input(
                BenchmarkId::from_parameter(strategy.name()),
                &syntax,
                |b, syntax| {
                    b.iter(|| {
                        let args = catalog.arguments(pattern);
                        black_box(instance.format(black_box(syntax), args.as_deref()))
                    })
                },
            );
        }
        group.finish();
    }
}

fn bench_argument_generation(c: &mut Criterion) {
    let source = ArgumentSource::seeded(0x5eed);
    c.bench_function("argument_fact", |b| b.iter(|| source.fact()));
    c.bench_function("argument_birthday", |b| b.iter(|| source.birthday()));
}

criterion_group!(benches, bench_strategies, bench_argument_generation);
criterion_main!(benches);
