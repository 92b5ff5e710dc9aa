use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use resource_registry::ordering::{OrderedContainer, union};

/// `n` items; every item from `stride` on must follow the item `stride`
/// positions behind it, and every 10th item also has an optional edge back.
fn build_container(n: u32, stride: u32) -> OrderedContainer<u32> {
    let c: OrderedContainer<u32> = (0..n).collect();
    for i in stride..n {
        c.add_constraint(i - stride, i, true).ok();
        if i % 10 == 0 {
            c.add_constraint(i, i - stride, false).ok();
        }
    }
    c
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for &n in &[100u32, 1_000u32] {
        let container = build_container(n, 7);

        group.bench_with_input(BenchmarkId::new("uncached", n), &n, |b, _| {
            b.iter(|| {
                let fresh = container.copy();
                black_box(fresh.resolve().ok());
            });
        });

        group.bench_with_input(BenchmarkId::new("cached", n), &n, |b, _| {
            container.resolve().ok();
            b.iter(|| black_box(container.resolve().ok()));
        });

        let parts: Vec<_> = (0..4).map(|k| build_container(n / 4, 3 + k)).collect();
        group.bench_with_input(BenchmarkId::new("union_of_4", n), &n, |b, _| {
            b.iter(|| black_box(union(parts.iter()).len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
