//! Holder versus heap workloads, run once per global allocator by `xtask bench`.
//!
//! The holder side never reaches the allocator, so its numbers should stay flat
//! across allocators while the `Box` side moves.

use criterion::{black_box, Criterion, Throughput};
use inlay::Inlay;

pub fn run(c: &mut Criterion) {
    bench_small(c);
    bench_medium(c);
    bench_churn(c);
}

fn bench_small(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro_small");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(10);

    group.bench_function("inlay_16b", |b| {
        b.iter(|| {
            black_box(Inlay::<u128, 16, 16>::new(black_box(10u128)));
        })
    });

    group.bench_function("box_16b", |b| {
        b.iter(|| {
            black_box(Box::new(black_box(10u128)));
        })
    });

    group.finish();
}

fn bench_medium(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro_medium");

    group.bench_function("inlay_1kb", |b| {
        b.iter(|| {
            black_box(Inlay::<[u8; 1024], 1024, 1>::new(black_box([0u8; 1024])));
        })
    });

    group.bench_function("box_1kb", |b| {
        b.iter(|| {
            black_box(Box::new(black_box([0u8; 1024])));
        })
    });

    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    const OPS: u64 = 1000;
    let mut group = c.benchmark_group("micro_churn");
    group.throughput(Throughput::Elements(OPS));

    group.bench_function("inlay_replace_1000", |b| {
        let mut held: Inlay<[u64; 4], 32, 8> = Inlay::new([0; 4]);
        b.iter(|| {
            for i in 0..OPS {
                black_box(held.replace([i; 4]));
            }
        })
    });

    group.bench_function("box_replace_1000", |b| {
        let mut held: Box<[u64; 4]> = Box::new([0; 4]);
        b.iter(|| {
            for i in 0..OPS {
                held = Box::new([i; 4]);
                black_box(&held);
            }
        })
    });

    group.finish();
}
