//! Throughput Benchmark for TupleSpace
//!
//! This benchmark measures the performance of the tuple space and the frame
//! codec under various workloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use std::time::Duration;
use tuplespace::protocol::frame;
use tuplespace::stats::ServerStats;
use tuplespace::store::TupleSpace;

fn new_space() -> Arc<TupleSpace> {
    Arc::new(TupleSpace::new(Arc::new(ServerStats::new())))
}

/// Benchmark insert operations
fn bench_insert(c: &mut Criterion) {
    let space = new_space();

    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert_small", |b| {
        let mut i = 0u64;
        b.iter(|| {
            space.insert(format!("key:{}", i), "small_value".to_string());
            i += 1;
        });
    });

    group.bench_function("insert_medium", |b| {
        let mut i = 0u64;
        let value = "x".repeat(512);
        b.iter(|| {
            space.insert(format!("key:{}", i), value.clone());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark peek operations
fn bench_peek(c: &mut Criterion) {
    let space = new_space();

    // Pre-populate with data
    for i in 0..100_000 {
        space.insert(format!("key:{}", i), format!("value:{}", i));
    }

    let mut group = c.benchmark_group("peek");
    group.throughput(Throughput::Elements(1));

    group.bench_function("peek_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(space.peek(&format!("key:{}", i % 100_000)));
            i += 1;
        });
    });

    group.bench_function("peek_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(space.peek(&format!("missing:{}", i)));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark take operations (insert-then-take pairs, plus misses)
fn bench_take(c: &mut Criterion) {
    let space = new_space();

    let mut group = c.benchmark_group("take");
    group.throughput(Throughput::Elements(1));

    group.bench_function("insert_then_take", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key:{}", i);
            space.insert(key.clone(), "value".to_string());
            black_box(space.take(&key));
            i += 1;
        });
    });

    group.bench_function("take_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            black_box(space.take(&format!("missing:{}", i)));
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark mixed workload (80% peeks, 20% inserts)
fn bench_mixed(c: &mut Criterion) {
    let space = new_space();

    // Pre-populate
    for i in 0..10_000 {
        space.insert(format!("key:{}", i), format!("value:{}", i));
    }

    let mut group = c.benchmark_group("mixed");
    group.throughput(Throughput::Elements(1));

    group.bench_function("80_peek_20_insert", |b| {
        let mut i = 0u64;
        b.iter(|| {
            if i % 5 == 0 {
                // 20% inserts
                space.insert(format!("new:{}", i), "value".to_string());
            } else {
                // 80% peeks
                black_box(space.peek(&format!("key:{}", i % 10_000)));
            }
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark concurrent access
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_mixed", |b| {
        b.iter(|| {
            let space = new_space();
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let space = Arc::clone(&space);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = format!("key:{}:{}", t, i);
                            space.insert(key.clone(), "value".to_string());
                            space.peek(&key);
                            space.take(&key);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(space.len());
        });
    });

    group.finish();
}

/// Benchmark the frame codec
fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    group.throughput(Throughput::Elements(1));

    group.bench_function("encode_small", |b| {
        b.iter(|| {
            black_box(frame::encode("P key value").unwrap());
        });
    });

    let large_payload = format!("P key {}", "v".repeat(900));
    group.bench_function("encode_large", |b| {
        b.iter(|| {
            black_box(frame::encode(&large_payload).unwrap());
        });
    });

    let small_line = frame::encode("P key value").unwrap();
    group.bench_function("decode_small", |b| {
        b.iter(|| {
            black_box(frame::decode(&small_line).unwrap());
        });
    });

    let large_line = frame::encode(&large_payload).unwrap();
    group.bench_function("decode_large", |b| {
        b.iter(|| {
            black_box(frame::decode(&large_line).unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_peek,
    bench_take,
    bench_mixed,
    bench_concurrent,
    bench_frame,
);

criterion_main!(benches);
