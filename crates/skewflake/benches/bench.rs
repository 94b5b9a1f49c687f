use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use skewflake::{
    BasicSkewflakeGenerator, LockSkewflakeGenerator, SKEWFLAKE_EPOCH, SkewflakeGenerator,
    SystemClock, TimeSource,
};
use std::{
    sync::{
        Arc, Barrier,
        atomic::{AtomicI64, Ordering},
    },
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    millis: AtomicI64,
}

impl FixedMockTime {
    fn at(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> i64 {
        self.millis.load(Ordering::Relaxed)
    }
}

const T0: i64 = SKEWFLAKE_EPOCH + 1_000;

// Number of IDs generated per benchmark iteration. With a frozen clock this is
// exactly one millisecond's worth of sequence, so no call ever spins.
const TOTAL_IDS: usize = 4096;

/// Benchmarks a hot path where the clock never moves.
fn bench_generator<G>(c: &mut Criterion, group_name: &str, generator_factory: impl Fn() -> G)
where
    G: SkewflakeGenerator<FixedMockTime>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = generator_factory();
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks the compensation path: the clock is stuck behind the last
/// issued timestamp, so every call runs with an outstanding offset and
/// overflowing sequences advance the virtual clock instead of spinning.
fn bench_generator_rolled_back<G>(c: &mut Criterion, group_name: &str)
where
    G: SkewflakeGenerator<Arc<FixedMockTime>>,
{
    let mut group = c.benchmark_group(group_name);
    let total = TOTAL_IDS * 8;
    group.throughput(Throughput::Elements(total as u64));

    group.bench_function(format!("elems/{}", total), |b| {
        b.iter_custom(|iters| {
            let mut elapsed = core::time::Duration::ZERO;

            for _ in 0..iters {
                let clock = Arc::new(FixedMockTime::at(T0));
                let generator = G::new(0, Arc::clone(&clock)).unwrap();
                generator.next_id();
                clock.millis.store(T0 - 10, Ordering::Relaxed);

                let start = Instant::now();
                for _ in 0..total {
                    black_box(generator.next_id());
                }
                elapsed += start.elapsed();
            }

            elapsed
        });
    });

    group.finish();
}

/// Benchmarks a shared lock generator under contention.
fn bench_generator_contended<G>(c: &mut Criterion, group_name: &str, generator_fn: impl Fn() -> G)
where
    G: SkewflakeGenerator<FixedMockTime> + Send + Sync,
{
    let mut group = c.benchmark_group(group_name);

    for thread_count in [1, 2, 4, 8, 16] {
        let ids_per_thread = TOTAL_IDS / thread_count;

        group.throughput(Throughput::Elements(TOTAL_IDS as u64));
        group.bench_function(
            format!("elems/{}/threads/{}", TOTAL_IDS, thread_count),
            |b| {
                b.iter_custom(|iters| {
                    let start = Instant::now();

                    for _ in 0..iters {
                        let generator = Arc::new(generator_fn());
                        let barrier = Arc::new(Barrier::new(thread_count + 1));
                        scope(|s| {
                            for _ in 0..thread_count {
                                let generator = Arc::clone(&generator);
                                let barrier = Arc::clone(&barrier);
                                s.spawn(move || {
                                    barrier.wait();
                                    for _ in 0..ids_per_thread {
                                        black_box(generator.next_id());
                                    }
                                });
                            }
                            barrier.wait();
                        });
                    }

                    start.elapsed()
                });
            },
        );
    }

    group.finish();
}

/// Benchmarks against the real wall clock, including the spins at the end of
/// each exhausted millisecond.
fn bench_generator_system_clock<G>(c: &mut Criterion, group_name: &str)
where
    G: SkewflakeGenerator<SystemClock>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = G::new(0, SystemClock).unwrap();
    group.bench_function(format!("elems/{}", TOTAL_IDS), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id());
            }
        });
    });

    group.finish();
}

fn benchmark_mock_sequential_basic(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/basic", || {
        BasicSkewflakeGenerator::new(0, FixedMockTime::at(T0)).unwrap()
    });
}

fn benchmark_mock_sequential_lock(c: &mut Criterion) {
    bench_generator(c, "mock/sequential/lock", || {
        LockSkewflakeGenerator::new(0, FixedMockTime::at(T0)).unwrap()
    });
}

fn benchmark_mock_rolled_back_basic(c: &mut Criterion) {
    bench_generator_rolled_back::<BasicSkewflakeGenerator<_>>(c, "mock/rolled_back/basic");
}

fn benchmark_mock_rolled_back_lock(c: &mut Criterion) {
    bench_generator_rolled_back::<LockSkewflakeGenerator<_>>(c, "mock/rolled_back/lock");
}

fn benchmark_mock_contended_lock(c: &mut Criterion) {
    bench_generator_contended(c, "mock/contended/lock", || {
        LockSkewflakeGenerator::new(0, FixedMockTime::at(T0)).unwrap()
    });
}

fn benchmark_system_sequential_basic(c: &mut Criterion) {
    bench_generator_system_clock::<BasicSkewflakeGenerator<_>>(c, "system/sequential/basic");
}

fn benchmark_system_sequential_lock(c: &mut Criterion) {
    bench_generator_system_clock::<LockSkewflakeGenerator<_>>(c, "system/sequential/lock");
}

criterion_group!(
    benches,
    // Mock clock
    benchmark_mock_sequential_basic,
    benchmark_mock_sequential_lock,
    benchmark_mock_rolled_back_basic,
    benchmark_mock_rolled_back_lock,
    benchmark_mock_contended_lock,
    // Wall clock
    benchmark_system_sequential_basic,
    benchmark_system_sequential_lock,
);
criterion_main!(benches);
