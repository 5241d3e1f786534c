use criterion::{BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use welding_rs::{PriceCatalog, PriceQuote, PriceTable, ProducerId};

fn price_list(size: u32, offset: f64) -> Vec<PriceQuote> {
    (1..=size)
        .map(|i| PriceQuote::new(i, size + 1 - i, i as f64 + offset))
        .collect()
}

/// Register price merging benchmarks
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("PriceCatalog - Merge");

    for size in [10u32, 100, 500].iter() {
        let quotes = price_list(*size, 0.0);
        group.bench_with_input(BenchmarkId::new("table_merge_all", size), size, |b, _| {
            b.iter(|| {
                let mut table = PriceTable::new(1);
                table.merge_all(black_box(&quotes));
                table
            })
        });
    }

    for producers in [2usize, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("concurrent_submissions", producers),
            producers,
            |b, &producers| {
                b.iter_custom(|iters| measure_concurrent_submissions(producers, iters));
            },
        );
    }

    group.finish();
}

/// Every producer submits one price list per iteration, each for a fresh material
fn measure_concurrent_submissions(producers: usize, iterations: u64) -> Duration {
    let catalog = Arc::new(PriceCatalog::new(producers));
    let barrier = Arc::new(Barrier::new(producers + 1));

    let handles: Vec<_> = (0..producers)
        .map(|index| {
            let catalog = Arc::clone(&catalog);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let quotes = price_list(20, index as f64);
                barrier.wait();
                for material in 0..iterations {
                    catalog.submit_quotes(ProducerId(index), material as u32, &quotes);
                }
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}
