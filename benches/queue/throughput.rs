use criterion::{BenchmarkId, Criterion};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use welding_rs::DemandQueue;

/// Register hand-off queue benchmarks
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("DemandQueue - Throughput");

    group.bench_function("push_pop_uncontended", |b| {
        let queue = DemandQueue::new(30);
        b.iter(|| {
            queue.push(1u64);
            queue.pop()
        })
    });

    // producers x consumers over the default capacity
    for (producers, consumers) in [(1usize, 1usize), (4, 2), (8, 8)].iter() {
        group.bench_with_input(
            BenchmarkId::new("handoff", format!("{}x{}", producers, consumers)),
            &(*producers, *consumers),
            |b, &(producers, consumers)| {
                b.iter_custom(|iters| measure_handoff(producers, consumers, iters));
            },
        );
    }

    group.finish();
}

fn measure_handoff(producers: usize, consumers: usize, iterations: u64) -> Duration {
    let queue = Arc::new(DemandQueue::new(30));
    let barrier = Arc::new(Barrier::new(producers + consumers + 1));

    let mut handles = Vec::with_capacity(producers + consumers);
    for _ in 0..producers {
        let queue = Arc::clone(&queue);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for i in 0..iterations {
                queue.push(Some(i));
            }
        }));
    }
    for _ in 0..consumers {
        let queue = Arc::clone(&queue);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            while queue.pop().is_some() {}
        }));
    }

    barrier.wait();
    let start = Instant::now();
    for handle in handles.drain(..producers) {
        let _ = handle.join();
    }
    // one `None` per consumer once every producer is done
    for _ in 0..consumers {
        queue.push(None);
    }
    for handle in handles {
        let _ = handle.join();
    }
    start.elapsed()
}
