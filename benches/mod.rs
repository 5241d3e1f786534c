use criterion::{criterion_group, criterion_main};

mod catalog;
mod engine;
mod queue;

use catalog::register_benchmarks as register_catalog_benchmarks;
use engine::register_benchmarks as register_engine_benchmarks;
use queue::register_benchmarks as register_queue_benchmarks;

criterion_group!(
    benches,
    register_catalog_benchmarks,
    register_queue_benchmarks,
    register_engine_benchmarks,
);

criterion_main!(benches);
