mod throughput;

pub use throughput::register_benchmarks;
