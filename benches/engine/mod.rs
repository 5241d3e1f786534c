
pub use pipeline::register_benchmarks;
