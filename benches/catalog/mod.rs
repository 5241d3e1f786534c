mod merge;

pub use merge::register_benchmarks;
