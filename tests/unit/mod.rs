
mod barrier_tests;
mod engine_flow_tests;
mod shutdown_tests;
