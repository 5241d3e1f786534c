//! # Price-Gated Order Solving Engine
//!
//! A thread-based coordination engine that matches customer cutting orders
//! against the cheapest price quotes of a pool of producers, then hands each
//! order to a pluggable solver. The interesting part is not the solving itself
//! but the synchronization around it: a per-material counting barrier, a
//! bounded hand-off queue and an orderly shutdown across two independently
//! sized thread populations.
//!
//! ## Components
//!
//! - **[`PriceCatalog`]**: maps each material to an aggregated best-price table.
//!   Quotes from every producer are merged keeping the minimum cost per
//!   unordered dimension pair, so `(3, 5)` and `(5, 3)` collapse into one
//!   entry. A material becomes *evaluated* once every registered producer has
//!   submitted a price list, and all threads waiting on it are released at
//!   once.
//!
//! - **[`DemandQueue`]**: a fixed-capacity FIFO (30 items by default) with
//!   blocking `push` and `pop`. Intake threads are throttled when the solver
//!   pool falls behind.
//!
//! - **Intake threads**: one per registered [`Customer`]. Each pulls orders,
//!   broadcasts a quote request to every [`Producer`] the first time a
//!   material is seen, waits on the catalog barrier and queues the order.
//!
//! - **Solver threads**: a pool of configurable size. Each pops an order,
//!   calls the [`Solver`] with the material's aggregated table and reports the
//!   result to the customer through [`Customer::on_completed`].
//!
//! - **[`WeldingCompany`]**: owns everything above, starts both populations and
//!   shuts them down in two phases: join intake, queue one stop item per
//!   solver thread, join the pool.
//!
//! ## Data Flow
//!
//! ```text
//! customer -> intake thread -> (quote requests) -> catalog barrier
//!          -> DemandQueue -> solver thread -> Solver -> customer callback
//! ```
//!
//! ## Guarantees
//!
//! 1. **No order is solved early**: an order only reaches the pool after every
//!    producer has reported on its material.
//! 2. **No order is lost**: every order pulled from a customer receives exactly
//!    one completion callback, carrying either the solution or the failure.
//! 3. **Bounded memory between stages**: the queue never holds more than its
//!    capacity.
//! 4. **Clean shutdown**: after [`WeldingCompany::stop`] returns, no engine
//!    thread is left running.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use welding_rs::{
//!     Customer, DirectQuoteSolver, MaterialId, Order, Piece, PriceQuote, Producer, QuoteSink,
//!     SolveOutcome, WeldingCompany,
//! };
//!
//! struct FlatProducer;
//!
//! impl Producer for FlatProducer {
//!     fn request_quotes(&self, _material_id: MaterialId, sink: QuoteSink) {
//!         sink.submit(&[PriceQuote::new(2, 3, 4.0)]);
//!     }
//! }
//!
//! struct OneOrder(std::sync::Mutex<Option<Order>>);
//!
//! impl Customer for OneOrder {
//!     fn next_demand(&self) -> Option<Order> {
//!         self.0.lock().ok()?.take()
//!     }
//!
//!     fn on_completed(&self, order: Order, outcome: SolveOutcome) {
//!         println!("{} -> {:?} ({:?})", order.id, order.total_cost(), outcome);
//!     }
//! }
//!
//! let mut company = WeldingCompany::new(DirectQuoteSolver);
//! company.register_producer(Arc::new(FlatProducer)).unwrap();
//! company
//!     .register_customer(Arc::new(OneOrder(std::sync::Mutex::new(Some(Order::new(
//!         7,
//!         vec![Piece::new(3, 2)],
//!     ))))))
//!     .unwrap();
//! company.start(2).unwrap();
//! company.stop().unwrap();
//! ```
//!
//! ## Logging
//!
//! Every component logs through `tracing`. Binaries can call [`setup_logger`],
//! which honours the `LOGLEVEL` environment variable.

pub mod catalog;
pub mod engine;
pub mod order;
pub mod queue;
pub mod solver;

mod utils;

pub use catalog::{
    CatalogSnapshot, MaterialSnapshot, MergeOutcome, PriceCatalog, PriceQuote, PriceTable,
};
pub use engine::{
    Customer, EngineConfig, EngineError, EngineState, EngineStats, EngineStatsSnapshot, Producer,
    QuoteSink, WeldingCompany,
};
pub use order::{CustomerId, MaterialId, Order, OrderId, Piece, ProducerId};
pub use queue::{DEFAULT_QUEUE_CAPACITY, DemandQueue};
pub use solver::{DirectQuoteSolver, SolveError, SolveOutcome, Solver, solve_sequential};
pub use utils::{current_time_millis, setup_logger};
