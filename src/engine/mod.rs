//! Coordination engine: intake threads, solver pool and their two-phase shutdown.

mod company;
mod config;
mod demand;
mod error;
mod group;
mod intake;
mod solving;
mod stats;
mod traits;

pub use company::{EngineState, WeldingCompany};
pub use config::EngineConfig;
pub use error::EngineError;
pub use stats::{EngineStats, EngineStatsSnapshot};
pub use traits::{Customer, Producer, QuoteSink};
