//! Bounded blocking hand-off between order intake and order solving.

mod bounded;

pub use bounded::{DEFAULT_QUEUE_CAPACITY, DemandQueue};
