//! Per-material price catalog aggregating producer quotes behind an evaluation barrier.

mod prices;
mod snapshot;
mod table;

pub use prices::PriceCatalog;
pub use snapshot::{CatalogSnapshot, MaterialSnapshot};
pub use table::{MergeOutcome, PriceQuote, PriceTable};
