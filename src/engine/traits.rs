//! Capabilities the engine consumes from producers and customers

use super::stats::EngineStats;
use crate::catalog::{PriceCatalog, PriceQuote};
use crate::order::{MaterialId, Order, ProducerId};
use crate::solver::SolveOutcome;
use std::sync::Arc;

/// A source of price quotes.
///
/// `request_quotes` is fire-and-forget: the producer answers whenever it
/// likes, from any thread, by calling [`QuoteSink::submit`] on the sink it was
/// handed. Answering inline, before returning, is allowed too.
pub trait Producer: Send + Sync {
    /// Ask for the producer's price list for a material
    fn request_quotes(&self, material_id: MaterialId, sink: QuoteSink);
}

/// A source of orders and the receiver of their results
pub trait Customer: Send + Sync {
    /// Block until the next order is available. `None` ends the stream.
    fn next_demand(&self) -> Option<Order>;

    /// Receive a processed order together with the solver's verdict.
    ///
    /// Called exactly once per order pulled from `next_demand`.
    fn on_completed(&self, order: Order, outcome: SolveOutcome);
}

/// Reply channel handed to a producer with each quote request.
///
/// The sink is bound to the requesting producer and material, so its
/// submissions are always attributed correctly. It can be cloned and moved
/// to another thread.
#[derive(Debug, Clone)]
pub struct QuoteSink {
    producer: ProducerId,
    material_id: MaterialId,
    catalog: Arc<PriceCatalog>,
    stats: Arc<EngineStats>,
}

impl QuoteSink {
    pub(crate) fn new(
        producer: ProducerId,
        material_id: MaterialId,
        catalog: Arc<PriceCatalog>,
        stats: Arc<EngineStats>,
    ) -> Self {
        Self {
            producer,
            material_id,
            catalog,
            stats,
        }
    }

    /// Producer the sink is bound to
    pub fn producer(&self) -> ProducerId {
        self.producer
    }

    /// Material the quotes are for
    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    /// Deliver the price list. Returns the material's evaluation count afterwards.
    pub fn submit(&self, quotes: &[PriceQuote]) -> usize {
        self.stats.price_list();
        self.catalog
            .submit_quotes(self.producer, self.material_id, quotes)
    }
}
