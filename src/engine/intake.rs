//! Per-customer intake loop

use super::demand::{Demand, Job};
use super::stats::EngineStats;
use super::traits::{Customer, Producer, QuoteSink};
use crate::catalog::PriceCatalog;
use crate::order::{CustomerId, MaterialId, ProducerId};
use crate::queue::DemandQueue;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Pulls orders from one customer, gates each on the catalog barrier and
/// hands it to the solver queue.
pub(crate) struct IntakeWorker {
    pub(crate) customer_id: CustomerId,
    pub(crate) customer: Arc<dyn Customer>,
    pub(crate) producers: Arc<[Arc<dyn Producer>]>,
    pub(crate) catalog: Arc<PriceCatalog>,
    pub(crate) queue: Arc<DemandQueue<Demand>>,
    pub(crate) stats: Arc<EngineStats>,
}

impl IntakeWorker {
    /// Serve the customer until its demand stream ends
    pub(crate) fn run(self) {
        debug!("{}: intake started", self.customer_id);
        let mut served = 0usize;

        while let Some(order) = self.customer.next_demand() {
            self.stats.order_received();
            let material_id = order.material_id;
            trace!("{}: order {} for material {}", self.customer_id, order.id, material_id);

            if self.catalog.mark_requested(material_id) {
                self.request_quotes(material_id);
            }

            self.catalog
                .await_evaluated(material_id, self.producers.len());

            self.queue.push(Demand::Work(Job {
                customer_id: self.customer_id,
                customer: Arc::clone(&self.customer),
                order,
            }));
            self.stats.order_enqueued();
            served += 1;
        }

        info!("{}: demand stream ended after {} orders", self.customer_id, served);
    }

    fn request_quotes(&self, material_id: MaterialId) {
        debug!(
            "{}: requesting quotes for material {} from {} producers",
            self.customer_id,
            material_id,
            self.producers.len()
        );
        for (index, producer) in self.producers.iter().enumerate() {
            let sink = QuoteSink::new(
                ProducerId(index),
                material_id,
                Arc::clone(&self.catalog),
                Arc::clone(&self.stats),
            );
            self.stats.quote_request();
            producer.request_quotes(material_id, sink);
        }
    }
}
