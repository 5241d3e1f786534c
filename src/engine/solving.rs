//! Solver pool loop

use super::demand::{Demand, Job};
use super::error::EngineError;
use super::stats::EngineStats;
use crate::catalog::PriceCatalog;
use crate::queue::DemandQueue;
use crate::solver::{SolveError, Solver};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, trace, warn};

/// Drains the queue, solves each order and reports it to its customer.
///
/// A missing catalog entry halts the whole pool: from then on every worker
/// fails the orders it pops instead of solving them, so each order still
/// gets its callback and the queue keeps draining until the stop items
/// arrive. The worker that hit the violation returns it when it stops.
pub(crate) struct SolvingWorker {
    pub(crate) index: usize,
    pub(crate) producer_count: usize,
    pub(crate) catalog: Arc<PriceCatalog>,
    pub(crate) queue: Arc<DemandQueue<Demand>>,
    pub(crate) solver: Arc<dyn Solver>,
    pub(crate) stats: Arc<EngineStats>,
    pub(crate) halted: Arc<AtomicBool>,
}

impl SolvingWorker {
    /// Process jobs until a stop item is popped
    pub(crate) fn run(self) -> Result<(), EngineError> {
        let mut processed = 0usize;
        let mut failure = None;
        loop {
            match self.queue.pop() {
                Demand::Stop => break,
                Demand::Work(job) if self.halted.load(Ordering::Acquire) => self.reject(job),
                Demand::Work(job) => {
                    if let Err(err) = self.process(job) {
                        self.halted.store(true, Ordering::Release);
                        failure.get_or_insert(err);
                    }
                }
            }
            processed += 1;
        }
        debug!("solver {}: stopped after {} orders", self.index, processed);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Fail an order popped after the pool halted
    fn reject(&self, job: Job) {
        let Job {
            customer_id,
            customer,
            order,
        } = job;
        warn!(
            "solver {}: pool halted, failing order {} of {}",
            self.index, order.id, customer_id
        );
        self.stats.order_failed();
        let message = format!(
            "solver pool halted before order {} for material {} was solved",
            order.id, order.material_id
        );
        customer.on_completed(order, Err(SolveError::Failed { message }));
    }

    fn process(&self, job: Job) -> Result<(), EngineError> {
        let Job {
            customer_id,
            customer,
            mut order,
        } = job;
        let material_id = order.material_id;

        // The intake barrier guarantees an evaluated table for every queued order.
        let Some(prices) = self
            .catalog
            .evaluated_table(material_id, self.producer_count)
        else {
            error!(
                "solver {}: order {} of {} reached the pool without an evaluated material {}",
                self.index, order.id, customer_id, material_id
            );
            self.stats.order_failed();
            customer.on_completed(order, Err(SolveError::MissingPriceTable(material_id)));
            return Err(EngineError::MissingCatalogEntry(material_id));
        };

        let outcome = self.solver.solve(&mut order, &prices);
        match &outcome {
            Ok(()) => {
                self.stats.order_solved();
                trace!(
                    "solver {}: order {} of {} solved, cost {:?}",
                    self.index,
                    order.id,
                    customer_id,
                    order.total_cost()
                );
            }
            Err(err) => {
                self.stats.order_failed();
                warn!(
                    "solver {}: order {} of {} failed: {}",
                    self.index, order.id, customer_id, err
                );
            }
        }
        customer.on_completed(order, outcome);
        Ok(())
    }
}
