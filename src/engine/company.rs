//! Orchestrator owning the catalog, the queue and both thread populations

use super::config::EngineConfig;
use super::demand::Demand;
use super::error::EngineError;
use super::group::WorkerGroup;
use super::intake::IntakeWorker;
use super::solving::SolvingWorker;
use super::stats::{EngineStats, EngineStatsSnapshot};
use super::traits::{Customer, Producer};
use crate::catalog::{CatalogSnapshot, PriceCatalog, PriceQuote, PriceTable};
use crate::order::{CustomerId, MaterialId, Order, ProducerId};
use crate::queue::DemandQueue;
use crate::solver::{SolveOutcome, Solver, solve_sequential};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tracing::{info, trace};

/// Lifecycle of a [`WeldingCompany`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Accepting registrations, no thread running
    Idle,
    /// Worker threads running
    Running,
    /// Every worker thread joined
    Stopped,
}

/// The WeldingCompany matches customer orders against the cheapest producer
/// quotes and feeds them to a solver pool.
///
/// Producers and customers are registered first, then [`WeldingCompany::start`]
/// launches one intake thread per customer and a fixed pool of solver threads.
/// [`WeldingCompany::stop`] waits for every customer stream to end, drains the
/// queue and joins the pool.
pub struct WeldingCompany {
    config: EngineConfig,
    solver: Arc<dyn Solver>,
    catalog: Arc<PriceCatalog>,
    queue: Arc<DemandQueue<Demand>>,
    stats: Arc<EngineStats>,
    producers: Vec<Arc<dyn Producer>>,
    customers: Vec<Arc<dyn Customer>>,
    intake: Option<WorkerGroup<()>>,
    solving: Option<WorkerGroup<Result<(), EngineError>>>,
    state: EngineState,
}

impl WeldingCompany {
    /// Create an engine with the default configuration
    pub fn new<S>(solver: S) -> Self
    where
        S: Solver + 'static,
    {
        Self::build(Arc::new(solver), EngineConfig::default())
    }

    /// Create an engine with a validated configuration
    pub fn with_config<S>(solver: S, config: EngineConfig) -> Result<Self, EngineError>
    where
        S: Solver + 'static,
    {
        config.validate()?;
        Ok(Self::build(Arc::new(solver), config))
    }

    fn build(solver: Arc<dyn Solver>, config: EngineConfig) -> Self {
        Self {
            queue: Arc::new(DemandQueue::new(config.queue_capacity)),
            config,
            solver,
            catalog: Arc::new(PriceCatalog::new(0)),
            stats: Arc::new(EngineStats::default()),
            producers: Vec::new(),
            customers: Vec::new(),
            intake: None,
            solving: None,
            state: EngineState::Idle,
        }
    }

    /// Register a producer. Only allowed before start.
    pub fn register_producer(
        &mut self,
        producer: Arc<dyn Producer>,
    ) -> Result<ProducerId, EngineError> {
        self.ensure_idle()?;
        let id = ProducerId(self.producers.len());
        self.producers.push(producer);
        self.catalog.set_producer_count(self.producers.len());
        info!("registered {}, {} producers", id, self.producers.len());
        Ok(id)
    }

    /// Register a customer. Only allowed before start.
    pub fn register_customer(
        &mut self,
        customer: Arc<dyn Customer>,
    ) -> Result<CustomerId, EngineError> {
        self.ensure_idle()?;
        let id = CustomerId(self.customers.len());
        self.customers.push(customer);
        info!("registered {}, {} customers", id, self.customers.len());
        Ok(id)
    }

    fn ensure_idle(&self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Idle => Ok(()),
            _ => Err(EngineError::AlreadyStarted),
        }
    }

    /// Merge a producer's price list for a material.
    ///
    /// Equivalent to [`crate::QuoteSink::submit`] for callers holding the
    /// engine itself. Returns the material's evaluation count afterwards.
    pub fn submit_price_list(
        &self,
        producer: ProducerId,
        material_id: MaterialId,
        quotes: &[PriceQuote],
    ) -> Result<usize, EngineError> {
        if producer.0 >= self.producers.len() {
            return Err(EngineError::UnknownProducer(producer));
        }
        self.stats.price_list();
        Ok(self.catalog.submit_quotes(producer, material_id, quotes))
    }

    /// Start one intake thread per customer and `worker_count` solver threads.
    ///
    /// Returns as soon as the threads are spawned. If spawning fails part way,
    /// the threads already running are joined by [`WeldingCompany::stop`].
    pub fn start(&mut self, worker_count: usize) -> Result<(), EngineError> {
        self.ensure_idle()?;
        if worker_count == 0 {
            return Err(EngineError::InvalidWorkerCount(worker_count));
        }
        if self.producers.is_empty() && !self.customers.is_empty() {
            return Err(EngineError::NoProducers);
        }
        self.state = EngineState::Running;
        info!(
            "starting {} intake threads and {} solver threads",
            self.customers.len(),
            worker_count
        );

        let producers: Arc<[Arc<dyn Producer>]> = self.producers.iter().cloned().collect();
        let prefix = &self.config.thread_name_prefix;

        let intake = self
            .intake
            .insert(WorkerGroup::new(format!("{}-intake", prefix)));
        for (index, customer) in self.customers.iter().enumerate() {
            let worker = IntakeWorker {
                customer_id: CustomerId(index),
                customer: Arc::clone(customer),
                producers: Arc::clone(&producers),
                catalog: Arc::clone(&self.catalog),
                queue: Arc::clone(&self.queue),
                stats: Arc::clone(&self.stats),
            };
            intake.spawn(move || worker.run())?;
        }

        let solving = self
            .solving
            .insert(WorkerGroup::new(format!("{}-solver", prefix)));
        let halted = Arc::new(AtomicBool::new(false));
        for index in 0..worker_count {
            let worker = SolvingWorker {
                index,
                producer_count: producers.len(),
                catalog: Arc::clone(&self.catalog),
                queue: Arc::clone(&self.queue),
                solver: Arc::clone(&self.solver),
                stats: Arc::clone(&self.stats),
                halted: Arc::clone(&halted),
            };
            solving.spawn(move || worker.run())?;
        }

        Ok(())
    }

    /// Start with the configured pool size
    pub fn start_configured(&mut self) -> Result<(), EngineError> {
        self.start(self.config.worker_count)
    }

    /// Shut down in two phases.
    ///
    /// First every intake thread is joined, which happens once each
    /// customer's stream has ended. Then one stop item per solver thread is
    /// queued behind the remaining work and the pool is joined. All threads
    /// are joined even when some failed; the first failure is returned.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        match self.state {
            EngineState::Idle => return Err(EngineError::NotStarted),
            EngineState::Stopped => return Ok(()),
            EngineState::Running => {}
        }

        let mut first_error = None;

        if let Some(intake) = self.intake.take() {
            info!("waiting for {} intake threads", intake.len());
            for result in intake.join() {
                if let Err(err) = result {
                    first_error.get_or_insert(err);
                }
            }
        }

        if let Some(solving) = self.solving.take() {
            info!("stopping {} solver threads", solving.len());
            for _ in 0..solving.len() {
                self.queue.push(Demand::Stop);
            }
            for result in solving.join() {
                match result {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) | Err(err) => {
                        first_error.get_or_insert(err);
                    }
                }
            }
        }

        self.state = EngineState::Stopped;
        let stats = self.stats.snapshot();
        info!(
            "stopped: {} orders received, {} solved, {} failed",
            stats.orders_received, stats.orders_solved, stats.orders_failed
        );

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Solve one order on the calling thread with the engine's solver
    pub fn solve_sequential(&self, prices: &PriceTable, order: &mut Order) -> SolveOutcome {
        trace!("solve_sequential for order {}", order.id);
        solve_sequential(self.solver.as_ref(), prices, order)
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The shared price catalog
    pub fn catalog(&self) -> &PriceCatalog {
        &self.catalog
    }

    /// Snapshot of the price catalog
    pub fn catalog_snapshot(&self) -> CatalogSnapshot {
        self.catalog.snapshot()
    }

    /// Snapshot of the engine counters
    pub fn stats(&self) -> EngineStatsSnapshot {
        self.stats.snapshot()
    }

    /// Orders currently waiting for a solver thread
    pub fn queued_orders(&self) -> usize {
        self.queue.len()
    }

    /// Number of registered producers
    pub fn producer_count(&self) -> usize {
        self.producers.len()
    }

    /// Number of registered customers
    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }
}
