//! Reference producers and customers used by the demo binaries

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};
use tracing::{info, warn};
use welding_rs::{
    Customer, DemandQueue, MaterialId, Order, Piece, PriceQuote, Producer, QuoteSink,
    SolveOutcome,
};

/// Deterministic price list of a producer for a material
pub fn price_list(seed: u32, material_id: MaterialId) -> Vec<PriceQuote> {
    (1..=4)
        .map(|i| {
            let width = i;
            let height = i + material_id % 3;
            let markup = 1.0 + ((seed + material_id + i) % 5) as f64 / 10.0;
            let cost = (width * height) as f64 * markup;
            PriceQuote::new(width, height, cost)
        })
        .collect()
}

/// Producer answering on the requesting thread before returning
pub struct SyncProducer {
    seed: u32,
}

impl SyncProducer {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }
}

impl Producer for SyncProducer {
    fn request_quotes(&self, material_id: MaterialId, sink: QuoteSink) {
        sink.submit(&price_list(self.seed, material_id));
    }
}

/// Producer answering from its own thread, fed through a request mailbox
pub struct AsyncProducer {
    seed: u32,
    mailbox: Arc<DemandQueue<Option<(MaterialId, QuoteSink)>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl AsyncProducer {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            mailbox: Arc::new(DemandQueue::new(16)),
            worker: Mutex::new(None),
        }
    }

    /// Start answering requests
    pub fn start(&self) {
        let seed = self.seed;
        let mailbox = Arc::clone(&self.mailbox);
        let handle = thread::spawn(move || {
            while let Some((material_id, sink)) = mailbox.pop() {
                sink.submit(&price_list(seed, material_id));
            }
        });
        *self.worker.lock() = Some(handle);
    }

    /// Stop after the pending requests are answered
    pub fn stop(&self) {
        self.mailbox.push(None);
        if let Some(handle) = self.worker.lock().take() {
            if handle.join().is_err() {
                warn!("async producer thread panicked");
            }
        }
    }
}

impl Producer for AsyncProducer {
    fn request_quotes(&self, material_id: MaterialId, sink: QuoteSink) {
        self.mailbox.push(Some((material_id, sink)));
    }
}

/// Customer issuing a fixed number of generated orders
pub struct TestCustomer {
    pending: Mutex<VecDeque<Order>>,
    solved: AtomicUsize,
    failed: AtomicUsize,
}

impl TestCustomer {
    pub fn new(orders: usize) -> Self {
        let pending = (0..orders)
            .map(|i| {
                let material_id = (i % 3) as MaterialId;
                let pieces = (1..=3)
                    .map(|p| {
                        Piece::new(p as u32, p as u32 + material_id % 3).with_welding_strength(1.5)
                    })
                    .collect();
                Order::new(material_id, pieces)
            })
            .collect();
        Self {
            pending: Mutex::new(pending),
            solved: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Orders solved and failed so far
    pub fn results(&self) -> (usize, usize) {
        (
            self.solved.load(Ordering::SeqCst),
            self.failed.load(Ordering::SeqCst),
        )
    }
}

impl Customer for TestCustomer {
    fn next_demand(&self) -> Option<Order> {
        self.pending.lock().pop_front()
    }

    fn on_completed(&self, order: Order, outcome: SolveOutcome) {
        match outcome {
            Ok(()) => {
                self.solved.fetch_add(1, Ordering::SeqCst);
                info!(
                    "order {} (material {}) solved at {:?}",
                    order.id,
                    order.material_id,
                    order.total_cost()
                );
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::SeqCst);
                warn!("order {} failed: {}", order.id, err);
            }
        }
    }
}
