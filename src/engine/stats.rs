//! Engine counters

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters updated by the worker threads
#[derive(Debug, Default)]
pub struct EngineStats {
    orders_received: AtomicU64,
    orders_enqueued: AtomicU64,
    orders_solved: AtomicU64,
    orders_failed: AtomicU64,
    quote_requests: AtomicU64,
    price_lists: AtomicU64,
}

impl EngineStats {
    pub(crate) fn order_received(&self) {
        self.orders_received.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn order_enqueued(&self) {
        self.orders_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn order_solved(&self) {
        self.orders_solved.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn order_failed(&self) {
        self.orders_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn quote_request(&self) {
        self.quote_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn price_list(&self) {
        self.price_lists.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy the current values
    pub fn snapshot(&self) -> EngineStatsSnapshot {
        EngineStatsSnapshot {
            orders_received: self.orders_received.load(Ordering::Relaxed),
            orders_enqueued: self.orders_enqueued.load(Ordering::Relaxed),
            orders_solved: self.orders_solved.load(Ordering::Relaxed),
            orders_failed: self.orders_failed.load(Ordering::Relaxed),
            quote_requests: self.quote_requests.load(Ordering::Relaxed),
            price_lists: self.price_lists.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`EngineStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatsSnapshot {
    /// Orders pulled from customers
    pub orders_received: u64,
    /// Orders handed to the solver queue
    pub orders_enqueued: u64,
    /// Orders delivered back with a solution
    pub orders_solved: u64,
    /// Orders delivered back with a failure
    pub orders_failed: u64,
    /// Quote requests sent to producers (one per producer per material)
    pub quote_requests: u64,
    /// Price lists received from producers
    pub price_lists: u64,
}

impl EngineStatsSnapshot {
    /// Orders that have received their completion callback
    pub fn orders_completed(&self) -> u64 {
        self.orders_solved + self.orders_failed
    }
}
