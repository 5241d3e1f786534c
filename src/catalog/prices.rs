//! Shared catalog of aggregated price tables with a per-material evaluation barrier

use super::snapshot::{CatalogSnapshot, MaterialSnapshot};
use super::table::{PriceQuote, PriceTable};
use crate::order::{MaterialId, ProducerId};
use crate::utils::current_time_millis;
use dashmap::{DashMap, DashSet};
use parking_lot::{Condvar, Mutex};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Mutable part of a material entry, only ever touched under the slot lock
#[derive(Debug)]
struct MaterialState {
    table: PriceTable,

    /// Producers whose price list has been merged. Its size is the evaluation count.
    reporters: HashSet<ProducerId>,
}

impl MaterialState {
    fn new(material_id: MaterialId) -> Self {
        Self {
            table: PriceTable::new(material_id),
            reporters: HashSet::new(),
        }
    }

    fn evaluation_count(&self) -> usize {
        self.reporters.len()
    }
}

/// Synchronization record of one material: lock, wake-up condition and counter
#[derive(Debug)]
struct MaterialSlot {
    state: Mutex<MaterialState>,
    evaluated: Condvar,
}

impl MaterialSlot {
    fn new(material_id: MaterialId) -> Self {
        Self {
            state: Mutex::new(MaterialState::new(material_id)),
            evaluated: Condvar::new(),
        }
    }
}

/// The PriceCatalog aggregates quotes from every producer per material.
///
/// A material is *evaluated* once every registered producer has submitted a
/// price list for it. Intake threads block in [`PriceCatalog::await_evaluated`]
/// until that happens; the submission that completes the set wakes all of them
/// at once. Evaluation is a one-way latch: a material never becomes
/// unevaluated again.
///
/// Each material owns its own lock, so submissions for different materials
/// never contend with each other.
#[derive(Debug, Default)]
pub struct PriceCatalog {
    /// Material slots, created lazily and never removed during a run
    slots: DashMap<MaterialId, Arc<MaterialSlot>>,

    /// Materials for which quote requests have already been broadcast
    requested: DashSet<MaterialId>,

    /// Number of registered producers, the barrier threshold
    producer_count: AtomicUsize,
}

impl PriceCatalog {
    /// Create an empty catalog for the given producer population
    pub fn new(producer_count: usize) -> Self {
        Self {
            slots: DashMap::new(),
            requested: DashSet::new(),
            producer_count: AtomicUsize::new(producer_count),
        }
    }

    /// Barrier threshold used when waking waiters
    pub fn producer_count(&self) -> usize {
        self.producer_count.load(Ordering::Acquire)
    }

    pub(crate) fn set_producer_count(&self, producer_count: usize) {
        self.producer_count.store(producer_count, Ordering::Release);
    }

    /// Get the slot for a material, creating an empty one when absent.
    ///
    /// The map guard is released before the caller locks the slot, so no
    /// thread ever blocks while holding a shard of the map.
    fn slot(&self, material_id: MaterialId) -> Arc<MaterialSlot> {
        if let Some(slot) = self.slots.get(&material_id) {
            return Arc::clone(slot.value());
        }
        let entry = self
            .slots
            .entry(material_id)
            .or_insert_with(|| Arc::new(MaterialSlot::new(material_id)));
        Arc::clone(entry.value())
    }

    fn existing_slot(&self, material_id: MaterialId) -> Option<Arc<MaterialSlot>> {
        self.slots
            .get(&material_id)
            .map(|slot| Arc::clone(slot.value()))
    }

    /// Merge one producer's price list for a material and return the new evaluation count.
    ///
    /// Every quote is merged keeping the minimum cost per unordered dimension
    /// pair. The submission counts as one evaluation for `producer`, even when
    /// it carries no quote at all. A repeated submission from a producer that
    /// already reported still merges its quotes but does not advance the
    /// count. When the count reaches the producer population every waiter on
    /// the material is released.
    ///
    /// Producer ids outside the registered population are ignored: nothing is
    /// merged and the current count is returned unchanged.
    pub fn submit_quotes(
        &self,
        producer: ProducerId,
        material_id: MaterialId,
        quotes: &[PriceQuote],
    ) -> usize {
        let threshold = self.producer_count();
        if producer.0 >= threshold {
            warn!(
                "material {}: ignoring price list from unregistered {} ({} producers)",
                material_id, producer, threshold
            );
            return self.evaluation_count(material_id);
        }

        let slot = self.slot(material_id);
        let mut state = slot.state.lock();

        let changed = state.table.merge_all(quotes);
        let first_report = state.reporters.insert(producer);
        let count = state.evaluation_count();

        if first_report {
            trace!(
                "material {}: {} merged {} quotes ({} changed), evaluations {}/{}",
                material_id,
                producer,
                quotes.len(),
                changed,
                count,
                threshold
            );
            if count >= threshold {
                debug!("material {}: evaluated by all {} producers", material_id, threshold);
                slot.evaluated.notify_all();
            }
        } else {
            debug!(
                "material {}: repeated price list from {}, {} quotes ({} changed)",
                material_id,
                producer,
                quotes.len(),
                changed
            );
        }

        count
    }

    /// Block until at least `producer_count` producers have evaluated the material.
    ///
    /// Safe to call before any submission: the material is then simply not
    /// evaluated yet. The slot lock is released while waiting.
    pub fn await_evaluated(&self, material_id: MaterialId, producer_count: usize) {
        let slot = self.slot(material_id);
        let mut state = slot.state.lock();
        while state.evaluation_count() < producer_count {
            slot.evaluated.wait(&mut state);
        }
    }

    /// Like [`PriceCatalog::await_evaluated`] but gives up after `timeout`.
    ///
    /// Returns whether the material is evaluated.
    pub fn await_evaluated_for(
        &self,
        material_id: MaterialId,
        producer_count: usize,
        timeout: Duration,
    ) -> bool {
        let deadline = Instant::now() + timeout;
        let slot = self.slot(material_id);
        let mut state = slot.state.lock();
        while state.evaluation_count() < producer_count {
            if slot.evaluated.wait_until(&mut state, deadline).timed_out() {
                return state.evaluation_count() >= producer_count;
            }
        }
        true
    }

    /// Non-blocking barrier check
    pub fn is_evaluated(&self, material_id: MaterialId, producer_count: usize) -> bool {
        match self.existing_slot(material_id) {
            Some(slot) => slot.state.lock().evaluation_count() >= producer_count,
            None => false,
        }
    }

    /// Number of producers that have reported on the material
    pub fn evaluation_count(&self, material_id: MaterialId) -> usize {
        match self.existing_slot(material_id) {
            Some(slot) => slot.state.lock().evaluation_count(),
            None => 0,
        }
    }

    /// True once at least one price list for the material has been merged
    pub fn contains(&self, material_id: MaterialId) -> bool {
        self.evaluation_count(material_id) > 0
    }

    /// Copy of the aggregated table, if any price list has been merged
    pub fn price_table(&self, material_id: MaterialId) -> Option<PriceTable> {
        let slot = self.existing_slot(material_id)?;
        let state = slot.state.lock();
        if state.reporters.is_empty() {
            None
        } else {
            Some(state.table.clone())
        }
    }

    /// Copy of the aggregated table, only when the material is evaluated
    pub fn evaluated_table(
        &self,
        material_id: MaterialId,
        producer_count: usize,
    ) -> Option<PriceTable> {
        let slot = self.existing_slot(material_id)?;
        let state = slot.state.lock();
        if !state.reporters.is_empty() && state.evaluation_count() >= producer_count {
            Some(state.table.clone())
        } else {
            None
        }
    }

    /// Record that quotes for the material are being requested.
    ///
    /// Returns `true` only for the first caller, which is then responsible for
    /// broadcasting the request to the producers.
    pub(crate) fn mark_requested(&self, material_id: MaterialId) -> bool {
        self.requested.insert(material_id)
    }

    /// Whether quotes for the material have been requested already
    pub fn is_requested(&self, material_id: MaterialId) -> bool {
        self.requested.contains(&material_id)
    }

    /// Number of materials with at least one merged price list
    pub fn material_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !slot.value().state.lock().reporters.is_empty())
            .count()
    }

    /// Create a snapshot of every material with at least one merged price list
    pub fn snapshot(&self) -> CatalogSnapshot {
        let threshold = self.producer_count();
        let slots: Vec<(MaterialId, Arc<MaterialSlot>)> = self
            .slots
            .iter()
            .map(|item| (*item.key(), Arc::clone(item.value())))
            .collect();

        let mut materials = Vec::with_capacity(slots.len());
        for (material_id, slot) in slots {
            let state = slot.state.lock();
            if state.reporters.is_empty() {
                continue;
            }
            let mut quotes = state.table.quotes().to_vec();
            quotes.sort_by_key(|quote| quote.dimensions());
            materials.push(MaterialSnapshot {
                material_id,
                evaluation_count: state.evaluation_count(),
                evaluated: state.evaluation_count() >= threshold,
                quotes,
            });
        }
        materials.sort_by_key(|material| material.material_id);

        CatalogSnapshot {
            timestamp: current_time_millis(),
            producer_count: threshold,
            materials,
        }
    }
}
