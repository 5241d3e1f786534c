//! Solver seam: the routine that prices an order against an aggregated table.

mod direct;
mod error;

pub use direct::DirectQuoteSolver;
pub use error::SolveError;

use crate::catalog::PriceTable;
use crate::order::Order;
use tracing::{trace, warn};

/// Result delivered to a customer together with its order
pub type SolveOutcome = Result<(), SolveError>;

/// Prices an order in place against a material's aggregated price table.
///
/// Implementations may be slow and are called from solver pool threads, one
/// order at a time per thread.
pub trait Solver: Send + Sync {
    /// Attach a cost to every piece of `order`, or report why it cannot be done
    fn solve(&self, order: &mut Order, prices: &PriceTable) -> SolveOutcome;
}

impl<F> Solver for F
where
    F: Fn(&mut Order, &PriceTable) -> SolveOutcome + Send + Sync,
{
    fn solve(&self, order: &mut Order, prices: &PriceTable) -> SolveOutcome {
        self(order, prices)
    }
}

/// Solve a single order on the calling thread, outside the worker pool.
///
/// The table must belong to the order's material.
pub fn solve_sequential(
    solver: &dyn Solver,
    prices: &PriceTable,
    order: &mut Order,
) -> SolveOutcome {
    if prices.material_id() != order.material_id {
        return Err(SolveError::MaterialMismatch {
            expected: order.material_id,
            found: prices.material_id(),
        });
    }

    trace!(
        "sequential solve of order {} ({} pieces)",
        order.id,
        order.pieces.len()
    );
    let outcome = solver.solve(order, prices);
    if let Err(err) = &outcome {
        warn!("sequential solve of order {} failed: {}", order.id, err);
    }
    outcome
}
