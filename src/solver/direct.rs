use super::{SolveError, SolveOutcome, Solver};
use crate::catalog::PriceTable;
use crate::order::Order;

/// Prices every piece with the table entry of exactly its size.
///
/// Pieces without a matching entry make the whole order infeasible; in that
/// case the order is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectQuoteSolver;

impl Solver for DirectQuoteSolver {
    fn solve(&self, order: &mut Order, prices: &PriceTable) -> SolveOutcome {
        let costs = order
            .pieces
            .iter()
            .map(|piece| {
                prices
                    .lookup(piece.width, piece.height)
                    .map(|quote| quote.cost)
                    .ok_or(SolveError::NoFeasibleSolution {
                        width: piece.width,
                        height: piece.height,
                    })
            })
            .collect::<Result<Vec<f64>, SolveError>>()?;

        for (piece, cost) in order.pieces.iter_mut().zip(costs) {
            piece.cost = Some(cost);
        }
        Ok(())
    }
}
