//! Solver failure types

use crate::order::MaterialId;
use std::fmt;

/// Why an order could not be priced
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// No feasible assignment exists for a piece under the given table
    NoFeasibleSolution {
        /// Width of the piece that could not be priced
        width: u32,
        /// Height of the piece that could not be priced
        height: u32,
    },

    /// The table handed to the solver prices a different material
    MaterialMismatch {
        /// Material of the order
        expected: MaterialId,
        /// Material of the table
        found: MaterialId,
    },

    /// No aggregated table was available for the order's material
    MissingPriceTable(MaterialId),

    /// Failure reported by a custom solver
    Failed {
        /// Description of the failure
        message: String,
    },
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::NoFeasibleSolution { width, height } => {
                write!(f, "No feasible solution for piece {}x{}", width, height)
            }
            SolveError::MaterialMismatch { expected, found } => {
                write!(
                    f,
                    "Material mismatch: order is for material {}, table prices material {}",
                    expected, found
                )
            }
            SolveError::MissingPriceTable(material_id) => {
                write!(f, "No price table for material {}", material_id)
            }
            SolveError::Failed { message } => write!(f, "Solver failed: {}", message),
        }
    }
}

impl std::error::Error for SolveError {}
