use super::ids::{MaterialId, OrderId};
use super::piece::Piece;
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};

/// A customer order: every piece is cut from the same material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique order id
    pub id: OrderId,

    /// Material every piece is cut from
    pub material_id: MaterialId,

    /// Requested pieces, in the customer's order
    pub pieces: Vec<Piece>,

    /// Creation time (milliseconds since epoch)
    pub created_at: u64,
}

impl Order {
    /// Create an order with a fresh id
    pub fn new(material_id: MaterialId, pieces: Vec<Piece>) -> Self {
        Self::with_id(OrderId::new_uuid(), material_id, pieces)
    }

    /// Create an order with a caller supplied id
    pub fn with_id(id: OrderId, material_id: MaterialId, pieces: Vec<Piece>) -> Self {
        Self {
            id,
            material_id,
            pieces,
            created_at: current_time_millis(),
        }
    }

    /// True once every piece carries a cost
    pub fn is_solved(&self) -> bool {
        self.pieces.iter().all(|piece| piece.cost.is_some())
    }

    /// Sum of all piece costs, or `None` while any piece is unpriced
    pub fn total_cost(&self) -> Option<f64> {
        self.pieces.iter().map(|piece| piece.cost).sum()
    }
}
