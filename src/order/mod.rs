//! Customer orders and the identifiers shared across the engine.

mod ids;
mod piece;
mod request;

pub use ids::{CustomerId, MaterialId, OrderId, ProducerId};
pub use piece::Piece;
pub use request::Order;
