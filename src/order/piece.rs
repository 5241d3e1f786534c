use serde::{Deserialize, Serialize};

/// One requested piece of an order.
///
/// `cost` stays `None` until a solver prices the piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    /// Requested width
    pub width: u32,

    /// Requested height
    pub height: u32,

    /// Strength of a weld joining two plates of this material
    pub welding_strength: f64,

    /// Price attached by the solver
    pub cost: Option<f64>,
}

impl Piece {
    /// Create an unpriced piece with no welding strength
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            welding_strength: 0.0,
            cost: None,
        }
    }

    /// Set the welding strength used when the piece must be assembled from smaller plates
    pub fn with_welding_strength(mut self, welding_strength: f64) -> Self {
        self.welding_strength = welding_strength;
        self
    }

    /// Whether the piece has the given dimensions in either orientation
    pub fn matches(&self, width: u32, height: u32) -> bool {
        (self.width == width && self.height == height)
            || (self.width == height && self.height == width)
    }
}
