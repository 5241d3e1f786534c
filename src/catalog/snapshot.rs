//! Catalog snapshot for reporting

use super::table::PriceQuote;
use crate::order::MaterialId;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// State of one material at snapshot time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSnapshot {
    /// Material identifier
    pub material_id: MaterialId,

    /// Number of producers that have reported on this material
    pub evaluation_count: usize,

    /// Whether every registered producer had reported
    pub evaluated: bool,

    /// Aggregated quotes sorted by dimensions, short side first
    pub quotes: Vec<PriceQuote>,
}

impl MaterialSnapshot {
    /// Cheapest quote of the material, regardless of size
    pub fn cheapest(&self) -> Option<&PriceQuote> {
        let cheapest = self
            .quotes
            .iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost));
        trace!("material {} cheapest: {:?}", self.material_id, cheapest);
        cheapest
    }
}

/// A snapshot of the catalog at a specific point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Barrier threshold at snapshot time
    pub producer_count: usize,

    /// Materials sorted by id
    pub materials: Vec<MaterialSnapshot>,
}

impl CatalogSnapshot {
    /// Look up one material
    pub fn material(&self, material_id: MaterialId) -> Option<&MaterialSnapshot> {
        self.materials
            .iter()
            .find(|material| material.material_id == material_id)
    }

    /// Materials every producer has reported on
    pub fn evaluated_materials(&self) -> Vec<MaterialId> {
        let evaluated: Vec<MaterialId> = self
            .materials
            .iter()
            .filter(|material| material.evaluated)
            .map(|material| material.material_id)
            .collect();
        trace!("evaluated_materials: {:?}", evaluated);
        evaluated
    }

    /// Total number of aggregated quotes across all materials
    pub fn total_quotes(&self) -> usize {
        self.materials.iter().map(|material| material.quotes.len()).sum()
    }

    /// Serialize the snapshot as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
