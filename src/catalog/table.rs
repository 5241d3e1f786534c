//! Aggregated best-price table for a single material

use crate::order::MaterialId;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A producer's offered cost for cutting one plate of the given size.
///
/// Width and height are interchangeable: `(3, 5)` and `(5, 3)` describe the same cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Plate width
    pub width: u32,

    /// Plate height
    pub height: u32,

    /// Offered cost
    pub cost: f64,
}

impl PriceQuote {
    /// Create a new quote
    pub fn new(width: u32, height: u32, cost: f64) -> Self {
        Self {
            width,
            height,
            cost,
        }
    }

    /// Dimensions ordered as `(short side, long side)`
    pub fn dimensions(&self) -> (u32, u32) {
        if self.width <= self.height {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }

    /// Whether both quotes describe the same cut, in either orientation
    pub fn same_cut(&self, other: &PriceQuote) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Whether this quote prices a plate of the given size, in either orientation
    pub fn fits(&self, width: u32, height: u32) -> bool {
        (self.width == width && self.height == height)
            || (self.width == height && self.height == width)
    }

    fn normalized(self) -> Self {
        let (width, height) = self.dimensions();
        Self {
            width,
            height,
            cost: self.cost,
        }
    }
}

/// What merging one quote did to the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No entry for this cut existed, the quote was added
    Inserted,
    /// The quote undercut the existing entry and replaced its cost
    Improved,
    /// The existing entry was cheaper or equal and was kept
    Kept,
}

/// Best known price per unordered dimension pair for one material.
///
/// Entries are stored with the short side as `width`, so the table converges
/// to the same content whatever order quotes arrive in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceTable {
    material_id: MaterialId,
    quotes: Vec<PriceQuote>,
}

impl PriceTable {
    /// Create an empty table
    pub fn new(material_id: MaterialId) -> Self {
        Self {
            material_id,
            quotes: Vec::new(),
        }
    }

    /// Build a table by merging every quote in turn
    pub fn from_quotes<I>(material_id: MaterialId, quotes: I) -> Self
    where
        I: IntoIterator<Item = PriceQuote>,
    {
        let mut table = Self::new(material_id);
        for quote in quotes {
            table.merge(quote);
        }
        table
    }

    /// Material this table prices
    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    /// Merge one quote, keeping the minimum cost per cut. A tie keeps the existing entry.
    pub fn merge(&mut self, quote: PriceQuote) -> MergeOutcome {
        let quote = quote.normalized();

        match self.quotes.iter_mut().find(|entry| entry.same_cut(&quote)) {
            Some(entry) if quote.cost < entry.cost => {
                trace!(
                    "material {}: {}x{} improved {} -> {}",
                    self.material_id, entry.width, entry.height, entry.cost, quote.cost
                );
                entry.cost = quote.cost;
                MergeOutcome::Improved
            }
            Some(_) => MergeOutcome::Kept,
            None => {
                trace!(
                    "material {}: {}x{} inserted at {}",
                    self.material_id, quote.width, quote.height, quote.cost
                );
                self.quotes.push(quote);
                MergeOutcome::Inserted
            }
        }
    }

    /// Merge a batch of quotes, returning how many changed the table
    pub fn merge_all(&mut self, quotes: &[PriceQuote]) -> usize {
        quotes
            .iter()
            .filter(|quote| self.merge(**quote) != MergeOutcome::Kept)
            .count()
    }

    /// Best quote for a plate of the given size, in either orientation
    pub fn lookup(&self, width: u32, height: u32) -> Option<&PriceQuote> {
        self.quotes.iter().find(|quote| quote.fits(width, height))
    }

    /// All entries, in insertion order
    pub fn quotes(&self) -> &[PriceQuote] {
        &self.quotes
    }

    /// Number of distinct cuts priced
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// True when no cut is priced
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
