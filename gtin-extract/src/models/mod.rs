//! Domain models shared by the extraction pipeline.
//!
//! - [`ProductRecord`] - one extracted (SKU, description, GTIN) triple
//! - [`ColumnIndexSet`] - where those three values live in a given file

use serde::{Deserialize, Serialize};

// =============================================================================
// Product Record
// =============================================================================

/// A product that carries a GTIN/EAN.
///
/// `gtin` is always trimmed and non-empty; `sku` and `description` are kept
/// exactly as they appeared in the source cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub sku: String,
    pub description: String,
    pub gtin: String,
}

impl ProductRecord {
    pub fn new(
        sku: impl Into<String>,
        description: impl Into<String>,
        gtin: impl Into<String>,
    ) -> Self {
        Self {
            sku: sku.into(),
            description: description.into(),
            gtin: gtin.into(),
        }
    }

    /// Fields in output column order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.sku, &self.description, &self.gtin]
    }
}

// =============================================================================
// Column Index Set
// =============================================================================

/// Positions of the three required columns in one file's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnIndexSet {
    pub sku: usize,
    pub description: usize,
    pub gtin: usize,
}

impl ColumnIndexSet {
    /// Largest required index; a row needs more cells than this.
    pub fn max_index(&self) -> usize {
        self.sku.max(self.description).max(self.gtin)
    }
}
