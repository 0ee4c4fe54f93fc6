//! Named-column schema and header resolution.
//!
//! Vendor exports put the columns we need anywhere in the header, next to an
//! arbitrary number of unrelated ones. A [`ColumnSchema`] names the three
//! required columns and resolves them against a header row.
//!
//! Matching is exact: case-sensitive, no trimming, no normalization. When a
//! name repeats, the first occurrence wins.
//!
//! # Example
//!
//! ```
//! use gtin_extract::{ColumnSchema, Resolution};
//!
//! let header: Vec<String> = ["Estoque", "GTIN/EAN", "Descrição", "Código (SKU)"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! match ColumnSchema::default().resolve(&header) {
//!     Resolution::Found(idx) => assert_eq!((idx.sku, idx.description, idx.gtin), (3, 2, 1)),
//!     Resolution::Missing(cols) => panic!("missing {:?}", cols),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::models::ColumnIndexSet;

/// Header of the SKU column.
pub const SKU_COLUMN: &str = "Código (SKU)";

/// Header of the description column.
pub const DESCRIPTION_COLUMN: &str = "Descrição";

/// Header of the GTIN/EAN column.
pub const GTIN_COLUMN: &str = "GTIN/EAN";

/// Names of the columns a file must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub sku: String,
    pub description: String,
    pub gtin: String,
}

/// Outcome of resolving a header against a [`ColumnSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// All three columns were found.
    Found(ColumnIndexSet),
    /// Names absent from the header, in schema order.
    Missing(Vec<String>),
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            sku: SKU_COLUMN.to_string(),
            description: DESCRIPTION_COLUMN.to_string(),
            gtin: GTIN_COLUMN.to_string(),
        }
    }
}

impl ColumnSchema {
    /// Column names in output order.
    pub fn names(&self) -> [&str; 3] {
        [&self.sku, &self.description, &self.gtin]
    }

    /// Find each required column in `header`.
    pub fn resolve(&self, header: &[String]) -> Resolution {
        let position = |name: &str| header.iter().position(|h| h == name);

        match (
            position(self.sku.as_str()),
            position(self.description.as_str()),
            position(self.gtin.as_str()),
        ) {
            (Some(sku), Some(description), Some(gtin)) => Resolution::Found(ColumnIndexSet {
                sku,
                description,
                gtin,
            }),
            _ => Resolution::Missing(
                self.names()
                    .into_iter()
                    .filter(|name| position(*name).is_none())
                    .map(String::from)
                    .collect(),
            ),
        }
    }
}
