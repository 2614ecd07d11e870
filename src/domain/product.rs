use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for a field that exists in the record but could not be recovered
pub const UNDETERMINED: &str = "-";

/// Availability of a listed product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
}

impl StockStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::OutOfStock => "Out of Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One product tile recovered from a category page
///
/// `name` is always present and contains the brand token. `variant` and
/// `price` hold [`UNDETERMINED`] when their fallback chains are exhausted;
/// `url` is `None` when no link could be attributed to the tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    pub variant: String,
    pub price: String,
    pub stock: StockStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProductRecord {
    /// Builds a record, mapping missing optional fields to the sentinel
    pub fn new(
        name: String,
        variant: Option<String>,
        price: Option<String>,
        stock: StockStatus,
        url: Option<String>,
    ) -> Self {
        Self {
            name,
            variant: variant.unwrap_or_else(|| UNDETERMINED.to_string()),
            price: price.unwrap_or_else(|| UNDETERMINED.to_string()),
            stock,
            url,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock == StockStatus::InStock
    }
}
