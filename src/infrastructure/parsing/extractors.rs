//! Per-field extractors
//!
//! Variant, price and URL are ordered fallback chains; stock is a single
//! binary classification. Every extractor reads only its [`ContainerScope`],
//! so one tile's misses never affect another tile.
//!
//! [`ContainerScope`]: super::context::ContainerScope

pub mod price;
pub mod stock;
pub mod url;
pub mod variant;

pub use price::PRICE_CHAIN;
pub use stock::classify_stock;
pub use url::{URL_CHAIN, normalize_link};
pub use variant::VARIANT_CHAIN;
