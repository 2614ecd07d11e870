//! Domain module - product records and site constants
//!
//! Each submodule is its own file in the domain/ directory;
//! commonly used items are re-exported here.

pub mod constants;
pub mod product;

pub use product::{ProductRecord, StockStatus, UNDETERMINED};
