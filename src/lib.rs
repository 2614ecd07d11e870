//! Shelf Scout - brand product extraction from saved category pages
//!
//! Reads a saved e-commerce category page, recovers every product tile of one
//! brand as a flat record (name, variant, price, stock, link), writes the
//! records as reports and optionally mails the report out.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ExtractionUseCase, RunSummary};
pub use domain::{ProductRecord, StockStatus};
pub use infrastructure::config::AppConfig;

/// Run one extraction with the given settings
pub async fn run(config: AppConfig) -> anyhow::Result<RunSummary> {
    ExtractionUseCase::from_config(config)?.execute().await
}
