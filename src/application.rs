//! Application layer module
//!
//! Use cases that drive one run from the saved page to delivered report.

pub mod extraction_use_case;

pub use extraction_use_case::{ExtractionUseCase, RunSummary};
