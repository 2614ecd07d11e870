//! HTML extraction engine for saved category pages
//!
//! Locates product tiles, filters them to one brand and recovers each field
//! through its own fallback chain, with the styling-coupled patterns kept in
//! a separate configuration table.

pub mod config;
pub mod container_locator;
pub mod context;
pub mod error;
pub mod extractors;
pub mod fallback;
pub mod product_list_parser;
pub mod text;
pub mod title;

// Re-export public types
pub use config::{ClassPattern, CompiledPatterns, FieldPatterns};
pub use container_locator::ContainerLocator;
pub use context::{ContainerScope, ParseContext};
pub use error::{ParsingError, ParsingResult};
pub use fallback::FallbackChain;
pub use product_list_parser::{ExtractionOutcome, ProductListParser};
pub use title::BrandFilter;

use scraper::Html;

/// Parser over an already-loaded document with contextual settings
pub trait ContextualParser {
    type Output;
    type Context;

    /// Parse HTML with contextual information
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}
