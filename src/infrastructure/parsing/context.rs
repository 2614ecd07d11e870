//! Parsing context objects
//!
//! `ParseContext` carries per-run settings into the parser; `ContainerScope`
//! is the read-only view every field extractor receives for one product tile.

use super::config::CompiledPatterns;
use crate::domain::constants::site;
use scraper::{ElementRef, Html};

/// Context information for one extraction run
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// Origin used to absolutize relative product links
    pub base_url: String,

    /// Brand token a product name must contain
    pub brand: String,

    /// Where the document came from, for diagnostics
    pub source: Option<String>,
}

impl ParseContext {
    /// Create new parse context
    pub fn new(base_url: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            brand: brand.into(),
            source: None,
        }
    }

    /// Record the document source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ParseContext {
    fn default() -> Self {
        Self::new(site::BASE_URL, site::DEFAULT_BRAND)
    }
}

/// Read-only view of one candidate container
///
/// Holds references into the parsed tree; nothing here owns or mutates
/// document nodes.
#[derive(Debug, Clone)]
pub struct ContainerScope<'a> {
    /// Whole document, for tiers that search beyond the container
    pub document: &'a Html,

    /// Root of the product tile
    pub container: ElementRef<'a>,

    /// Title element located inside the container
    pub title: ElementRef<'a>,

    /// Trimmed product name taken from the title
    pub name: String,

    /// Compiled pattern table
    pub patterns: &'a CompiledPatterns,
}
