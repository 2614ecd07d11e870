//! Product list parser
//!
//! Walks every product tile on a category page, keeps the tiles whose title
//! names the configured brand, and assembles one record per kept tile from
//! the field extractors.

use super::config::{CompiledPatterns, FieldPatterns};
use super::container_locator::ContainerLocator;
use super::context::{ContainerScope, ParseContext};
use super::extractors::{PRICE_CHAIN, URL_CHAIN, VARIANT_CHAIN, classify_stock, normalize_link};
use super::title::{BrandFilter, locate_title};
use super::{ContextualParser, ParsingError, ParsingResult};
use crate::domain::ProductRecord;
use scraper::{ElementRef, Html};
use tracing::{debug, info, trace, warn};

/// Result of one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// Candidate containers found on the page
    pub containers: usize,
    /// Records kept after the brand filter, in document order
    pub records: Vec<ProductRecord>,
}

impl ExtractionOutcome {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn linked(&self) -> usize {
        self.records.iter().filter(|r| r.url.is_some()).count()
    }

    pub fn out_of_stock(&self) -> usize {
        self.records.iter().filter(|r| !r.is_in_stock()).count()
    }
}

/// Parser for extracting brand products from a category listing page
pub struct ProductListParser {
    locator: ContainerLocator,
    patterns: CompiledPatterns,
}

impl ProductListParser {
    /// Create a new product list parser with the built-in pattern table
    pub fn new() -> ParsingResult<Self> {
        Self::with_patterns(&FieldPatterns::default())
    }

    /// Create parser with a custom pattern table
    pub fn with_patterns(patterns: &FieldPatterns) -> ParsingResult<Self> {
        Ok(Self {
            locator: ContainerLocator::new()?,
            patterns: CompiledPatterns::compile(patterns)?,
        })
    }

    /// Extract every brand record; zero records is a valid outcome here
    pub fn extract(&self, html: &Html, context: &ParseContext) -> ParsingResult<ExtractionOutcome> {
        let brand = BrandFilter::new(&context.brand)?;
        if let Some(source) = &context.source {
            info!("Extracting '{}' products from {}", brand.token(), source);
        }
        let containers = self.locator.locate(html);
        info!("Total containers found: {}", containers.len());

        let records: Vec<ProductRecord> = containers
            .iter()
            .filter_map(|container| self.extract_record(html, container, &brand, context))
            .collect();

        let outcome = ExtractionOutcome {
            containers: containers.len(),
            records,
        };
        info!(
            "Extracted {} '{}' products ({} with links, {} out of stock)",
            outcome.total(),
            brand.token(),
            outcome.linked(),
            outcome.out_of_stock()
        );
        Ok(outcome)
    }

    /// Build one record from a tile, or skip it when it has no brand title
    fn extract_record<'a>(
        &self,
        html: &'a Html,
        container: &ElementRef<'a>,
        brand: &BrandFilter,
        context: &ParseContext,
    ) -> Option<ProductRecord> {
        let Some((title, name)) = locate_title(container, &self.patterns) else {
            trace!("Skipping container without a title");
            return None;
        };
        if !brand.matches(&name) {
            trace!("Skipping non-brand product: {}", name);
            return None;
        }

        let scope = ContainerScope {
            document: html,
            container: *container,
            title,
            name,
            patterns: &self.patterns,
        };

        let variant = VARIANT_CHAIN.resolve(&scope);
        let price = PRICE_CHAIN.resolve(&scope);
        let stock = classify_stock(&scope);
        let url = URL_CHAIN
            .resolve(&scope)
            .map(|href| normalize_link(&href, &context.base_url));

        if url.is_none() {
            warn!("No link found for {}", scope.name);
        }
        debug!(
            "Assembled record: {} | {} | {} | {}",
            scope.name,
            variant.as_deref().unwrap_or("-"),
            price.as_deref().unwrap_or("-"),
            stock
        );

        Some(ProductRecord::new(scope.name, variant, price, stock, url))
    }
}

impl ContextualParser for ProductListParser {
    type Output = ExtractionOutcome;
    type Context = ParseContext;

    /// Extract records, failing when the page yields none for the brand
    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let outcome = self.extract(html, context)?;
        if outcome.records.is_empty() {
            return Err(ParsingError::no_products_found(&context.brand, outcome.containers));
        }
        Ok(outcome)
    }
}
