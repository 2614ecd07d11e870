//! Candidate product container discovery

use super::{ParsingError, ParsingResult};
use crate::domain::constants::site;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Finds product tiles by their structural role/tabindex markers
#[derive(Debug, Clone)]
pub struct ContainerLocator {
    selector: Selector,
}

impl ContainerLocator {
    /// Locator using the site's tile predicate
    pub fn new() -> ParsingResult<Self> {
        Self::with_selector(site::CONTAINER_SELECTOR)
    }

    /// Locator using a custom CSS selector
    pub fn with_selector(selector: &str) -> ParsingResult<Self> {
        let selector = Selector::parse(selector).map_err(|e| ParsingError::InvalidSelector {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { selector })
    }

    /// Matching nodes in document order; empty when the page has none
    pub fn locate<'a>(&self, html: &'a Html) -> Vec<ElementRef<'a>> {
        let containers: Vec<ElementRef<'a>> = html.select(&self.selector).collect();
        debug!("Located {} product containers", containers.len());
        containers
    }
}
