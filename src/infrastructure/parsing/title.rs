//! Product title lookup and brand filtering

use super::config::CompiledPatterns;
use super::text::stripped_text;
use super::{ParsingError, ParsingResult};
use scraper::ElementRef;

/// Title element and its trimmed text, if the container has one
pub fn locate_title<'a>(
    container: &ElementRef<'a>,
    patterns: &CompiledPatterns,
) -> Option<(ElementRef<'a>, String)> {
    let title = patterns.title.find_in(container)?;
    let name = stripped_text(&title);
    Some((title, name))
}

/// Case-insensitive brand token test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandFilter {
    token: String,
}

impl BrandFilter {
    pub fn new(brand: &str) -> ParsingResult<Self> {
        let token = brand.trim().to_lowercase();
        if token.is_empty() {
            return Err(ParsingError::configuration("brand", "brand token must not be blank"));
        }
        Ok(Self { token })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn matches(&self, name: &str) -> bool {
        !name.is_empty() && name.to_lowercase().contains(&self.token)
    }
}
