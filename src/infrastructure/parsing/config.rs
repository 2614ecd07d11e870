//! Pattern table for styling-coupled extraction
//!
//! Class names on the listing site are generated by its CSS build and change
//! between releases. Everything that depends on them is kept in this table so
//! a page redesign means editing configuration, not extraction code.

use super::{ParsingError, ParsingResult};
use crate::domain::constants::stock;
use regex::{Regex, RegexBuilder};
use scraper::ElementRef;
use serde::{Deserialize, Serialize};

/// Element tag plus a class-attribute regex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassPattern {
    /// Tag name the element must have
    pub tag: String,
    /// Regex searched (unanchored) in the element's full `class` attribute
    pub class_pattern: String,
}

impl ClassPattern {
    pub fn new(tag: &str, class_pattern: &str) -> Self {
        Self {
            tag: tag.to_string(),
            class_pattern: class_pattern.to_string(),
        }
    }
}

/// Serializable pattern table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldPatterns {
    /// Marks the product title inside a tile
    pub title: ClassPattern,

    /// Marks the emphasized price display
    pub price: ClassPattern,

    /// Whole-string match for a bare price text node
    pub price_text: String,

    /// Quantity-plus-unit search over the tile's joined text
    pub quantity: String,

    /// Phrases that mark a tile out of stock
    pub out_of_stock_phrases: Vec<String>,
}

impl Default for FieldPatterns {
    fn default() -> Self {
        Self {
            title: ClassPattern::new("div", r"tw-text-300.*tw-font-semibold.*tw-line-clamp-2"),
            price: ClassPattern::new("div", r"tw-text-200.*tw-font-semibold"),
            price_text: r"^₹[0-9,]+$".to_string(),
            quantity: r"(\d+(?:\.\d+)?\s*(?:kg|g|ml|l|piece|pack|pcs|bottle|jar|box|kgx|gx|ltr|litre|kilogram))\b"
                .to_string(),
            out_of_stock_phrases: stock::OUT_OF_STOCK_PHRASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Element matcher compiled from a [`ClassPattern`]
#[derive(Debug, Clone)]
pub struct ClassMatcher {
    tag: String,
    class_regex: Regex,
}

impl ClassMatcher {
    fn compile(field: &str, pattern: &ClassPattern) -> ParsingResult<Self> {
        if pattern.tag.trim().is_empty() {
            return Err(ParsingError::configuration(field, "tag must not be empty"));
        }
        let class_regex = Regex::new(&pattern.class_pattern)
            .map_err(|e| ParsingError::invalid_pattern(field, &pattern.class_pattern, e))?;
        Ok(Self {
            tag: pattern.tag.trim().to_lowercase(),
            class_regex,
        })
    }

    /// Returns true if the element has the tag and a matching class list
    ///
    /// The class tokens are rejoined with single spaces, so line breaks or
    /// tabs inside the attribute do not affect the match.
    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        if value.name() != self.tag || value.attr("class").is_none() {
            return false;
        }
        let classes = value.classes().collect::<Vec<_>>().join(" ");
        self.class_regex.is_match(&classes)
    }

    /// First matching descendant in document order, excluding the root itself
    pub fn find_in<'a>(&self, root: &ElementRef<'a>) -> Option<ElementRef<'a>> {
        root.descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .find(|element| self.matches(element))
    }
}

/// Pattern table with every regex compiled
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub title: ClassMatcher,
    pub price: ClassMatcher,
    pub price_text: Regex,
    pub quantity: Regex,
    pub out_of_stock_phrases: Vec<String>,
}

impl CompiledPatterns {
    /// Compile a pattern table, rejecting any invalid entry
    pub fn compile(patterns: &FieldPatterns) -> ParsingResult<Self> {
        let price_text = Regex::new(&patterns.price_text)
            .map_err(|e| ParsingError::invalid_pattern("price_text", &patterns.price_text, e))?;
        let quantity = RegexBuilder::new(&patterns.quantity)
            .case_insensitive(true)
            .build()
            .map_err(|e| ParsingError::invalid_pattern("quantity", &patterns.quantity, e))?;

        Ok(Self {
            title: ClassMatcher::compile("title", &patterns.title)?,
            price: ClassMatcher::compile("price", &patterns.price)?,
            price_text,
            quantity,
            out_of_stock_phrases: patterns
                .out_of_stock_phrases
                .iter()
                .map(|phrase| phrase.trim().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        })
    }

    /// Compile the built-in pattern table
    pub fn builtin() -> ParsingResult<Self> {
        Self::compile(&FieldPatterns::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_default_patterns_compile() {
        assert!(CompiledPatterns::compile(&FieldPatterns::default()).is_ok());
    }

    #[test]
    fn test_invalid_regex_is_reported_with_field() {
        let patterns = FieldPatterns {
            quantity: "(\\d+".to_string(),
            ..FieldPatterns::default()
        };
        match CompiledPatterns::compile(&patterns) {
            Err(ParsingError::InvalidPattern { field, .. }) => assert_eq!(field, "quantity"),
            other => panic!("expected InvalidPattern, got {other:?}"),
        }
    }

    #[test]
    fn test_class_matcher_searches_whole_class_attribute() {
        let html = Html::parse_fragment(
            r#"<section>
                <div class="tw-text-300 tw-font-semibold tw-line-clamp-2">Rosier Ghee</div>
                <div class="tw-text-300 tw-font-medium">Other</div>
            </section>"#,
        );
        let section = html
            .select(&Selector::parse("section").unwrap())
            .next()
            .unwrap();
        let patterns = CompiledPatterns::builtin().unwrap();

        let title = patterns.title.find_in(&section).unwrap();
        assert_eq!(title.text().collect::<String>(), "Rosier Ghee");
    }

    #[test]
    fn test_class_matcher_requires_tag() {
        let html = Html::parse_fragment(
            r#"<section><span class="tw-text-200 tw-font-semibold">₹120</span></section>"#,
        );
        let section = html
            .select(&Selector::parse("section").unwrap())
            .next()
            .unwrap();
        assert!(CompiledPatterns::builtin().unwrap().price.find_in(&section).is_none());
    }

    #[test]
    fn test_stock_phrases_are_normalized() {
        let patterns = FieldPatterns {
            out_of_stock_phrases: vec!["  Sold Out ".to_string(), "   ".to_string()],
            ..FieldPatterns::default()
        };
        let compiled = CompiledPatterns::compile(&patterns).unwrap();
        assert_eq!(compiled.out_of_stock_phrases, vec!["sold out".to_string()]);
    }

    #[test]
    fn test_class_list_wrapped_across_lines_still_matches() {
        let html = Html::parse_fragment(
            "<section>\
                <div class=\"tw-text-300\n tw-font-semibold tw-line-clamp-2\">Rosier Ghee</div>\
                <div class=\"tw-text-200\n\ttw-font-semibold\">₹650</div>\
            </section>",
        );
        let section = html
            .select(&Selector::parse("section").unwrap())
            .next()
            .unwrap();
        let patterns = CompiledPatterns::builtin().unwrap();

        let title = patterns.title.find_in(&section).unwrap();
        assert_eq!(title.text().collect::<String>(), "Rosier Ghee");
        let price = patterns.price.find_in(&section).unwrap();
        assert_eq!(price.text().collect::<String>(), "₹650");
    }
}
