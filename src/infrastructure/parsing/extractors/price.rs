//! Display price extraction
//!
//! Prices stay as display text with the currency symbol; the listing mixes
//! formats and nothing downstream needs a number.

use crate::infrastructure::parsing::context::ContainerScope;
use crate::infrastructure::parsing::fallback::{FallbackChain, Tier};
use crate::infrastructure::parsing::text::stripped_text;

static PRICE_TIERS: [(&str, Tier<String>); 2] = [
    ("price_class", from_price_class),
    ("currency_text", from_currency_text),
];

/// Price chain: emphasized price element, then a bare currency text node
pub static PRICE_CHAIN: FallbackChain<String> = FallbackChain::new("price", &PRICE_TIERS);

fn from_price_class(scope: &ContainerScope<'_>) -> Option<String> {
    scope
        .patterns
        .price
        .find_in(&scope.container)
        .map(|element| stripped_text(&element))
}

fn from_currency_text(scope: &ContainerScope<'_>) -> Option<String> {
    scope
        .container
        .text()
        .map(str::trim)
        .find(|text| scope.patterns.price_text.is_match(text))
        .map(str::to_string)
}
