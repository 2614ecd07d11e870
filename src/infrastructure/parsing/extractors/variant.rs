//! Pack size / variant extraction
//!
//! Tiers grow more permissive down the list, so the order below decides
//! which text wins when several tiers could answer.

use crate::domain::constants::units;
use crate::infrastructure::parsing::context::ContainerScope;
use crate::infrastructure::parsing::fallback::{FallbackChain, Tier};
use crate::infrastructure::parsing::text::{spaced_text, stripped_text};
use scraper::ElementRef;

static VARIANT_TIERS: [(&str, Tier<String>); 3] = [
    ("title_sibling", from_title_sibling),
    ("container_quantity", from_container_quantity),
    ("name_suffix", from_name_suffix),
];

/// Variant chain: title sibling, container-wide quantity, name suffix
pub static VARIANT_CHAIN: FallbackChain<String> = FallbackChain::new("variant", &VARIANT_TIERS);

/// Next sibling with the title's tag, accepted if it mentions a unit
fn from_title_sibling(scope: &ContainerScope<'_>) -> Option<String> {
    let tag = scope.title.value().name();
    let sibling = scope
        .title
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == tag)?;

    let text = stripped_text(&sibling);
    units::contains_any(&text, units::SIBLING_KEYWORDS).then_some(text)
}

/// First quantity-plus-unit match anywhere in the tile's text
fn from_container_quantity(scope: &ContainerScope<'_>) -> Option<String> {
    let text = spaced_text(&scope.container);
    let captures = scope.patterns.quantity.captures(&text)?;
    let matched = captures.get(1).or_else(|| captures.get(0))?;
    Some(matched.as_str().trim().to_string())
}

/// Rightmost unit-bearing name token plus the token before it ("500 g")
fn from_name_suffix(scope: &ContainerScope<'_>) -> Option<String> {
    if !units::contains_any(&scope.name, units::NAME_TRIGGER_KEYWORDS) {
        return None;
    }
    let words: Vec<&str> = scope.name.split_whitespace().collect();
    let last = words
        .iter()
        .rposition(|word| units::contains_any(word, units::NAME_TOKEN_KEYWORDS))?;
    Some(words[last.saturating_sub(1)..=last].join(" "))
}
