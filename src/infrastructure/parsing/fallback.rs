//! Ordered fallback chains
//!
//! A chain is a fixed list of named extraction tiers tried in order; the
//! first tier returning a value wins. Tier order is part of the output
//! contract, so chains are declared as static tables and never reordered at
//! runtime.

use super::context::ContainerScope;
use tracing::{debug, trace};

/// One extraction strategy over a container
pub type Tier<T> = fn(&ContainerScope<'_>) -> Option<T>;

/// Named, ordered list of tiers for one field
pub struct FallbackChain<T: 'static> {
    field: &'static str,
    tiers: &'static [(&'static str, Tier<T>)],
}

impl<T: 'static> FallbackChain<T> {
    pub const fn new(field: &'static str, tiers: &'static [(&'static str, Tier<T>)]) -> Self {
        Self { field, tiers }
    }

    /// Field this chain fills
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Tier names in evaluation order
    pub fn tier_names(&self) -> Vec<&'static str> {
        self.tiers.iter().map(|(name, _)| *name).collect()
    }

    /// Value of the first successful tier
    pub fn resolve(&self, scope: &ContainerScope<'_>) -> Option<T> {
        self.resolve_with_tier(scope).map(|(_, value)| value)
    }

    /// Value of the first successful tier along with that tier's name
    pub fn resolve_with_tier(&self, scope: &ContainerScope<'_>) -> Option<(&'static str, T)> {
        for (tier, extract) in self.tiers {
            if let Some(value) = extract(scope) {
                debug!(field = self.field, tier = *tier, product = %scope.name, "field resolved");
                return Some((*tier, value));
            }
            trace!(field = self.field, tier = *tier, product = %scope.name, "tier missed");
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::config::CompiledPatterns;
    use scraper::{Html, Selector};

    fn never(_: &ContainerScope<'_>) -> Option<&'static str> {
        None
    }

    fn first_choice(_: &ContainerScope<'_>) -> Option<&'static str> {
        Some("first")
    }

    fn second_choice(_: &ContainerScope<'_>) -> Option<&'static str> {
        Some("second")
    }

    static ORDERED: [(&str, Tier<&'static str>); 3] = [
        ("never", never),
        ("first", first_choice),
        ("second", second_choice),
    ];
    static EXHAUSTED: [(&str, Tier<&'static str>); 1] = [("never", never)];

    fn with_scope(check: impl Fn(&ContainerScope<'_>)) {
        let html = Html::parse_fragment("<div><p>Rosier</p></div>");
        let div = html.select(&Selector::parse("div").unwrap()).next().unwrap();
        let title = html.select(&Selector::parse("p").unwrap()).next().unwrap();
        let patterns = CompiledPatterns::builtin().unwrap();
        let scope = ContainerScope {
            document: &html,
            container: div,
            title,
            name: "Rosier".to_string(),
            patterns: &patterns,
        };
        check(&scope);
    }

    #[test]
    fn test_first_successful_tier_wins() {
        let chain = FallbackChain::new("demo", &ORDERED);
        with_scope(|scope| {
            assert_eq!(chain.resolve_with_tier(scope), Some(("first", "first")));
        });
        assert_eq!(chain.tier_names(), vec!["never", "first", "second"]);
    }

    #[test]
    fn test_exhausted_chain_yields_none() {
        let chain = FallbackChain::new("demo", &EXHAUSTED);
        with_scope(|scope| assert_eq!(chain.resolve(scope), None));
        assert_eq!(chain.field(), "demo");
    }
}
