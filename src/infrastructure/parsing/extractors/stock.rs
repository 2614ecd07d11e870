//! Stock status classification
//!
//! Not a fallback chain: the tile is out of stock only on negative evidence,
//! and in stock otherwise.

use crate::domain::StockStatus;
use crate::infrastructure::parsing::context::ContainerScope;
use crate::infrastructure::parsing::text::spaced_text;

/// Classify a tile by searching its lowercased text for negative phrases
pub fn classify_stock(scope: &ContainerScope<'_>) -> StockStatus {
    classify_text(&spaced_text(&scope.container), &scope.patterns.out_of_stock_phrases)
}

/// Classify arbitrary tile text against normalized (lowercase) phrases
pub fn classify_text(text: &str, phrases: &[String]) -> StockStatus {
    let lowered = text.to_lowercase();
    if phrases.iter().any(|phrase| lowered.contains(phrase.as_str())) {
        StockStatus::OutOfStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::config::CompiledPatterns;

    fn phrases() -> Vec<String> {
        CompiledPatterns::builtin().unwrap().out_of_stock_phrases
    }

    #[test]
    fn test_negative_phrase_marks_out_of_stock() {
        assert_eq!(
            classify_text("Rosier Ghee 500 g Currently Unavailable", &phrases()),
            StockStatus::OutOfStock
        );
        assert_eq!(
            classify_text("OUT OF STOCK Rosier Honey", &phrases()),
            StockStatus::OutOfStock
        );
    }

    #[test]
    fn test_no_evidence_defaults_to_in_stock() {
        assert_eq!(classify_text("", &phrases()), StockStatus::InStock);
        assert_eq!(
            classify_text("Rosier Ghee ₹650 ADD", &phrases()),
            StockStatus::InStock
        );
    }

    #[test]
    fn test_phrase_split_across_nodes_is_joined() {
        // spaced text joins "Out of" and "Stock" with a single space
        let text = ["Out of", "Stock"].join(" ");
        assert_eq!(classify_text(&text, &phrases()), StockStatus::OutOfStock);
    }
}
