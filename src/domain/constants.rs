//! Site characteristics and extraction keyword tables
//!
//! The keyword tables here are fixed vocabulary of the listing site.
//! Styling-dependent patterns (class names, price text) live in
//! `infrastructure::parsing::config` instead, so they can be overridden
//! from configuration.

/// Listing site characteristics
pub mod site {
    /// Origin used to absolutize relative product links
    pub const BASE_URL: &str = "https://blinkit.com";

    /// Structural predicate marking a clickable product tile.
    ///
    /// Visual class names churn between page builds, the role/tabindex pair does not.
    pub const CONTAINER_SELECTOR: &str = r#"div[role="button"][tabindex="0"]"#;

    /// Brand token kept by default
    pub const DEFAULT_BRAND: &str = "rosier";

    /// Default saved category page
    pub const DEFAULT_DOCUMENT_PATH: &str = "blinkit.html";
}

/// Unit vocabulary used by the variant heuristics
pub mod units {
    /// Keywords accepted in the tag following the title
    pub const SIBLING_KEYWORDS: &[&str] = &["kg", "g", "ml", "l", "pack", "piece", "pcs"];

    /// Keywords that make the name itself worth scanning for a pack size
    pub const NAME_TRIGGER_KEYWORDS: &[&str] = &["kg", "g", "ml", "l"];

    /// Keywords looked for in each name token, scanning right to left
    pub const NAME_TOKEN_KEYWORDS: &[&str] = &["kg", "g", "ml", "l", "pack", "piece"];

    /// Returns true if `text` contains any keyword, case-insensitively
    pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
        let lowered = text.to_lowercase();
        keywords.iter().any(|keyword| lowered.contains(keyword))
    }
}

/// Stock vocabulary
pub mod stock {
    /// Phrases whose presence in a tile marks the product out of stock
    pub const OUT_OF_STOCK_PHRASES: &[&str] =
        &["out of stock", "outofstock", "currently unavailable"];
}
