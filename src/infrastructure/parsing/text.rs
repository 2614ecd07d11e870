//! Text collection over element subtrees

use scraper::ElementRef;

/// Every descendant text node trimmed, empties dropped, joined by `separator`
pub fn collect_text(element: &ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Trimmed text of an element with no separator between text nodes
pub fn stripped_text(element: &ElementRef<'_>) -> String {
    collect_text(element, "")
}

/// Trimmed text of an element with text nodes separated by a single space
pub fn spaced_text(element: &ElementRef<'_>) -> String {
    collect_text(element, " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(html: &'a Html, selector: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(selector).unwrap()).next().unwrap()
    }

    #[test]
    fn test_stripped_text_concatenates_trimmed_nodes() {
        let html = Html::parse_fragment("<div>  Rosier <b> Ghee </b>\n</div>");
        assert_eq!(stripped_text(&first(&html, "div")), "RosierGhee");
    }

    #[test]
    fn test_spaced_text_joins_with_single_space() {
        let html = Html::parse_fragment("<div>\n  500 <span>g</span>  <span> </span>Add</div>");
        assert_eq!(spaced_text(&first(&html, "div")), "500 g Add");
    }

    #[test]
    fn test_empty_element_yields_empty_string() {
        let html = Html::parse_fragment("<div>   </div>");
        assert_eq!(stripped_text(&first(&html, "div")), "");
    }
}
