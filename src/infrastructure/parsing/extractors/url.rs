//! Product link extraction
//!
//! Tiles on the listing are not consistently wrapped in anchors: sometimes
//! the link is inside the tile, sometimes around it, sometimes only around a
//! copy of the title elsewhere on the page. Tiers return the raw `href`;
//! [`normalize_link`] is applied to whichever tier answered.

use crate::infrastructure::parsing::context::ContainerScope;
use crate::infrastructure::parsing::fallback::{FallbackChain, Tier};
use scraper::ElementRef;

static URL_TIERS: [(&str, Tier<String>); 4] = [
    ("container_descendant", from_container_descendant),
    ("container_ancestor", from_container_ancestor),
    ("title_ancestor", from_title_ancestor),
    ("document_name_match", from_document_name_match),
];

/// URL chain: inside the tile, around the tile, around the title, anywhere the name appears
pub static URL_CHAIN: FallbackChain<String> = FallbackChain::new("url", &URL_TIERS);

fn link_target(element: &ElementRef<'_>) -> Option<String> {
    let value = element.value();
    if value.name() != "a" {
        return None;
    }
    value.attr("href").map(|href| href.trim().to_string())
}

fn nearest_enclosing_link(element: &ElementRef<'_>) -> Option<String> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find_map(|ancestor| link_target(&ancestor))
}

fn from_container_descendant(scope: &ContainerScope<'_>) -> Option<String> {
    scope
        .container
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find_map(|element| link_target(&element))
}

fn from_container_ancestor(scope: &ContainerScope<'_>) -> Option<String> {
    nearest_enclosing_link(&scope.container)
}

fn from_title_ancestor(scope: &ContainerScope<'_>) -> Option<String> {
    nearest_enclosing_link(&scope.title)
}

/// First text node equal to the name that sits inside a link
///
/// The title's own text node always matches first and usually has no link,
/// so matches without an enclosing link are skipped rather than ending the search.
fn from_document_name_match(scope: &ContainerScope<'_>) -> Option<String> {
    let name = scope.name.as_str();
    scope
        .document
        .tree
        .root()
        .descendants()
        .filter(|node| node.value().as_text().is_some_and(|text| text.trim() == name))
        .filter_map(|node| node.parent().and_then(ElementRef::wrap))
        .find_map(|parent| link_target(&parent).or_else(|| nearest_enclosing_link(&parent)))
}

/// Make a raw link target absolute against the site origin
///
/// `http…` passes through, `/path` is appended to the origin, anything else
/// is joined to the origin with a `/`.
pub fn normalize_link(href: &str, base_url: &str) -> String {
    let href = href.trim();
    let base = base_url.trim_end_matches('/');
    if href.starts_with("http") {
        href.to_string()
    } else if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::config::CompiledPatterns;
    use crate::infrastructure::parsing::text::stripped_text;
    use rstest::rstest;
    use scraper::{Html, Selector};

    const TITLE_CLASS: &str = "tw-text-300 tw-font-semibold tw-line-clamp-2";

    fn resolve(document: &str) -> Option<(&'static str, String)> {
        let html = Html::parse_document(document);
        let container = html
            .select(&Selector::parse("#tile").unwrap())
            .next()
            .unwrap();
        let patterns = CompiledPatterns::builtin().unwrap();
        let title = patterns.title.find_in(&container).unwrap();
        let scope = ContainerScope {
            document: &html,
            container,
            title,
            name: stripped_text(&title),
            patterns: &patterns,
        };
        URL_CHAIN.resolve_with_tier(&scope)
    }

    #[rstest]
    #[case("/prn/abc", "https://blinkit.com/prn/abc")]
    #[case("https://x/y", "https://x/y")]
    #[case("abc", "https://blinkit.com/abc")]
    #[case("  /prn/ghee/prid/42 ", "https://blinkit.com/prn/ghee/prid/42")]
    #[case("http://blinkit.com/p", "http://blinkit.com/p")]
    fn test_normalize_link(#[case] href: &str, #[case] expected: &str) {
        assert_eq!(normalize_link(href, "https://blinkit.com"), expected);
        assert_eq!(normalize_link(href, "https://blinkit.com/"), expected);
    }

    #[test]
    fn test_link_inside_container() {
        let doc = format!(
            r#"<body><div id="tile">
                <div class="{TITLE_CLASS}">Rosier Ghee</div>
                <a href=" /prn/inner ">view</a>
            </div>
            <a href="/prn/duplicate">Rosier Ghee</a></body>"#
        );
        assert_eq!(
            resolve(&doc),
            Some(("container_descendant", "/prn/inner".to_string()))
        );
    }

    #[test]
    fn test_link_wrapping_container() {
        let doc = format!(
            r#"<body><section><a href="/prn/wrapped"><div id="tile">
                <div class="{TITLE_CLASS}">Rosier Ghee</div>
            </div></a></section></body>"#
        );
        assert_eq!(
            resolve(&doc),
            Some(("container_ancestor", "/prn/wrapped".to_string()))
        );
    }

    #[test]
    fn test_title_ancestor_tier() {
        // Only reachable when the title element sits outside the tile
        let doc = format!(
            r#"<body><div id="tile"><span>1 L</span></div>
            <a href=" /prn/title "><div id="title" class="{TITLE_CLASS}">Rosier Ghee</div></a></body>"#
        );
        let html = Html::parse_document(&doc);
        let pick = |css: &str| html.select(&Selector::parse(css).unwrap()).next().unwrap();
        let patterns = CompiledPatterns::builtin().unwrap();
        let title = pick("#title");
        let scope = ContainerScope {
            document: &html,
            container: pick("#tile"),
            title,
            name: stripped_text(&title),
            patterns: &patterns,
        };

        assert_eq!(from_container_descendant(&scope), None);
        assert_eq!(from_container_ancestor(&scope), None);
        assert_eq!(from_title_ancestor(&scope), Some("/prn/title".to_string()));
        assert_eq!(
            URL_CHAIN.resolve_with_tier(&scope),
            Some(("title_ancestor", "/prn/title".to_string()))
        );
    }

    #[test]
    fn test_document_wide_name_match() {
        let doc = format!(
            r#"<body>
                <div id="tile"><div class="{TITLE_CLASS}">Rosier Ghee</div></div>
                <ul><li><a href="prn/rosier-ghee"><span> Rosier Ghee </span></a></li></ul>
            </body>"#
        );
        assert_eq!(
            resolve(&doc),
            Some(("document_name_match", "prn/rosier-ghee".to_string()))
        );
    }

    #[test]
    fn test_unresolvable_link_is_none() {
        let doc = format!(
            r#"<body><div id="tile"><a name="top">x</a><div class="{TITLE_CLASS}">Rosier Ghee</div></div>
            <a href="/prn/other">Rosier Honey</a></body>"#
        );
        assert_eq!(resolve(&doc), None);
    }

    #[test]
    fn test_tier_order_is_fixed() {
        assert_eq!(
            URL_CHAIN.tier_names(),
            vec![
                "container_descendant",
                "container_ancestor",
                "title_ancestor",
                "document_name_match"
            ]
        );
    }
}
