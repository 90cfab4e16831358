//! Read-only handle over a parsed page.
//!
//! Wraps a `scraper::Html` document together with the page URL and exposes
//! the views the detector layers need: JSON-LD blocks, meta tags, CSS
//! selection, visible text, headings, and an approximate rendered font size.
//! The document is never mutated; every accessor tolerates malformed input
//! by returning "nothing" rather than an error.

use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use url::Url;

/// A heading element with its resolved text and approximate font size.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level, 1 through 6.
    pub level: u8,
    /// Visible text, whitespace-collapsed.
    pub text: String,
    /// Approximate rendered font size in pixels.
    pub font_px: f32,
}

/// Read-only handle to a page's DOM, metadata and URL.
pub struct SourceDocument {
    html: Html,
    url: Option<Url>,
}

impl SourceDocument {
    /// Parse raw HTML. A missing or unparseable page URL is tolerated —
    /// URL-derived signals simply become unavailable.
    pub fn parse(html: &str, page_url: Option<&str>) -> Self {
        Self {
            html: Html::parse_document(html),
            url: page_url.and_then(|u| Url::parse(u).ok()),
        }
    }

    /// The page URL as given, if it parsed.
    pub fn page_url(&self) -> Option<String> {
        self.url.as_ref().map(|u| u.to_string())
    }

    /// Hostname of the page URL.
    pub fn hostname(&self) -> Option<String> {
        self.url
            .as_ref()
            .and_then(|u| u.host_str())
            .map(|h| h.to_string())
    }

    /// Text of the `<title>` element, whitespace-collapsed.
    pub fn page_title(&self) -> Option<String> {
        self.select_first_text("title")
    }

    /// All parseable JSON-LD blocks, in document order.
    ///
    /// Blocks that fail to parse are skipped silently.
    pub fn jsonld_blocks(&self) -> Vec<Value> {
        let mut blocks = Vec::new();
        if let Ok(sel) = Selector::parse(r#"script[type="application/ld+json"]"#) {
            for element in self.html.select(&sel) {
                let text = element.inner_html();
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                if let Ok(value) = serde_json::from_str::<Value>(text) {
                    blocks.push(value);
                }
            }
        }
        blocks
    }

    /// Content of `<meta property="...">` (OpenGraph convention).
    pub fn meta_property(&self, property: &str) -> Option<String> {
        self.meta_content("property", property)
    }

    /// Content of `<meta name="...">`.
    pub fn meta_name(&self, name: &str) -> Option<String> {
        self.meta_content("name", name)
    }

    fn meta_content(&self, attr: &str, key: &str) -> Option<String> {
        let sel = Selector::parse(&format!(r#"meta[{attr}="{key}"]"#)).ok()?;
        self.html
            .select(&sel)
            .filter_map(|el| el.value().attr("content"))
            .map(crate::detect::normalize_whitespace)
            .find(|c| !c.is_empty())
    }

    /// All elements matching a selector. An invalid selector yields no
    /// elements, matching the detector's "treat as no match" contract.
    pub fn select(&self, selector: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(selector) {
            Ok(sel) => self.html.select(&sel).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Visible text of the first element matching `selector`, if non-empty.
    pub fn select_first_text(&self, selector: &str) -> Option<String> {
        self.select(selector)
            .into_iter()
            .map(|el| element_text(&el))
            .find(|t| !t.is_empty())
    }

    /// All visible text under `<body>`, whitespace-collapsed.
    pub fn body_text(&self) -> String {
        if let Ok(sel) = Selector::parse("body") {
            if let Some(body) = self.html.select(&sel).next() {
                return element_text(&body);
            }
        }
        String::new()
    }

    /// Headings of the given levels with non-empty text, level-major order.
    pub fn headings(&self, levels: &[u8]) -> Vec<Heading> {
        let mut headings = Vec::new();
        for &level in levels {
            for el in self.select(&format!("h{level}")) {
                let text = element_text(&el);
                if text.is_empty() {
                    continue;
                }
                headings.push(Heading {
                    level,
                    text,
                    font_px: font_size_px(&el),
                });
            }
        }
        headings
    }
}

/// Collect an element's visible text, trimmed and whitespace-collapsed.
pub fn element_text(el: &ElementRef<'_>) -> String {
    el.text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Approximate rendered font size of an element in pixels.
///
/// There is no layout engine here: an inline `style="font-size: ..."`
/// declaration wins (px accepted directly, pt converted at 4/3), otherwise
/// the UA default for the tag applies.
pub fn font_size_px(el: &ElementRef<'_>) -> f32 {
    if let Some(style) = el.value().attr("style") {
        if let Some(px) = parse_inline_font_size(style) {
            return px;
        }
    }
    default_font_size(el.value().name())
}

fn parse_inline_font_size(style: &str) -> Option<f32> {
    for declaration in style.split(';') {
        let mut parts = declaration.splitn(2, ':');
        let property = parts.next()?.trim();
        if !property.eq_ignore_ascii_case("font-size") {
            continue;
        }
        let value = parts.next()?.trim().to_ascii_lowercase();
        if let Some(num) = value.strip_suffix("px") {
            return num.trim().parse::<f32>().ok();
        }
        if let Some(num) = value.strip_suffix("pt") {
            return num.trim().parse::<f32>().ok().map(|pt| pt * 4.0 / 3.0);
        }
        // em/rem/% need the cascade; fall through to the tag default.
        return None;
    }
    None
}

/// UA-stylesheet default font sizes against a 16px base.
fn default_font_size(tag: &str) -> f32 {
    match tag {
        "h1" => 32.0,
        "h2" => 24.0,
        "h3" => 18.72,
        "h4" => 16.0,
        "h5" => 13.28,
        "h6" => 10.72,
        _ => 16.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_jsonld_blocks_and_skips_malformed() {
        let html = r#"
        <html><head>
        <script type="application/ld+json">{not valid json}</script>
        <script type="application/ld+json">{"@type": "JobPosting"}</script>
        </head><body></body></html>
        "#;
        let doc = SourceDocument::parse(html, None);
        let blocks = doc.jsonld_blocks();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["@type"], "JobPosting");
    }

    #[test]
    fn hostname_and_title() {
        let html = "<html><head><title>  Senior  Engineer \n </title></head><body></body></html>";
        let doc = SourceDocument::parse(html, Some("https://jobs.acme.com/listing/1"));
        assert_eq!(doc.hostname().as_deref(), Some("jobs.acme.com"));
        assert_eq!(doc.page_title().as_deref(), Some("Senior Engineer"));
    }

    #[test]
    fn invalid_page_url_is_tolerated() {
        let doc = SourceDocument::parse("<html></html>", Some("not a url"));
        assert!(doc.hostname().is_none());
        assert!(doc.page_url().is_none());
    }

    #[test]
    fn invalid_selector_is_no_match() {
        let doc = SourceDocument::parse("<html><body><p>hi</p></body></html>", None);
        assert!(doc.select("p[[[").is_empty());
        assert!(doc.select_first_text("p[[[").is_none());
    }

    #[test]
    fn meta_property_reads_content() {
        let html = r#"<html><head>
            <meta property="og:site_name" content="Acme Corp" />
            <meta name="description" content="  A   job  " />
        </head><body></body></html>"#;
        let doc = SourceDocument::parse(html, None);
        assert_eq!(doc.meta_property("og:site_name").as_deref(), Some("Acme Corp"));
        assert_eq!(doc.meta_name("description").as_deref(), Some("A job"));
    }

    #[test]
    fn inline_font_size_beats_tag_default() {
        let html = r#"<html><body>
            <h2 style="color: red; font-size: 16px">Small heading</h2>
            <h2>Default heading</h2>
            <h3 style="font-size: 15pt">Point heading</h3>
        </body></html>"#;
        let doc = SourceDocument::parse(html, None);
        let headings = doc.headings(&[2, 3]);
        assert_eq!(headings.len(), 3);
        assert!((headings[0].font_px - 16.0).abs() < 0.01);
        assert!((headings[1].font_px - 24.0).abs() < 0.01);
        assert!((headings[2].font_px - 20.0).abs() < 0.01);
    }

    #[test]
    fn body_text_collapses_whitespace() {
        let html = "<html><body><p>Join   Acme\n Inc</p><p>today</p></body></html>";
        let doc = SourceDocument::parse(html, None);
        assert_eq!(doc.body_text(), "Join Acme Inc today");
    }
}
