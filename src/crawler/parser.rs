//! HTML parser for extracting links and text
//!
//! This module handles parsing fetched HTML to extract:
//! - Anchor targets to classify and follow
//! - The page title
//! - Two plain-text renderings: everything visible (used for email
//!   scanning) and main content without navigation chrome (used for
//!   text crawls)

use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;
use url::Url;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("Failed to compile title selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Failed to compile anchor selector"));

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "svg"];

/// Page chrome repeated across a site
const BOILERPLATE_ELEMENTS: &[&str] = &["nav", "header", "footer", "aside"];

/// A fetched document, parsed once and inspected by every extractor
///
/// `Html` is not `Send`, so a `Page` is built, consumed and dropped between
/// two network requests and never held across an await point.
pub struct Page {
    /// Absolute URL the page was requested from
    pub url: Url,
    /// Raw body with HTML entities already decoded
    pub html: String,
    /// Parsed document
    pub document: Html,
}

impl Page {
    /// Parses a fetched body
    ///
    /// # Example
    ///
    /// ```
    /// use leadline::crawler::Page;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://example.com/").unwrap();
    /// let page = Page::parse(url, "<title>Home</title><a href=\"/contact\">Contact</a>".to_string());
    /// assert_eq!(page.title(), Some("Home".to_string()));
    /// assert_eq!(page.hrefs(), vec!["/contact".to_string()]);
    /// ```
    pub fn parse(url: Url, html: String) -> Self {
        let document = Html::parse_document(&html);
        Self { url, html, document }
    }

    /// The page title (from the <title> tag)
    pub fn title(&self) -> Option<String> {
        self.document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Raw href values of every anchor, in document order
    ///
    /// Anchors carrying a `download` attribute point at files, not pages,
    /// and are skipped.
    pub fn hrefs(&self) -> Vec<String> {
        self.document
            .select(&ANCHOR_SELECTOR)
            .filter(|element| element.value().attr("download").is_none())
            .filter_map(|element| element.value().attr("href"))
            .map(|href| href.trim().to_string())
            .filter(|href| !href.is_empty())
            .collect()
    }

    /// All visible text, one trimmed fragment per line
    pub fn visible_text(&self) -> String {
        visible_text(&self.document)
    }

    /// Visible text without navigation, header, footer and sidebar chrome
    pub fn content_text(&self) -> String {
        content_text(&self.document)
    }
}

/// All visible text of a document, one trimmed fragment per line
pub fn visible_text(document: &Html) -> String {
    render_text(document, HIDDEN_ELEMENTS, &[])
}

/// Visible text of a document minus navigation chrome
pub fn content_text(document: &Html) -> String {
    render_text(document, HIDDEN_ELEMENTS, BOILERPLATE_ELEMENTS)
}

/// Renders a document as newline-separated text fragments
fn render_text(document: &Html, hidden: &[&str], boilerplate: &[&str]) -> String {
    let mut lines = Vec::new();
    collect_text(document.root_element(), hidden, boilerplate, &mut lines);
    lines.join("\n")
}

fn collect_text<'a>(
    element: ElementRef<'a>,
    hidden: &[&str],
    boilerplate: &[&str],
    lines: &mut Vec<&'a str>,
) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let fragment = text.trim();
                if !fragment.is_empty() {
                    lines.push(fragment);
                }
            }
            Node::Element(inner) => {
                let name = inner.name();
                if hidden.contains(&name) || boilerplate.contains(&name) {
                    continue;
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, hidden, boilerplate, lines);
                }
            }
            _ => {}
        }
    }
}
