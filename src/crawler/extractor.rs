//! Email address extraction
//!
//! Five independent strategies look for addresses on a page; their results
//! are unioned by exact string equality:
//!
//! 1. Regex scan over the raw (entity-decoded) HTML, which catches addresses
//!    inside attributes and inline scripts
//! 2. Regex scan over the visible text, plus a second pass over a
//!    deobfuscated copy (`jane[at]example[dot]com`)
//! 3. `mailto:` anchor targets
//! 4. `aria-label` attributes
//! 5. `email` keys anywhere inside JSON-LD blocks
//!
//! None of the strategies can fail: malformed input simply yields fewer
//! addresses.

use crate::crawler::parser::{visible_text, Page};
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@(?:[a-z0-9-]+\.)+[a-z]{2,}")
        .expect("Failed to compile email regex")
});

static MAILTO_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Failed to compile mailto selector"));
static ARIA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[aria-label]").expect("Failed to compile aria selector"));
static JSON_LD_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("Failed to compile JSON-LD selector")
});

/// Final labels that belong to asset file names, not mail domains
const ASSET_SUFFIXES: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp", "css", "js"];

/// Obfuscation markers and their replacements, applied in order
const DEOBFUSCATIONS: &[(&str, &str)] = &[
    ("[at]", "@"),
    ("(at)", "@"),
    (" at ", "@"),
    ("[dot]", "."),
    ("(dot)", "."),
];

/// Runs every strategy over one page
///
/// # Arguments
///
/// * `html` - The raw, entity-decoded HTML
/// * `text` - The visible-text rendering of the same page
/// * `document` - The parsed document
pub fn extract_emails(html: &str, text: &str, document: &Html) -> BTreeSet<String> {
    let mut emails = emails_in_text(html);
    emails.extend(emails_in_text(text));
    emails.extend(emails_in_text(&deobfuscate(text)));
    emails.extend(mailto_emails(document));
    emails.extend(aria_label_emails(document));
    emails.extend(json_ld_emails(document));
    emails
}

/// Runs every strategy over a parsed [`Page`]
pub fn extract_page_emails(page: &Page) -> BTreeSet<String> {
    let emails = extract_emails(&page.html, &page.visible_text(), &page.document);
    if !emails.is_empty() {
        tracing::debug!("Found {} email(s) on {}", emails.len(), page.url);
    }
    emails
}

/// Parses `html` and runs every strategy over it
///
/// # Example
///
/// ```
/// use leadline::crawler::extract_emails_from_html;
///
/// let emails = extract_emails_from_html(r#"<a href="mailto:info@shop.com?subject=hi">Email</a>"#);
/// assert_eq!(emails.into_iter().collect::<Vec<_>>(), vec!["info@shop.com".to_string()]);
/// ```
pub fn extract_emails_from_html(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    extract_emails(html, &visible_text(&document), &document)
}

/// Finds every email-shaped substring of `text`
pub fn emails_in_text(text: &str) -> BTreeSet<String> {
    EMAIL_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| is_plausible(candidate))
        .map(str::to_string)
        .collect()
}

/// Reverses common human-readable obfuscation
///
/// ```
/// use leadline::crawler::deobfuscate;
///
/// assert_eq!(deobfuscate("jane[at]example[dot]com"), "jane@example.com");
/// ```
pub fn deobfuscate(text: &str) -> String {
    DEOBFUSCATIONS
        .iter()
        .fold(text.to_string(), |acc, (marker, replacement)| {
            acc.replace(marker, replacement)
        })
}

/// Addresses from `mailto:` anchors, without query strings
pub fn mailto_emails(document: &Html) -> BTreeSet<String> {
    let mut emails = BTreeSet::new();

    for element in document.select(&MAILTO_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        let Some(target) = strip_prefix_ignore_case(href, "mailto:") else {
            continue;
        };

        let addresses = target.split('?').next().unwrap_or_default();
        for address in addresses.split(',') {
            let address = address.trim();
            if address.contains('@') {
                emails.insert(address.to_string());
            }
        }
    }

    emails
}

/// Addresses mentioned in `aria-label` attributes
pub fn aria_label_emails(document: &Html) -> BTreeSet<String> {
    document
        .select(&ARIA_SELECTOR)
        .filter_map(|element| element.value().attr("aria-label"))
        .filter(|label| label.contains('@'))
        .flat_map(emails_in_text)
        .collect()
}

/// Addresses stored under `email` keys in JSON-LD blocks
///
/// Blocks that fail to parse are skipped.
pub fn json_ld_emails(document: &Html) -> BTreeSet<String> {
    let mut emails = BTreeSet::new();

    for script in document.select(&JSON_LD_SELECTOR) {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => collect_json_emails(&value, &mut emails),
            Err(e) => tracing::debug!("Skipping malformed JSON-LD block: {}", e),
        }
    }

    emails
}

/// Walks a JSON tree looking for `email` string values
fn collect_json_emails(value: &Value, emails: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                if key.eq_ignore_ascii_case("email") {
                    if let Value::String(address) = inner {
                        let address = address.trim();
                        let address = strip_prefix_ignore_case(address, "mailto:").unwrap_or(address);
                        if address.contains('@') {
                            emails.insert(address.to_string());
                        }
                    }
                }
                collect_json_emails(inner, emails);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_emails(item, emails);
            }
        }
        _ => {}
    }
}

/// Rejects regex hits that are really asset names such as `logo@2x.png`
fn is_plausible(candidate: &str) -> bool {
    let tld = candidate.rsplit('.').next().unwrap_or_default();
    !ASSET_SUFFIXES
        .iter()
        .any(|suffix| tld.eq_ignore_ascii_case(suffix))
}

fn strip_prefix_ignore_case<'a>(value: &'a str, prefix: &str) -> Option<&'a str> {
    if value.len() >= prefix.len()
        && value.is_char_boundary(prefix.len())
        && value[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&value[prefix.len()..])
    } else {
        None
    }
}
