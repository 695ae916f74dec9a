//! URL handling module for Leadline
//!
//! This module decides which hyperlinks stay inside the site being crawled
//! and how eagerly they should be visited.

mod domain;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::{extract_domain, parse_site_url, same_site_host};
pub use normalize::normalize_link;

/// Path fragments that mark a page as a likely source of contact details
const CONTACT_MARKERS: &[&str] = &["contact", "about"];

/// Crawl priority of an internal link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkPriority {
    /// Path mentions "contact" or "about" - visited first
    ContactLike,
    /// Any other internal page
    Other,
}

impl LinkPriority {
    /// Returns true for links that jump the crawl queue
    pub fn is_contact_like(&self) -> bool {
        matches!(self, Self::ContactLike)
    }
}

/// Classifies a link by its path
///
/// Matching is a case-insensitive substring test, so `/Contact-Us`,
/// `/about/team` and `/pages/contactform` are all contact-like.
///
/// # Examples
///
/// ```
/// use leadline::url::{link_priority, LinkPriority};
/// use url::Url;
///
/// let url = Url::parse("https://example.com/About-Us").unwrap();
/// assert_eq!(link_priority(&url), LinkPriority::ContactLike);
///
/// let url = Url::parse("https://example.com/services").unwrap();
/// assert_eq!(link_priority(&url), LinkPriority::Other);
/// ```
pub fn link_priority(url: &Url) -> LinkPriority {
    let path = url.path().to_lowercase();

    if CONTACT_MARKERS.iter().any(|marker| path.contains(marker)) {
        LinkPriority::ContactLike
    } else {
        LinkPriority::Other
    }
}

/// Resolves an href found on `page_url` and keeps it only if it stays on `site`
///
/// Returns None if the link should not be crawled:
/// - empty hrefs
/// - `javascript:`, `mailto:`, `tel:`, `data:` and any other non-HTTP(S) scheme
/// - unresolvable hrefs
/// - hosts other than the site's own host (no subdomain wildcarding)
///
/// The returned URL is normalized (see [`normalize_link`]).
pub fn resolve_internal(href: &str, page_url: &Url, site: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let resolved = page_url.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    match (extract_domain(&resolved), extract_domain(site)) {
        (Some(link_host), Some(site_host)) if link_host == site_host => {
            Some(normalize_link(resolved))
        }
        _ => None,
    }
}

/// Checks whether `href` points inside the site rooted at `base_url`
///
/// Relative hrefs are resolved against `base_url` first. Only an exact host
/// match counts as internal.
///
/// # Examples
///
/// ```
/// use leadline::url::is_internal;
///
/// assert!(is_internal("https://example.com/contact", "https://example.com"));
/// assert!(is_internal("/about", "https://example.com"));
/// assert!(!is_internal("https://other.com/x", "https://example.com"));
/// assert!(!is_internal("mailto:a@b.com", "https://example.com"));
/// ```
pub fn is_internal(href: &str, base_url: &str) -> bool {
    match Url::parse(base_url) {
        Ok(base) => resolve_internal(href, &base, &base).is_some(),
        Err(_) => false,
    }
}
