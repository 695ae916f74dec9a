//! Site crawler for contact discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with a relaxed retry on 406
//! - HTML parsing, link collection and text rendering
//! - Multi-channel email extraction
//! - A contact-first frontier bounded by a page budget
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{CrawlReport, EmailSink, PageFailure, PageSink, SiteCrawler, TextSink};
pub use extractor::{
    aria_label_emails, deobfuscate, emails_in_text, extract_emails, extract_emails_from_html,
    extract_page_emails, json_ld_emails, mailto_emails,
};
pub use fetcher::{
    build_http_client, decode_entities, fetch_html, fetch_page, FetchResult, ANY_ACCEPT,
    HTML_ACCEPT,
};
pub use frontier::{Frontier, QueuedUrl};
pub use parser::{content_text, visible_text, Page};

use crate::config::Config;
use crate::LeadlineError;

/// Crawls a site with default settings and returns the emails found
///
/// # Arguments
///
/// * `base_url` - The site's home page
/// * `max_pages` - Maximum number of distinct pages to fetch
///
/// # Returns
///
/// * `Ok(emails)` - Unique addresses, sorted; empty if the site is unreachable
/// * `Err(LeadlineError)` - `base_url` is not an absolute http(s) URL
pub async fn crawl_for_emails(base_url: &str, max_pages: usize) -> Result<Vec<String>, LeadlineError> {
    SiteCrawler::new(&Config::default())?
        .crawl_for_emails(base_url, max_pages)
        .await
}

/// Crawls a site with default settings and returns its text
///
/// # Arguments
///
/// * `base_url` - The site's home page
/// * `max_pages` - Maximum number of distinct pages to fetch
/// * `max_chars` - Maximum length of the result, in characters
pub async fn crawl_for_text(
    base_url: &str,
    max_pages: usize,
    max_chars: usize,
) -> Result<String, LeadlineError> {
    SiteCrawler::new(&Config::default())?
        .crawl_for_text(base_url, max_pages, max_chars)
        .await
}
