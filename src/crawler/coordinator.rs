//! Crawler coordinator - per-site crawl orchestration
//!
//! This module contains the crawl loop shared by both crawl modes:
//! - Validating the site URL
//! - Managing the contact-first frontier and page budget
//! - Coordinating fetching, parsing, and link classification
//! - Feeding each page to a mode-specific sink (emails or text)
//! - Throttling requests to the site

use crate::config::{Config, CrawlerConfig};
use crate::crawler::extractor::extract_page_emails;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchResult};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::Page;
use crate::url::{
    extract_domain, normalize_link, parse_site_url, resolve_internal, same_site_host,
};
use crate::LeadlineError;
use reqwest::Client;
use std::collections::{BTreeSet, HashSet};
use url::Url;

/// A page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    /// The URL that was requested
    pub url: String,
    /// Why the fetch failed
    pub reason: String,
}

/// Outcome of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlReport<T> {
    /// Aggregated result (emails or text)
    pub output: T,
    /// URLs fetched, in fetch order
    pub visited: Vec<String>,
    /// Pages whose fetch failed
    pub failures: Vec<PageFailure>,
}

impl<T> CrawlReport<T> {
    /// Returns true if pages were attempted and none of them could be fetched
    ///
    /// This separates "the site is unreachable" from "the site has no emails".
    pub fn all_failed(&self) -> bool {
        !self.visited.is_empty() && self.failures.len() == self.visited.len()
    }
}

/// Receives every successfully fetched page of a crawl
pub trait PageSink {
    type Output;

    /// Folds one page into the running result
    fn absorb(&mut self, page: &Page);

    /// Produces the final result
    fn finish(self) -> Self::Output;
}

/// Collects unique email addresses across pages
#[derive(Debug, Default)]
pub struct EmailSink {
    emails: BTreeSet<String>,
}

impl PageSink for EmailSink {
    type Output = Vec<String>;

    fn absorb(&mut self, page: &Page) {
        self.emails.extend(extract_page_emails(page));
    }

    fn finish(self) -> Vec<String> {
        self.emails.into_iter().collect()
    }
}

/// Concatenates page text, separated by blank lines and bounded in length
///
/// Lines already contributed by an earlier page (shared banners, repeated
/// calls to action) are dropped before truncation.
#[derive(Debug)]
pub struct TextSink {
    max_chars: usize,
    seen_lines: HashSet<String>,
    text: String,
}

impl TextSink {
    pub fn new(max_chars: usize) -> Self {
        Self {
            max_chars,
            seen_lines: HashSet::new(),
            text: String::new(),
        }
    }
}

impl PageSink for TextSink {
    type Output = String;

    fn absorb(&mut self, page: &Page) {
        let content = page.content_text();
        let fresh: Vec<&str> = content
            .lines()
            .filter(|line| !self.seen_lines.contains(*line))
            .collect();

        if !fresh.is_empty() {
            self.text.push_str(&fresh.join("\n"));
            self.text.push_str("\n\n");
        }

        // Only earlier pages count as repeats
        self.seen_lines.extend(content.lines().map(str::to_string));
    }

    fn finish(self) -> String {
        self.text.trim_end().chars().take(self.max_chars).collect()
    }
}

/// Crawls one site at a time, sequentially and politely
///
/// The crawler owns its HTTP client and settings; every call owns its own
/// frontier and accumulator, so nothing leaks between crawls.
pub struct SiteCrawler {
    client: Client,
    config: CrawlerConfig,
}

impl SiteCrawler {
    /// Creates a crawler from the application configuration
    pub fn new(config: &Config) -> Result<Self, LeadlineError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        Ok(Self::with_client(client, config.crawler.clone()))
    }

    /// Creates a crawler around an existing HTTP client
    pub fn with_client(client: Client, config: CrawlerConfig) -> Self {
        Self { client, config }
    }

    /// Crawler settings in use
    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls a site and returns the unique email addresses found, sorted
    ///
    /// An unreachable site yields an empty list; only a malformed `base_url`
    /// is an error.
    pub async fn crawl_for_emails(
        &self,
        base_url: &str,
        max_pages: usize,
    ) -> Result<Vec<String>, LeadlineError> {
        Ok(self.crawl_emails_report(base_url, max_pages).await?.output)
    }

    /// Like [`crawl_for_emails`](Self::crawl_for_emails), with per-page outcomes
    pub async fn crawl_emails_report(
        &self,
        base_url: &str,
        max_pages: usize,
    ) -> Result<CrawlReport<Vec<String>>, LeadlineError> {
        let site = parse_site_url(base_url)?;
        let report = self.crawl(site, max_pages, EmailSink::default()).await;

        tracing::info!(
            "Email crawl of {} finished: {} page(s) visited, {} failed, {} email(s) found",
            base_url,
            report.visited.len(),
            report.failures.len(),
            report.output.len()
        );

        Ok(report)
    }

    /// Crawls a site and returns its concatenated text, at most `max_chars` characters
    pub async fn crawl_for_text(
        &self,
        base_url: &str,
        max_pages: usize,
        max_chars: usize,
    ) -> Result<String, LeadlineError> {
        Ok(self
            .crawl_text_report(base_url, max_pages, max_chars)
            .await?
            .output)
    }

    /// Like [`crawl_for_text`](Self::crawl_for_text), but a malformed
    /// `base_url` is logged and yields an empty string
    pub async fn crawl_text_or_empty(
        &self,
        base_url: &str,
        max_pages: usize,
        max_chars: usize,
    ) -> String {
        match self.crawl_for_text(base_url, max_pages, max_chars).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("No site text for {}: {}", base_url, e);
                String::new()
            }
        }
    }

    /// Like [`crawl_for_text`](Self::crawl_for_text), with per-page outcomes
    pub async fn crawl_text_report(
        &self,
        base_url: &str,
        max_pages: usize,
        max_chars: usize,
    ) -> Result<CrawlReport<String>, LeadlineError> {
        let site = parse_site_url(base_url)?;
        let report = self.crawl(site, max_pages, TextSink::new(max_chars)).await;

        tracing::info!(
            "Text crawl of {} finished: {} page(s) visited, {} failed, {} chars collected",
            base_url,
            report.visited.len(),
            report.failures.len(),
            report.output.chars().count()
        );

        Ok(report)
    }

    /// Runs the crawl loop
    ///
    /// 1. Seed the frontier with the site URL
    /// 2. Pop the next URL (contact-like first) until the budget is spent
    /// 3. Fetch; on failure record it and move on
    /// 4. Parse, hand the page to the sink, enqueue internal links
    /// 5. Pause before every follow-up request
    ///
    /// A redirect never takes the crawl off the site. The landing page may
    /// move the site to its `www.` variant (or back); a redirect to any
    /// other host is recorded as a failure and its page is ignored.
    async fn crawl<S: PageSink>(
        &self,
        base_url: Url,
        max_pages: usize,
        mut sink: S,
    ) -> CrawlReport<S::Output> {
        let mut site = normalize_link(base_url);
        let mut frontier = Frontier::new(max_pages);
        let mut failures = Vec::new();
        let mut first = true;

        frontier.push(site.clone());

        while let Some(queued) = frontier.next_url() {
            if !first && !self.config.delay().is_zero() {
                tokio::time::sleep(self.config.delay()).await;
            }
            let landing = first;
            first = false;

            tracing::debug!("Fetching {} ({:?})", queued.url, queued.priority);

            let (page_url, body) = match fetch_page(&self.client, queued.url.as_str()).await {
                FetchResult::Success {
                    final_url, body, ..
                } => {
                    let page_url = Url::parse(&final_url)
                        .map(normalize_link)
                        .unwrap_or_else(|_| queued.url.clone());
                    (page_url, body)
                }
                failed => {
                    failures.push(PageFailure {
                        url: queued.url.to_string(),
                        reason: failed.failure_reason().unwrap_or_default(),
                    });
                    continue;
                }
            };

            if page_url != queued.url {
                frontier.mark_seen(&page_url);
            }

            let page_host = extract_domain(&page_url).unwrap_or_default();
            let site_host = extract_domain(&site).unwrap_or_default();

            if page_host != site_host {
                if !same_site_host(&page_host, &site_host) {
                    tracing::warn!(
                        "{} redirected off-site to {}, skipping",
                        queued.url,
                        page_url
                    );
                    failures.push(PageFailure {
                        url: queued.url.to_string(),
                        reason: format!("Redirected off-site to {}", page_url),
                    });
                    continue;
                }

                if landing {
                    tracing::debug!("{} redirected to {}, following new host", site, page_url);
                    site = page_url.clone();
                }
            }

            let hrefs = {
                let page = Page::parse(page_url.clone(), body);
                sink.absorb(&page);
                page.hrefs()
            };

            for href in hrefs {
                if let Some(link) = resolve_internal(&href, &page_url, &site) {
                    frontier.push(link);
                }
            }
        }

        CrawlReport {
            output: sink.finish(),
            visited: frontier.into_visited(),
            failures,
        }
    }
}
