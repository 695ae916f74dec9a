//! Crawl frontier for a single site
//!
//! This module handles:
//! - Ordering discovered links so contact-like pages are fetched first
//! - Enqueuing each URL at most once
//! - Tracking the visited set against the page budget

use crate::url::{link_priority, LinkPriority};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL queued for fetching with its priority class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedUrl {
    /// The URL to fetch
    pub url: Url,

    /// Priority class derived from the URL path
    pub priority: LinkPriority,
}

/// Frontier manages the queue and visited set of one crawl
///
/// Two FIFO lanes are kept. The contact-like lane is always drained before
/// the other lane, so at any point a pending contact/about page is fetched
/// before any pending ordinary page. Within a lane, discovery order is kept.
#[derive(Debug)]
pub struct Frontier {
    /// Pending contact/about pages
    contact_lane: VecDeque<QueuedUrl>,

    /// Pending ordinary pages
    other_lane: VecDeque<QueuedUrl>,

    /// Every URL ever enqueued or visited
    seen: HashSet<String>,

    /// URLs fetched so far, in fetch order
    visited: Vec<String>,

    /// Maximum number of pages that may be visited
    max_pages: usize,
}

impl Frontier {
    /// Creates a frontier with the given page budget
    pub fn new(max_pages: usize) -> Self {
        Self {
            contact_lane: VecDeque::new(),
            other_lane: VecDeque::new(),
            seen: HashSet::new(),
            visited: Vec::new(),
            max_pages,
        }
    }

    /// Adds a URL unless it has been enqueued or visited before
    ///
    /// Returns true if the URL was queued.
    pub fn push(&mut self, url: Url) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }

        let priority = link_priority(&url);
        let queued = QueuedUrl { url, priority };

        match priority {
            LinkPriority::ContactLike => self.contact_lane.push_back(queued),
            LinkPriority::Other => self.other_lane.push_back(queued),
        }

        true
    }

    /// Records a URL as already covered without queueing it
    ///
    /// Used for the final URL of a redirected fetch, so a later link to
    /// that address does not fetch the same document again.
    pub fn mark_seen(&mut self, url: &Url) {
        self.seen.insert(url.as_str().to_string());
    }

    /// Gets the next URL to fetch and marks it visited
    ///
    /// Returns None once the budget is spent or nothing is pending.
    pub fn next_url(&mut self) -> Option<QueuedUrl> {
        if self.budget_exhausted() {
            return None;
        }

        let next = self
            .contact_lane
            .pop_front()
            .or_else(|| self.other_lane.pop_front())?;

        self.visited.push(next.url.as_str().to_string());
        Some(next)
    }

    /// Returns true once `max_pages` pages have been handed out
    pub fn budget_exhausted(&self) -> bool {
        self.visited.len() >= self.max_pages
    }

    /// Number of URLs waiting to be fetched
    pub fn pending(&self) -> usize {
        self.contact_lane.len() + self.other_lane.len()
    }

    /// URLs handed out so far, in fetch order
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// Consumes the frontier, returning the visited URLs
    pub fn into_visited(self) -> Vec<String> {
        self.visited
    }
}
