use url::Url;

/// Normalizes a resolved link before it is used as a crawl key
///
/// # Normalization Steps
///
/// 1. Remove the fragment (everything after #), so in-page anchors do not
///    count as separate pages against the crawl budget
/// 2. Remove an empty query string (trailing ?)
///
/// The path, query parameters and host are kept as found; two links that
/// differ only in those are treated as distinct pages.
///
/// # Examples
///
/// ```
/// use leadline::url::normalize_link;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/contact?#form").unwrap();
/// assert_eq!(normalize_link(url).as_str(), "https://example.com/contact");
/// ```
pub fn normalize_link(mut url: Url) -> Url {
    url.set_fragment(None);

    if url.query() == Some("") {
        url.set_query(None);
    }

    url
}
