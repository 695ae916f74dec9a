use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (e.g. `mailto:` or `data:` URLs), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use leadline::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:a@b.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses and validates the base URL of a site to crawl
///
/// The URL must be absolute, use HTTP or HTTPS, and carry a host. Surrounding
/// whitespace is ignored.
///
/// # Examples
///
/// ```
/// use leadline::url::parse_site_url;
///
/// assert!(parse_site_url("https://example.com").is_ok());
/// assert!(parse_site_url("example.com").is_err());
/// assert!(parse_site_url("ftp://example.com").is_err());
/// ```
pub fn parse_site_url(raw: &str) -> UrlResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS sites can be crawled, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Returns true if two hosts name the same site
///
/// Hosts match when they are equal or differ only by a leading `www.`
/// (in either direction). Any other subdomain is a different site.
///
/// # Examples
///
/// ```
/// use leadline::url::same_site_host;
///
/// assert!(same_site_host("example.com", "www.example.com"));
/// assert!(same_site_host("WWW.example.com", "example.com"));
/// assert!(!same_site_host("example.com", "parking.example.net"));
/// ```
pub fn same_site_host(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let bare = |host: &str| host.strip_prefix("www.").unwrap_or(host).to_string();

    bare(&a) == bare(&b)
}
