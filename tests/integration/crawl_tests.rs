//! Integration tests for the site crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use leadline::config::Config;
use leadline::crawler::{SiteCrawler, ANY_ACCEPT};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a crawler with test-friendly timings
fn test_crawler() -> SiteCrawler {
    let mut config = Config::default();
    config.crawler.request_timeout = 5;
    config.crawler.politeness_delay = 10; // Very short for testing
    SiteCrawler::new(&config).expect("Failed to create crawler")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(format!("<html><body>{}</body></html>", body))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

fn visited_paths(visited: &[String]) -> Vec<String> {
    visited
        .iter()
        .map(|raw| url::Url::parse(raw).unwrap().path().to_string())
        .collect()
}

#[tokio::test]
async fn test_emails_found_across_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="mailto:owner@shop.com?subject=Quote">Email us</a>
           <a href="/contact">Contact</a>
           <a href="/about">About</a>"#,
    )
    .await;
    mount_page(&server, "/contact", "<p>Bookings: bookings[at]shop[dot]com</p>").await;
    mount_page(
        &server,
        "/about",
        r#"<script type="application/ld+json">
             {"@type": "LocalBusiness", "email": "mailto:press@shop.com"}
           </script>
           <p>Questions? owner@shop.com</p>"#,
    )
    .await;

    let emails = test_crawler()
        .crawl_for_emails(&server.uri(), 5)
        .await
        .unwrap();

    assert_eq!(
        emails,
        vec!["bookings@shop.com", "owner@shop.com", "press@shop.com"]
    );
}

#[tokio::test]
async fn test_page_budget_is_respected() {
    let server = MockServer::start().await;

    let links: String = (1..=9)
        .map(|i| format!(r#"<a href="/page{}">Page {}</a>"#, i, i))
        .collect();
    mount_page(&server, "/", &links).await;

    for i in 1..=2 {
        mount_page(&server, &format!("/page{}", i), "<p>Nothing here</p>").await;
    }

    // Pages past the budget must never be requested
    for i in 3..=9 {
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(html_page("<p>Too far</p>"))
            .expect(0)
            .mount(&server)
            .await;
    }

    let report = test_crawler()
        .crawl_emails_report(&server.uri(), 3)
        .await
        .unwrap();

    assert_eq!(visited_paths(&report.visited), vec!["/", "/page1", "/page2"]);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_contact_pages_are_crawled_first() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/services">Services</a>
           <a href="/gallery">Gallery</a>
           <a href="/Contact-Us">Contact</a>
           <a href="/pricing">Pricing</a>
           <a href="/about">About</a>"#,
    )
    .await;
    for route in ["/services", "/gallery", "/Contact-Us", "/pricing", "/about"] {
        mount_page(&server, route, "<p>Page</p>").await;
    }

    let report = test_crawler()
        .crawl_emails_report(&server.uri(), 4)
        .await
        .unwrap();

    assert_eq!(
        visited_paths(&report.visited),
        vec!["/", "/Contact-Us", "/about", "/services"]
    );
}

#[tokio::test]
async fn test_406_is_retried_with_relaxed_accept() {
    let server = MockServer::start().await;

    // Mounted first, so it answers the first request only
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(406))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("accept", ANY_ACCEPT))
        .respond_with(html_page("<p>hello@picky.com</p>"))
        .expect(1)
        .mount(&server)
        .await;

    let emails = test_crawler()
        .crawl_for_emails(&server.uri(), 1)
        .await
        .unwrap();

    assert_eq!(emails, vec!["hello@picky.com"]);
}

#[tokio::test]
async fn test_entity_encoded_email_is_found() {
    let server = MockServer::start().await;
    mount_page(&server, "/", "<p>Write to info&#64;bakery.com</p>").await;

    let emails = test_crawler()
        .crawl_for_emails(&server.uri(), 1)
        .await
        .unwrap();

    assert_eq!(emails, vec!["info@bakery.com"]);
}

#[tokio::test]
async fn test_failed_subpage_is_reported_and_skipped() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/",
        r#"<a href="/contact">Contact</a><a href="/team">Team</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/team", "<p>sam@crew.com</p>").await;

    let report = test_crawler()
        .crawl_emails_report(&server.uri(), 5)
        .await
        .unwrap();

    assert_eq!(report.output, vec!["sam@crew.com"]);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].url.ends_with("/contact"));
    assert_eq!(report.failures[0].reason, "HTTP 500");
    assert!(!report.all_failed());
}

#[tokio::test]
async fn test_external_links_are_not_followed() {
    let site = MockServer::start().await;
    let other = MockServer::start().await;

    // Same machine, different host name
    let external = format!(
        "http://localhost:{}/contact",
        other.address().port()
    );

    mount_page(
        &site,
        "/",
        &format!(
            r#"<a href="{}">Partner</a><a href="mailto:x@y.com">Mail</a><a href="tel:123">Call</a>"#,
            external
        ),
    )
    .await;

    Mock::given(method("GET"))
        .respond_with(html_page("<p>partner@elsewhere.com</p>"))
        .expect(0)
        .mount(&other)
        .await;

    let report = test_crawler()
        .crawl_emails_report(&site.uri(), 5)
        .await
        .unwrap();

    assert_eq!(report.visited.len(), 1);
    assert_eq!(report.output, vec!["x@y.com"]);
}

#[tokio::test]
async fn test_redirect_target_is_not_fetched_again() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}/", server.uri()).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/">Home</a><a href="/services">Services</a>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    mount_page(&server, "/services", "<p>Write to info@shop.com</p>").await;

    let report = test_crawler()
        .crawl_emails_report(&format!("{}/start", server.uri()), 2)
        .await
        .unwrap();

    // The second fetch goes to /services, not back to the home page
    assert_eq!(report.output, vec!["info@shop.com"]);
    assert_eq!(visited_paths(&report.visited), vec!["/start", "/services"]);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_redirect_to_another_host_is_not_crawled() {
    let site = MockServer::start().await;
    let parked = MockServer::start().await;

    // localhost and 127.0.0.1 are distinct hosts
    let base = format!("http://localhost:{}/", site.address().port());

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/", parked.uri()).as_str()),
        )
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<p>sales@parked-domains.net</p><a href="/parked">Buy this domain</a>"#,
        ))
        .mount(&parked)
        .await;

    Mock::given(method("GET"))
        .and(path("/parked"))
        .respond_with(html_page("<p>more@parked-domains.net</p>"))
        .expect(0)
        .mount(&parked)
        .await;

    let report = test_crawler().crawl_emails_report(&base, 5).await.unwrap();

    assert!(report.output.is_empty());
    assert_eq!(report.visited.len(), 1);
    assert_eq!(report.failures.len(), 1);
    assert!(report.failures[0].reason.starts_with("Redirected off-site"));
    assert!(report.all_failed());
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_list_twice() {
    let crawler = test_crawler();

    for _ in 0..2 {
        let emails = crawler
            .crawl_for_emails("http://127.0.0.1:9/", 5)
            .await
            .unwrap();
        assert!(emails.is_empty());
    }
}

#[tokio::test]
async fn test_text_crawl_is_bounded() {
    let server = MockServer::start().await;

    let paragraph = "Ceramic coating and paint correction. ".repeat(50);
    mount_page(
        &server,
        "/",
        &format!(
            r#"<nav><a href="/about">About</a></nav><main><p>Welcome to Shine</p><p>{}</p></main>"#,
            paragraph
        ),
    )
    .await;
    mount_page(&server, "/about", &format!("<p>Family owned</p><p>{}</p>", paragraph)).await;

    let crawler = test_crawler();

    let text = crawler
        .crawl_for_text(&server.uri(), 5, 300)
        .await
        .unwrap();
    assert!(text.chars().count() <= 300);
    assert!(text.starts_with("Welcome to Shine"));
    assert!(!text.contains("About"));

    let full = crawler
        .crawl_for_text(&server.uri(), 5, 100_000)
        .await
        .unwrap();
    assert!(full.contains("Welcome to Shine\n"));
    assert!(full.contains("\n\nFamily owned"));
    // The repeated paragraph appears only once
    assert_eq!(full.matches("Ceramic coating and paint correction.").count(), 50);
}

#[tokio::test]
async fn test_malformed_base_url_is_an_error() {
    let result = test_crawler().crawl_for_emails("shop.com/contact", 5).await;
    assert!(matches!(result, Err(leadline::LeadlineError::Url(_))));
}
