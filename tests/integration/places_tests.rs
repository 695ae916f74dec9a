//! Integration tests for the places client

use leadline::config::PlacesConfig;
use leadline::places::{PlacesClient, PlacesError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PlacesClient {
    let config = PlacesConfig {
        base_url: server.uri(),
        page_token_delay: 0,
        ..PlacesConfig::default()
    };
    PlacesClient::new(&config, "test-key").expect("Failed to create places client")
}

async fn mount_geocode(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_details(server: &MockServer, place_id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/place/details/json"))
        .and(query_param("place_id", place_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn chicago() -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [{"geometry": {"location": {"lat": 41.8781, "lng": -87.6298}}}]
    })
}

#[tokio::test]
async fn test_get_leads_pages_dedupes_and_enriches() {
    let server = MockServer::start().await;
    mount_geocode(&server, chicago()).await;

    // Second page, matched only when the token is present
    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("pagetoken", "tok2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                {"place_id": "p2", "name": "Gloss Bros", "vicinity": "2 Oak Ave"},
                {"place_id": "p3", "name": "Mirror Finish", "vicinity": "3 Elm St"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .and(query_param("keyword", "car detailing"))
        .and(query_param("radius", "20000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                {"place_id": "p1", "name": "Shine", "vicinity": "1 Main St", "user_ratings_total": 87},
                {"place_id": "p2", "name": "Gloss Bros", "vicinity": "2 Oak Ave"}
            ],
            "next_page_token": "tok2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_details(
        &server,
        "p1",
        json!({"status": "OK", "result": {
            "name": "Shine Auto Spa",
            "formatted_phone_number": "(312) 555-0100",
            "website": "https://shine.example",
            "formatted_address": "1 Main St, Chicago, IL"
        }}),
    )
    .await;
    mount_details(&server, "p2", json!({"status": "NOT_FOUND"})).await;
    mount_details(
        &server,
        "p3",
        json!({"status": "OK", "result": {"name": "Mirror Finish"}}),
    )
    .await;

    let leads = test_client(&server)
        .get_leads("car detailing", &["Chicago".to_string()], 3)
        .await
        .unwrap();

    let ids: Vec<&str> = leads.iter().map(|lead| lead.place_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2", "p3"]);

    let shine = &leads[0];
    assert_eq!(shine.name, "Shine Auto Spa");
    assert_eq!(shine.phone.as_deref(), Some("(312) 555-0100"));
    assert_eq!(shine.website.as_deref(), Some("https://shine.example"));
    assert_eq!(shine.review_count, Some(87));
    assert_eq!(shine.city, "Chicago");

    // Details failed: search fields only
    let gloss = &leads[1];
    assert_eq!(gloss.name, "Gloss Bros");
    assert_eq!(gloss.address.as_deref(), Some("2 Oak Ave"));
    assert_eq!(gloss.phone, None);
    assert_eq!(gloss.website, None);

    assert_eq!(leads[2].address.as_deref(), Some("3 Elm St"));
}

#[tokio::test]
async fn test_page_limit_stops_pagination() {
    let server = MockServer::start().await;
    mount_geocode(&server, chicago()).await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{"place_id": "p1", "name": "Shine"}],
            "next_page_token": "more"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_details(&server, "p1", json!({"status": "OK", "result": {}})).await;

    let leads = test_client(&server)
        .get_leads("car detailing", &["Chicago".to_string()], 1)
        .await
        .unwrap();

    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].name, "Shine");
}

#[tokio::test]
async fn test_zero_results_is_empty() {
    let server = MockServer::start().await;
    mount_geocode(&server, chicago()).await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let leads = test_client(&server)
        .get_leads("llama grooming", &["Chicago".to_string()], 3)
        .await
        .unwrap();

    assert!(leads.is_empty());
}

#[tokio::test]
async fn test_geocode_status_error() {
    let server = MockServer::start().await;
    mount_geocode(
        &server,
        json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}),
    )
    .await;

    let result = test_client(&server)
        .get_leads("car detailing", &["Chicago".to_string()], 3)
        .await;

    match result {
        Err(PlacesError::Status { status, .. }) => assert_eq!(status, "REQUEST_DENIED"),
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_geocode_without_results() {
    let server = MockServer::start().await;
    mount_geocode(&server, json!({"status": "OK", "results": []})).await;

    let result = test_client(&server).geocode("Nowhere").await;
    assert!(matches!(result, Err(PlacesError::NoResults(location)) if location == "Nowhere"));
}

#[tokio::test]
async fn test_search_status_error_propagates() {
    let server = MockServer::start().await;
    mount_geocode(&server, chicago()).await;

    Mock::given(method("GET"))
        .and(path("/place/nearbysearch/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "OVER_QUERY_LIMIT"})),
        )
        .mount(&server)
        .await;

    let result = test_client(&server)
        .get_leads("car detailing", &["Chicago".to_string()], 3)
        .await;

    assert!(matches!(result, Err(PlacesError::Status { .. })));
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = test_client(&server).geocode("Chicago").await;
    assert!(matches!(result, Err(PlacesError::Http(_))));
}
