//! Integration tests for pitch generation

use leadline::config::PitchConfig;
use leadline::pitch::{PitchClient, PitchError, PitchRequest, PitchTemplate};
use leadline::Lead;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PitchClient {
    let config = PitchConfig {
        base_url: server.uri(),
        model: "test-model".to_string(),
        ..PitchConfig::default()
    };
    let template = PitchTemplate::new("Pitch {name} in {city}: {site_text}");
    PitchClient::new(&config, "test-key", template).expect("Failed to create pitch client")
}

fn request() -> PitchRequest {
    let lead = Lead::new("Shine Auto Spa", "p1", "Chicago");
    PitchRequest::from_lead(&lead, "Ceramic coatings since 2010")
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

#[tokio::test]
async fn test_generate_pitch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "test-model",
            "max_tokens": 300,
            "messages": [{
                "role": "user",
                "content": "Pitch Shine Auto Spa in Chicago: Ceramic coatings since 2010"
            }]
        })))
        .respond_with(completion(
            "Subject: More clients for Shine Auto Spa\n\nHi there,\n\nLoved your ceramic work.",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let pitch = test_client(&server).generate(&request()).await.unwrap();

    assert_eq!(pitch.subject, "More clients for Shine Auto Spa");
    assert_eq!(pitch.body, "Hi there,\n\nLoved your ceramic work.");
}

#[tokio::test]
async fn test_api_error_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let result = test_client(&server).generate(&request()).await;

    match result {
        Err(PitchError::Api { status, body }) => {
            assert_eq!(status, 401);
            assert_eq!(body, "invalid api key");
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let result = test_client(&server).generate(&request()).await;
    assert!(matches!(result, Err(PitchError::EmptyResponse)));
}

#[tokio::test]
async fn test_reply_without_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("Subject: Just a subject line"))
        .mount(&server)
        .await;

    let result = test_client(&server).generate(&request()).await;
    assert!(matches!(result, Err(PitchError::Malformed(_))));
}
