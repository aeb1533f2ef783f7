use std::time::Duration;

use serde_json::json;
use sonar_core::client::{ClientError, CompletionBackend, CompletionRequest, SonarClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(model: &str, content: &str) -> CompletionRequest {
    CompletionRequest {
        model: model.to_string(),
        content: content.to_string(),
    }
}

fn client_for(server: &MockServer) -> SonarClient {
    SonarClient::new("test-key", Duration::from_secs(5))
        .expect("client should build")
        .with_base_url(server.uri())
}

#[tokio::test]
async fn parses_answer_and_citations() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "sonar",
            "messages": [{"role": "user", "content": "What is QUIC?"}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "A transport protocol."}}],
            "citations": ["https://example.com/a", "https://example.com/b"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let completion = client_for(&server)
        .complete(request("sonar", "What is QUIC?"))
        .await
        .expect("completion should succeed");

    assert_eq!(completion.answer, "A transport protocol.");
    assert_eq!(
        completion.citations,
        vec!["https://example.com/a", "https://example.com/b"]
    );
}

#[tokio::test]
async fn missing_citations_field_defaults_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "42"}}],
        })))
        .mount(&server)
        .await;

    let completion = client_for(&server)
        .complete(request("sonar", "q"))
        .await
        .expect("completion should succeed");

    assert_eq!(completion.answer, "42");
    assert!(completion.citations.is_empty());
}

#[tokio::test]
async fn non_success_status_maps_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(request("sonar", "q"))
        .await
        .expect_err("401 should fail");

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "unauthorized");
        }
        other => panic!("expected Api error, got: {other}"),
    }
}

#[tokio::test]
async fn empty_choices_maps_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(request("sonar", "q"))
        .await
        .expect_err("empty choices should fail");

    assert!(matches!(err, ClientError::Malformed(_)));
}

#[tokio::test]
async fn missing_content_field_maps_to_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant"}}],
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .complete(request("sonar", "q"))
        .await
        .expect_err("missing content should fail");

    assert!(matches!(err, ClientError::Malformed(_)));
}
