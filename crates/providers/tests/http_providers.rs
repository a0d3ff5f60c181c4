//! HTTP-level tests for the provider implementations against a mock server.

use docmentor_core::error::ProviderError;
use docmentor_core::provider::{Provider, ProviderRequest};
use docmentor_providers::{GeminiProvider, OpenAiCompatProvider};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}, "finishReason": "STOP"}],
        "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3, "totalTokenCount": 13},
        "modelVersion": "gemini-2.0-flash"
    })
}

#[tokio::test]
async fn gemini_sends_prompt_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Summarize this document"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("A short summary.")))
        .expect(1)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("test-key").with_base_url(server.uri());
    let response = provider
        .complete(ProviderRequest::single_turn("gemini-2.0-flash", "Summarize this document"))
        .await
        .unwrap();

    assert_eq!(response.message.content, "A short summary.");
    assert_eq!(response.usage.unwrap().total_tokens, 13);
    assert_eq!(response.model, "gemini-2.0-flash");
}

#[tokio::test]
async fn gemini_identical_prompts_both_hit_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("same")))
        .expect(2)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    for _ in 0..2 {
        provider
            .complete(ProviderRequest::single_turn("gemini-2.0-flash", "same prompt"))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn gemini_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("bad").with_base_url(server.uri());
    let err = provider
        .complete(ProviderRequest::single_turn("gemini-2.0-flash", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn gemini_quota_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    let err = provider
        .complete(ProviderRequest::single_turn("gemini-2.0-flash", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::RateLimited { retry_after_secs: 30 }));
}

#[tokio::test]
async fn gemini_server_error_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    let err = provider
        .complete(ProviderRequest::single_turn("gemini-2.0-flash", "hi"))
        .await
        .unwrap_err();
    match err {
        ProviderError::ApiError { status_code, message } => {
            assert_eq!(status_code, 500);
            assert!(message.contains("backend exploded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn gemini_malformed_envelope_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    let err = provider
        .complete(ProviderRequest::single_turn("gemini-2.0-flash", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ApiError { status_code: 200, .. }));
}

#[tokio::test]
async fn gemini_list_models_strips_prefix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "models/gemini-2.0-flash"}, {"name": "models/gemini-1.5-pro"}]
        })))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    let models = provider.list_models().await.unwrap();
    assert_eq!(models, vec!["gemini-2.0-flash", "gemini-1.5-pro"]);
    assert!(provider.health_check().await.unwrap());
}

#[tokio::test]
async fn gemini_list_models_follows_page_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "models/gemini-2.0-flash"}]
        })))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "models/gemini-1.5-pro"}],
            "nextPageToken": "page-2"
        })))
        .with_priority(2)
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    let models = provider.list_models().await.unwrap();
    assert_eq!(models, vec!["gemini-1.5-pro", "gemini-2.0-flash"]);
}

#[tokio::test]
async fn gemini_unreadable_model_list_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let provider = GeminiProvider::new("k").with_base_url(server.uri());
    let err = provider.list_models().await.unwrap_err();
    assert!(matches!(err, ProviderError::ApiError { status_code: 200, .. }));
}

#[tokio::test]
async fn openai_compat_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{"message": {"role": "assistant", "content": "Paris is the capital."}}],
            "usage": {"prompt_tokens": 20, "completion_tokens": 5, "total_tokens": 25}
        })))
        .mount(&server)
        .await;

    let provider = OpenAiCompatProvider::new("openai", server.uri(), "sk-test");
    let response = provider
        .complete(ProviderRequest::single_turn("gpt-4o-mini", "Capital of France?"))
        .await
        .unwrap();
    assert_eq!(response.message.content, "Paris is the capital.");
    assert_eq!(response.model, "gpt-4o-mini");
}

#[tokio::test]
async fn openai_compat_empty_choices_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "m", "choices": []})))
        .mount(&server)
        .await;

    let provider = OpenAiCompatProvider::new("openai", server.uri(), "sk-test");
    let err = provider
        .complete(ProviderRequest::single_turn("m", "hi"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No choices"));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let provider = GeminiProvider::new("k").with_base_url("http://127.0.0.1:9");
    let err = provider
        .complete(ProviderRequest::single_turn("gemini-2.0-flash", "hi"))
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Network(_) | ProviderError::Timeout(_)));
}
