//! Mock API tests for the moderation client.
//!
//! These tests use wiremock to simulate DeepSeek chat-completion responses.
//! Response formats follow the OpenAI-compatible chat completion object.

use modgate_core::{
    ModerationCapability, ModerationClient, ModerationConfig, ModerationError, ModerationRequest,
    ModerationVerdict,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Chat-completion envelope with the given assistant reply content.
fn completion_response(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1677652288,
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }],
        "usage": {
            "prompt_tokens": 120,
            "completion_tokens": 40,
            "total_tokens": 160
        }
    })
}

fn client_for(server: &MockServer) -> ModerationClient {
    ModerationClient::new(
        ModerationConfig::new("test-api-key")
            .with_base_url(server.uri())
            .with_model("deepseek-chat"),
    )
}

#[tokio::test]
async fn test_verdict_roundtrip_and_request_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "model": "deepseek-chat",
            "temperature": 0.0,
            "response_format": {"type": "json_object"},
            "max_tokens": 300
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response(
            r#"{"hasViolation":true,"matchedTerms":["x"],"reasoning":"r"}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let verdict = client_for(&mock_server)
        .check(&ModerationRequest::new("待审核文本"))
        .await
        .unwrap();

    assert!(verdict.has_violation);
    assert_eq!(verdict.matched_terms, vec!["x"]);
    assert_eq!(verdict.reasoning, "r");
}

#[tokio::test]
async fn test_custom_banned_terms_forwarded_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("customBanned"))
        .and(body_string_contains("违禁A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response(
            r#"{"hasViolation":false,"matchedTerms":[],"reasoning":"ok"}"#,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let request =
        ModerationRequest::new("一段文本").with_custom_banned(vec!["违禁A".to_string()]);
    let verdict = client_for(&mock_server).check(&request).await.unwrap();
    assert!(!verdict.has_violation);
}

#[tokio::test]
async fn test_embedded_json_is_extracted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_response(
            r#"Sure, here is the result: {"hasViolation":false,"matchedTerms":[],"reasoning":"ok"}"#,
        )))
        .mount(&mock_server)
        .await;

    let verdict = client_for(&mock_server)
        .check(&ModerationRequest::new("text"))
        .await
        .unwrap();

    assert!(!verdict.has_violation);
    assert_eq!(verdict.reasoning, "ok");
}

#[tokio::test]
async fn test_prose_reply_degrades_to_safe_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_response("抱歉，我无法以要求的格式回答。")),
        )
        .mount(&mock_server)
        .await;

    let verdict = client_for(&mock_server)
        .check(&ModerationRequest::new("text"))
        .await
        .unwrap();

    assert_eq!(verdict, ModerationVerdict::safe_default());
}

#[tokio::test]
async fn test_missing_reply_content_degrades_to_safe_default() {
    let mock_server = MockServer::start().await;

    // Envelope without choices: the reply content defaults to empty and the
    // parse degrades, still HTTP 200 semantics.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"object": "chat.completion"})))
        .mount(&mock_server)
        .await;

    let verdict = client_for(&mock_server)
        .check(&ModerationRequest::new("text"))
        .await
        .unwrap();

    assert_eq!(verdict, ModerationVerdict::safe_default());
}

#[tokio::test]
async fn test_upstream_error_carries_body_and_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string(r#"{"error":"rate limit exceeded"}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .check(&ModerationRequest::new("text"))
        .await
        .unwrap_err();

    match &err {
        ModerationError::ApiError { code, message } => {
            assert_eq!(*code, 429);
            assert!(message.contains("rate limit exceeded"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
    assert!(err.to_string().contains("rate limit exceeded"));
}

#[tokio::test]
async fn test_non_json_envelope_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .check(&ModerationRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(err, ModerationError::JsonError(_)));
}

#[tokio::test]
async fn test_missing_api_key_fails_before_any_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = ModerationClient::new(
        ModerationConfig::default().with_base_url(mock_server.uri()),
    );
    let err = client
        .check(&ModerationRequest::new("text"))
        .await
        .unwrap_err();

    assert!(matches!(err, ModerationError::MissingApiKey(_)));
    assert!(err.to_string().contains("DEEPSEEK_API_KEY"));
}
