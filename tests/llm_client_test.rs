//! Integration tests for the OpenAI client against a mocked API.

use std::path::PathBuf;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use feedforge::config::Config;
use feedforge::llm::{LlmError, OpenAiClient};
use feedforge::records::{Platform, RecordSet};

fn test_config(base_url: &str) -> Config {
    Config {
        openai_api_key: Some("sk-test".to_string()),
        openai_base_url: base_url.to_string(),
        model_name: "gpt-4.1".to_string(),
        image_model_name: "gpt-image-1".to_string(),
        country: Some("Norway".to_string()),
        prompts_dir: PathBuf::from("./prompts"),
        user_prompt_path: PathBuf::from("./user_input.txt"),
        output_dir: PathBuf::from("./output"),
        pictures_dir: "pictures".to_string(),
        chrome_path: None,
        pdf_timeout: Duration::from_secs(30),
    }
}

/// Wrap a structured-output payload the way chat completions returns it:
/// the record batch arrives as a JSON string in the message content.
fn chat_completion_body(content: &serde_json::Value) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content.to_string() },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_generate_reddit_records() {
    let server = MockServer::start().await;

    let content = json!({
        "Entry": [
            {"Type": "top", "Username": "alice", "Upvotes": "1.2k", "Time": "4h", "Content": "hi"},
            {"Type": "comment", "Username": "bob", "Upvotes": "56", "Time": "3h", "Content": "hey"}
        ]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({ "model": "gpt-4.1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body(&content)))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let records = client
        .generate_records(Platform::Reddit, "system", "user")
        .await
        .unwrap();

    match records {
        RecordSet::Reddit(rows) => {
            assert_eq!(rows.len(), 2);
            assert!(rows[0].is_top_level());
            assert!(!rows[1].is_top_level());
        }
        other => panic!("expected Reddit records, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_requests_strict_schema() {
    let server = MockServer::start().await;

    let content = json!({ "Entry": [] });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "response_format": {
                "type": "json_schema",
                "json_schema": { "name": "gen_data", "strict": true }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body(&content)))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let records = client
        .generate_records(Platform::Twitter, "system", "user")
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_generate_instagram_rejects_non_numeric_likes() {
    let server = MockServer::start().await;

    let content = json!({
        "Entry": [{
            "Username": "u", "ImagePrompt": "p", "Caption": "c",
            "Likes": "many", "CommentCount": 0, "Time": "1h"
        }]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_completion_body(&content)))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let result = client
        .generate_records(Platform::Instagram, "system", "user")
        .await;
    assert!(matches!(result, Err(LlmError::Decode(_))));
}

#[tokio::test]
async fn test_generate_surfaces_api_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let result = client
        .generate_records(Platform::Facebook, "system", "user")
        .await;

    match result {
        Err(LlmError::Api { status, message }) => {
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_empty_choices_is_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let result = client
        .generate_records(Platform::Reddit, "system", "user")
        .await;
    assert!(matches!(result, Err(LlmError::EmptyResponse)));
}

#[tokio::test]
async fn test_generate_image_decodes_payload() {
    let server = MockServer::start().await;

    // "fake png bytes" in base64
    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({ "model": "gpt-image-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{ "b64_json": "ZmFrZSBwbmcgYnl0ZXM=" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let bytes = client.generate_image("a sunset").await.unwrap().unwrap();
    assert_eq!(bytes, b"fake png bytes");
}

#[tokio::test]
async fn test_generate_image_missing_payload_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    let result = client.generate_image("a sunset").await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_image_prompt_carries_size_instruction() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images/generations"))
        .and(body_partial_json(json!({
            "prompt": "Ensure that all generated images are 600px by 600px. a red bicycle"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(&test_config(&server.uri())).unwrap();
    client.generate_image("a red bicycle").await.unwrap();
}
