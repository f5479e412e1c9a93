use bookbot::api::{CompletionClient, HttpCompletionClient, RequestBody, ToolChoice};
use bookbot::booking::{format_tools_for_llm, ToolRegistry};
use bookbot::config::ToolsConfig;
use bookbot::error::BookbotError;
use bookbot::models::Message;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn text_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }]
    })
}

fn request(stream: bool, with_tools: bool) -> RequestBody {
    let tools = with_tools.then(|| format_tools_for_llm(&ToolRegistry::new(&ToolsConfig::default())));
    RequestBody {
        model: "gpt-4o".to_string(),
        messages: vec![Message::user("I want to book a room at the Hilton")],
        stream,
        tool_choice: tools.as_ref().map(|_| ToolChoice::Auto),
        tools,
    }
}

fn client_for(server: &MockServer) -> HttpCompletionClient {
    HttpCompletionClient::new("test-key", &format!("{}/v1/chat/completions", server.uri()), 5).unwrap()
}

#[tokio::test]
async fn test_text_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-4o",
            "messages": [{ "role": "user", "content": "I want to book a room at the Hilton" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("Which dates?")))
        .mount(&server)
        .await;

    let reply = client_for(&server).complete(&request(false, false)).await.unwrap();

    assert_eq!(reply.content.as_deref(), Some("Which dates?"));
    assert!(reply.tool_calls.is_empty());
}

#[tokio::test]
async fn test_tool_schema_and_choice_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({ "tool_choice": "auto" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_01",
                        "type": "function",
                        "function": {
                            "name": "check_room_availability",
                            "arguments": "{\"hotelName\":\"Hilton\"}"
                        }
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .mount(&server)
        .await;

    let reply = client_for(&server).complete(&request(false, true)).await.unwrap();

    assert_eq!(reply.tool_calls.len(), 1);
    assert_eq!(reply.tool_calls[0].id, "call_01");
    assert_eq!(reply.tool_calls[0].function.name, "check_room_availability");

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["tools"].as_array().unwrap().len(), 2);
    assert_eq!(body["stream"], false);
}

#[tokio::test]
async fn test_request_without_tools_omits_tool_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("ok")))
        .mount(&server)
        .await;

    client_for(&server).complete(&request(false, false)).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(body.get("tools").is_none());
    assert!(body.get("tool_choice").is_none());
}

#[tokio::test]
async fn test_http_error_returns_err() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"error":{"message":"Incorrect API key provided","code":"invalid_api_key"}}"#,
        ))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&request(false, true)).await.unwrap_err();

    match err {
        BookbotError::ApiError { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid_api_key"));
        }
        other => panic!("expected ApiError, got {other}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server).complete(&request(false, false)).await.unwrap_err();

    assert!(matches!(err, BookbotError::ResponseError(_)));
}

#[tokio::test]
async fn test_streaming_response_reaches_sink() {
    let server = MockServer::start().await;

    let sse = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"Your \"}}]}\n\n",
        ": keep-alive\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"room is booked.\"}}]}\n\n",
        "data: [DONE]\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({ "stream": true })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(sse, "text/event-stream"))
        .mount(&server)
        .await;

    let collected: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink_collected = Arc::clone(&collected);
    let client = client_for(&server).with_delta_sink(Arc::new(move |delta: &str| {
        sink_collected.lock().unwrap().push(delta.to_string());
    }));

    let reply = client.complete(&request(true, false)).await.unwrap();

    assert_eq!(reply.content.as_deref(), Some("Your room is booked."));
    assert_eq!(
        *collected.lock().unwrap(),
        vec!["Your ".to_string(), "room is booked.".to_string()]
    );
}
