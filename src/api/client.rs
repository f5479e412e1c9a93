use crate::api::models::{AssistantReply, RequestBody};
use crate::api::response::parse_reply;
use crate::api::streaming::{collect_stream, DeltaSink};
use crate::error::{BookbotError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

/// Anything that can answer a chat-completion request.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &RequestBody) -> Result<AssistantReply>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct HttpCompletionClient {
    http: reqwest::Client,
    endpoint: String,
    stream_timeout: u64,
    delta_sink: Option<DeltaSink>,
}

impl HttpCompletionClient {
    pub fn new(api_key: &str, endpoint: &str, stream_timeout: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(|e| {
                BookbotError::ConfigError(format!("Invalid authorization header: {}", e))
            })?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            stream_timeout,
            delta_sink: None,
        })
    }

    /// Forward streamed text to `sink` as it arrives.
    pub fn with_delta_sink(mut self, sink: DeltaSink) -> Self {
        self.delta_sink = Some(sink);
        self
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: &RequestBody) -> Result<AssistantReply> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.as_ref().map_or(0, Vec::len),
            stream = request.stream,
            "making completion request"
        );

        let response = self.http.post(&self.endpoint).json(request).send().await?;
        debug!(status = %response.status(), "completion response");

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BookbotError::ApiError { status, message });
        }

        if request.stream {
            return collect_stream(response, self.stream_timeout, self.delta_sink.as_ref()).await;
        }

        let response_text = response.text().await?;
        debug!(raw = %response_text, "raw completion body");
        let response_json: Value = serde_json::from_str(&response_text)?;
        parse_reply(&response_json)
    }
}
