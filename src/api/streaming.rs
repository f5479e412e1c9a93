use crate::api::models::{AssistantReply, StreamResponse};
use crate::error::{BookbotError, Result};
use futures::{Stream, StreamExt};
use std::pin::pin;
use std::sync::Arc;
use tokio::time::{timeout, Duration};
use tracing::debug;

/// Receives each text delta as it arrives.
pub type DeltaSink = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    Data(String),
    Done,
}

/// Line-oriented server-sent-events decoder.
///
/// Bytes are buffered until a newline arrives, so lines (and multi-byte
/// characters) split across network chunks decode correctly.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.pending.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.pending.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(event) = parse_line(line.trim_end_matches(&['\n', '\r'][..])) {
                events.push(event);
            }
        }
        events
    }

    /// Decode whatever is left once the stream has ended without a newline.
    pub fn finish(&mut self) -> Vec<SseEvent> {
        if self.pending.is_empty() {
            return Vec::new();
        }
        let rest = std::mem::take(&mut self.pending);
        let line = String::from_utf8_lossy(&rest);
        parse_line(line.trim_end_matches('\r')).into_iter().collect()
    }
}

fn parse_line(line: &str) -> Option<SseEvent> {
    if line.is_empty() || line.starts_with(':') {
        return None;
    }

    let (field, value) = match line.find(':') {
        Some(colon_pos) => (line[..colon_pos].trim(), line[colon_pos + 1..].trim_start()),
        None => (line.trim(), ""),
    };

    match field {
        "data" if value == "[DONE]" => Some(SseEvent::Done),
        "data" => Some(SseEvent::Data(value.to_string())),
        "event" | "id" | "retry" => {
            debug!(field, value, "SSE field");
            None
        }
        _ => {
            debug!(field, "unknown SSE field");
            None
        }
    }
}

/// Folds `data:` payloads into the final reply text.
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    content: String,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the text this payload added, if any.
    pub fn apply(&mut self, data: &str) -> Option<String> {
        let parsed = match serde_json::from_str::<StreamResponse>(data) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!(error = %e, "JSON parse error in stream chunk");
                return None;
            }
        };

        let delta: String = parsed
            .choices
            .unwrap_or_default()
            .into_iter()
            .filter_map(|choice| choice.delta.and_then(|d| d.content))
            .collect();

        if delta.is_empty() {
            return None;
        }
        self.content.push_str(&delta);
        Some(delta)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_reply(self) -> AssistantReply {
        AssistantReply::text(self.content)
    }
}

/// Feed events into the accumulator. Returns true once `[DONE]` is seen.
fn consume(events: Vec<SseEvent>, accumulator: &mut StreamAccumulator, sink: Option<&DeltaSink>) -> bool {
    for event in events {
        match event {
            SseEvent::Done => return true,
            SseEvent::Data(data) => {
                if let Some(delta) = accumulator.apply(&data) {
                    if let Some(sink) = sink {
                        sink(&delta);
                    }
                }
            }
        }
    }
    false
}

/// Read a streaming chat-completion response to the end.
///
/// Fails with [`BookbotError::Timeout`] when no bytes arrive for
/// `timeout_secs`.
pub async fn collect_stream(
    response: reqwest::Response,
    timeout_secs: u64,
    sink: Option<&DeltaSink>,
) -> Result<AssistantReply> {
    read_event_stream(response.bytes_stream(), timeout_secs, sink).await
}

/// Decode an SSE byte stream into the assistant reply.
pub async fn read_event_stream<S, B, E>(
    stream: S,
    timeout_secs: u64,
    sink: Option<&DeltaSink>,
) -> Result<AssistantReply>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<BookbotError>,
{
    let mut stream = pin!(stream);
    let mut decoder = SseDecoder::new();
    let mut accumulator = StreamAccumulator::new();
    let chunk_timeout = Duration::from_secs(timeout_secs);

    loop {
        let chunk = match timeout(chunk_timeout, stream.next()).await {
            Ok(Some(chunk)) => chunk.map_err(Into::into)?,
            Ok(None) => break,
            Err(_) => return Err(BookbotError::Timeout(timeout_secs)),
        };

        if consume(decoder.feed(chunk.as_ref()), &mut accumulator, sink) {
            return Ok(accumulator.into_reply());
        }
    }

    // Stream ended without [DONE]
    consume(decoder.finish(), &mut accumulator, sink);
    Ok(accumulator.into_reply())
}
