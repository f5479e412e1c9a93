pub mod client;
pub mod models;
pub mod response;
pub mod streaming;

pub use client::{CompletionClient, HttpCompletionClient};
pub use models::{AssistantReply, RequestBody, ToolChoice};
pub use streaming::{collect_stream, read_event_stream, DeltaSink, SseDecoder, SseEvent, StreamAccumulator};
