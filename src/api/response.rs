use crate::api::models::AssistantReply;
use crate::error::{BookbotError, Result};
use crate::models::ToolCall;
use serde_json::Value;
use tracing::warn;

fn first_message(response_json: &Value) -> Result<&Value> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| BookbotError::ResponseError("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| BookbotError::ResponseError("Empty choices array".to_string()))?;

    first_choice
        .get("message")
        .ok_or_else(|| BookbotError::ResponseError("No message in response".to_string()))
}

/// Parse a non-streaming API response and extract tool calls if present
pub fn parse_tool_calls(response_json: &Value) -> Result<Option<Vec<Value>>> {
    let message = first_message(response_json)?;

    if let Some(tool_calls) = message.get("tool_calls").and_then(|tc| tc.as_array()) {
        if !tool_calls.is_empty() {
            return Ok(Some(tool_calls.clone()));
        }
    }

    Ok(None)
}

/// Extract content from a non-streaming response
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Read the first choice of a chat-completion body. Tool call entries that
/// are not objects are dropped with a warning.
pub fn parse_reply(response_json: &Value) -> Result<AssistantReply> {
    let content = extract_content(response_json)?;

    let tool_calls = parse_tool_calls(response_json)?
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<ToolCall>(raw) {
            Ok(call) => Some(call),
            Err(e) => {
                warn!(error = %e, "ignoring unparseable tool call");
                None
            }
        })
        .collect();

    Ok(AssistantReply {
        content,
        tool_calls,
    })
}
