use serde::{Deserialize, Serialize};

fn default_tool_type() -> String {
    "function".to_string()
}

/// A function invocation requested by the model.
///
/// Fields default to empty strings so a partially-formed call from the
/// provider still deserializes; the relay reports the gaps back as tool
/// errors instead of failing the whole turn.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default = "default_tool_type")]
    pub tool_type: String,
    #[serde(default)]
    pub function: FunctionCall,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    /// JSON-encoded argument object, exactly as sent by the model.
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub tool_call_id: String,
    pub name: String,
    pub content: String,
    pub is_error: bool,
}
