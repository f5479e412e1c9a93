use crate::api::{CompletionClient, RequestBody, ToolChoice};
use crate::booking::{format_tools_for_llm, ToolRegistry};
use crate::error::Result;
use crate::models::{Conversation, Message, ToolCall, ToolResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What one user turn produced.
#[derive(Debug, Clone, Default)]
pub struct TurnOutcome {
    /// One entry per requested tool call, in the order the model asked.
    pub tool_results: Vec<ToolResult>,
    pub reply: String,
    /// The reply has already been written out through the delta sink.
    pub streamed: bool,
}

/// Receives each tool result as soon as its stub has run.
pub type ToolResultSink = Arc<dyn Fn(&ToolResult) + Send + Sync>;

/// Forwards the conversation to the model and resolves tool calls locally.
pub struct Relay {
    client: Box<dyn CompletionClient>,
    tools: Option<ToolRegistry>,
    model: String,
    stream: bool,
    tool_sink: Option<ToolResultSink>,
}

impl Relay {
    pub fn new(client: Box<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            tools: None,
            model: model.into(),
            stream: false,
            tool_sink: None,
        }
    }

    pub fn with_tools(mut self, registry: ToolRegistry) -> Self {
        self.tools = Some(registry);
        self
    }

    pub fn with_streaming(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_tool_sink(mut self, sink: ToolResultSink) -> Self {
        self.tool_sink = Some(sink);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .as_ref()
            .map(|registry| registry.list().iter().map(|t| t.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Answer the last user message in `conversation`.
    ///
    /// Appends the assistant reply, and when the model asks for tools also
    /// the tool-call request and one tool message per call, before a single
    /// follow-up request without tools. Errors from the client are returned
    /// as-is; whatever was appended before the failure stays appended.
    pub async fn run_turn(&self, conversation: &mut Conversation) -> Result<TurnOutcome> {
        let mut tool_results = Vec::new();
        self.run_turn_into(conversation, &mut tool_results).await
    }

    /// Same as [`Relay::run_turn`], but tool results are pushed onto
    /// `tool_results` as each stub runs, so they are still available when
    /// the follow-up request fails.
    pub async fn run_turn_into(
        &self,
        conversation: &mut Conversation,
        tool_results: &mut Vec<ToolResult>,
    ) -> Result<TurnOutcome> {
        let tools = self
            .tools
            .as_ref()
            .map(format_tools_for_llm)
            .filter(|tools| !tools.is_empty());

        // Tool-call arguments don't stream reliably, so only tool-less
        // requests are streamed.
        let stream = self.stream && tools.is_none();
        let tool_choice = tools.as_ref().map(|_| ToolChoice::Auto);

        let request = RequestBody {
            model: self.model.clone(),
            messages: conversation.to_vec(),
            stream,
            tools,
            tool_choice,
        };

        let reply = self.client.complete(&request).await?;

        if !reply.has_tool_calls() {
            let text = reply.content.unwrap_or_default();
            conversation.push(Message::assistant(text.clone()));
            return Ok(TurnOutcome {
                tool_results: Vec::new(),
                reply: text,
                streamed: stream,
            });
        }

        let tool_calls: Vec<ToolCall> = reply
            .tool_calls
            .into_iter()
            .map(|mut call| {
                if call.id.is_empty() {
                    call.id = format!("call_{}", Uuid::new_v4().simple());
                    warn!(id = %call.id, "tool call missing 'id', generated one");
                }
                call
            })
            .collect();

        info!(count = tool_calls.len(), "model requested tool calls");
        conversation.push(Message::assistant_tool_calls(reply.content, tool_calls.clone()));

        let first_result = tool_results.len();
        tool_results.reserve(tool_calls.len());
        for call in &tool_calls {
            let result = self.dispatch(call);
            if let Some(sink) = &self.tool_sink {
                sink(&result);
            }
            conversation.push(Message::tool(&result));
            tool_results.push(result);
        }

        let followup = RequestBody {
            model: self.model.clone(),
            messages: conversation.to_vec(),
            stream: self.stream,
            tools: None,
            tool_choice: None,
        };

        debug!(messages = followup.messages.len(), "making follow-up request with tool results");
        let final_reply = self.client.complete(&followup).await?;
        if final_reply.has_tool_calls() {
            warn!("follow-up reply requested tools again; ignoring");
        }

        let text = final_reply.content.unwrap_or_default();
        conversation.push(Message::assistant(text.clone()));

        Ok(TurnOutcome {
            tool_results: tool_results[first_result..].to_vec(),
            reply: text,
            streamed: self.stream,
        })
    }

    /// Resolve one tool call. Never fails: problems become an `Error: ...`
    /// tool result the model can read.
    fn dispatch(&self, call: &ToolCall) -> ToolResult {
        let name = call.function.name.as_str();
        let failure = |message: String| {
            warn!(tool = name, id = %call.id, "{}", message);
            ToolResult {
                tool_call_id: call.id.clone(),
                name: name.to_string(),
                content: message,
                is_error: true,
            }
        };

        if name.is_empty() {
            return failure(format!(
                "Error: Tool call {} missing required 'function.name' field",
                call.id
            ));
        }

        let registry = match self.tools.as_ref() {
            Some(registry) => registry,
            None => return failure(format!("Error: Tool '{}' not found (tools disabled)", name)),
        };

        if registry.get(name).is_none() {
            return failure(format!("Error: Tool '{}' not found", name));
        }

        let arguments = match serde_json::from_str::<Value>(&call.function.arguments) {
            Ok(arguments) => arguments,
            Err(err) => {
                return failure(format!(
                    "Error: failed to parse arguments for tool '{}': {}",
                    name, err
                ))
            }
        };

        debug!(tool = name, args = %call.function.arguments, "calling tool");
        match registry.call_tool(name, &arguments) {
            Ok(content) => ToolResult {
                tool_call_id: call.id.clone(),
                name: name.to_string(),
                content,
                is_error: false,
            },
            Err(e) => failure(format!("Error: {}", e)),
        }
    }
}
