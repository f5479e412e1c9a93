mod conversation;
mod message;
mod tool;

pub use conversation::Conversation;
pub use message::{Message, Role};
pub use tool::{FunctionCall, ToolCall, ToolResult};
