pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_STREAM_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ASSISTANT_NAME: &str = "Assistant";
pub const DEFAULT_GREETING: &str = "Hello, I'm your Holiday Booking Assistant! Let's get started.";
pub const DEMO_PROMPT: &str = "I want to book a room at the Hilton from July 1st to July 5th.";

pub fn default_tools_enabled() -> bool {
    true
}

pub fn default_tool_enabled() -> bool {
    true
}

pub fn default_validate_arguments() -> bool {
    false
}

pub fn default_assistant_name() -> String {
    DEFAULT_ASSISTANT_NAME.to_string()
}

pub fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}
