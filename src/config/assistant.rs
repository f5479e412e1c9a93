use serde::{Deserialize, Serialize};

use crate::config::defaults::{default_assistant_name, default_greeting};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Sender name shown next to assistant messages.
    #[serde(default = "default_assistant_name")]
    pub name: String,
    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: default_assistant_name(),
            greeting: default_greeting(),
        }
    }
}
