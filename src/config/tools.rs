use serde::{Deserialize, Serialize};

use crate::config::defaults::{default_tool_enabled, default_tools_enabled, default_validate_arguments};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tools_enabled")]
    pub enabled: bool,
    /// Check tool arguments against the JSON schema before running a stub.
    #[serde(default = "default_validate_arguments")]
    pub validate_arguments: bool,
    #[serde(default)]
    pub tools: Vec<ToolToggle>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: default_tools_enabled(),
            validate_arguments: default_validate_arguments(),
            tools: Vec::new(),
        }
    }
}

impl ToolsConfig {
    /// Tools not listed are enabled.
    pub fn is_tool_enabled(&self, name: &str) -> bool {
        self.tools
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.enabled)
            .unwrap_or(true)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolToggle {
    pub name: String,
    #[serde(default = "default_tool_enabled")]
    pub enabled: bool,
}
