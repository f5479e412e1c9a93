mod api;
pub mod defaults;
mod assistant;
mod tools;
mod validation;

use crate::cli::Args;
use crate::error::{BookbotError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::{normalize_endpoint, ApiConfig};
pub use assistant::AssistantConfig;
pub use tools::{ToolToggle, ToolsConfig};
pub use validation::{expand_with, parse_flag};

use defaults::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL, DEFAULT_STREAM_TIMEOUT_SECS};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
    #[serde(default)]
    pub stream: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

/// On-disk configuration, every section optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub stream: bool,
    pub stream_timeout: u64,
    pub verbose: bool,
    pub assistant: AssistantConfig,
    pub tools: ToolsConfig,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = FileConfig::load(args.config.as_deref())?;
        Self::resolve(args, file_config, |name| env::var(name).ok())
    }

    /// Merge the sources: CLI args > environment > config file > defaults.
    pub fn resolve<F>(args: &Args, file_config: FileConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // A variable set to an empty string counts as unset.
        let from_env = |name: &str| non_blank(lookup(name));

        let api_key = from_env(API_KEY_ENV)
            .or_else(|| {
                non_blank(
                    file_config
                        .api
                        .api_key
                        .as_deref()
                        .map(|key| expand_with(key, &lookup)),
                )
            })
            .filter(|key| !key.starts_with("${"))
            .ok_or_else(|| {
                BookbotError::ConfigError(format!("{} environment variable not set", API_KEY_ENV))
            })?;

        let api_endpoint = non_blank(args.api_endpoint.clone())
            .or_else(|| from_env("BOOKBOT_API_ENDPOINT"))
            .or_else(|| non_blank(file_config.api.endpoint.clone()))
            .map(|endpoint| normalize_endpoint(&endpoint))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = non_blank(args.model.clone())
            .or_else(|| from_env("BOOKBOT_MODEL"))
            .or_else(|| non_blank(file_config.model.default_model.clone()))
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt = from_env("BOOKBOT_SYSTEM_PROMPT")
            .or_else(|| non_blank(file_config.model.system_prompt.clone()));

        let stream_timeout = from_env("BOOKBOT_STREAM_TIMEOUT")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .or(file_config.api.stream_timeout)
            .unwrap_or(DEFAULT_STREAM_TIMEOUT_SECS);

        let stream = args.stream
            || from_env("BOOKBOT_STREAM")
                .map(|v| parse_flag(&v))
                .or(file_config.session.stream)
                .unwrap_or(false);

        let verbose = args.verbose
            || from_env("BOOKBOT_VERBOSE")
                .map(|v| parse_flag(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        // --no-tools wins over everything else
        let mut tools = file_config.tools;
        if args.no_tools {
            tools.enabled = false;
        } else if let Some(v) = from_env("BOOKBOT_TOOLS_ENABLED") {
            tools.enabled = parse_flag(&v);
        }

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            system_prompt,
            stream,
            stream_timeout,
            verbose,
            assistant: file_config.assistant,
            tools,
        })
    }

    pub fn get_current_date() -> String {
        chrono::Local::now().format("%A, %B %d, %Y").to_string()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl FileConfig {
    /// Load from `explicit` when given (it must exist), otherwise from the
    /// first config file found on the search path, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config: FileConfig = if matches!(extension, Some("yaml") | Some("yml")) {
            serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config file: {}", path.display()))?
        } else {
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config file: {}", path.display()))?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".bookbot.yaml"),
            PathBuf::from(".bookbot.yml"),
            PathBuf::from(".bookbot.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("bookbot");
            paths.push(config_dir.join("bookbot.yaml"));
            paths.push(config_dir.join("bookbot.yml"));
            paths.push(config_dir.join("bookbot.json"));
        }

        paths
    }
}
