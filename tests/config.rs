use bookbot::cli::Args;
use bookbot::config::{normalize_endpoint, Config, FileConfig};
use bookbot::error::BookbotError;
use clap::Parser;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn resolve(args: &[&str], file_config: FileConfig, env: &HashMap<String, String>) -> Result<Config, BookbotError> {
    let args = Args::parse_from(args);
    Config::resolve(&args, file_config, |name| env.get(name).cloned())
}

#[test]
fn test_defaults() {
    let env = env_of(&[("OPENAI_API_KEY", "sk-test")]);
    let config = resolve(&["bookbot"], FileConfig::default(), &env).unwrap();

    assert_eq!(config.api_key, "sk-test");
    assert_eq!(config.api_endpoint, "https://api.openai.com/v1/chat/completions");
    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.stream_timeout, 30);
    assert!(!config.stream);
    assert!(!config.verbose);
    assert!(config.tools.enabled);
    assert!(!config.tools.validate_arguments);
    assert_eq!(config.system_prompt, None);
    assert_eq!(config.assistant.name, "Assistant");
}

#[test]
fn test_missing_api_key_is_config_error() {
    let err = resolve(&["bookbot"], FileConfig::default(), &HashMap::new()).unwrap_err();

    assert!(matches!(err, BookbotError::ConfigError(_)));
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[test]
fn test_precedence_args_over_env_over_file() {
    let file_config: FileConfig = serde_yaml::from_str(
        r#"
api:
  endpoint: http://file-host/v1
  stream_timeout: 12
model:
  default_model: file-model
session:
  stream: true
"#,
    )
    .unwrap();
    let env = env_of(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("BOOKBOT_MODEL", "env-model"),
        ("BOOKBOT_API_ENDPOINT", "http://env-host/v1/"),
    ]);

    let config = resolve(&["bookbot", "--model", "cli-model"], file_config.clone(), &env).unwrap();
    assert_eq!(config.model, "cli-model");
    assert_eq!(config.api_endpoint, "http://env-host/v1/chat/completions");
    assert_eq!(config.stream_timeout, 12);
    assert!(config.stream);

    let env = env_of(&[("OPENAI_API_KEY", "sk-test")]);
    let config = resolve(&["bookbot"], file_config, &env).unwrap();
    assert_eq!(config.model, "file-model");
    assert_eq!(config.api_endpoint, "http://file-host/v1/chat/completions");
}

#[test]
fn test_api_key_from_file_expands_env() {
    let file_config: FileConfig = serde_yaml::from_str("api:\n  api_key: \"${BOOKING_KEY}\"\n").unwrap();

    let env = env_of(&[("BOOKING_KEY", "sk-from-var")]);
    let config = resolve(&["bookbot"], file_config.clone(), &env).unwrap();
    assert_eq!(config.api_key, "sk-from-var");

    // unresolved placeholder counts as missing
    let err = resolve(&["bookbot"], file_config, &HashMap::new()).unwrap_err();
    assert!(matches!(err, BookbotError::ConfigError(_)));
}

#[test]
fn test_empty_env_api_key_falls_back_to_file() {
    let file_config: FileConfig = serde_yaml::from_str("api:\n  api_key: sk-file\n").unwrap();
    let env = env_of(&[("OPENAI_API_KEY", "")]);

    let config = resolve(&["bookbot"], file_config, &env).unwrap();

    assert_eq!(config.api_key, "sk-file");
}

#[test]
fn test_empty_env_values_do_not_override_file_or_defaults() {
    let env = env_of(&[
        ("OPENAI_API_KEY", "sk-test"),
        ("BOOKBOT_MODEL", ""),
        ("BOOKBOT_API_ENDPOINT", "  "),
        ("BOOKBOT_STREAM_TIMEOUT", ""),
        ("BOOKBOT_SYSTEM_PROMPT", ""),
    ]);

    let config = resolve(&["bookbot"], FileConfig::default(), &env).unwrap();
    assert_eq!(config.model, "gpt-4o");
    assert_eq!(config.api_endpoint, "https://api.openai.com/v1/chat/completions");
    assert_eq!(config.stream_timeout, 30);
    assert_eq!(config.system_prompt, None);

    let file_config: FileConfig = serde_yaml::from_str(
        "api:\n  endpoint: http://file-host/v1\nmodel:\n  default_model: file-model\n",
    )
    .unwrap();
    let config = resolve(&["bookbot"], file_config, &env).unwrap();
    assert_eq!(config.model, "file-model");
    assert_eq!(config.api_endpoint, "http://file-host/v1/chat/completions");
}

#[test]
fn test_empty_tools_env_keeps_file_setting() {
    let file_config: FileConfig = serde_yaml::from_str("tools:\n  enabled: false\n").unwrap();
    let env = env_of(&[("OPENAI_API_KEY", "sk-test"), ("BOOKBOT_TOOLS_ENABLED", "")]);

    let config = resolve(&["bookbot"], file_config, &env).unwrap();

    assert!(!config.tools.enabled);
}

#[test]
fn test_no_tools_flag_wins() {
    let env = env_of(&[("OPENAI_API_KEY", "sk-test"), ("BOOKBOT_TOOLS_ENABLED", "true")]);
    let config = resolve(&["bookbot", "--no-tools"], FileConfig::default(), &env).unwrap();
    assert!(!config.tools.enabled);

    let env = env_of(&[("OPENAI_API_KEY", "sk-test"), ("BOOKBOT_TOOLS_ENABLED", "0")]);
    let config = resolve(&["bookbot"], FileConfig::default(), &env).unwrap();
    assert!(!config.tools.enabled);
}

#[test]
fn test_normalize_endpoint() {
    assert_eq!(
        normalize_endpoint("http://localhost:11434/v1"),
        "http://localhost:11434/v1/chat/completions"
    );
    assert_eq!(
        normalize_endpoint("http://localhost:11434/"),
        "http://localhost:11434/v1/chat/completions"
    );
    assert_eq!(
        normalize_endpoint("https://example.com/v1/chat/completions"),
        "https://example.com/v1/chat/completions"
    );
}

#[test]
fn test_load_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bookbot.yaml");
    fs::write(
        &path,
        r#"
assistant:
  name: Concierge
tools:
  validate_arguments: true
  tools:
    - name: make_reservation
      enabled: false
"#,
    )
    .unwrap();

    let config = FileConfig::load(Some(&path)).unwrap();

    assert_eq!(config.assistant.name, "Concierge");
    assert_eq!(
        config.assistant.greeting,
        "Hello, I'm your Holiday Booking Assistant! Let's get started."
    );
    assert!(config.tools.enabled);
    assert!(config.tools.validate_arguments);
    assert!(!config.tools.is_tool_enabled("make_reservation"));
    assert!(config.tools.is_tool_enabled("check_room_availability"));
}

#[test]
fn test_load_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bookbot.json");
    fs::write(&path, r#"{ "model": { "system_prompt": "Be brief." } }"#).unwrap();

    let config = FileConfig::load(Some(&path)).unwrap();

    assert_eq!(config.model.system_prompt.as_deref(), Some("Be brief."));
}

#[test]
fn test_load_explicit_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let result = FileConfig::load(Some(&temp_dir.path().join("absent.yaml")));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Failed to read config file"));
}

#[test]
fn test_one_shot_prompt() {
    assert_eq!(Args::parse_from(["bookbot"]).one_shot_prompt(), None);
    assert_eq!(
        Args::parse_from(["bookbot", "book", "the", "Ritz"]).one_shot_prompt(),
        Some("book the Ritz".to_string())
    );
    assert_eq!(
        Args::parse_from(["bookbot", "--demo"]).one_shot_prompt().as_deref(),
        Some("I want to book a room at the Hilton from July 1st to July 5th.")
    );
}
