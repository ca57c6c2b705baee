//! Unit tests for config module
//!
//! Tests configuration defaults, parsing and validation.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::fs;

use tempfile::TempDir;

use super::*;
use crate::DevConsoleError;

#[test]
fn defaults_when_sections_missing() {
    let config = Config::from_toml_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.general.log_level, LogLevel::Info);
    assert_eq!(config.console.prompt, "> ");
    assert!(config.console.default_commands);
    assert_eq!(config.console.history_size, 50);
}

#[test]
fn partial_console_section_keeps_other_defaults() {
    let config = Config::from_toml_str(
        r#"
[general]
log_level = "debug"

[console]
color = false
"#,
    )
    .unwrap();

    assert_eq!(config.general.log_level, LogLevel::Debug);
    assert!(!config.console.color);
    assert!(config.console.default_commands);
    assert_eq!(config.console.prompt, "> ");
}

#[test]
fn invalid_log_level_is_parse_error() {
    let result = Config::from_toml_str("[general]\nlog_level = \"loud\"\n");

    assert!(matches!(
        result,
        Err(DevConsoleError::TomlParseError { location, .. }) if location == "string"
    ));
}

#[test]
fn zero_history_fails_validation() {
    let result = Config::from_toml_str("[console]\nhistory_size = 0\n");

    assert!(matches!(
        result,
        Err(DevConsoleError::ConfigValidation { component, .. }) if component == "console"
    ));
}

#[test]
fn loads_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[console]\nprompt = \"$ \"\nhistory_size = 5\n").unwrap();

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.console.prompt, "$ ");
    assert_eq!(config.console.history_size, 5);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();

    let result = Config::load_from(&dir.path().join("absent.toml"));

    assert!(matches!(result, Err(DevConsoleError::Io(_))));
}

#[test]
fn parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[console\n").unwrap();

    let Err(DevConsoleError::TomlParseError { location, .. }) = Config::load_from(&path) else {
        panic!("expected a TOML parse error");
    };

    assert!(location.ends_with("broken.toml"));
}

#[test]
fn schema_describes_sections() {
    let schema = Config::json_schema().unwrap();

    assert!(schema.contains("\"general\""));
    assert!(schema.contains("\"console\""));
    assert!(schema.contains("history_size"));
}

#[test]
fn log_level_directive_matches_serde_name() {
    for level in [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        let rendered = toml::Value::try_from(level).unwrap();
        assert_eq!(rendered.as_str(), Some(level.directive()));
        assert_eq!(level.to_string(), level.directive());
    }
}

#[test]
fn config_serializes_back_to_toml() {
    let toml_str = toml::to_string(&Config::default()).unwrap();

    assert!(toml_str.contains("[general]"));
    assert!(toml_str.contains("[console]"));
    assert_eq!(Config::from_toml_str(&toml_str).unwrap(), Config::default());
}

#[test]
fn main_config_lives_in_config_dir() {
    if let (Ok(dir), Ok(file)) = (ConfigPaths::config_dir(), ConfigPaths::main_config()) {
        assert_eq!(file, dir.join("config.toml"));
        assert!(dir.ends_with("devconsole"));
    }
}
