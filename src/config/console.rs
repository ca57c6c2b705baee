use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for the interactive console host.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct ConsoleSettings {
    /// Prompt printed before each input line.
    pub prompt: String,

    /// Register the built-in `all`, `find` and `help` commands.
    pub default_commands: bool,

    /// Style output with ANSI colors.
    pub color: bool,

    /// Number of entered lines remembered by the `history` command.
    pub history_size: usize,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            default_commands: true,
            color: true,
            history_size: 50,
        }
    }
}
