//! Configuration schema for the console host.
//!
//! Configuration is read from TOML. Every field has a default, so a missing
//! file or a partial file is fine.

mod console;
mod general;
mod loading;
mod paths;

pub use console::ConsoleSettings;
pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Interactive console settings.
    #[serde(default)]
    pub console: ConsoleSettings,
}

#[cfg(test)]
mod tests;
