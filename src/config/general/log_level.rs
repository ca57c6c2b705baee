use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logging verbosity.
///
/// Used as the default tracing filter when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Only failures.
    Error,

    /// Failures and suspicious situations, e.g. commands that could not be bound.
    Warn,

    /// Normal operation (default level).
    #[default]
    Info,

    /// Every registration and dispatched command.
    Debug,

    /// Lookups and conversions as well.
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive())
    }
}
