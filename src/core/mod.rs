use std::path::Path;

use thiserror::Error;

/// Error types for the devconsole host.
///
/// Covers failures outside the command engine itself: locating, reading
/// and parsing configuration, and setting up logging output.
#[derive(Error, Debug)]
pub enum DevConsoleError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// Failure while rendering the configuration schema
    #[error("failed to render schema: {0}")]
    Schema(String),
}

/// A specialized `Result` type for devconsole host operations.
pub type Result<T> = std::result::Result<T, DevConsoleError>;

impl DevConsoleError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        DevConsoleError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }
}
