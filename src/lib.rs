//! devconsole - an in-process command console.
//!
//! Applications register commands under dotted, case-insensitive paths and
//! feed raw text lines to the [`console::Console`], which resolves the path,
//! converts parameters and runs the callback. The main features include:
//!
//! - Namespace tree with prefix completion
//! - Typed function and variable binding through a pluggable type registry
//! - Built-in `all`, `find` and `help` commands
//! - A small REPL host binary with TOML configuration
//!
//! # Quick Start
//!
//! ```rust
//! use devconsole::console::Console;
//!
//! let mut console = Console::new();
//! console.register_default_commands();
//! console.bind_function("print.int", "", |(value,): (i32,)| Ok(value.to_string()));
//!
//! assert!(console.run("print.int 4"));
//! assert_eq!(console.help_for("print.int").as_deref(), Some("Expects i32"));
//! ```

/// Configuration schema definitions and loading.
pub mod config;

/// The command console engine.
pub mod console;

/// Core error types and result aliases.
pub mod core;

/// Logging initialisation for the host binary.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{DevConsoleError, Result};
