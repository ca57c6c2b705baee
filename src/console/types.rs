use thiserror::Error;

use super::tree::CommandTree;

/// Errors that can occur while registering, resolving or running console commands.
///
/// Every variant renders to the human readable line that the console writes
/// to its output sink. None of them is fatal: the triggering operation just
/// reports the failure and returns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    /// The input line was empty or only whitespace.
    #[error("Input is empty")]
    EmptyInput,

    /// A command was registered or deregistered with an empty path.
    #[error("Command path must not be empty")]
    EmptyPath,

    /// A parameter or variable type has no converter in the type registry.
    #[error("Type {type_name} is not supported by the type registry")]
    UnsupportedType {
        /// Name of the unsupported type
        type_name: String,
    },

    /// The number of parameter tokens does not match the declared parameter count.
    #[error("Param count mismatch. Expected {expected} got {got}")]
    ArgumentCountMismatch {
        /// Declared parameter count
        expected: usize,
        /// Tokens found in the parameter string
        got: usize,
    },

    /// A token could not be converted to its target type.
    #[error("Could not convert \"{token}\" to type {type_name}")]
    ConversionFailed {
        /// Name of the target type
        type_name: String,
        /// The offending token
        token: String,
    },

    /// No command exists at the requested path.
    #[error("Console cannot find command by name {path}")]
    PathNotFound {
        /// The path as typed by the user
        path: String,
    },

    /// The path names a namespace rather than a runnable command.
    #[error("{path} exists but is not a runnable entry")]
    NotRunnable {
        /// The path as typed by the user
        path: String,
    },

    /// A bound variable has no setter.
    #[error("{name} cannot be set")]
    ReadOnly {
        /// Name of the bound variable
        name: String,
    },

    /// A command reported a failure of its own.
    #[error("{0}")]
    CommandFailed(String),
}

impl ConsoleError {
    /// Creates a [`ConsoleError::CommandFailed`] from any displayable message.
    pub fn command(message: impl std::fmt::Display) -> Self {
        ConsoleError::CommandFailed(message.to_string())
    }
}

/// Result returned by every console command.
///
/// A non-empty `Ok` string is written to the output sink as the command's
/// output; an `Err` is rendered with `Display` and written there instead.
pub type CommandResult = Result<String, ConsoleError>;

/// Everything a command can see while it runs.
pub struct Invocation<'a> {
    pub(crate) path: &'a str,
    pub(crate) params: &'a str,
    pub(crate) tree: &'a CommandTree,
}

impl<'a> Invocation<'a> {
    /// Full dotted path of the running command, as registered.
    pub fn path(&self) -> &'a str {
        self.path
    }

    /// Raw, trimmed parameter string that followed the command path.
    pub fn params(&self) -> &'a str {
        self.params
    }

    /// Read-only view of the command tree, for commands that enumerate it.
    pub fn tree(&self) -> &'a CommandTree {
        self.tree
    }
}

/// Trait implemented by everything that can sit at a leaf of the command tree.
///
/// Plain closures taking the parameter string implement it automatically;
/// commands that need to inspect the tree implement it directly.
pub trait Command: Send + Sync {
    /// Runs the command.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError` when the parameters cannot be bound or the
    /// command itself fails. The console reports the error to its output
    /// sink; it never aborts the console.
    fn execute(&self, invocation: &Invocation<'_>) -> CommandResult;
}

impl<F> Command for F
where
    F: Fn(&str) -> CommandResult + Send + Sync,
{
    fn execute(&self, invocation: &Invocation<'_>) -> CommandResult {
        self(invocation.params())
    }
}
