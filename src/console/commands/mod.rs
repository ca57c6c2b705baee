//! Built-in commands registered by [`Console::register_default_commands`].
//!
//! `all` lists every runnable command, `find` searches command names and
//! `help` shows the top level or the help text of one command.

mod all;
mod find;
mod help;

pub use all::AllCommand;
pub use find::FindCommand;
pub use help::HelpCommand;

use tracing::error;

use super::{Command, Console, ConsoleError, tokenizer::tokenize};

/// Registers the built-in commands at the top level of the console.
///
/// Existing commands at `all`, `find` or `help` are replaced.
pub fn register_commands(console: &mut Console) {
    register_default(console, "all", AllCommand::HELP, AllCommand);
    register_default(console, "find", FindCommand::HELP, FindCommand);
    register_default(console, "help", HelpCommand::HELP, HelpCommand);
}

fn register_default(
    console: &mut Console,
    path: &str,
    help: &str,
    command: impl Command + 'static,
) {
    if let Err(e) = console.register(path, help, command) {
        error!(path, error = %e, "Failed to register default command");
    }
}

/// Splits `params` and checks it holds between `min` and `max` tokens.
fn expect_tokens(params: &str, min: usize, max: usize) -> Result<Vec<String>, ConsoleError> {
    let tokens = tokenize(params);

    if tokens.len() < min || tokens.len() > max {
        return Err(ConsoleError::ArgumentCountMismatch {
            expected: if tokens.len() < min { min } else { max },
            got: tokens.len(),
        });
    }

    Ok(tokens)
}
