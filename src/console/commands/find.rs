use crate::console::{Command, CommandResult, Invocation};

use super::expect_tokens;

/// Case-insensitive substring search over command names.
///
/// Only the last segment of each runnable command is searched. Once a
/// command matches, nothing below it is searched, since its children would
/// only repeat the match.
pub struct FindCommand;

impl FindCommand {
    /// Help text shown for `find ?`.
    pub const HELP: &'static str =
        "Searches through all commands and conducts a partial match against the given string";
}

impl Command for FindCommand {
    fn execute(&self, invocation: &Invocation<'_>) -> CommandResult {
        let tokens = expect_tokens(invocation.params(), 1, 1)?;
        let needle = tokens[0].to_lowercase();

        let mut matches = Vec::new();
        invocation.tree().visit(|node| {
            if node.is_runnable() && node.local_name().to_lowercase().contains(&needle) {
                matches.push(node.full_path());
                return false;
            }
            true
        });

        if matches.is_empty() {
            return Ok("No matches found.".to_string());
        }

        matches.sort();
        Ok(matches.join("\n"))
    }
}
