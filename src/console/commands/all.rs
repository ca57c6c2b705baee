use crate::console::{Command, CommandResult, Invocation};

use super::expect_tokens;

/// Lists every runnable command with its help text.
///
/// # Example Usage
///
/// ```text
/// > all
/// print.int
///   Expects i32
/// time.scale
///   Sets the time scale
/// ```
pub struct AllCommand;

impl AllCommand {
    /// Help text shown for `all ?`.
    pub const HELP: &'static str = "Gathers and shows all commands";
}

impl Command for AllCommand {
    fn execute(&self, invocation: &Invocation<'_>) -> CommandResult {
        expect_tokens(invocation.params(), 0, 0)?;

        let lines: Vec<String> = invocation
            .tree()
            .runnable()
            .into_iter()
            .map(|node| {
                let path = node.full_path();
                match node.leaf().map(|leaf| leaf.help()) {
                    Some(help) if !help.is_empty() => format!("{path}\n  {help}"),
                    _ => path,
                }
            })
            .collect();

        if lines.is_empty() {
            return Ok("No commands registered.".to_string());
        }

        Ok(lines.join("\n"))
    }
}
