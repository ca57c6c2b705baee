use crate::console::{
    Command, CommandResult, ConsoleError, Invocation, dispatcher::help_text, parser::parse_line,
};

use super::expect_tokens;

/// Shows the top-level entries, or the help of one command.
///
/// Namespaces are listed with a trailing separator, e.g. `time.`.
pub struct HelpCommand;

impl HelpCommand {
    /// Help text shown for `help ?`.
    pub const HELP: &'static str =
        "Lists top level commands, or shows help for the given command path";
}

impl Command for HelpCommand {
    fn execute(&self, invocation: &Invocation<'_>) -> CommandResult {
        let tokens = expect_tokens(invocation.params(), 0, 1)?;
        let tree = invocation.tree();

        let Some(path) = tokens.first() else {
            let mut entries: Vec<String> = tree
                .root()
                .children()
                .filter(|child| child.is_runnable() || child.child_count() > 0)
                .map(|child| {
                    if child.is_runnable() {
                        child.full_path()
                    } else {
                        format!("{}.", child.full_path())
                    }
                })
                .collect();
            entries.sort();
            entries.push("Type <command> ? for help on a command".to_string());
            return Ok(entries.join("\n"));
        };

        let parsed = parse_line(path);
        let found = tree.find_closest_match(&parsed.segments);
        if !found.exact {
            return Err(ConsoleError::PathNotFound {
                path: parsed.path(),
            });
        }

        match found.node.leaf() {
            Some(leaf) => Ok(help_text(found.node, leaf)),
            None => {
                let mut children: Vec<String> =
                    found.node.children().map(|child| child.full_path()).collect();
                children.sort();
                Ok(children.join("\n"))
            }
        }
    }
}
