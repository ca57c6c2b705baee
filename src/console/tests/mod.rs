//! Unit tests for the console dispatcher and built-in commands.
//!
//! Output is captured through the sink; no terminal involved.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::console::{Console, ConsoleError, Vec3, first_common_prefix_length};

type Captured = Arc<Mutex<Vec<String>>>;

fn capturing_console() -> (Console, Captured) {
    let lines: Captured = Arc::default();
    let sink = Arc::clone(&lines);

    let mut console = Console::new();
    console.set_output_sink(move |line| sink.lock().unwrap().push(line.to_string()));

    (console, lines)
}

fn take(lines: &Captured) -> Vec<String> {
    std::mem::take(&mut *lines.lock().unwrap())
}

fn noop(_: &str) -> crate::console::CommandResult {
    Ok(String::new())
}

#[test]
fn empty_input_is_ignored_silently() {
    let (console, lines) = capturing_console();

    assert!(!console.run(""));
    assert!(!console.run("   "));
    assert!(take(&lines).is_empty());
}

#[test]
fn unknown_command_is_reported() {
    let (console, lines) = capturing_console();

    assert!(!console.run("find.notreal 123"));
    assert_eq!(
        take(&lines),
        vec![
            "> find.notreal 123",
            "Console cannot find command by name find.notreal"
        ]
    );
}

#[test]
fn runs_callback_with_param_string() {
    let (mut console, lines) = capturing_console();
    console
        .register_command("Time.Scale", "", |params: &str| Ok(format!("got [{params}]")))
        .unwrap();

    assert!(console.run("time.scale   1.5  2 "));
    assert_eq!(take(&lines), vec!["> time.scale   1.5  2 ", "got [1.5  2]"]);
}

#[test]
fn echo_precedes_command_output() {
    let (mut console, lines) = capturing_console();
    console
        .register_command("say", "", |params: &str| Ok(params.to_string()))
        .unwrap();

    console.run("say hi");

    let lines = take(&lines);
    assert_eq!(lines[0], "> say hi");
    assert_eq!(lines[1], "hi");
}

#[test]
fn namespace_is_not_runnable() {
    let (mut console, lines) = capturing_console();
    console.register_command("time.scale", "", noop).unwrap();

    assert!(!console.run("Time"));
    assert_eq!(take(&lines)[1], "Time exists but is not a runnable entry");
}

#[test]
fn help_token_shows_help_without_running() {
    let (mut console, lines) = capturing_console();
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&runs);
    console
        .register_command("time.scale", "Sets the time scale", move |_: &str| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        })
        .unwrap();
    console.register_command("quiet", "", noop).unwrap();

    assert!(!console.run("time.scale ?"));
    assert!(!console.run("quiet ?"));

    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert_eq!(
        take(&lines),
        vec![
            "> time.scale ?",
            "Sets the time scale",
            "> quiet ?",
            "quiet has no help text"
        ]
    );
}

#[test]
fn callback_error_is_reported_and_still_counts_as_run() {
    let (mut console, lines) = capturing_console();
    console
        .register_command("fail", "", |_: &str| Err(ConsoleError::command("went wrong")))
        .unwrap();

    assert!(console.run("fail"));
    assert_eq!(take(&lines)[1], "went wrong");
}

#[test]
fn panicking_callback_leaves_console_usable() {
    let (mut console, lines) = capturing_console();
    console
        .register_command("boom", "", |_: &str| panic!("kaboom"))
        .unwrap();
    console
        .register_command("ok", "", |_: &str| Ok("fine".to_string()))
        .unwrap();

    assert!(console.run("boom"));
    assert_eq!(take(&lines)[1], "boom failed: kaboom");

    assert!(console.run("ok"));
    assert_eq!(take(&lines)[1], "fine");
}

#[test]
fn reregistering_replaces_command() {
    let (mut console, lines) = capturing_console();
    console
        .register_command("greet", "", |_: &str| Ok("first".to_string()))
        .unwrap();
    console
        .register_command("GREET", "", |_: &str| Ok("second".to_string()))
        .unwrap();

    console.run("greet");

    assert_eq!(take(&lines)[1], "second");
    assert_eq!(console.command_count(), 1);
}

#[test]
fn empty_path_is_rejected() {
    let mut console = Console::new();

    assert_eq!(
        console.register_command("  ", "", noop),
        Err(ConsoleError::EmptyPath)
    );
    assert_eq!(console.deregister_command(""), Err(ConsoleError::EmptyPath));
}

#[test]
fn deregister_removes_subtree() {
    let (mut console, lines) = capturing_console();
    console.register_command("time.scale", "", noop).unwrap();
    console.register_command("time.offset", "", noop).unwrap();

    assert_eq!(console.deregister_command("Time"), Ok(true));
    assert_eq!(console.deregister_command("time"), Ok(false));

    assert!(!console.run("time.scale"));
    assert_eq!(
        take(&lines)[1],
        "Console cannot find command by name time.scale"
    );
    assert_eq!(console.command_count(), 0);
}

#[test]
fn bound_function_reports_binding_errors_through_sink() {
    let (mut console, lines) = capturing_console();
    assert!(console.bind_function("print.intThenFloat", "", |(i, f): (i32, f32)| {
        Ok(format!("{i}: {f}"))
    }));

    assert!(console.run("print.intThenFloat 3 1.5"));
    assert!(console.run("print.intThenFloat 3"));
    assert!(console.run("print.intThenFloat x 1.5"));

    assert_eq!(
        take(&lines),
        vec![
            "> print.intThenFloat 3 1.5",
            "3: 1.5",
            "> print.intThenFloat 3",
            "Param count mismatch. Expected 2 got 1",
            "> print.intThenFloat x 1.5",
            "Could not convert \"x\" to type i32",
        ]
    );
}

#[test]
fn bound_function_gets_generated_help() {
    let mut console = Console::new();
    console.bind_function("move", "", |(_, _): (Vec3, f32)| Ok(String::new()));
    console.bind_function("jump", "Jumps", |(_,): (f32,)| Ok(String::new()));

    assert_eq!(console.help_for("move").as_deref(), Some("Expects Vec3, f32"));
    assert_eq!(console.help_for("JUMP").as_deref(), Some("Jumps"));
    assert_eq!(console.help_for("missing"), None);
}

#[test]
fn bound_variable_get_and_set() {
    let (mut console, lines) = capturing_console();
    let gravity = Arc::new(Mutex::new(Vec3::new(0.0, -9.8, 0.0)));
    let read = Arc::clone(&gravity);
    let write = Arc::clone(&gravity);

    assert!(console.bind_variable(
        "physics.gravity",
        "",
        move || *read.lock().unwrap(),
        move |v| *write.lock().unwrap() = v,
    ));

    console.run("physics.gravity");
    console.run("physics.gravity (0, -1, 0)");

    assert_eq!(
        take(&lines),
        vec![
            "> physics.gravity",
            "=(0, -9.8, 0)",
            "> physics.gravity (0, -1, 0)",
            "=(0, -1, 0)",
        ]
    );
    assert_eq!(*gravity.lock().unwrap(), Vec3::new(0.0, -1.0, 0.0));
}

#[test]
fn binding_errors_use_separate_channel() {
    struct Unsupported;

    let (mut console, lines) = capturing_console();
    let errors: Captured = Arc::default();
    let error_sink = Arc::clone(&errors);
    console.set_binding_error_sink(move |line| error_sink.lock().unwrap().push(line.to_string()));

    assert!(!console.bind_function("bad", "", |(_,): (Unsupported,)| Ok(String::new())));

    assert!(take(&lines).is_empty());
    assert_eq!(
        take(&errors),
        vec!["Cannot bind bad. Type Unsupported is not supported by the type registry"]
    );
    assert_eq!(console.command_count(), 0);
}

#[test]
fn suppressed_binding_errors_are_collected() {
    struct Unsupported;
    struct Unsupported2;

    impl std::fmt::Display for Unsupported2 {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "unsupported")
        }
    }

    let mut console = Console::new();
    console.suppress_binding_errors();

    console.bind_function("a", "", |(_,): (Unsupported,)| Ok(String::new()));
    console.bind_read_only("b", "", || Unsupported2);
    console.bind_function("c", "", |(): ()| Ok(String::new()));

    let errors = console.take_binding_errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].starts_with("Cannot bind a."));
    assert!(errors[1].starts_with("Cannot bind b."));
    assert!(console.take_binding_errors().is_empty());
    assert_eq!(console.command_count(), 1);
}

#[test]
fn complete_lists_namespace_children_sorted() {
    let mut console = Console::new();
    console.register_command("time.scale", "", noop).unwrap();
    console.register_command("time.offset", "", noop).unwrap();

    assert_eq!(console.complete("time."), vec!["time.offset", "time.scale"]);
    assert_eq!(console.complete("TIME"), vec!["time.offset", "time.scale"]);
}

#[test]
fn complete_filters_by_prefix() {
    let mut console = Console::new();
    console.register_command("print.intArg", "", noop).unwrap();
    console.register_command("print.intFloat", "", noop).unwrap();
    console.register_command("print.string", "", noop).unwrap();

    let matches = console.complete("print.INT");

    assert_eq!(matches, vec!["print.intArg", "print.intFloat"]);
    assert_eq!(first_common_prefix_length(&matches, 0), "print.int".len());
}

#[test]
fn complete_on_leaf_returns_itself() {
    let mut console = Console::new();
    console.register_command("time.scale", "", noop).unwrap();
    console.register_command("time.scale.fine", "", noop).unwrap();

    assert_eq!(console.complete("time.scale 2.0"), vec!["time.scale"]);
}

#[test]
fn complete_from_nothing_lists_top_level() {
    let mut console = Console::new();
    console.register_command("quit", "", noop).unwrap();
    console.register_command("time.scale", "", noop).unwrap();

    assert_eq!(console.complete(""), vec!["quit", "time"]);
    assert!(console.complete("zzz").is_empty());
}

mod default_commands {
    use super::*;
    use crate::console::{Command, CommandTree, Invocation, commands::AllCommand};

    fn console_with_defaults() -> (Console, Captured) {
        let (mut console, lines) = capturing_console();
        console.register_default_commands();
        console
            .register_command("time.scale", "Sets the time scale", noop)
            .unwrap();
        console.register_command("time.offset", "", noop).unwrap();
        console.register_command("print.int", "", noop).unwrap();
        (console, lines)
    }

    #[test]
    fn all_lists_commands_with_help() {
        let (console, lines) = console_with_defaults();

        assert!(console.run("all"));

        let output = take(&lines).remove(1);
        assert!(output.contains("time.scale\n  Sets the time scale"));
        assert!(output.contains("\ntime.offset\n"));
        assert!(output.starts_with("all\n  Gathers and shows all commands"));
    }

    #[test]
    fn all_rejects_arguments() {
        let (console, lines) = console_with_defaults();

        console.run("all please");

        assert_eq!(take(&lines)[1], "Param count mismatch. Expected 0 got 1");
    }

    #[test]
    fn find_matches_substrings_case_insensitively() {
        let (console, lines) = console_with_defaults();

        console.run("find SCA");
        console.run("find nothing");

        let lines = take(&lines);
        assert_eq!(lines[1], "time.scale");
        assert_eq!(lines[3], "No matches found.");
    }

    #[test]
    fn find_sorts_results() {
        let (console, lines) = console_with_defaults();

        console.run("find t");

        assert_eq!(take(&lines)[1], "print.int\ntime.offset");
    }

    #[test]
    fn help_lists_top_level_and_describes_commands() {
        let (console, lines) = console_with_defaults();

        console.run("help");
        console.run("help time.scale");
        console.run("help time");
        console.run("help nope");

        let lines = take(&lines);
        assert_eq!(
            lines[1],
            "all\nfind\nhelp\nprint.\ntime.\nType <command> ? for help on a command"
        );
        assert_eq!(lines[3], "Sets the time scale");
        assert_eq!(lines[5], "time.offset\ntime.scale");
        assert_eq!(lines[7], "Console cannot find command by name nope");
    }

    #[test]
    fn all_on_empty_tree_says_so() {
        let tree = CommandTree::new();
        let invocation = Invocation {
            path: "all",
            params: "",
            tree: &tree,
        };

        assert_eq!(
            AllCommand.execute(&invocation),
            Ok("No commands registered.".to_string())
        );
    }
}

#[test]
fn visit_can_skip_namespaces() {
    let mut console = Console::new();
    console.register_command("time.scale", "", noop).unwrap();
    console.register_command("time.offset", "", noop).unwrap();
    console.register_command("quit", "", noop).unwrap();

    let mut seen = Vec::new();
    console.visit(|node| {
        if !node.is_root() {
            seen.push(node.full_path());
        }
        node.local_name() != "time"
    });
    seen.sort();

    assert_eq!(seen, vec!["quit", "time"]);
}

#[test]
fn cleared_sink_receives_nothing() {
    let (mut console, lines) = capturing_console();
    console.register_command("ping", "", |_: &str| Ok("pong".to_string())).unwrap();

    console.clear_output_sink();

    assert!(console.run("ping"));
    assert!(take(&lines).is_empty());
}
