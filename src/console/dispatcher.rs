use std::{
    any::Any,
    fmt::Display,
    mem,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use tracing::{debug, instrument, trace, warn};

use super::{
    Binder, BoundCommand, Command, CommandResult, ConsoleError, Invocation, ParamList,
    commands,
    complete::complete,
    convert::TypeRegistry,
    parser::{ECHO_PREFIX, HELP_TOKEN, parse_line},
    tree::{CommandLeaf, CommandTree, NodeRef},
};

/// Callback receiving every line the console produces.
pub type OutputSink = Box<dyn Fn(&str) + Send + Sync>;

/// Where registration-time binding failures are reported.
enum BindingErrors {
    Trace,
    Sink(OutputSink),
    Collect(Vec<String>),
}

/// The command dispatcher.
///
/// Owns the command tree and the type registry shared with bound commands.
/// Everything the console says, echoed input, command output and errors
/// alike, goes to a single output sink set by the host. Failures while
/// binding typed functions go to a separate channel so bulk registration can
/// be silenced without hiding runtime errors.
///
/// # Example
///
/// ```
/// use devconsole::console::Console;
///
/// let mut console = Console::new();
/// console
///     .register_command("time.scale", "Sets the time scale", |params: &str| {
///         Ok(format!("scale is now {params}"))
///     })
///     .unwrap();
///
/// assert!(console.run("Time.Scale 2"));
/// assert_eq!(console.complete("time."), vec!["time.scale"]);
/// ```
pub struct Console {
    tree: CommandTree,
    registry: Arc<TypeRegistry>,
    output: Option<OutputSink>,
    binding_errors: BindingErrors,
}

impl Console {
    /// Creates an empty console with the built-in type converters.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(TypeRegistry::new()))
    }

    /// Creates an empty console sharing an existing type registry.
    pub fn with_registry(registry: Arc<TypeRegistry>) -> Self {
        Self {
            tree: CommandTree::new(),
            registry,
            output: None,
            binding_errors: BindingErrors::Trace,
        }
    }

    /// The type registry used when binding typed functions and variables.
    pub fn registry(&self) -> &Arc<TypeRegistry> {
        &self.registry
    }

    /// Read-only access to the command tree.
    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    /// Routes all console output to `sink`, replacing any previous sink.
    pub fn set_output_sink<F>(&mut self, sink: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.output = Some(Box::new(sink));
    }

    /// Removes the output sink. Output is then only traced.
    pub fn clear_output_sink(&mut self) {
        self.output = None;
    }

    /// Routes binding failures to `sink` instead of the log.
    pub fn set_binding_error_sink<F>(&mut self, sink: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.binding_errors = BindingErrors::Sink(Box::new(sink));
    }

    /// Starts collecting binding failures quietly, e.g. during a bulk
    /// registration sweep. Collect them with [`Console::take_binding_errors`].
    pub fn suppress_binding_errors(&mut self) {
        if !matches!(self.binding_errors, BindingErrors::Collect(_)) {
            self.binding_errors = BindingErrors::Collect(Vec::new());
        }
    }

    /// Returns the binding failures collected since
    /// [`Console::suppress_binding_errors`] and goes back to logging them.
    pub fn take_binding_errors(&mut self) -> Vec<String> {
        match mem::replace(&mut self.binding_errors, BindingErrors::Trace) {
            BindingErrors::Collect(errors) => errors,
            other => {
                self.binding_errors = other;
                Vec::new()
            }
        }
    }

    /// Writes one line to the output sink.
    pub fn log(&self, line: &str) {
        match &self.output {
            Some(sink) => sink(line),
            None => debug!(target: "devconsole::output", "{line}"),
        }
    }

    /// Writes user input to the output sink, prefixed with `"> "`.
    pub fn echo(&self, line: &str) {
        self.log(&format!("{ECHO_PREFIX}{line}"));
    }

    /// Registers a closure taking the raw parameter string.
    ///
    /// Registering a path that already holds a command silently replaces it.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::EmptyPath` if `path` is blank.
    pub fn register_command<F>(
        &mut self,
        path: &str,
        help: &str,
        callback: F,
    ) -> Result<(), ConsoleError>
    where
        F: Fn(&str) -> CommandResult + Send + Sync + 'static,
    {
        self.register(path, help, callback)
    }

    /// Registers any [`Command`] implementation at `path`.
    ///
    /// Only the command token of `path` is used; anything after whitespace
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::EmptyPath` if `path` is blank.
    #[instrument(skip(self, help, command))]
    pub fn register<C>(&mut self, path: &str, help: &str, command: C) -> Result<(), ConsoleError>
    where
        C: Command + 'static,
    {
        if path.trim().is_empty() {
            return Err(ConsoleError::EmptyPath);
        }

        let segments = parse_line(path).segments;
        let local_name = segments.last().cloned().unwrap_or_default();
        let leaf = CommandLeaf::new(local_name, help, Box::new(command));

        if self.tree.add(&segments, leaf) {
            debug!("Registered command");
        }

        Ok(())
    }

    /// Removes the command or namespace at `path`, with everything below it.
    ///
    /// Returns whether anything was removed; removing a missing path is not
    /// an error.
    ///
    /// # Errors
    ///
    /// Returns `ConsoleError::EmptyPath` if `path` is blank.
    #[instrument(skip(self))]
    pub fn deregister_command(&mut self, path: &str) -> Result<bool, ConsoleError> {
        if path.trim().is_empty() {
            return Err(ConsoleError::EmptyPath);
        }

        let removed = self.tree.remove(&parse_line(path).segments);
        debug!(removed, "Deregistered command");

        Ok(removed)
    }

    /// Binds a typed function and registers it at `path`.
    ///
    /// An empty `help` is replaced by the generated parameter signature.
    /// Binding failures go to the binding error channel and return `false`.
    pub fn bind_function<P, F>(&mut self, path: &str, help: &str, function: F) -> bool
    where
        P: ParamList,
        F: Fn(P) -> CommandResult + Send + Sync + 'static,
    {
        let bound = Binder::function(&self.registry, function);
        self.register_bound(path, help, bound)
    }

    /// Binds a getter/setter pair and registers it at `path`.
    ///
    /// Running the command with no parameters reads the value; with
    /// parameters it sets it. Binding failures go to the binding error
    /// channel and return `false`.
    pub fn bind_variable<T, G, S>(&mut self, path: &str, help: &str, getter: G, setter: S) -> bool
    where
        T: Any + Display,
        G: Fn() -> T + Send + Sync + 'static,
        S: Fn(T) + Send + Sync + 'static,
    {
        let bound = Binder::variable(&self.registry, path, getter, setter);
        self.register_bound(path, help, bound)
    }

    /// Binds a getter as a read-only variable and registers it at `path`.
    pub fn bind_read_only<T, G>(&mut self, path: &str, help: &str, getter: G) -> bool
    where
        T: Any + Display,
        G: Fn() -> T + Send + Sync + 'static,
    {
        let bound = Binder::read_only(&self.registry, path, getter);
        self.register_bound(path, help, bound)
    }

    fn register_bound(
        &mut self,
        path: &str,
        help: &str,
        bound: Result<BoundCommand, ConsoleError>,
    ) -> bool {
        let outcome = bound.and_then(|command| {
            let help = if help.is_empty() {
                command.signature().to_string()
            } else {
                help.to_string()
            };
            self.register(path, &help, command)
        });

        match outcome {
            Ok(()) => true,
            Err(e) => {
                self.report_binding_error(&format!("Cannot bind {path}. {e}"));
                false
            }
        }
    }

    fn report_binding_error(&mut self, message: &str) {
        match &mut self.binding_errors {
            BindingErrors::Trace => warn!("{message}"),
            BindingErrors::Sink(sink) => sink(message),
            BindingErrors::Collect(errors) => errors.push(message.to_string()),
        }
    }

    /// Registers the built-in `all`, `find` and `help` commands.
    pub fn register_default_commands(&mut self) {
        commands::register_commands(self);
    }

    /// Parses and runs one input line.
    ///
    /// The line is echoed first. A parameter string of exactly `?` shows the
    /// command's help instead of running it. Lookup failures are written to
    /// the output sink. Returns `true` only if a command callback was
    /// invoked; what the callback returned, even an error, does not change
    /// that.
    #[instrument(skip(self))]
    pub fn run(&self, line: &str) -> bool {
        if line.trim().is_empty() {
            trace!("Ignoring empty input");
            return false;
        }

        self.echo(line);

        let parsed = parse_line(line);
        let found = self.tree.find_closest_match(&parsed.segments);

        if !found.exact {
            self.log(&ConsoleError::PathNotFound { path: parsed.path() }.to_string());
            return false;
        }

        let Some(leaf) = found.node.leaf() else {
            self.log(&ConsoleError::NotRunnable { path: parsed.path() }.to_string());
            return false;
        };

        if parsed.params == HELP_TOKEN {
            self.log(&help_text(found.node, leaf));
            return false;
        }

        self.invoke(found.node, leaf, &parsed.params);
        true
    }

    fn invoke(&self, node: NodeRef<'_>, leaf: &CommandLeaf, params: &str) {
        let path = node.full_path();
        let invocation = Invocation {
            path: &path,
            params,
            tree: &self.tree,
        };

        debug!(%path, params, "Running command");

        match panic::catch_unwind(AssertUnwindSafe(|| leaf.command().execute(&invocation))) {
            Ok(Ok(output)) => {
                if !output.is_empty() {
                    self.log(&output);
                }
            }
            Ok(Err(e)) => {
                debug!(%path, error = %e, "Command reported failure");
                self.log(&e.to_string());
            }
            Err(payload) => {
                let reason = panic_reason(payload.as_ref());
                warn!(%path, %reason, "Command panicked");
                self.log(&format!("{path} failed: {reason}"));
            }
        }
    }

    /// Help text of the command at `path`, if one is registered there.
    pub fn help_for(&self, path: &str) -> Option<String> {
        let found = self.tree.find_closest_match(&parse_line(path).segments);
        if !found.exact {
            return None;
        }

        found.node.leaf().map(|leaf| help_text(found.node, leaf))
    }

    /// Sorted completions for a partially typed line.
    pub fn complete(&self, partial: &str) -> Vec<String> {
        complete(&self.tree, partial)
    }

    /// Depth-first pre-order walk over the command tree.
    ///
    /// `visitor` returns whether to descend into the node's children.
    pub fn visit<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(NodeRef<'a>) -> bool,
    {
        self.tree.visit(visitor);
    }

    /// Number of runnable commands.
    pub fn command_count(&self) -> usize {
        let mut count = 0;
        self.tree.visit(|node| {
            if node.is_runnable() {
                count += 1;
            }
            true
        });
        count
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// The leaf's help text, or a note that it has none.
pub(crate) fn help_text(node: NodeRef<'_>, leaf: &CommandLeaf) -> String {
    if leaf.help().is_empty() {
        format!("{} has no help text", node.full_path())
    } else {
        leaf.help().to_string()
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "command panicked".to_string()
    }
}
