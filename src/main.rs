//! devconsole host - an interactive line-based front end for the console engine.
//!
//! Reads commands from stdin, one per line. A line ending in a tab, or
//! starting with `complete `, asks for completions instead of running.

use std::{
    collections::VecDeque,
    error::Error,
    io::{self, BufRead, Write},
    path::PathBuf,
    process,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use clap::Parser;
use devconsole::{
    config::{Config, ConfigPaths, ConsoleSettings},
    console::{
        Console, Vec3, first_common_prefix_length,
        formatting::{format_completions, format_error, format_header, style_output_line},
    },
    tracing_config,
};
use tracing::{Level, debug, info, span};

const COMPLETE_PREFIX: &str = "complete ";

/// Interactive developer console
#[derive(Parser, Debug)]
#[command(name = "devconsole", version, about)]
struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run a single line and exit
    #[arg(short, long, value_name = "LINE")]
    command: Option<String>,

    /// Print completions for a partial line and exit
    #[arg(long, value_name = "PARTIAL")]
    complete: Option<String>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Write logs to the state directory instead of stderr
    #[arg(long)]
    log_file: bool,
}

/// Values behind the demo commands.
struct DemoState {
    time_scale: Arc<Mutex<f32>>,
    time_offset: Arc<Mutex<f32>>,
    gravity: Arc<Mutex<Vec3>>,
}

impl Default for DemoState {
    fn default() -> Self {
        Self {
            time_scale: Arc::new(Mutex::new(1.0)),
            time_offset: Arc::new(Mutex::new(0.0)),
            gravity: Arc::new(Mutex::new(Vec3::new(0.0, -9.81, 0.0))),
        }
    }
}

type History = Arc<Mutex<VecDeque<String>>>;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.print_schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let level = config.general.log_level;
    let _guard = if cli.log_file {
        Some(tracing_config::init_with_file(level, &ConfigPaths::log_dir()?)?)
    } else {
        tracing_config::init(level)?;
        None
    };

    let _span = span!(Level::INFO, "devconsole").entered();

    let quit = Arc::new(AtomicBool::new(false));
    let history: History = Arc::new(Mutex::new(VecDeque::new()));
    let console = build_console(&config.console, &quit, &history);

    if let Some(partial) = cli.complete {
        print_completions(&console, &partial, config.console.color);
        return Ok(());
    }

    if let Some(line) = cli.command {
        if !console.run(&line) {
            process::exit(1);
        }
        return Ok(());
    }

    info!(commands = console.command_count(), "Starting interactive console");
    repl(&console, &config.console, &quit, &history)?;

    Ok(())
}

fn build_console(settings: &ConsoleSettings, quit: &Arc<AtomicBool>, history: &History) -> Console {
    let mut console = Console::new();

    let color = settings.color;
    console.set_output_sink(move |line| {
        if color {
            println!("{}", style_output_line(line));
        } else {
            println!("{line}");
        }
    });

    if settings.default_commands {
        console.register_default_commands();
    }

    register_host_commands(&mut console, quit, history);
    register_demo_commands(&mut console, &DemoState::default());

    console
}

fn register_host_commands(console: &mut Console, quit: &Arc<AtomicBool>, history: &History) {
    let quit = Arc::clone(quit);
    let quit_result = console.register_command("quit", "Leaves the console", move |_: &str| {
        quit.store(true, Ordering::Relaxed);
        Ok(String::new())
    });

    let clear_result = console.register_command("clear", "Clears the console output", |_: &str| {
        Ok(String::new())
    });

    let history = Arc::clone(history);
    let history_result =
        console.register_command("history", "Lists previously entered lines", move |_: &str| {
            let history = history.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(history
                .iter()
                .enumerate()
                .map(|(index, line)| format!("{:>3}  {line}", index + 1))
                .collect::<Vec<_>>()
                .join("\n"))
        });

    for result in [quit_result, clear_result, history_result] {
        if let Err(e) = result {
            eprintln!("{}", format_error(&e.to_string()));
        }
    }
}

fn register_demo_commands(console: &mut Console, state: &DemoState) {
    let (get_scale, set_scale) = (Arc::clone(&state.time_scale), Arc::clone(&state.time_scale));
    console.bind_variable(
        "time.scale",
        "Speed multiplier applied to simulated time",
        move || *get_scale.lock().unwrap_or_else(PoisonError::into_inner),
        move |value: f32| *set_scale.lock().unwrap_or_else(PoisonError::into_inner) = value,
    );

    let (get_offset, set_offset) = (Arc::clone(&state.time_offset), Arc::clone(&state.time_offset));
    console.bind_variable(
        "time.offset",
        "",
        move || *get_offset.lock().unwrap_or_else(PoisonError::into_inner),
        move |value: f32| *set_offset.lock().unwrap_or_else(PoisonError::into_inner) = value,
    );

    let (get_gravity, set_gravity) = (Arc::clone(&state.gravity), Arc::clone(&state.gravity));
    console.bind_variable(
        "physics.gravity",
        "Gravity vector, e.g. physics.gravity (0, -9.81, 0)",
        move || *get_gravity.lock().unwrap_or_else(PoisonError::into_inner),
        move |value: Vec3| *set_gravity.lock().unwrap_or_else(PoisonError::into_inner) = value,
    );

    console.bind_function("print.int", "", |(value,): (i32,)| Ok(value.to_string()));
    console.bind_function("print.intFloat", "", |(whole, fraction): (i32, f32)| {
        Ok(format!("{whole} {fraction}"))
    });
}

fn repl(
    console: &Console,
    settings: &ConsoleSettings,
    quit: &AtomicBool,
    history: &History,
) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    if settings.color {
        println!("{}", format_header("devconsole"));
    }
    println!("Type help for a list of commands, quit to leave.");

    loop {
        print!("{}", settings.prompt);
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            debug!("Input closed");
            break;
        }

        let line = line.trim_end_matches(['\n', '\r']);

        if let Some(partial) = line
            .strip_suffix('\t')
            .or_else(|| line.strip_prefix(COMPLETE_PREFIX))
        {
            print_completions(console, partial, settings.color);
            continue;
        }

        remember(history, line, settings.history_size);
        console.run(line);

        if quit.load(Ordering::Relaxed) {
            break;
        }
    }

    Ok(())
}

fn remember(history: &History, line: &str, capacity: usize) {
    if line.trim().is_empty() {
        return;
    }

    let mut history = history.lock().unwrap_or_else(PoisonError::into_inner);
    history.push_back(line.to_string());
    while history.len() > capacity {
        history.pop_front();
    }
}

fn print_completions(console: &Console, partial: &str, color: bool) {
    let matches = console.complete(partial);

    match matches.as_slice() {
        [] => println!("No completions for '{partial}'"),
        [single] => println!("{single}"),
        [first, ..] => {
            println!("{}", format_completions(&matches, color));
            let shared = first_common_prefix_length(&matches, 0);
            let prefix: String = first.chars().take(shared).collect();
            if !prefix.is_empty() {
                println!("{prefix}");
            }
        }
    }
}
