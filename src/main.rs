//! termenu CLI
//!
//! Navigate a menu of settings in the terminal and edit their values.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use termenu::config::{default_menu_path, load_menu, LoadedMenu};
use termenu::demo::demo_menu;
use termenu::report::{format_values, OutputFormat};
use termenu::tui;

#[derive(Parser)]
#[command(name = "termenu")]
#[command(about = "Navigate a terminal menu and edit the values it binds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Menu definition file (default: config dir, else the built-in demo)
    #[arg(long, global = true)]
    menu: Option<PathBuf>,

    /// Write tracing output to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Lines kept in the on-screen debug log
    #[arg(long)]
    debug_log_length: Option<usize>,

    /// Print variable values after quitting
    #[arg(long, value_enum)]
    print_values: Option<OutputFormatArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a menu file and summarize it (no terminal UI)
    Check {
        /// Menu definition file
        path: PathBuf,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = init_logging(cli.log_file.as_deref(), cli.verbose).and_then(|()| {
        match cli.command {
            Some(Commands::Check { path }) => cmd_check(&path),
            None => cmd_run(
                cli.menu,
                cli.debug_log_length,
                cli.print_values.map(Into::into),
            ),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Send tracing output to `log_file`, if given.
///
/// Never logs to the terminal: it belongs to the menu while running.
fn init_logging(log_file: Option<&Path>, verbose: bool) -> Result<(), String> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .map_err(|e| format!("Cannot open log file {}: {}", path.display(), e))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e.to_string())
}

// ============================================================================
// MENU RESOLUTION
// ============================================================================

/// Use the given file, else the default file if present, else the demo.
fn resolve_menu(path: Option<PathBuf>) -> Result<LoadedMenu, String> {
    let path = match path {
        Some(p) => p,
        None => {
            let default = default_menu_path();
            if !default.exists() {
                tracing::info!("no menu file, using built-in demo");
                return demo_menu().map_err(|e| e.to_string());
            }
            default
        }
    };
    tracing::info!(path = %path.display(), "loading menu");
    load_menu(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_run(
    path: Option<PathBuf>,
    debug_log_length: Option<usize>,
    print_values: Option<OutputFormat>,
) -> Result<(), String> {
    let mut loaded = resolve_menu(path)?;
    if let Some(length) = debug_log_length {
        loaded.debug_log_length = length;
    }

    let app = tui::run::run(loaded).map_err(|e| e.to_string())?;

    if let Some(format) = print_values {
        let report = format_values(&app.variables, format).map_err(|e| e.to_string())?;
        print!("{}", report);
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<(), String> {
    let loaded = load_menu(path).map_err(|e| format!("{}: {}", path.display(), e))?;

    println!("Menu: {}", path.display());
    println!("Layouts: {}", loaded.menu.len());
    for id in loaded.menu.ids() {
        let Some(layout) = loaded.menu.layout(id) else {
            continue;
        };
        let marker = if id == loaded.start { " (start)" } else { "" };
        let title = match layout.title() {
            "" => "<untitled>",
            title => title,
        };
        println!("  {} {}: {} labels{}", id, title, layout.size(), marker);
    }
    println!("Variables: {}", loaded.variables.len());
    print!(
        "{}",
        format_values(&loaded.variables, OutputFormat::Human).map_err(|e| e.to_string())?
    );
    Ok(())
}
