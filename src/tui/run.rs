//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the navigation
//! layers (state, update, view) to the real terminal via crossterm and
//! ratatui. Single-threaded: one key is read, dispatched and drawn
//! before the next is read.

use std::io;

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::{debug, info};

use crate::config::LoadedMenu;
use crate::error::MenuError;
use crate::prompt::LineReader;
use crate::render::ansi::AnsiRenderer;

use super::state::{Action, App, Effect, Transition};
use super::update::update;
use super::view::render;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char(' ') => Some(Action::Activate),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Run the menu until the user quits.
///
/// Returns the final app state so the caller can report variable values.
/// The terminal is restored on every exit path.
pub fn run(loaded: LoadedMenu) -> Result<App, MenuError> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let mut app = App::new(loaded);
    info!(layouts = app.menu.len(), "menu started");

    let result = event_loop(&mut terminal, &mut app);
    restore_terminal()?;
    result?;

    info!("menu closed");
    Ok(app)
}

fn event_loop(terminal: &mut Term, app: &mut App) -> Result<(), MenuError> {
    loop {
        terminal.draw(|frame| render(&*app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        let key = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => key,
            _ => continue, // releases, mouse, resize
        };
        let Some(action) = map_key(key) else {
            continue;
        };
        debug!(?action, "key");

        match update(&mut app.navigator, &action, &app.menu) {
            Transition::Continue => {}
            Transition::Quit => app.should_quit = true,
            Transition::Effect(effect) => handle_effect(effect, app, terminal)?,
        }
    }
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Run the selected label's action.
fn handle_effect(effect: Effect, app: &mut App, terminal: &mut Term) -> Result<(), MenuError> {
    match effect {
        Effect::Toggle => {
            // Toggling never draws or reads
            let mut renderer = AnsiRenderer::new(io::sink());
            let mut input = LineReader::new(io::empty());
            app.navigator.enter(&app.menu, &mut renderer, &mut input)?;
        }
        Effect::Prompt => {
            // The prompt wants a cooked terminal: echo and line editing
            disable_raw_mode()?;
            io::stdout().execute(Show)?;
            let mut renderer = AnsiRenderer::stdout();
            let mut input = LineReader::stdin();
            let entered = app.navigator.enter(&app.menu, &mut renderer, &mut input);
            renderer.finish()?;
            enable_raw_mode()?;
            terminal.clear()?;
            entered?;
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
