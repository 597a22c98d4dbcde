//! TUI state algebra: the app model, user actions and transitions.
//!
//! The navigation state itself lives in [`Navigator`]; this module wraps
//! it with the menu it navigates and the vocabulary the event loop speaks.

use std::collections::BTreeMap;

use crate::cell::VariableCell;
use crate::config::LoadedMenu;
use crate::layout::Menu;
use crate::navigator::Navigator;

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// The layout graph. Labels may change between inputs.
    pub menu: Menu,

    /// Current layout and selection.
    pub navigator: Navigator,

    /// Named storage the menu binds to, for reporting after exit.
    pub variables: BTreeMap<String, VariableCell>,

    /// Set to true when the app should exit on the next tick.
    pub should_quit: bool,
}

impl App {
    pub fn new(loaded: LoadedMenu) -> Self {
        let navigator = Navigator::new(loaded.start)
            .with_debug_log(loaded.debug_log_length, loaded.debug_log_column);
        App {
            menu: loaded.menu,
            navigator,
            variables: loaded.variables,
            should_quit: false,
        }
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    /// Enter the selected label: follow its link or edit its variable.
    Activate,
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// What the event loop must do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Navigation state is already updated; redraw.
    Continue,
    Quit,
    /// Run the selected label's action, which may need the terminal.
    Effect(Effect),
}

/// Side effect requested by the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Flip a boolean in place. No terminal interaction.
    Toggle,
    /// Prompt for a new value on a cooked terminal.
    Prompt,
}

// ============================================================================
// TESTS
// ============================================================================
