//! State transitions: (Navigator, Action) → Transition.
//!
//! Movement and link-following happen here, directly on the navigator.
//! Anything that edits a variable is handed back as an [`Effect`] so the
//! effects layer can prepare the terminal first. No I/O in this module.

use crate::cell::Kind;
use crate::layout::Menu;
use crate::navigator::Navigator;

use super::state::{Action, Effect, Transition};

/// Apply `action` to the navigation state.
pub fn update(navigator: &mut Navigator, action: &Action, menu: &Menu) -> Transition {
    match action {
        Action::MoveUp => {
            navigator.up(menu);
            Transition::Continue
        }
        Action::MoveDown => {
            navigator.down(menu);
            Transition::Continue
        }
        Action::Activate => activate(navigator, menu),
        Action::Quit => Transition::Quit,
    }
}

/// Links win over variables; unbound labels do nothing.
fn activate(navigator: &mut Navigator, menu: &Menu) -> Transition {
    if navigator.follow(menu).is_some() {
        return Transition::Continue;
    }
    let Some(label) = navigator.selected_label(menu) else {
        return Transition::Continue;
    };
    if label.next.is_some() {
        return Transition::Continue;
    }
    match label.variable.kind() {
        Kind::None => Transition::Continue,
        Kind::Bool => Transition::Effect(Effect::Toggle),
        _ => Transition::Effect(Effect::Prompt),
    }
}

// ============================================================================
// TESTS
// ============================================================================
