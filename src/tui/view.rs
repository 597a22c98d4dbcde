//! Rendering: App state onto a ratatui frame.
//!
//! The menu draws itself through [`BufferRenderer`] straight into the
//! frame buffer; ratatui only contributes the help line and the diffing.

use ratatui::layout::{Constraint, Layout};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::render::buffer::BufferRenderer;
use crate::theme;

use super::state::App;

const HELP: &str = "[w/k/↑] up  [s/j/↓] down  [e/Enter] select  [q] quit";

/// Render the menu and the help line.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::vertical([
        Constraint::Min(0),    // menu
        Constraint::Length(1), // help
    ])
    .split(frame.area());

    let mut renderer = BufferRenderer::new(frame.buffer_mut());
    app.navigator.print(&app.menu, &mut renderer);

    frame.render_widget(render_help(), chunks[1]);
}

fn render_help() -> Paragraph<'static> {
    Paragraph::new(Span::styled(HELP, theme::STYLE_HELP))
}

// ============================================================================
// TESTS
// ============================================================================
