//! Default styles and fixed glyphs for menu rendering.
//!
//! Labels fall back to these when a menu file does not override them.
//! Pure data, consumed by `label` and `navigator`.

use ratatui::style::{self, Style};

use crate::label::{LabelStyle, TextStyle};
use crate::render::{Color, TextAttr};

// ============================================================================
// LABEL STYLES
// ============================================================================

/// Unselected label: terminal defaults.
pub const STYLE_NORMAL: TextStyle = TextStyle::new(Color::Normal, Color::Normal, TextAttr::Reset);

/// Selected label: underlined.
pub const STYLE_SELECTED: TextStyle =
    TextStyle::new(Color::Normal, Color::Normal, TextAttr::Underline);

pub const LABEL_STYLE: LabelStyle = LabelStyle {
    normal: STYLE_NORMAL,
    selected: STYLE_SELECTED,
};

/// Layout title.
pub const STYLE_TITLE: TextStyle = TextStyle::new(Color::Normal, Color::Normal, TextAttr::Bold);

/// Key help line at the bottom of the TUI.
pub const STYLE_HELP: Style = Style::new().fg(style::Color::DarkGray);

// ============================================================================
// GLYPHS
// ============================================================================

/// Prefix of the selected row.
pub const MARKER: &str = " > ";

/// Prefix of every other row; same width as `MARKER`.
pub const NO_MARKER: &str = "   ";

/// Rule drawn between the label list and the detail line.
pub const DIVIDER: &str = "-------------------------------------------";

/// Left edge of the debug log column.
pub const LOG_GUTTER: &str = "| ";

/// Between a label's detail text and its bound value.
pub const VALUE_SEPARATOR: &str = " : ";

/// Input prompt.
pub const PROMPT: &str = ">>> ";

// ============================================================================
// TESTS
// ============================================================================
