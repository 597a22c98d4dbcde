//! Menu entries.
//!
//! A [`Label`] is what the user sees on one row: a short title, a longer
//! detail line revealed on selection, and optionally an action. The action
//! is either a link to another Layout (`next`) or an edit of a bound
//! variable, followed by an optional callback.

use std::fmt;
use std::rc::Rc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::cell::{Kind, VariableCell};
use crate::error::MenuError;
use crate::layout::LayoutId;
use crate::prompt::{self, LineInput};
use crate::render::{Color, Renderer, TextAttr};
use crate::theme;

/// Zero-argument hook run after a label's variable changes.
pub type Callback = Rc<dyn Fn()>;

// ============================================================================
// STYLE
// ============================================================================

/// Colour pair and attribute for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub fg: Color,
    pub bg: Color,
    pub attr: TextAttr,
}

impl TextStyle {
    pub const fn new(fg: Color, bg: Color, attr: TextAttr) -> Self {
        Self { fg, bg, attr }
    }

    /// Write `text` in this style, then return the renderer to defaults.
    ///
    /// The attribute goes first: `TextAttr::Reset` would otherwise wipe
    /// the colours just set.
    pub fn paint(&self, renderer: &mut dyn Renderer, text: &str) {
        renderer.set_attr(self.attr);
        renderer.set_foreground(self.fg);
        renderer.set_background(self.bg);
        renderer.write(text);
        renderer.set_attr(TextAttr::Reset);
        renderer.set_foreground(Color::Normal);
        renderer.set_background(Color::Normal);
    }
}

/// Styles for a label's two visual states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelStyle {
    pub normal: TextStyle,
    pub selected: TextStyle,
}

impl Default for LabelStyle {
    fn default() -> Self {
        theme::LABEL_STYLE
    }
}

// ============================================================================
// SELECTION OUTCOME
// ============================================================================

/// What [`Label::select`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No variable bound.
    Nothing,
    /// A boolean was flipped to this value.
    Toggled(bool),
    /// A value was entered; carries the new formatted value.
    Edited(String),
    /// The prompt was left empty; value unchanged.
    Cancelled,
}

// ============================================================================
// LABEL
// ============================================================================

#[derive(Clone, Default)]
pub struct Label {
    pub title: String,
    pub text: String,
    pub style: LabelStyle,
    pub variable: VariableCell,
    pub callback: Option<Callback>,
    pub next: Option<LayoutId>,
}

impl Label {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_next(mut self, next: LayoutId) -> Self {
        self.next = Some(next);
        self
    }

    pub fn with_variable(mut self, variable: VariableCell) -> Self {
        self.variable = variable;
        self
    }

    pub fn with_callback(mut self, callback: impl Fn() + 'static) -> Self {
        self.callback = Some(Rc::new(callback));
        self
    }

    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn set_next(&mut self, next: Option<LayoutId>) {
        self.next = next;
    }

    /// Replace the binding. The previous cell is dropped; its storage is not.
    pub fn set_variable(&mut self, variable: VariableCell) {
        self.variable = variable;
    }

    pub fn set_callback(&mut self, callback: Option<Callback>) {
        self.callback = callback;
    }

    /// Draw the title in its normal style at the current cursor.
    pub fn print(&self, renderer: &mut dyn Renderer) {
        self.style.normal.paint(renderer, &self.title);
    }

    /// Draw the title highlighted, and the detail line on `detail_row`.
    pub fn print_selected(&self, renderer: &mut dyn Renderer, detail_row: u16) {
        self.style.selected.paint(renderer, &self.title);
        renderer.move_to(detail_row, 0);
        renderer.write(&self.text);
        if self.variable.is_bound() {
            renderer.write(theme::VALUE_SEPARATOR);
            renderer.write(&self.variable.format());
        }
    }

    /// Act on this label's variable: toggle a bool, prompt for anything else.
    ///
    /// `context` is shown in the prompt header (normally the layout title).
    /// The callback runs only when the value actually changed.
    pub fn select(
        &self,
        context: &str,
        renderer: &mut dyn Renderer,
        input: &mut dyn LineInput,
    ) -> Result<Selection, MenuError> {
        let outcome = match self.variable.kind() {
            Kind::None => return Ok(Selection::Nothing),
            Kind::Bool => Selection::Toggled(self.variable.toggle()?),
            kind => {
                let mut header = vec![self.text.clone()];
                if !context.is_empty() {
                    header.push(context.to_string());
                }
                header.push(format!("Enter a value for {} ({})", self.title, kind));
                header.push(format!("Current value : {}", self.variable.format()));

                let edited = prompt::ask(renderer, input, &header, |line| {
                    self.variable.parse_into(line).map_err(|err| {
                        warn!(label = %self.title, %err, "rejected input");
                        err.to_string()
                    })
                })?;
                match edited {
                    Some(()) => Selection::Edited(self.variable.format()),
                    None => return Ok(Selection::Cancelled),
                }
            }
        };

        debug!(label = %self.title, ?outcome, "label selected");
        if let Some(callback) = &self.callback {
            callback();
        }
        Ok(outcome)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Label")
            .field("title", &self.title)
            .field("text", &self.text)
            .field("style", &self.style)
            .field("variable", &self.variable)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("next", &self.next)
            .finish()
    }
}

// ============================================================================
// TESTS
// ============================================================================
