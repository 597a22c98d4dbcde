//! Drawing directives and the renderers that execute them.
//!
//! The menu core never formats escape codes itself. It speaks to a
//! [`Renderer`] in terms of cursor positions, colours and text; the
//! implementations decide what that means:
//! - [`ansi::AnsiRenderer`]: crossterm commands on any `Write`
//! - [`buffer::BufferRenderer`]: cells in a ratatui `Buffer`
//! - [`Recorder`]: an in-memory screen for tests and inspection

pub mod ansi;
pub mod buffer;

use serde::Deserialize;

// ============================================================================
// STYLE PRIMITIVES
// ============================================================================

/// The eight standard terminal colours plus the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    #[default]
    Normal,
}

/// Text attribute. `Reset` clears attributes and colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAttr {
    #[default]
    Reset,
    Bold,
    Underline,
    Blink,
    Reverse,
    Invisible,
}

// ============================================================================
// RENDERER
// ============================================================================

/// A terminal-like drawing surface.
///
/// Rows and columns are zero-based. Directives are fire-and-forget;
/// implementations that can fail keep the error for their own `flush`.
pub trait Renderer {
    fn move_to(&mut self, row: u16, col: u16);
    fn clear_screen(&mut self);
    fn clear_line(&mut self);
    fn set_foreground(&mut self, color: Color);
    fn set_background(&mut self, color: Color);
    fn set_attr(&mut self, attr: TextAttr);
    fn write(&mut self, text: &str);

    /// Push buffered output to the screen, e.g. before blocking on input.
    fn flush(&mut self) {}
}

/// One recorded renderer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    MoveTo { row: u16, col: u16 },
    ClearScreen,
    ClearLine,
    Foreground(Color),
    Background(Color),
    Attr(TextAttr),
    Write(String),
    Flush,
}

// ============================================================================
// RECORDER
// ============================================================================

/// Renderer that records every directive and keeps a plain-text screen.
///
/// `\n` in written text moves to column 0 of the next row, like a
/// terminal in cooked mode.
#[derive(Debug, Default)]
pub struct Recorder {
    directives: Vec<Directive>,
    screen: Vec<Vec<char>>,
    row: usize,
    col: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Text of one screen row, trailing blanks trimmed.
    pub fn row(&self, row: usize) -> String {
        self.screen
            .get(row)
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// The whole screen, one line per row.
    pub fn screen(&self) -> String {
        (0..self.screen.len())
            .map(|r| self.row(r))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every written string concatenated, in call order.
    pub fn written(&self) -> String {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::Write(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn put(&mut self, ch: char) {
        if self.screen.len() <= self.row {
            self.screen.resize(self.row + 1, Vec::new());
        }
        let line = &mut self.screen[self.row];
        if line.len() <= self.col {
            line.resize(self.col + 1, ' ');
        }
        line[self.col] = ch;
        self.col += 1;
    }
}

impl Renderer for Recorder {
    fn move_to(&mut self, row: u16, col: u16) {
        self.directives.push(Directive::MoveTo { row, col });
        self.row = row as usize;
        self.col = col as usize;
    }

    fn clear_screen(&mut self) {
        self.directives.push(Directive::ClearScreen);
        self.screen.clear();
    }

    fn clear_line(&mut self) {
        self.directives.push(Directive::ClearLine);
        if let Some(line) = self.screen.get_mut(self.row) {
            line.clear();
        }
    }

    fn set_foreground(&mut self, color: Color) {
        self.directives.push(Directive::Foreground(color));
    }

    fn set_background(&mut self, color: Color) {
        self.directives.push(Directive::Background(color));
    }

    fn set_attr(&mut self, attr: TextAttr) {
        self.directives.push(Directive::Attr(attr));
    }

    fn write(&mut self, text: &str) {
        self.directives.push(Directive::Write(text.to_string()));
        for ch in text.chars() {
            if ch == '\n' {
                self.row += 1;
                self.col = 0;
            } else {
                self.put(ch);
            }
        }
    }

    fn flush(&mut self) {
        self.directives.push(Directive::Flush);
    }
}

// ============================================================================
// TESTS
// ============================================================================
