//! Renderer over a ratatui `Buffer`.
//!
//! Used inside `Terminal::draw` so menu output goes through ratatui's
//! diffing instead of raw escape codes. Text past the buffer edge is
//! clipped.

use ratatui::buffer::Buffer;
use ratatui::style::{self, Modifier, Style};

use super::{Color, Renderer, TextAttr};

pub struct BufferRenderer<'a> {
    buf: &'a mut Buffer,
    row: u16,
    col: u16,
    style: Style,
}

impl<'a> BufferRenderer<'a> {
    pub fn new(buf: &'a mut Buffer) -> Self {
        Self {
            buf,
            row: 0,
            col: 0,
            style: Style::reset(),
        }
    }
}

/// Standard ANSI colours, matching what `AnsiRenderer` emits.
fn to_ratatui(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::Red,
        Color::Green => style::Color::Green,
        Color::Yellow => style::Color::Yellow,
        Color::Blue => style::Color::Blue,
        Color::Magenta => style::Color::Magenta,
        Color::Cyan => style::Color::Cyan,
        Color::White => style::Color::Gray,
        Color::Normal => style::Color::Reset,
    }
}

fn to_modifier(attr: TextAttr) -> Modifier {
    match attr {
        TextAttr::Reset => Modifier::empty(),
        TextAttr::Bold => Modifier::BOLD,
        TextAttr::Underline => Modifier::UNDERLINED,
        TextAttr::Blink => Modifier::SLOW_BLINK,
        TextAttr::Reverse => Modifier::REVERSED,
        TextAttr::Invisible => Modifier::HIDDEN,
    }
}

impl Renderer for BufferRenderer<'_> {
    fn move_to(&mut self, row: u16, col: u16) {
        self.row = row;
        self.col = col;
    }

    fn clear_screen(&mut self) {
        self.buf.reset();
    }

    fn clear_line(&mut self) {
        let area = self.buf.area;
        if self.row >= area.height {
            return;
        }
        let y = area.y + self.row;
        for x in area.x..area.x + area.width {
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.reset();
            }
        }
    }

    fn set_foreground(&mut self, color: Color) {
        self.style = self.style.fg(to_ratatui(color));
    }

    fn set_background(&mut self, color: Color) {
        self.style = self.style.bg(to_ratatui(color));
    }

    fn set_attr(&mut self, attr: TextAttr) {
        self.style = match attr {
            // SGR 0 semantics: attributes and colours both go
            TextAttr::Reset => Style::reset(),
            other => self.style.add_modifier(to_modifier(other)),
        };
    }

    fn write(&mut self, text: &str) {
        let area = self.buf.area;
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.row = self.row.saturating_add(1);
                self.col = 0;
            }
            if self.row >= area.height || self.col >= area.width {
                continue;
            }
            let max_width = (area.width - self.col) as usize;
            let (end_x, _) = self.buf.set_stringn(
                area.x + self.col,
                area.y + self.row,
                line,
                max_width,
                self.style,
            );
            self.col = end_x - area.x;
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
