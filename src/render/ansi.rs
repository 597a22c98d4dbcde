//! ANSI renderer: directives become crossterm commands on a writer.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::{Color, Renderer, TextAttr};

/// Queues crossterm commands on `out`.
///
/// The first write error is kept and returned by [`finish`](Self::finish);
/// later directives are dropped once the writer has failed.
pub struct AnsiRenderer<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl AnsiRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> AnsiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush queued output, surfacing any earlier write error.
    pub fn finish(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }
}

/// Standard (non-bright) ANSI colours, 30–37 / 40–47.
fn to_crossterm(color: Color) -> style::Color {
    match color {
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::Normal => style::Color::Reset,
    }
}

fn to_attribute(attr: TextAttr) -> Attribute {
    match attr {
        TextAttr::Reset => Attribute::Reset,
        TextAttr::Bold => Attribute::Bold,
        TextAttr::Underline => Attribute::Underlined,
        TextAttr::Blink => Attribute::SlowBlink,
        TextAttr::Reverse => Attribute::Reverse,
        TextAttr::Invisible => Attribute::Hidden,
    }
}

impl<W: Write> Renderer for AnsiRenderer<W> {
    fn move_to(&mut self, row: u16, col: u16) {
        if self.error.is_none() {
            let result = queue!(self.out, MoveTo(col, row));
            self.record(result);
        }
    }

    fn clear_screen(&mut self) {
        if self.error.is_none() {
            let result = queue!(self.out, Clear(ClearType::All));
            self.record(result);
        }
    }

    fn clear_line(&mut self) {
        if self.error.is_none() {
            let result = queue!(self.out, Clear(ClearType::CurrentLine));
            self.record(result);
        }
    }

    fn set_foreground(&mut self, color: Color) {
        if self.error.is_none() {
            let result = queue!(self.out, SetForegroundColor(to_crossterm(color)));
            self.record(result);
        }
    }

    fn set_background(&mut self, color: Color) {
        if self.error.is_none() {
            let result = queue!(self.out, SetBackgroundColor(to_crossterm(color)));
            self.record(result);
        }
    }

    fn set_attr(&mut self, attr: TextAttr) {
        if self.error.is_none() {
            let result = queue!(self.out, SetAttribute(to_attribute(attr)));
            self.record(result);
        }
    }

    fn write(&mut self, text: &str) {
        if self.error.is_none() {
            let result = queue!(self.out, Print(text));
            self.record(result);
        }
    }

    fn flush(&mut self) {
        if self.error.is_none() {
            let result = self.out.flush();
            self.record(result);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn output(f: impl FnOnce(&mut AnsiRenderer<Vec<u8>>)) -> String {
        let mut renderer = AnsiRenderer::new(Vec::new());
        f(&mut renderer);
        renderer.finish().unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn move_to_is_one_based_row_then_column() {
        let out = output(|r| r.move_to(2, 5));
        assert_eq!(out, "\x1b[3;6H");
    }

    #[test]
    fn clear_screen_emits_erase_display() {
        let out = output(|r| r.clear_screen());
        assert_eq!(out, "\x1b[2J");
    }

    #[test]
    fn text_is_written_verbatim() {
        let out = output(|r| {
            r.set_attr(TextAttr::Bold);
            r.write("Voltage");
        });
        assert!(out.ends_with("Voltage"));
        assert!(out.starts_with("\x1b["));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_write_error_is_reported_on_flush() {
        let mut renderer = AnsiRenderer::new(Broken);
        renderer.write("x");
        renderer.write("y");
        let err = renderer.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(renderer.finish().is_ok());
    }
}
