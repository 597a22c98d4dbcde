//! Line-oriented prompts: the one place the menu blocks on user input.
//!
//! A prompt clears the screen, prints a header, then reads lines until
//! one parses. An empty line abandons the prompt.

use std::io::{self, BufRead};
use std::str::FromStr;

use crate::render::Renderer;
use crate::theme;

/// Source of whole lines of user input.
pub trait LineInput {
    /// Read one line without its terminator.
    ///
    /// End of input is `ErrorKind::UnexpectedEof`.
    fn read_line(&mut self) -> io::Result<String>;
}

/// [`LineInput`] over any buffered reader.
pub struct LineReader<R> {
    inner: R,
}

impl LineReader<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: BufRead> LineInput for LineReader<R> {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for a value",
            ));
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }
}

/// Show `header` and read lines until `parse` accepts one.
///
/// Rejected lines have their error message written below the input and
/// the prompt repeats. Returns `None` when the user enters an empty line.
pub fn ask<T>(
    renderer: &mut dyn Renderer,
    input: &mut dyn LineInput,
    header: &[String],
    mut parse: impl FnMut(&str) -> Result<T, String>,
) -> io::Result<Option<T>> {
    renderer.move_to(0, 0);
    renderer.clear_screen();
    for line in header {
        renderer.write(line);
        renderer.write("\n");
    }

    loop {
        renderer.write(theme::PROMPT);
        renderer.flush();
        let line = input.read_line()?;
        if line.trim().is_empty() {
            renderer.clear_screen();
            return Ok(None);
        }
        match parse(&line) {
            Ok(value) => {
                renderer.clear_screen();
                return Ok(Some(value));
            }
            Err(message) => {
                renderer.write(&message);
                renderer.write("\n");
            }
        }
    }
}

/// Ask for a single value of any parseable type.
pub fn popup<T: FromStr>(
    message: &str,
    renderer: &mut dyn Renderer,
    input: &mut dyn LineInput,
) -> io::Result<Option<T>> {
    ask(renderer, input, &[message.to_string()], |line| {
        let line = line.trim();
        line.parse()
            .map_err(|_| format!("Could not understand {:?}, try again", line))
    })
}

// ============================================================================
// TESTS
// ============================================================================
