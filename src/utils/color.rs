//! ANSI coloring helpers.

use std::io::{self, Write};

use termcolor::{Buffer, ColorSpec, WriteColor};

pub use termcolor::Color;

/// Wraps `text` in ANSI escapes for the given foreground color.
///
/// Falls back to the plain text if the color buffer cannot be written.
pub fn paint(text: &str, color: Color) -> String {
    let mut buffer = Buffer::ansi();
    match write_colored(&mut buffer, text, color) {
        Ok(()) => String::from_utf8(buffer.into_inner()).unwrap_or_else(|_| text.to_string()),
        Err(_) => text.to_string(),
    }
}

fn write_colored(buffer: &mut Buffer, text: &str, color: Color) -> io::Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
    buffer.write_all(text.as_bytes())?;
    buffer.reset()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static ANSI_ESCAPE: std::sync::LazyLock<regex::Regex> =
    std::sync::LazyLock::new(|| regex::Regex::new(r"\x1b\[[0-9;]*[A-Za-z]").unwrap());

/// Removes ANSI SGR escape sequences, so tests can compare painted output.
#[cfg(test)]
pub(crate) fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
