use std::io::{IsTerminal, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use super::RequestResult;

/// Prints one glyph per completed request, green check for success and red
/// cross for failure, in completion order. Color only when stdout is a
/// terminal and `--no-color` is unset.
pub(super) struct ProgressPrinter {
    enabled: bool,
    use_color: bool,
    printed: bool,
}

impl ProgressPrinter {
    pub(super) fn new(enabled: bool, no_color: bool) -> Self {
        Self {
            enabled,
            use_color: !no_color && std::io::stdout().is_terminal(),
            printed: false,
        }
    }

    pub(super) fn record(&mut self, result: &RequestResult) {
        if !self.enabled {
            return;
        }
        let (glyph, color) = if result.is_success() {
            ("✓", Color::Green)
        } else {
            ("✗", Color::Red)
        };
        if print_glyph(glyph, color, self.use_color).is_err() {
            self.enabled = false;
            return;
        }
        self.printed = true;
    }

    pub(super) fn finish(&self) {
        if self.printed {
            println!();
        }
    }
}

fn print_glyph(glyph: &str, color: Color, use_color: bool) -> Result<(), std::io::Error> {
    let mut out = std::io::stdout();
    if use_color {
        queue!(
            out,
            SetForegroundColor(color),
            Print(glyph),
            ResetColor
        )?;
    } else {
        queue!(out, Print(glyph))?;
    }
    out.flush()
}
