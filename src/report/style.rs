use crate::config::ColorMode;
use owo_colors::Style;
use std::io::{self, IsTerminal, Write};

/// Which styles to use for terminal output, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Palette {
    enabled: bool,
}

impl Palette {
    /// Decide whether to color stdout. `Auto` colors only a terminal.
    pub(crate) fn resolve(mode: ColorMode) -> Self {
        let enabled = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stdout().is_terminal(),
        };
        Self { enabled }
    }

    pub(crate) const fn enabled(self) -> bool {
        self.enabled
    }

    fn pick(self, style: Style) -> Option<Style> {
        self.enabled.then_some(style)
    }

    pub(crate) fn title(self) -> Option<Style> {
        self.pick(Style::new().bold().cyan())
    }

    pub(crate) fn warning(self) -> Option<Style> {
        self.pick(Style::new().yellow())
    }

    pub(crate) fn muted(self) -> Option<Style> {
        self.pick(Style::new().bright_black())
    }
}

/// Writer that applies a style for as long as it lives.
///
/// The style is written when the guard is created and reset when it drops,
/// including when a write through it fails part way.
pub(crate) struct StyleGuard<'a, W: Write> {
    out: &'a mut W,
    style: Option<Style>,
}

impl<'a, W: Write> StyleGuard<'a, W> {
    pub(crate) fn apply(out: &'a mut W, style: Option<Style>) -> io::Result<Self> {
        if let Some(style) = &style {
            write!(out, "{}", style.prefix_formatter())?;
        }
        Ok(Self { out, style })
    }
}

impl<W: Write> Write for StyleGuard<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for StyleGuard<'_, W> {
    fn drop(&mut self) {
        if let Some(style) = &self.style {
            // Drop can't report errors; a broken pipe here has nothing left to restore.
            let _ = write!(self.out, "{}", style.suffix_formatter());
        }
    }
}

/// Write `text` in `style`, then a newline in the default style.
pub(crate) fn styled_line<W: Write>(out: &mut W, style: Option<Style>, text: &str) -> io::Result<()> {
    {
        let mut guard = StyleGuard::apply(out, style)?;
        guard.write_all(text.as_bytes())?;
    }
    writeln!(out)
}
