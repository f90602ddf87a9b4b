//! Console printer implementation

use crate::core::{LogLevel, Printer, Result};
use crate::flattener::{DefaultFlattener, Flattener};
use std::io::Write;
use std::sync::Arc;

#[cfg(feature = "console")]
use colored::Colorize;

/// Writes flattened logs to stdout, and ERROR or above to stderr.
///
/// Runs inline on the caller's thread.
pub struct ConsolePrinter {
    use_colors: bool,
    flattener: Arc<dyn Flattener>,
}

impl ConsolePrinter {
    pub fn new() -> Self {
        Self {
            use_colors: cfg!(feature = "console"),
            flattener: Arc::new(DefaultFlattener),
        }
    }

    /// Colors only take effect with the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the flattener for this printer
    ///
    /// # Example
    ///
    /// ```
    /// use zlog::printers::ConsolePrinter;
    /// use zlog::PatternFlattener;
    ///
    /// let printer = ConsolePrinter::new()
    ///     .with_flattener(PatternFlattener::new("{d %H:%M:%S} {l}/{t}: {m}"));
    /// ```
    #[must_use]
    pub fn with_flattener(mut self, flattener: impl Flattener + 'static) -> Self {
        self.flattener = Arc::new(flattener);
        self
    }

    fn render(&self, level: LogLevel, tag: &str, message: &str) -> String {
        let line = self
            .flattener
            .flatten(chrono::Utc::now().timestamp_millis(), level, tag, message);

        #[cfg(feature = "console")]
        if self.use_colors {
            return line.color(level.color_code()).to_string();
        }

        line
    }
}

impl Default for ConsolePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer for ConsolePrinter {
    fn print(&self, level: LogLevel, tag: &str, message: &str) -> Result<()> {
        let output = self.render(level, tag, message);

        // Route ERROR and above to stderr, others to stdout
        if level >= LogLevel::ERROR {
            let mut err = std::io::stderr().lock();
            writeln!(err, "{}", output)?;
        } else {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", output)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_colors() {
        let printer = ConsolePrinter::new()
            .with_colors(false)
            .with_flattener(|_: i64, level: LogLevel, tag: &str, message: &str| {
                format!("{}/{}: {}", level.short_name(), tag, message)
            });
        assert_eq!(printer.render(LogLevel::INFO, "APP", "hi"), "I/APP: hi");
    }

    #[test]
    fn test_print_both_streams() {
        let printer = ConsolePrinter::new().with_colors(false);
        assert!(printer.print(LogLevel::INFO, "T", "to stdout").is_ok());
        assert!(printer.print(LogLevel::ERROR, "T", "to stderr").is_ok());
        assert!(printer.flush().is_ok());
        assert_eq!(printer.name(), "console");
    }
}
