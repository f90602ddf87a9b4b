//! Printer trait for log output destinations

use super::{error::Result, log_item::LogItem, log_level::LogLevel};

/// A sink that emits final log items.
///
/// Printers are shared between loggers and called from many threads at once,
/// so every method takes `&self`.
pub trait Printer: Send + Sync {
    /// Private pre-processing applied to this printer's own copy of the item.
    fn on_print(&self, item: LogItem) -> LogItem {
        item
    }

    fn print(&self, level: LogLevel, tag: &str, message: &str) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}
