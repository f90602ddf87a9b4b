//! The unit of work flowing through interceptors and printers

use super::log_level::LogLevel;
use serde::{Deserialize, Serialize};

/// A fully composed log: level, tag and message body.
///
/// Interceptors and a printer's `on_print` step may rewrite any field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogItem {
    pub level: LogLevel,
    pub tag: String,
    pub message: String,
}

impl LogItem {
    pub fn new(level: LogLevel, tag: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            tag: tag.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}
