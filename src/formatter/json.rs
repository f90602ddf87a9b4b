//! Default JSON formatter

use super::JsonFormatter;
use crate::core::{platform, LoggerError};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// Pretty-prints JSON objects and arrays with a 4-space indent.
///
/// Blank input yields an empty string. Input that is not a JSON object or
/// array, or fails to parse, is returned unchanged. Both cases are reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultJsonFormatter;

impl DefaultJsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn pretty(value: &serde_json::Value) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        value.serialize(&mut ser)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl JsonFormatter for DefaultJsonFormatter {
    fn format(&self, json: &str) -> String {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            platform::warn("Empty JSON content");
            return String::new();
        }

        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            platform::warn("JSON should start with { or [");
            return json.to_string();
        }

        match serde_json::from_str::<serde_json::Value>(trimmed).and_then(|v| Self::pretty(&v)) {
            Ok(formatted) => formatted,
            Err(e) => {
                platform::warn(LoggerError::formatter("JSON", e.to_string()).to_string());
                json.to_string()
            }
        }
    }
}
