//! Default border formatter: a box drawn around the segments of a log

use super::BorderFormatter;
use crate::core::platform::LINE_SEPARATOR;

const VERTICAL_BORDER_CHAR: char = '║';
const BORDER_WIDTH: usize = 99;

/// Draws a double-line box with a thin divider between segments.
///
/// ```text
/// ╔═══════════
/// ║Thread: main
/// ╟───────────
/// ║message
/// ╚═══════════
/// ```
#[derive(Debug, Clone)]
pub struct DefaultBorderFormatter {
    top: String,
    divider: String,
    bottom: String,
}

impl DefaultBorderFormatter {
    pub fn new() -> Self {
        Self {
            top: format!("╔{}", "═".repeat(BORDER_WIDTH)),
            divider: format!("╟{}", "─".repeat(BORDER_WIDTH)),
            bottom: format!("╚{}", "═".repeat(BORDER_WIDTH)),
        }
    }

    fn append_segment(out: &mut Vec<String>, segment: &str) {
        if segment.is_empty() {
            out.push(VERTICAL_BORDER_CHAR.to_string());
            return;
        }
        for line in segment.lines() {
            out.push(format!("{}{}", VERTICAL_BORDER_CHAR, line));
        }
    }
}

impl Default for DefaultBorderFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl BorderFormatter for DefaultBorderFormatter {
    fn format(&self, segments: &[String]) -> String {
        if segments.is_empty() {
            return String::new();
        }

        let mut lines = vec![self.top.clone()];
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                lines.push(self.divider.clone());
            }
            Self::append_segment(&mut lines, segment);
        }
        lines.push(self.bottom.clone());
        lines.join(LINE_SEPARATOR)
    }
}
