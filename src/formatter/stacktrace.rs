//! Call stack capture and the default stack trace formatter

use super::StackTraceFormatter;
use crate::core::platform::LINE_SEPARATOR;
use std::backtrace::Backtrace;
use std::fmt;

/// Symbols of this crate start with this prefix.
const INTERNAL_PREFIX: &str = concat!(env!("CARGO_CRATE_NAME"), "::");

/// Frames of the capture machinery itself.
const CAPTURE_PREFIXES: &[&str] = &["std::backtrace", "backtrace_rs::", "std::backtrace_rs::"];

/// One resolved frame of the call stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl StackFrame {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            file: None,
            line: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, file: impl Into<String>, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    fn symbol(&self) -> &str {
        self.function.trim_start_matches('<')
    }
}

impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{}({}:{})", self.function, file, line),
            (Some(file), None) => write!(f, "{}({})", self.function, file),
            _ => f.write_str(&self.function),
        }
    }
}

/// Capture the caller's stack, dropping frames of the logging pipeline and of
/// any wrapper whose symbols start with `origin`, then crop to `depth` frames.
pub fn capture(origin: Option<&str>, depth: usize) -> Vec<StackFrame> {
    if depth == 0 {
        return Vec::new();
    }
    let frames = parse_backtrace(&Backtrace::force_capture().to_string());
    caller_frames(frames, origin, depth)
}

/// Select the frames that belong to the caller of the pipeline.
///
/// Everything up to and including the last internal frame is dropped, which
/// also removes std frames sandwiched between internal ones. When no internal
/// frame is found (inlining in release builds), only the capture machinery is
/// dropped.
pub fn caller_frames(frames: Vec<StackFrame>, origin: Option<&str>, depth: usize) -> Vec<StackFrame> {
    let is_internal = |frame: &StackFrame| {
        let symbol = frame.symbol();
        symbol.starts_with(INTERNAL_PREFIX)
            || origin.map_or(false, |o| !o.is_empty() && symbol.starts_with(o))
    };

    let start = match frames.iter().rposition(|f| is_internal(f)) {
        Some(last) => last + 1,
        None => frames
            .iter()
            .take_while(|f| CAPTURE_PREFIXES.iter().any(|p| f.symbol().starts_with(p)))
            .count(),
    };

    frames.into_iter().skip(start).take(depth).collect()
}

/// Parse the textual form of a `std::backtrace::Backtrace`.
///
/// Frame lines look like `  3: crate::module::function`, optionally followed
/// by `        at src/module.rs:42:9`.
fn parse_backtrace(text: &str) -> Vec<StackFrame> {
    let mut frames: Vec<StackFrame> = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.file.is_none() {
                    let (file, line_no) = split_location(location);
                    frame.file = Some(file);
                    frame.line = line_no;
                }
            }
            continue;
        }

        if let Some((index, symbol)) = line.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(StackFrame::new(symbol.trim()));
            }
        }
    }
    frames
}

/// Split `path:line:column` into the path and the line number.
fn split_location(location: &str) -> (String, Option<u32>) {
    let mut parts = location.rsplitn(3, ':');
    let last = parts.next();
    let middle = parts.next();
    let rest = parts.next();
    match (rest, middle, last) {
        (Some(path), Some(line), Some(_column)) => match line.parse() {
            Ok(n) => (path.to_string(), Some(n)),
            Err(_) => (location.to_string(), None),
        },
        (None, Some(path), Some(line)) => match line.parse() {
            Ok(n) => (path.to_string(), Some(n)),
            Err(_) => (location.to_string(), None),
        },
        _ => (location.to_string(), None),
    }
}

/// Renders a single frame as `\t─ frame`; several frames as a tree of
/// `\t├ frame` lines closed by `\t└ frame`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStackTraceFormatter;

impl StackTraceFormatter for DefaultStackTraceFormatter {
    fn format(&self, frames: &[StackFrame]) -> String {
        match frames {
            [] => String::new(),
            [only] => format!("\t─ {}", only),
            _ => {
                let last = frames.len() - 1;
                frames
                    .iter()
                    .enumerate()
                    .map(|(i, frame)| {
                        if i == last {
                            format!("\t└ {}", frame)
                        } else {
                            format!("\t├ {}", frame)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(LINE_SEPARATOR)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames(symbols: &[&str]) -> Vec<StackFrame> {
        symbols.iter().map(|s| StackFrame::new(*s)).collect()
    }

    #[test]
    fn test_parse_backtrace_text() {
        let text = "   0: std::backtrace::Backtrace::force_capture\n             at /rustc/library/std/src/backtrace.rs:312:13\n   1: app::handler\n             at ./src/main.rs:10:5\n   2: main\n";
        let parsed = parse_backtrace(text);
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[1].function, "app::handler");
        assert_eq!(parsed[1].file.as_deref(), Some("./src/main.rs"));
        assert_eq!(parsed[1].line, Some(10));
        assert_eq!(parsed[2].file, None);
    }

    #[test]
    fn test_internal_frames_are_skipped() {
        let all = frames(&[
            "std::backtrace::Backtrace::force_capture",
            &format!("{}formatter::stacktrace::capture", INTERNAL_PREFIX),
            "std::panic::catch_unwind",
            &format!("<{}core::logger::Logger>::info", INTERNAL_PREFIX),
            "app::handler",
            "app::main",
            "std::rt::lang_start",
        ]);
        let picked = caller_frames(all, None, 2);
        assert_eq!(picked, frames(&["app::handler", "app::main"]));
    }

    #[test]
    fn test_origin_frames_are_skipped() {
        let all = frames(&[
            &format!("{}core::logger::Logger::log", INTERNAL_PREFIX),
            "app::log_wrapper::info",
            "app::handler",
        ]);
        let picked = caller_frames(all, Some("app::log_wrapper"), 5);
        assert_eq!(picked, frames(&["app::handler"]));
    }

    #[test]
    fn test_capture_depth_zero_is_empty() {
        assert!(capture(None, 0).is_empty());
    }

    #[test]
    fn test_single_frame_glyph() {
        let out = DefaultStackTraceFormatter.format(&frames(&["app::main"]));
        assert_eq!(out, "\t─ app::main");
    }

    #[test]
    fn test_multi_frame_glyphs() {
        let out = DefaultStackTraceFormatter.format(&[
            StackFrame::new("app::a").with_location("src/a.rs", 3),
            StackFrame::new("app::b"),
            StackFrame::new("app::c"),
        ]);
        let lines: Vec<&str> = out.split(LINE_SEPARATOR).collect();
        assert_eq!(
            lines,
            vec!["\t├ app::a(src/a.rs:3)", "\t├ app::b", "\t└ app::c"]
        );
    }
}
