//! Platform details and the internal failure reporter
//!
//! Failures inside the pipeline are written straight to stderr. This never
//! goes back through a logger, so a broken printer cannot recurse.

/// Line separator used to join segments and terminate file lines.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

pub(crate) fn warn(message: impl AsRef<str>) {
    eprintln!("[ZLOG WARNING] {}", message.as_ref());
}

pub(crate) fn error(message: impl AsRef<str>) {
    eprintln!("[ZLOG ERROR] {}", message.as_ref());
}

/// Extract a readable message from a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
