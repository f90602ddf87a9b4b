//! Default throwable formatter

use super::ThrowableFormatter;
use crate::core::platform::LINE_SEPARATOR;
use std::error::Error;

/// Renders an error's display text followed by one `Caused by: ` line per
/// entry of its `source()` chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThrowableFormatter;

impl ThrowableFormatter for DefaultThrowableFormatter {
    fn format(&self, error: &(dyn Error + 'static)) -> String {
        let mut out = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            out.push_str(LINE_SEPARATOR);
            out.push_str("Caused by: ");
            out.push_str(&cause.to_string());
            source = cause.source();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    #[test]
    fn test_single_error() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(DefaultThrowableFormatter.format(&err), "missing");
    }

    #[test]
    fn test_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("opening log file", "cannot open", io);
        let out = DefaultThrowableFormatter.format(&err);
        let lines: Vec<&str> = out.split(LINE_SEPARATOR).collect();
        assert_eq!(
            lines,
            vec![
                "IO error while opening log file: cannot open",
                "Caused by: access denied"
            ]
        );
    }
}
