//! Logging macros for ergonomic log message formatting.
//!
//! These macros format with `format!` syntax, checked at compile time, and
//! skip formatting entirely when the level is filtered out.
//!
//! # Examples
//!
//! ```
//! use zlog::prelude::*;
//! use zlog::info;
//!
//! let logger = Logger::builder().printer(ConsolePrinter::new()).build();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! // Through the process-wide default logger
//! zlog::init_default();
//! info!(zlog::logger(), "User {} performed action: {}", 42, "login");
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use zlog::prelude::*;
/// # let logger = Logger::default();
/// use zlog::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::new(9), "Custom level: {}", 9);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.is_loggable(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log a verbose-level message.
///
/// ```
/// # use zlog::prelude::*;
/// # let logger = Logger::default();
/// use zlog::verbose;
/// verbose!(logger, "Entering function: calculate()");
/// ```
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::VERBOSE, $($arg)+)
    };
}

/// Log a debug-level message.
///
/// ```
/// # use zlog::prelude::*;
/// # let logger = Logger::default();
/// use zlog::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use zlog::prelude::*;
/// # let logger = Logger::default();
/// use zlog::warn;
/// warn!(logger, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}
