//! Process-wide default logger
//!
//! [`init`] installs the default logger; calling it again replaces the
//! previous one atomically, so concurrent readers see either the old or the
//! new logger, never a mix. The free functions here forward to that logger,
//! and the builder-style ones return a derived [`Logger`] without touching it.
//!
//! Using the facade before [`init`] installs a console logger at level ALL and
//! reports a warning once.

use crate::core::{
    platform, Interceptor, LogConfiguration, LogLevel, Logger, Printer,
};
use crate::formatter::{
    BorderFormatter, JsonFormatter, ObjectFormatter, StackTraceFormatter, ThreadFormatter,
    ThrowableFormatter, XmlFormatter,
};
use crate::printers::ConsolePrinter;
use arc_swap::ArcSwapOption;
use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

static DEFAULT_LOGGER: ArcSwapOption<Logger> = ArcSwapOption::const_empty();
static WARNED_UNINITIALIZED: AtomicBool = AtomicBool::new(false);

/// Install the default logger.
pub fn init(config: LogConfiguration, printers: Vec<Arc<dyn Printer>>) {
    DEFAULT_LOGGER.store(Some(Arc::new(Logger::new(config, printers))));
}

/// Install the default logger with the default configuration.
pub fn init_with_printers(printers: Vec<Arc<dyn Printer>>) {
    init(LogConfiguration::default(), printers);
}

/// Install a console logger at level ALL.
pub fn init_default() {
    init_with_printers(vec![Arc::new(ConsolePrinter::new())]);
}

/// Install an already built logger.
pub fn set_logger(logger: Logger) {
    DEFAULT_LOGGER.store(Some(Arc::new(logger)));
}

pub fn is_initialized() -> bool {
    DEFAULT_LOGGER.load().is_some()
}

/// The current default logger.
pub fn logger() -> Arc<Logger> {
    if let Some(logger) = DEFAULT_LOGGER.load_full() {
        return logger;
    }

    if !WARNED_UNINITIALIZED.swap(true, Ordering::Relaxed) {
        platform::warn("Logger used before init(), installing a default console logger");
    }
    let fallback = Arc::new(Logger::new(
        LogConfiguration::default(),
        vec![Arc::new(ConsolePrinter::new())],
    ));
    // Another thread may have initialized in the meantime; keep its logger
    DEFAULT_LOGGER.rcu(|current| {
        let current: &Option<Arc<Logger>> = current;
        current.clone().or_else(|| Some(Arc::clone(&fallback)))
    });
    DEFAULT_LOGGER.load_full().unwrap_or(fallback)
}

// Derived loggers

pub fn tag(tag: impl Into<String>) -> Logger {
    logger().tag(tag)
}

pub fn log_level(level: LogLevel) -> Logger {
    logger().log_level(level)
}

pub fn enable_thread_info() -> Logger {
    logger().enable_thread_info()
}

pub fn disable_thread_info() -> Logger {
    logger().disable_thread_info()
}

pub fn enable_stack_trace(depth: usize) -> Logger {
    logger().enable_stack_trace(depth)
}

pub fn enable_stack_trace_with_origin(origin: impl Into<String>, depth: usize) -> Logger {
    logger().enable_stack_trace_with_origin(origin, depth)
}

pub fn disable_stack_trace() -> Logger {
    logger().disable_stack_trace()
}

pub fn enable_border() -> Logger {
    logger().enable_border()
}

pub fn disable_border() -> Logger {
    logger().disable_border()
}

pub fn add_interceptor(interceptor: impl Interceptor + 'static) -> Logger {
    logger().add_interceptor(interceptor)
}

pub fn json_formatter(formatter: impl JsonFormatter + 'static) -> Logger {
    logger().json_formatter(formatter)
}

pub fn xml_formatter(formatter: impl XmlFormatter + 'static) -> Logger {
    logger().xml_formatter(formatter)
}

pub fn throwable_formatter(formatter: impl ThrowableFormatter + 'static) -> Logger {
    logger().throwable_formatter(formatter)
}

pub fn thread_formatter(formatter: impl ThreadFormatter + 'static) -> Logger {
    logger().thread_formatter(formatter)
}

pub fn stack_trace_formatter(formatter: impl StackTraceFormatter + 'static) -> Logger {
    logger().stack_trace_formatter(formatter)
}

pub fn border_formatter(formatter: impl BorderFormatter + 'static) -> Logger {
    logger().border_formatter(formatter)
}

pub fn add_object_formatter<T, F>(formatter: F) -> Logger
where
    T: Any,
    F: ObjectFormatter<T> + 'static,
{
    logger().add_object_formatter::<T, F>(formatter)
}

pub fn declare_supertype<C: Any, P: Any>(upcast: fn(&C) -> &P) -> Logger {
    logger().declare_supertype(upcast)
}

pub fn printers(printers: Vec<Arc<dyn Printer>>) -> Logger {
    logger().printers(printers)
}

// Logging through the default logger

pub fn log(level: LogLevel, message: impl Into<String>) {
    logger().log(level, message);
}

pub fn verbose(message: impl Into<String>) {
    logger().verbose(message);
}

pub fn debug(message: impl Into<String>) {
    logger().debug(message);
}

pub fn info(message: impl Into<String>) {
    logger().info(message);
}

pub fn warn(message: impl Into<String>) {
    logger().warn(message);
}

pub fn error(message: impl Into<String>) {
    logger().error(message);
}

pub fn log_args(level: LogLevel, format: &str, args: &[&dyn Display]) {
    logger().log_args(level, format, args);
}

pub fn log_object<T: Any + Debug>(level: LogLevel, value: &T) {
    logger().log_object(level, value);
}

pub fn log_throwable(level: LogLevel, message: impl Into<String>, error: &(dyn Error + 'static)) {
    logger().log_throwable(level, message, error);
}

pub fn json(json: &str) {
    logger().json(json);
}

pub fn xml(xml: &str) {
    logger().xml(xml);
}

/// Flush every printer of the default logger.
pub fn flush() {
    logger().flush();
}
