//! Main logger implementation
//!
//! A [`Logger`] pairs an immutable [`LogConfiguration`] with an ordered set of
//! printers. Every call runs the same pipeline on the caller's thread:
//! level filter, message composition, interceptor chain, printer fan-out.
//! Nothing in the pipeline is shared mutable state, so concurrent calls do not
//! contend on any lock here.

use super::{
    configuration::{LogConfiguration, LogConfigurationBuilder},
    interceptor::{self, Interceptor},
    log_item::LogItem,
    log_level::LogLevel,
    message, platform,
    platform::LINE_SEPARATOR,
    printer::Printer,
    printer_set::PrinterSet,
};
use crate::formatter::{
    stacktrace, BorderFormatter, JsonFormatter, ObjectFormatter, StackTraceFormatter,
    ThreadFormatter, ThrowableFormatter, XmlFormatter,
};
use std::any::Any;
use std::error::Error;
use std::fmt::{Debug, Display};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// A cheap, immutable handle over a configuration and its printers.
///
/// Methods such as [`tag`](Logger::tag) or [`enable_border`](Logger::enable_border)
/// return a new derived logger and leave `self` untouched.
#[derive(Clone, Debug)]
pub struct Logger {
    config: Arc<LogConfiguration>,
    printers: PrinterSet,
}

impl Logger {
    #[must_use]
    pub fn new(config: LogConfiguration, printers: Vec<Arc<dyn Printer>>) -> Self {
        Self {
            config: Arc::new(config),
            printers: PrinterSet::new(printers),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn configuration(&self) -> &LogConfiguration {
        &self.config
    }

    pub fn printer_set(&self) -> &PrinterSet {
        &self.printers
    }

    fn derive(&self, f: impl FnOnce(LogConfigurationBuilder) -> LogConfigurationBuilder) -> Logger {
        Logger {
            config: Arc::new(f(self.config.to_builder()).build()),
            printers: self.printers.clone(),
        }
    }

    // Derived loggers

    #[must_use]
    pub fn tag(&self, tag: impl Into<String>) -> Logger {
        self.derive(|b| b.tag(tag))
    }

    #[must_use]
    pub fn log_level(&self, level: LogLevel) -> Logger {
        self.derive(|b| b.log_level(level))
    }

    #[must_use]
    pub fn enable_thread_info(&self) -> Logger {
        self.derive(|b| b.enable_thread_info())
    }

    #[must_use]
    pub fn disable_thread_info(&self) -> Logger {
        self.derive(|b| b.disable_thread_info())
    }

    #[must_use]
    pub fn enable_stack_trace(&self, depth: usize) -> Logger {
        self.derive(|b| b.enable_stack_trace(depth))
    }

    #[must_use]
    pub fn enable_stack_trace_with_origin(&self, origin: impl Into<String>, depth: usize) -> Logger {
        self.derive(|b| b.enable_stack_trace_with_origin(origin, depth))
    }

    #[must_use]
    pub fn disable_stack_trace(&self) -> Logger {
        self.derive(|b| b.disable_stack_trace())
    }

    #[must_use]
    pub fn enable_border(&self) -> Logger {
        self.derive(|b| b.enable_border())
    }

    #[must_use]
    pub fn disable_border(&self) -> Logger {
        self.derive(|b| b.disable_border())
    }

    #[must_use]
    pub fn json_formatter(&self, formatter: impl JsonFormatter + 'static) -> Logger {
        self.derive(|b| b.json_formatter(formatter))
    }

    #[must_use]
    pub fn xml_formatter(&self, formatter: impl XmlFormatter + 'static) -> Logger {
        self.derive(|b| b.xml_formatter(formatter))
    }

    #[must_use]
    pub fn throwable_formatter(&self, formatter: impl ThrowableFormatter + 'static) -> Logger {
        self.derive(|b| b.throwable_formatter(formatter))
    }

    #[must_use]
    pub fn thread_formatter(&self, formatter: impl ThreadFormatter + 'static) -> Logger {
        self.derive(|b| b.thread_formatter(formatter))
    }

    #[must_use]
    pub fn stack_trace_formatter(&self, formatter: impl StackTraceFormatter + 'static) -> Logger {
        self.derive(|b| b.stack_trace_formatter(formatter))
    }

    #[must_use]
    pub fn border_formatter(&self, formatter: impl BorderFormatter + 'static) -> Logger {
        self.derive(|b| b.border_formatter(formatter))
    }

    #[must_use]
    pub fn add_object_formatter<T, F>(&self, formatter: F) -> Logger
    where
        T: Any,
        F: ObjectFormatter<T> + 'static,
    {
        self.derive(|b| b.add_object_formatter::<T, F>(formatter))
    }

    #[must_use]
    pub fn declare_supertype<C: Any, P: Any>(&self, upcast: fn(&C) -> &P) -> Logger {
        self.derive(|b| b.declare_supertype(upcast))
    }

    #[must_use]
    pub fn add_interceptor(&self, interceptor: impl Interceptor + 'static) -> Logger {
        self.derive(|b| b.add_interceptor(interceptor))
    }

    /// Replace the printers of the derived logger.
    #[must_use]
    pub fn printers(&self, printers: Vec<Arc<dyn Printer>>) -> Logger {
        Logger {
            config: Arc::clone(&self.config),
            printers: PrinterSet::new(printers),
        }
    }

    // Logging

    #[inline]
    pub fn is_loggable(&self, level: LogLevel) -> bool {
        self.config.is_loggable(level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.is_loggable(level) {
            return;
        }
        self.print(level, message.into(), None);
    }

    pub fn verbose(&self, message: impl Into<String>) {
        self.log(LogLevel::VERBOSE, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::DEBUG, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::INFO, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::WARN, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::ERROR, message);
    }

    /// Log a runtime format string, substituting `args` into `{}` placeholders.
    ///
    /// A placeholder/argument mismatch is logged as a diagnostic message
    /// instead of failing.
    pub fn log_args(&self, level: LogLevel, format: &str, args: &[&dyn Display]) {
        if !self.is_loggable(level) {
            return;
        }
        self.print(level, message::format_message(format, args), None);
    }

    /// Log a value through the object formatter registry.
    pub fn log_object<T: Any + Debug>(&self, level: LogLevel, value: &T) {
        if !self.is_loggable(level) {
            return;
        }
        let rendered = self.config.object_formatters().format(value);
        self.print(level, rendered, None);
    }

    /// Log a message followed by the formatted error. An empty message logs
    /// the error alone.
    pub fn log_throwable(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        error: &(dyn Error + 'static),
    ) {
        if !self.is_loggable(level) {
            return;
        }
        self.print(level, message.into(), Some(error));
    }

    /// Log a JSON string at DEBUG level through the JSON formatter.
    pub fn json(&self, json: &str) {
        if !self.is_loggable(LogLevel::DEBUG) {
            return;
        }
        let formatted = self.config.json_formatter().format(json);
        self.print(LogLevel::DEBUG, formatted, None);
    }

    /// Log an XML string at DEBUG level through the XML formatter.
    pub fn xml(&self, xml: &str) {
        if !self.is_loggable(LogLevel::DEBUG) {
            return;
        }
        let formatted = self.config.xml_formatter().format(xml);
        self.print(LogLevel::DEBUG, formatted, None);
    }

    /// Flush every printer.
    pub fn flush(&self) {
        self.printers.flush();
    }

    fn print(&self, level: LogLevel, message: String, error: Option<&(dyn Error + 'static)>) {
        let composed = catch_unwind(AssertUnwindSafe(|| {
            let item = LogItem::new(level, self.config.tag(), self.compose(message, error));
            interceptor::run_chain(self.config.interceptors(), item)
        }));

        match composed {
            Ok(Some(item)) => self.printers.dispatch(&item),
            Ok(None) => {}
            Err(panic_info) => {
                platform::error(format!(
                    "Formatter or interceptor panicked, log dropped: {}",
                    platform::panic_message(panic_info.as_ref())
                ));
            }
        }
    }

    /// Build the message body: thread, stack trace and message segments,
    /// bordered or joined by line separators.
    fn compose(&self, message: String, error: Option<&(dyn Error + 'static)>) -> String {
        let config = &self.config;

        let body = match error {
            Some(error) => {
                let rendered = config.throwable_formatter().format(error);
                if message.is_empty() {
                    rendered
                } else {
                    format!("{}{}{}", message, LINE_SEPARATOR, rendered)
                }
            }
            None => message,
        };

        let mut segments = Vec::with_capacity(3);
        if config.thread_info_enabled() {
            segments.push(config.thread_formatter().format(&std::thread::current()));
        }
        if config.stack_trace_depth() > 0 {
            let frames =
                stacktrace::capture(config.stack_trace_origin(), config.stack_trace_depth());
            if !frames.is_empty() {
                segments.push(config.stack_trace_formatter().format(&frames));
            }
        }
        segments.push(body);

        if config.border_enabled() {
            config.border_formatter().format(&segments)
        } else if segments.len() == 1 {
            segments.pop().unwrap_or_default()
        } else {
            segments.join(LINE_SEPARATOR)
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for constructing a [`Logger`] with a fluent API
///
/// # Example
/// ```
/// use zlog::prelude::*;
///
/// let logger = Logger::builder()
///     .configuration(
///         LogConfiguration::builder()
///             .log_level(LogLevel::DEBUG)
///             .tag("APP")
///             .build(),
///     )
///     .printer(ConsolePrinter::new())
///     .build();
/// logger.info("ready");
/// ```
#[derive(Default)]
pub struct LoggerBuilder {
    config: LogConfiguration,
    printers: Vec<Arc<dyn Printer>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn configuration(mut self, config: LogConfiguration) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config = self.config.to_builder().log_level(level).build();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config = self.config.to_builder().tag(tag).build();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn printer<P: Printer + 'static>(mut self, printer: P) -> Self {
        self.printers.push(Arc::new(printer));
        self
    }

    /// Add a printer that is shared with other loggers.
    #[must_use = "builder methods return a new value"]
    pub fn shared_printer(mut self, printer: Arc<dyn Printer>) -> Self {
        self.printers.push(printer);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn printers(mut self, printers: Vec<Arc<dyn Printer>>) -> Self {
        self.printers.extend(printers);
        self
    }

    pub fn build(self) -> Logger {
        Logger::new(self.config, self.printers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Result;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct Recorder {
        items: Mutex<Vec<LogItem>>,
    }

    impl Printer for Recorder {
        fn print(&self, level: LogLevel, tag: &str, message: &str) -> Result<()> {
            self.items.lock().push(LogItem::new(level, tag, message));
            Ok(())
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn logger() -> (Logger, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let logger = Logger::builder()
            .tag("TEST")
            .shared_printer(recorder.clone())
            .build();
        (logger, recorder)
    }

    #[test]
    fn test_plain_message() {
        let (logger, recorder) = logger();
        logger.info("hello");
        assert_eq!(
            recorder.items.lock().as_slice(),
            &[LogItem::new(LogLevel::INFO, "TEST", "hello")]
        );
    }

    #[test]
    fn test_filtered_call_composes_nothing() {
        let (logger, recorder) = logger();
        let called = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let flag = Arc::clone(&called);
        let logger = logger
            .log_level(LogLevel::WARN)
            .json_formatter(move |s: &str| {
                flag.store(true, std::sync::atomic::Ordering::SeqCst);
                s.to_string()
            });

        logger.json("{}");
        logger.info("dropped");
        assert!(recorder.items.lock().is_empty());
        assert!(!called.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[test]
    fn test_derived_logger_does_not_touch_parent() {
        let (logger, recorder) = logger();
        let derived = logger.tag("NET").enable_border();
        derived.info("a");
        logger.info("b");

        let items = recorder.items.lock();
        assert_eq!(items[0].tag, "NET");
        assert!(items[0].message.starts_with('╔'));
        assert_eq!(items[1], LogItem::new(LogLevel::INFO, "TEST", "b"));
    }

    #[test]
    fn test_bordered_empty_message() {
        let (logger, recorder) = logger();
        logger.enable_border().info("");

        let items = recorder.items.lock();
        let lines: Vec<&str> = items[0].message.split(LINE_SEPARATOR).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('╔'));
        assert_eq!(lines[1], "║");
        assert!(lines[2].starts_with('╚'));
    }

    #[test]
    fn test_throwable_is_appended() {
        let (logger, recorder) = logger();
        let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        logger.log_throwable(LogLevel::ERROR, "write failed", &err);
        logger.log_throwable(LogLevel::ERROR, "", &err);

        let items = recorder.items.lock();
        assert_eq!(
            items[0].message,
            format!("write failed{}disk gone", LINE_SEPARATOR)
        );
        assert_eq!(items[1].message, "disk gone");
    }

    #[test]
    fn test_segment_order_without_border() {
        let (logger, recorder) = logger();
        logger
            .enable_thread_info()
            .thread_formatter(|_: &std::thread::Thread| "T".to_string())
            .enable_stack_trace(1)
            .stack_trace_formatter(|_: &[crate::formatter::StackFrame]| "S".to_string())
            .info("M");

        let expected = ["T", "S", "M"].join(LINE_SEPARATOR);
        assert_eq!(recorder.items.lock()[0].message, expected);
    }

    #[test]
    fn test_json_and_xml_log_at_debug() {
        let (logger, recorder) = logger();
        logger.json(r#"{"a":1}"#);
        logger.xml("<a/>");

        let items = recorder.items.lock();
        assert!(items.iter().all(|i| i.level == LogLevel::DEBUG));
        assert_eq!(items[0].message, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_log_args_and_objects() {
        let (logger, recorder) = logger();
        logger.log_args(LogLevel::INFO, "{} + {} = {}", &[&1, &2, &3]);
        logger.log_object(LogLevel::INFO, &vec!["a", "b"]);

        let items = recorder.items.lock();
        assert_eq!(items[0].message, "1 + 2 = 3");
        assert_eq!(items[1].message, "[\"a\", \"b\"]");
    }

    #[test]
    fn test_panicking_interceptor_is_contained() {
        let (logger, recorder) = logger();
        let logger = logger.add_interceptor(|_: LogItem| -> Option<LogItem> { panic!("bad") });
        logger.info("never printed");
        assert!(recorder.items.lock().is_empty());
    }
}
