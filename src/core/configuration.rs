//! Resolved logger configuration and its builder

use super::{
    error::{LoggerError, Result},
    interceptor::Interceptor,
    log_level::LogLevel,
};
use crate::formatter::{
    BorderFormatter, DefaultBorderFormatter, DefaultJsonFormatter, DefaultStackTraceFormatter,
    DefaultThreadFormatter, DefaultThrowableFormatter, DefaultXmlFormatter, JsonFormatter,
    ObjectFormatter, ObjectFormatterRegistry, StackTraceFormatter, ThreadFormatter,
    ThrowableFormatter, XmlFormatter,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;

/// Tag used when none is configured.
pub const DEFAULT_TAG: &str = "ZLOG";

/// Immutable snapshot of everything the message composer needs.
///
/// Built once through [`LogConfigurationBuilder`]; derived loggers copy it with
/// [`LogConfiguration::to_builder`] and never mutate the original.
#[derive(Clone)]
pub struct LogConfiguration {
    level: LogLevel,
    tag: String,
    with_thread: bool,
    stack_trace_depth: usize,
    stack_trace_origin: Option<String>,
    with_border: bool,
    json_formatter: Arc<dyn JsonFormatter>,
    xml_formatter: Arc<dyn XmlFormatter>,
    throwable_formatter: Arc<dyn ThrowableFormatter>,
    thread_formatter: Arc<dyn ThreadFormatter>,
    stack_trace_formatter: Arc<dyn StackTraceFormatter>,
    border_formatter: Arc<dyn BorderFormatter>,
    object_formatters: Arc<ObjectFormatterRegistry>,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl LogConfiguration {
    #[must_use]
    pub fn builder() -> LogConfigurationBuilder {
        LogConfigurationBuilder::new()
    }

    /// Start a builder pre-filled with this configuration.
    #[must_use]
    pub fn to_builder(&self) -> LogConfigurationBuilder {
        LogConfigurationBuilder {
            config: self.clone(),
        }
    }

    #[inline]
    pub fn is_loggable(&self, level: LogLevel) -> bool {
        level.passes(self.level)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn thread_info_enabled(&self) -> bool {
        self.with_thread
    }

    /// Number of stack frames to include; 0 disables the segment.
    pub fn stack_trace_depth(&self) -> usize {
        self.stack_trace_depth
    }

    pub fn stack_trace_origin(&self) -> Option<&str> {
        self.stack_trace_origin.as_deref()
    }

    pub fn border_enabled(&self) -> bool {
        self.with_border
    }

    pub fn json_formatter(&self) -> &dyn JsonFormatter {
        self.json_formatter.as_ref()
    }

    pub fn xml_formatter(&self) -> &dyn XmlFormatter {
        self.xml_formatter.as_ref()
    }

    pub fn throwable_formatter(&self) -> &dyn ThrowableFormatter {
        self.throwable_formatter.as_ref()
    }

    pub fn thread_formatter(&self) -> &dyn ThreadFormatter {
        self.thread_formatter.as_ref()
    }

    pub fn stack_trace_formatter(&self) -> &dyn StackTraceFormatter {
        self.stack_trace_formatter.as_ref()
    }

    pub fn border_formatter(&self) -> &dyn BorderFormatter {
        self.border_formatter.as_ref()
    }

    pub fn object_formatters(&self) -> &ObjectFormatterRegistry {
        &self.object_formatters
    }

    pub fn interceptors(&self) -> &[Arc<dyn Interceptor>] {
        &self.interceptors
    }
}

impl Default for LogConfiguration {
    fn default() -> Self {
        Self {
            level: LogLevel::ALL,
            tag: DEFAULT_TAG.to_string(),
            with_thread: false,
            stack_trace_depth: 0,
            stack_trace_origin: None,
            with_border: false,
            json_formatter: Arc::new(DefaultJsonFormatter),
            xml_formatter: Arc::new(DefaultXmlFormatter),
            throwable_formatter: Arc::new(DefaultThrowableFormatter),
            thread_formatter: Arc::new(DefaultThreadFormatter),
            stack_trace_formatter: Arc::new(DefaultStackTraceFormatter),
            border_formatter: Arc::new(DefaultBorderFormatter::new()),
            object_formatters: Arc::new(ObjectFormatterRegistry::with_builtins()),
            interceptors: Vec::new(),
        }
    }
}

impl std::fmt::Debug for LogConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogConfiguration")
            .field("level", &self.level)
            .field("tag", &self.tag)
            .field("with_thread", &self.with_thread)
            .field("stack_trace_depth", &self.stack_trace_depth)
            .field("stack_trace_origin", &self.stack_trace_origin)
            .field("with_border", &self.with_border)
            .field("object_formatters", &self.object_formatters)
            .field("interceptors", &self.interceptors.len())
            .finish()
    }
}

/// Builder for [`LogConfiguration`]
///
/// # Example
/// ```
/// use zlog::prelude::*;
///
/// let config = LogConfiguration::builder()
///     .log_level(LogLevel::INFO)
///     .tag("APP")
///     .enable_thread_info()
///     .enable_border()
///     .build();
/// assert_eq!(config.tag(), "APP");
/// ```
#[derive(Clone, Default)]
pub struct LogConfigurationBuilder {
    config: LogConfiguration,
}

impl LogConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.config.tag = tag.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enable_thread_info(mut self) -> Self {
        self.config.with_thread = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_thread_info(mut self) -> Self {
        self.config.with_thread = false;
        self
    }

    /// Include `depth` caller frames in every log. 0 disables the segment.
    #[must_use = "builder methods return a new value"]
    pub fn enable_stack_trace(mut self, depth: usize) -> Self {
        self.config.stack_trace_depth = depth;
        self.config.stack_trace_origin = None;
        self
    }

    /// Like [`enable_stack_trace`](Self::enable_stack_trace), additionally
    /// hiding frames whose symbol starts with `origin`, such as a module that
    /// wraps the logger.
    #[must_use = "builder methods return a new value"]
    pub fn enable_stack_trace_with_origin(mut self, origin: impl Into<String>, depth: usize) -> Self {
        self.config.stack_trace_depth = depth;
        self.config.stack_trace_origin = Some(origin.into());
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_stack_trace(mut self) -> Self {
        self.config.stack_trace_depth = 0;
        self.config.stack_trace_origin = None;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn enable_border(mut self) -> Self {
        self.config.with_border = true;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn disable_border(mut self) -> Self {
        self.config.with_border = false;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn json_formatter(mut self, formatter: impl JsonFormatter + 'static) -> Self {
        self.config.json_formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn xml_formatter(mut self, formatter: impl XmlFormatter + 'static) -> Self {
        self.config.xml_formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn throwable_formatter(mut self, formatter: impl ThrowableFormatter + 'static) -> Self {
        self.config.throwable_formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn thread_formatter(mut self, formatter: impl ThreadFormatter + 'static) -> Self {
        self.config.thread_formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn stack_trace_formatter(mut self, formatter: impl StackTraceFormatter + 'static) -> Self {
        self.config.stack_trace_formatter = Arc::new(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn border_formatter(mut self, formatter: impl BorderFormatter + 'static) -> Self {
        self.config.border_formatter = Arc::new(formatter);
        self
    }

    /// Register an object formatter for values of type `T`.
    #[must_use = "builder methods return a new value"]
    pub fn add_object_formatter<T, F>(mut self, formatter: F) -> Self
    where
        T: Any,
        F: ObjectFormatter<T> + 'static,
    {
        Arc::make_mut(&mut self.config.object_formatters).register::<T, F>(formatter);
        self
    }

    /// Let values of type `C` use formatters registered for `P`.
    #[must_use = "builder methods return a new value"]
    pub fn declare_supertype<C: Any, P: Any>(mut self, upcast: fn(&C) -> &P) -> Self {
        Arc::make_mut(&mut self.config.object_formatters).declare_supertype(upcast);
        self
    }

    /// Append an interceptor; interceptors run in the order they are added.
    #[must_use = "builder methods return a new value"]
    pub fn add_interceptor(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.config.interceptors.push(Arc::new(interceptor));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_shared_interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.config.interceptors.push(interceptor);
        self
    }

    pub fn build(self) -> LogConfiguration {
        self.config
    }
}

/// Serializable subset of [`LogConfiguration`], for loading from files.
///
/// # Example
/// ```
/// use zlog::{LogLevel, LogSettings};
///
/// let settings = LogSettings::from_json(r#"{"level": "warn", "tag": "APP", "border": true}"#).unwrap();
/// let config = settings.into_builder().build();
/// assert_eq!(config.level(), LogLevel::WARN);
/// assert!(config.border_enabled());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub level: LogLevel,
    pub tag: String,
    pub thread: bool,
    pub stack_trace_depth: usize,
    pub stack_trace_origin: Option<String>,
    pub border: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LogLevel::ALL,
            tag: DEFAULT_TAG.to_string(),
            thread: false,
            stack_trace_depth: 0,
            stack_trace_origin: None,
            border: false,
        }
    }
}

impl LogSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: LogSettings = serde_json::from_str(json)?;
        if settings.tag.is_empty() {
            return Err(LoggerError::config("LogSettings", "tag must not be empty"));
        }
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Turn the settings into a builder so formatters and interceptors can
    /// still be added in code.
    pub fn into_builder(self) -> LogConfigurationBuilder {
        let builder = LogConfigurationBuilder::new()
            .log_level(self.level)
            .tag(self.tag);
        let builder = if self.thread {
            builder.enable_thread_info()
        } else {
            builder
        };
        let builder = match self.stack_trace_origin {
            Some(origin) => builder.enable_stack_trace_with_origin(origin, self.stack_trace_depth),
            None => builder.enable_stack_trace(self.stack_trace_depth),
        };
        if self.border {
            builder.enable_border()
        } else {
            builder
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogItem;

    #[test]
    fn test_defaults() {
        let config = LogConfiguration::default();
        assert_eq!(config.level(), LogLevel::ALL);
        assert_eq!(config.tag(), DEFAULT_TAG);
        assert!(!config.thread_info_enabled());
        assert_eq!(config.stack_trace_depth(), 0);
        assert!(!config.border_enabled());
        assert!(config.interceptors().is_empty());
        assert!(config.object_formatters().contains::<std::time::SystemTime>());
    }

    #[test]
    fn test_to_builder_leaves_original_untouched() {
        let base = LogConfiguration::builder().tag("BASE").build();
        let derived = base
            .to_builder()
            .tag("DERIVED")
            .enable_border()
            .add_object_formatter::<u8, _>(|v: &u8| format!("byte {}", v))
            .add_interceptor(|item: LogItem| Some(item))
            .build();

        assert_eq!(base.tag(), "BASE");
        assert!(!base.border_enabled());
        assert!(!base.object_formatters().contains::<u8>());
        assert!(base.interceptors().is_empty());

        assert_eq!(derived.tag(), "DERIVED");
        assert!(derived.border_enabled());
        assert!(derived.object_formatters().contains::<u8>());
        assert_eq!(derived.interceptors().len(), 1);
    }

    #[test]
    fn test_stack_trace_settings() {
        let config = LogConfiguration::builder()
            .enable_stack_trace_with_origin("app::wrapper", 3)
            .build();
        assert_eq!(config.stack_trace_depth(), 3);
        assert_eq!(config.stack_trace_origin(), Some("app::wrapper"));

        let config = config.to_builder().disable_stack_trace().build();
        assert_eq!(config.stack_trace_depth(), 0);
        assert_eq!(config.stack_trace_origin(), None);
    }

    #[test]
    fn test_is_loggable() {
        let config = LogConfiguration::builder().log_level(LogLevel::WARN).build();
        assert!(!config.is_loggable(LogLevel::INFO));
        assert!(config.is_loggable(LogLevel::WARN));
        assert!(config.is_loggable(LogLevel::new(100)));
    }

    #[test]
    fn test_settings_from_json() {
        let settings = LogSettings::from_json(
            r#"{"level": 5, "tag": "NET", "thread": true, "stack_trace_depth": 2}"#,
        )
        .unwrap();
        let config = settings.clone().into_builder().build();
        assert_eq!(config.level(), LogLevel::WARN);
        assert_eq!(config.tag(), "NET");
        assert!(config.thread_info_enabled());
        assert_eq!(config.stack_trace_depth(), 2);

        let round = LogSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(round, settings);
    }

    #[test]
    fn test_settings_reject_empty_tag() {
        let err = LogSettings::from_json(r#"{"tag": ""}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }
}
