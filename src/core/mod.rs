//! Core logger types and traits

pub mod configuration;
pub mod error;
pub mod interceptor;
pub mod log_item;
pub mod log_level;
pub mod logger;
pub mod message;
pub mod platform;
pub mod printer;
pub mod printer_set;

pub use configuration::{LogConfiguration, LogConfigurationBuilder, LogSettings, DEFAULT_TAG};
pub use error::{LoggerError, Result};
pub use interceptor::{
    BlacklistTagsFilterInterceptor, Interceptor, WhitelistTagsFilterInterceptor,
};
pub use log_item::LogItem;
pub use log_level::LogLevel;
pub use logger::{Logger, LoggerBuilder};
pub use message::format_message;
pub use platform::LINE_SEPARATOR;
pub use printer::Printer;
pub use printer_set::PrinterSet;
