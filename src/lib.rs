//! # zlog
//!
//! A structured logging pipeline: level filtering, message composition with
//! pluggable formatters, an interceptor chain, and fan-out to printers,
//! including an asynchronous file printer with rotation and retention.
//!
//! ## Features
//!
//! - **Immutable loggers**: derived loggers copy their configuration, the
//!   shared default is never mutated
//! - **Pluggable formatting**: JSON, XML, errors, threads, stack traces,
//!   borders and per-type object formatters
//! - **Non-blocking file output**: a single worker per file printer owns the
//!   open file, with size-based backups and age-based cleaning
//! - **Never fails the caller**: printer errors and panics are isolated and
//!   reported on stderr
//!
//! ```
//! use zlog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .configuration(LogConfiguration::builder().tag("APP").build())
//!     .printer(ConsolePrinter::new())
//!     .build();
//!
//! logger.info("started");
//! logger.tag("NET").enable_border().warn("slow response");
//! ```

pub mod core;
pub mod flattener;
pub mod formatter;
pub mod global;
pub mod macros;
pub mod printers;

pub mod prelude {
    pub use crate::core::{
        BlacklistTagsFilterInterceptor, Interceptor, LogConfiguration, LogConfigurationBuilder,
        LogItem, LogLevel, LogSettings, Logger, LoggerBuilder, LoggerError, Printer, Result,
        WhitelistTagsFilterInterceptor,
    };
    pub use crate::flattener::{DefaultFlattener, Flattener, PatternFlattener};
    pub use crate::printers::file::{
        ChangelessFileNameGenerator, DateFileNameGenerator, FileLastModifiedCleanStrategy,
        FileSizeBackupStrategy, LevelFileNameGenerator, NeverBackupStrategy, NeverCleanStrategy,
    };
    pub use crate::printers::{ConsolePrinter, FilePrinter};
}

pub use crate::core::{
    format_message, BlacklistTagsFilterInterceptor, Interceptor, LogConfiguration,
    LogConfigurationBuilder, LogItem, LogLevel, LogSettings, Logger, LoggerBuilder, LoggerError,
    Printer, PrinterSet, Result, WhitelistTagsFilterInterceptor, DEFAULT_TAG, LINE_SEPARATOR,
};
pub use flattener::{DefaultFlattener, Flattener, PatternFlattener};
pub use global::{
    add_interceptor, add_object_formatter, border_formatter, debug, declare_supertype,
    disable_border, disable_stack_trace, disable_thread_info, enable_border, enable_stack_trace,
    enable_stack_trace_with_origin, enable_thread_info, error, flush, info, init, init_default,
    init_with_printers, is_initialized, json, json_formatter, log, log_args, log_level,
    log_object, log_throwable, logger, set_logger, stack_trace_formatter, tag, thread_formatter,
    throwable_formatter, verbose, warn, xml, xml_formatter,
};
pub use printers::{ConsolePrinter, FilePrinter};
