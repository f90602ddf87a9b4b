//! Basic logger usage example
//!
//! Demonstrates the global logger, derived loggers, formatters and
//! interceptors with the console printer.
//!
//! Run with: cargo run --example basic_usage

use std::sync::Arc;
use std::time::SystemTime;
use zlog::prelude::*;

#[derive(Debug)]
struct User {
    id: u32,
    name: &'static str,
}

fn main() -> Result<()> {
    println!("=== zlog - Basic Usage Example ===\n");

    let console: Arc<dyn Printer> = Arc::new(
        ConsolePrinter::new().with_flattener(PatternFlattener::new("{d %H:%M:%S%.3f} {l}/{t}: {m}")),
    );
    zlog::init(
        LogConfiguration::builder()
            .log_level(LogLevel::VERBOSE)
            .tag("DEMO")
            .build(),
        vec![console],
    );

    println!("1. Logging at different levels:");
    zlog::verbose("This is a verbose message");
    zlog::debug("This is a debug message");
    zlog::info("This is an info message");
    zlog::warn("This is a warning message");
    zlog::error("This is an error message");
    zlog::log(LogLevel::new(9), "This is a custom level message");

    println!("\n2. Derived loggers leave the default untouched:");
    zlog::tag("NETWORK").enable_thread_info().info("Request sent");
    zlog::enable_border().enable_stack_trace(2).warn("Boxed with two frames");
    zlog::info("Back to the default configuration");

    println!("\n3. Structured payloads:");
    zlog::json(r#"{"user":{"id":1,"name":"ada"},"roles":["admin"]}"#);
    zlog::xml("<user id=\"1\"><name>ada</name></user>");
    zlog::log_object(LogLevel::INFO, &SystemTime::now());

    let logger = zlog::logger()
        .add_object_formatter::<User, _>(|u: &User| format!("User#{} ({})", u.id, u.name));
    logger.log_object(LogLevel::INFO, &User { id: 7, name: "grace" });
    zlog::info!(logger, "Formatted at compile time: {} + {} = {}", 1, 2, 1 + 2);
    logger.log_args(LogLevel::INFO, "Formatted at runtime: {} items", &[&3]);

    println!("\n4. Interceptors:");
    let filtered = zlog::logger()
        .add_interceptor(BlacklistTagsFilterInterceptor::new(["NOISY"]))
        .add_interceptor(|item: LogItem| {
            let message = format!("[audited] {}", item.message);
            Some(item.with_message(message))
        });
    filtered.tag("NOISY").info("Dropped by the blacklist");
    filtered.tag("AUDIT").info("Rewritten by the second interceptor");

    let err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
    zlog::log_throwable(LogLevel::ERROR, "Upload failed", &err);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
