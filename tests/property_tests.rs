//! Property-based tests for zlog using proptest

use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;
use zlog::prelude::*;

#[derive(Default)]
struct CountingPrinter {
    levels: Mutex<Vec<LogLevel>>,
}

impl Printer for CountingPrinter {
    fn print(&self, level: LogLevel, _: &str, _: &str) -> zlog::Result<()> {
        self.levels.lock().push(level);
        Ok(())
    }

    fn name(&self) -> &str {
        "counting"
    }
}

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::ALL),
        Just(LogLevel::NONE),
        Just(LogLevel::VERBOSE),
        Just(LogLevel::DEBUG),
        Just(LogLevel::INFO),
        Just(LogLevel::WARN),
        Just(LogLevel::ERROR),
        any::<i32>().prop_map(LogLevel::new),
    ]
}

// ============================================================================
// Level filtering
// ============================================================================

proptest! {
    /// A call is recorded iff its level is at or above the threshold
    #[test]
    fn test_recorded_iff_at_or_above_threshold(level in any_level(), threshold in any_level()) {
        let printer = Arc::new(CountingPrinter::default());
        let logger = Logger::builder()
            .log_level(threshold)
            .shared_printer(printer.clone())
            .build();

        logger.log(level, "message");

        let recorded = printer.levels.lock().len();
        prop_assert_eq!(recorded == 1, level.value() >= threshold.value());
    }

    /// ALL records every level and NONE records none, except NONE itself
    #[test]
    fn test_sentinels(value in (i32::MIN + 1)..i32::MAX) {
        let level = LogLevel::new(value);
        prop_assert!(level.passes(LogLevel::ALL));
        prop_assert!(!level.passes(LogLevel::NONE));
    }

    /// Numeric parsing round-trips for every level
    #[test]
    fn test_level_parse_roundtrip(value in any::<i32>()) {
        let parsed: LogLevel = value.to_string().parse().unwrap();
        prop_assert_eq!(parsed, LogLevel::new(value));
    }

    /// Short names of custom levels encode their distance to the nearest named level
    #[test]
    fn test_custom_short_names(value in -1000i32..1000) {
        let short = LogLevel::new(value).short_name();
        if value < LogLevel::VERBOSE.value() {
            prop_assert_eq!(short, format!("V-{}", LogLevel::VERBOSE.value() - value));
        } else if value > LogLevel::ERROR.value() {
            prop_assert_eq!(short, format!("E+{}", value - LogLevel::ERROR.value()));
        } else {
            prop_assert_eq!(short.len(), 1);
        }
    }
}

// ============================================================================
// Flatteners and runtime formatting
// ============================================================================

proptest! {
    /// The default flattener keeps every field, separated by '|'
    #[test]
    fn test_default_flattener_fields(
        millis in any::<i64>(),
        tag in "[A-Za-z0-9_]{1,16}",
        message in "[^|\r\n]{0,64}",
    ) {
        let line = DefaultFlattener.flatten(millis, LogLevel::INFO, &tag, &message);
        prop_assert_eq!(line, format!("{}|I|{}|{}", millis, tag, message));
    }

    /// Text without braces passes through the pattern flattener unchanged
    #[test]
    fn test_pattern_literals(prefix in "[^{}]{0,32}", suffix in "[^{}]{0,32}") {
        let flattener = PatternFlattener::new(format!("{}{{m}}{}", prefix, suffix));
        let line = flattener.flatten(0, LogLevel::DEBUG, "T", "body");
        prop_assert_eq!(line, format!("{}body{}", prefix, suffix));
    }

    /// Runtime formatting never panics, whatever the placeholders and arguments
    #[test]
    fn test_format_message_total(format in ".{0,64}", count in 0usize..4) {
        let args: Vec<&dyn std::fmt::Display> = (0..count).map(|_| &7 as &dyn std::fmt::Display).collect();
        let _ = zlog::format_message(&format, &args);
    }

    /// Interceptors that pass items through never change what is recorded
    #[test]
    fn test_pass_through_interceptors(stages in 0usize..8, message in ".{0,32}") {
        let printer = Arc::new(CountingPrinter::default());
        let mut logger = Logger::builder().shared_printer(printer.clone()).build();
        for _ in 0..stages {
            logger = logger.add_interceptor(|item: LogItem| Some(item));
        }

        logger.warn(message);
        let levels = printer.levels.lock();
        prop_assert_eq!(levels.as_slice(), &[LogLevel::WARN]);
    }
}
