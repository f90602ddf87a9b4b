//! Fan-out of a final log item to every configured printer

use super::{log_item::LogItem, platform, printer::Printer};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Ordered, immutable list of printers shared by loggers.
#[derive(Clone, Default)]
pub struct PrinterSet {
    printers: Arc<[Arc<dyn Printer>]>,
}

impl PrinterSet {
    pub fn new(printers: Vec<Arc<dyn Printer>>) -> Self {
        Self {
            printers: printers.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Printer>> {
        self.printers.iter()
    }

    /// Hand `item` to every printer.
    ///
    /// Each printer receives its own copy, so `on_print` rewrites stay local.
    /// A printer that errors or panics is reported and skipped; the others
    /// still run.
    pub fn dispatch(&self, item: &LogItem) {
        for (idx, printer) in self.printers.iter().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| {
                let local = printer.on_print(item.clone());
                printer.print(local.level, &local.tag, &local.message)
            }));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    platform::error(format!(
                        "Printer #{} ({}) failed: {}",
                        idx,
                        printer.name(),
                        e
                    ));
                }
                Err(panic_info) => {
                    platform::error(format!(
                        "Printer #{} ({}) panicked: {}. Other printers continue to function.",
                        idx,
                        printer.name(),
                        platform::panic_message(panic_info.as_ref())
                    ));
                }
            }
        }
    }

    /// Flush every printer, reporting failures.
    pub fn flush(&self) {
        for (idx, printer) in self.printers.iter().enumerate() {
            let result = catch_unwind(AssertUnwindSafe(|| printer.flush()));
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    platform::error(format!("Printer #{} flush failed: {}", idx, e));
                }
                Err(panic_info) => {
                    platform::error(format!(
                        "Printer #{} panicked during flush: {}",
                        idx,
                        platform::panic_message(panic_info.as_ref())
                    ));
                }
            }
        }
    }
}

impl std::fmt::Debug for PrinterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.printers.iter().map(|p| p.name()))
            .finish()
    }
}

impl From<Vec<Arc<dyn Printer>>> for PrinterSet {
    fn from(printers: Vec<Arc<dyn Printer>>) -> Self {
        Self::new(printers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, LoggerError, Result};
    use parking_lot::Mutex;

    struct Recording {
        prefix: &'static str,
        seen: Mutex<Vec<LogItem>>,
    }

    impl Printer for Recording {
        fn on_print(&self, mut item: LogItem) -> LogItem {
            item.message = format!("{}{}", self.prefix, item.message);
            item
        }

        fn print(&self, level: LogLevel, tag: &str, message: &str) -> Result<()> {
            self.seen.lock().push(LogItem::new(level, tag, message));
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct Failing;

    impl Printer for Failing {
        fn print(&self, _: LogLevel, _: &str, _: &str) -> Result<()> {
            Err(LoggerError::other("boom"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct Panicking;

    impl Printer for Panicking {
        fn print(&self, _: LogLevel, _: &str, _: &str) -> Result<()> {
            panic!("printer exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_on_print_is_local_to_each_printer() {
        let a = Arc::new(Recording {
            prefix: "a:",
            seen: Mutex::new(Vec::new()),
        });
        let b = Arc::new(Recording {
            prefix: "b:",
            seen: Mutex::new(Vec::new()),
        });
        let set = PrinterSet::new(vec![a.clone(), b.clone()]);

        set.dispatch(&LogItem::new(LogLevel::INFO, "tag", "msg"));

        assert_eq!(a.seen.lock()[0].message, "a:msg");
        assert_eq!(b.seen.lock()[0].message, "b:msg");
    }

    #[test]
    fn test_failures_do_not_stop_other_printers() {
        let ok = Arc::new(Recording {
            prefix: "",
            seen: Mutex::new(Vec::new()),
        });
        let set = PrinterSet::new(vec![Arc::new(Failing), Arc::new(Panicking), ok.clone()]);

        set.dispatch(&LogItem::new(LogLevel::ERROR, "tag", "still printed"));

        let seen = ok.seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, "still printed");
    }
}
