//! File printer example
//!
//! Demonstrates non-blocking file logging with daily file names, size-based
//! backups and age-based cleaning.
//!
//! Run with: cargo run --example file_logging

use std::sync::Arc;
use std::time::Duration;
use zlog::prelude::*;

fn main() -> Result<()> {
    println!("=== zlog - File Logging Example ===\n");

    let folder = std::env::temp_dir().join("zlog-demo");
    let file_printer = Arc::new(
        FilePrinter::builder(&folder)
            .file_name_generator(DateFileNameGenerator)
            .backup_strategy(
                FileSizeBackupStrategy::new(4 * 1024)
                    .with_max_backup_index(3)
                    .with_compression(true),
            )
            .clean_strategy(FileLastModifiedCleanStrategy::new(Duration::from_secs(
                7 * 24 * 3600,
            )))
            .flattener(PatternFlattener::new("{d} {L} {t}: {m}"))
            .build()?,
    );

    let logger = Logger::builder()
        .tag("FILE")
        .shared_printer(file_printer.clone())
        .printer(ConsolePrinter::new())
        .build();

    println!("1. Writing from several threads to {}", folder.display());
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = logger.tag(format!("WORKER-{}", worker));
            std::thread::spawn(move || {
                for i in 0..50 {
                    logger.info(format!("Processed item {}", i));
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    println!("2. Waiting for the worker to drain its queue");
    file_printer.flush()?;

    println!("3. Files in the log folder:");
    for entry in std::fs::read_dir(&folder)?.flatten() {
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        println!("   {} ({} bytes)", entry.file_name().to_string_lossy(), size);
    }

    file_printer.shutdown(Duration::from_secs(2));
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
