//! File printer tests: round trip, rotation and retention

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use zlog::prelude::*;

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read log file")
        .lines()
        .map(str::to_string)
        .collect()
}

fn age_file(path: &Path, by: Duration) {
    let file = File::options()
        .write(true)
        .open(path)
        .expect("Failed to open file");
    file.set_modified(SystemTime::now() - by)
        .expect("Failed to set mtime");
}

#[test]
fn test_round_trip_with_pattern() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let printer = Arc::new(
        FilePrinter::builder(temp_dir.path())
            .flattener(PatternFlattener::new("{d %H:%M:%S} {l}/{t}: {m}"))
            .build()
            .expect("Failed to create printer"),
    );
    let logger = Logger::builder()
        .tag("FILE")
        .shared_printer(printer.clone())
        .build();

    for i in 0..50 {
        logger.info(format!("message {}", i));
    }
    logger.flush();

    let lines = read_lines(&temp_dir.path().join("log"));
    assert_eq!(lines.len(), 50);
    for (i, line) in lines.iter().enumerate() {
        // HH:MM:SS I/FILE: message i
        let (time, rest) = line.split_at(8);
        assert_eq!(time.len(), 8);
        assert_eq!(time.matches(':').count(), 2);
        assert_eq!(rest, format!(" I/FILE: message {}", i));
    }
}

#[test]
fn test_default_flattener_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let printer = FilePrinter::builder(temp_dir.path())
        .build()
        .expect("Failed to create printer");

    printer.print(LogLevel::WARN, "NET", "timeout").unwrap();
    printer.flush().unwrap();

    let lines = read_lines(&temp_dir.path().join("log"));
    let parts: Vec<&str> = lines[0].split('|').collect();
    assert_eq!(parts.len(), 4);
    assert!(parts[0].parse::<i64>().is_ok());
    assert_eq!(&parts[1..], &["W", "NET", "timeout"]);
}

#[test]
fn test_rotation_preserves_backup() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let printer = FilePrinter::builder(temp_dir.path())
        .backup_strategy(FileSizeBackupStrategy::new(100))
        .flattener(|_: i64, _: LogLevel, _: &str, message: &str| message.to_string())
        .build()
        .expect("Failed to create printer");

    // 20 bytes per line with its terminator: the seventh write finds 120 > 100
    let messages: Vec<String> = (0..8).map(|i| format!("line {:02} -----------", i)).collect();
    for message in &messages {
        printer.print(LogLevel::INFO, "T", message).unwrap();
    }
    printer.flush().unwrap();

    let active = read_lines(&temp_dir.path().join("log"));
    let backup = read_lines(&temp_dir.path().join("log.bak.1"));

    assert!(!backup.is_empty());
    assert!(!active.is_empty());
    assert_eq!(backup, messages[..backup.len()].to_vec());
    assert_eq!(active, messages[backup.len()..].to_vec());
    assert!(fs::metadata(temp_dir.path().join("log.bak.1")).unwrap().len() > 100);
}

#[test]
fn test_rotation_with_max_backup_index() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let printer = FilePrinter::builder(temp_dir.path())
        .backup_strategy(FileSizeBackupStrategy::new(10).with_max_backup_index(2))
        .flattener(|_: i64, _: LogLevel, _: &str, message: &str| message.to_string())
        .build()
        .expect("Failed to create printer");

    for i in 0..5 {
        printer
            .print(LogLevel::INFO, "T", &format!("message number {}", i))
            .unwrap();
    }
    printer.flush().unwrap();

    assert_eq!(read_lines(&temp_dir.path().join("log")), vec!["message number 4"]);
    assert_eq!(read_lines(&temp_dir.path().join("log.bak.1")), vec!["message number 3"]);
    assert_eq!(read_lines(&temp_dir.path().join("log.bak.2")), vec!["message number 2"]);
    assert!(!temp_dir.path().join("log.bak.3").exists());
}

#[test]
fn test_retention_on_open() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let stale = temp_dir.path().join("2000-01-01");
    let fresh = temp_dir.path().join("recent");
    fs::write(&stale, "old\n").unwrap();
    fs::write(&fresh, "new\n").unwrap();
    age_file(&stale, Duration::from_secs(7 * 24 * 3600));
    age_file(&fresh, Duration::from_secs(60));

    let printer = FilePrinter::builder(temp_dir.path())
        .file_name_generator(DateFileNameGenerator)
        .clean_strategy(FileLastModifiedCleanStrategy::new(Duration::from_secs(24 * 3600)))
        .build()
        .expect("Failed to create printer");

    // Nothing is cleaned until a file is opened
    assert!(stale.exists());

    printer.print(LogLevel::INFO, "T", "opens today's file").unwrap();
    printer.flush().unwrap();

    assert!(!stale.exists());
    assert!(fresh.exists());
}

#[test]
fn test_concurrent_writers_share_one_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let printer: Arc<dyn Printer> = Arc::new(
        FilePrinter::builder(temp_dir.path())
            .flattener(|_: i64, _: LogLevel, tag: &str, message: &str| format!("{} {}", tag, message))
            .build()
            .expect("Failed to create printer"),
    );
    let logger = Logger::builder().shared_printer(printer.clone()).build();

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = logger.tag(format!("T{}", t));
            std::thread::spawn(move || {
                for i in 0..250 {
                    logger.info(i.to_string());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    printer.flush().unwrap();

    let lines = read_lines(&temp_dir.path().join("log"));
    assert_eq!(lines.len(), 1000);
    for t in 0..4 {
        let prefix = format!("T{} ", t);
        let ours: Vec<u32> = lines
            .iter()
            .filter_map(|l| l.strip_prefix(&prefix))
            .map(|n| n.parse().unwrap())
            .collect();
        assert_eq!(ours, (0..250).collect::<Vec<u32>>());
    }
}

#[test]
fn test_drop_drains_queue() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    {
        let printer = FilePrinter::builder(temp_dir.path())
            .build()
            .expect("Failed to create printer");
        for i in 0..200 {
            printer.print(LogLevel::DEBUG, "T", &i.to_string()).unwrap();
        }
    }
    assert_eq!(read_lines(&temp_dir.path().join("log")).len(), 200);
}
