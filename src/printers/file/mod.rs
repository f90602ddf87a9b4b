//! Asynchronous file printer
//!
//! [`FilePrinter::print`] only enqueues a job. A single named worker thread
//! owns the open file and drains the queue in FIFO order, so writes never
//! interleave and callers never wait on disk I/O.

pub mod backup;
pub mod clean;
pub mod naming;
mod writer;

pub use backup::{
    BackupStrategy, FileSizeBackupStrategy, NeverBackupStrategy, MAX_BACKUP_INDEX, NO_LIMIT,
};
pub use clean::{CleanStrategy, FileLastModifiedCleanStrategy, NeverCleanStrategy};
pub use naming::{
    ChangelessFileNameGenerator, DateFileNameGenerator, FileNameGenerator, LevelFileNameGenerator,
};

use crate::core::{platform, LogLevel, LoggerError, Printer, Result};
use crate::flattener::{DefaultFlattener, Flattener};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use parking_lot::{Mutex, RwLock};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use writer::LogWriter;

/// Default timeout used when a file printer is dropped without an explicit
/// [`FilePrinter::shutdown`] (5 seconds).
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

enum Job {
    Write {
        time_millis: i64,
        level: LogLevel,
        tag: String,
        message: String,
    },
    Flush(Sender<()>),
}

/// Printer that persists logs to files in a folder.
///
/// # Example
/// ```no_run
/// use zlog::printers::file::{FilePrinter, FileSizeBackupStrategy, DateFileNameGenerator};
/// use zlog::PatternFlattener;
///
/// let printer = FilePrinter::builder("/var/log/app")
///     .file_name_generator(DateFileNameGenerator)
///     .backup_strategy(FileSizeBackupStrategy::new(10 * 1024 * 1024).with_max_backup_index(5))
///     .flattener(PatternFlattener::default())
///     .build()
///     .unwrap();
/// ```
pub struct FilePrinter {
    folder: PathBuf,
    sender: RwLock<Option<Sender<Job>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl FilePrinter {
    #[must_use]
    pub fn builder(folder: impl Into<PathBuf>) -> FilePrinterBuilder {
        FilePrinterBuilder::new(folder)
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Whether the worker still accepts jobs.
    pub fn is_running(&self) -> bool {
        self.sender.read().is_some()
    }

    /// Stop accepting jobs, let the worker drain the queue and join it.
    ///
    /// Returns `true` if the worker finished within `timeout`.
    pub fn shutdown(&self, timeout: Duration) -> bool {
        // Closing the channel ends the worker once the queue is drained
        drop(self.sender.write().take());

        let Some(handle) = self.worker.lock().take() else {
            return true;
        };

        let start = Instant::now();
        loop {
            if handle.is_finished() {
                if let Err(e) = handle.join() {
                    platform::error(format!(
                        "File printer worker panicked during shutdown: {}",
                        platform::panic_message(e.as_ref())
                    ));
                    return false;
                }
                return true;
            }

            if start.elapsed() >= timeout {
                platform::warn(format!(
                    "File printer worker did not finish within {:?}. Some logs may be lost.",
                    timeout
                ));
                return false;
            }

            thread::sleep(Duration::from_millis(10));
        }
    }

    fn send(&self, job: Job) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard
            .as_ref()
            .ok_or_else(|| LoggerError::printer_shutdown(self.name()))?;
        sender
            .send(job)
            .map_err(|_| LoggerError::printer_shutdown(self.name()))
    }
}

impl Printer for FilePrinter {
    fn print(&self, level: LogLevel, tag: &str, message: &str) -> Result<()> {
        self.send(Job::Write {
            time_millis: chrono::Utc::now().timestamp_millis(),
            level,
            tag: tag.to_string(),
            message: message.to_string(),
        })
    }

    /// Block until every job enqueued before this call has been written.
    fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        self.send(Job::Flush(ack_tx))?;
        ack_rx
            .recv()
            .map_err(|_| LoggerError::printer_shutdown(self.name()))
    }

    fn name(&self) -> &str {
        "FilePrinter"
    }
}

impl Drop for FilePrinter {
    fn drop(&mut self) {
        self.shutdown(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Builder for [`FilePrinter`]
pub struct FilePrinterBuilder {
    folder: PathBuf,
    file_name_generator: Box<dyn FileNameGenerator>,
    backup_strategy: Box<dyn BackupStrategy>,
    clean_strategy: Box<dyn CleanStrategy>,
    flattener: Arc<dyn Flattener>,
}

impl FilePrinterBuilder {
    /// Defaults: changeless file `log`, 1 MiB size backups, no cleaning,
    /// [`DefaultFlattener`].
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            file_name_generator: Box::new(ChangelessFileNameGenerator::default()),
            backup_strategy: Box::new(FileSizeBackupStrategy::default()),
            clean_strategy: Box::new(NeverCleanStrategy),
            flattener: Arc::new(DefaultFlattener),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_name_generator(mut self, generator: impl FileNameGenerator + 'static) -> Self {
        self.file_name_generator = Box::new(generator);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn backup_strategy(mut self, strategy: impl BackupStrategy + 'static) -> Self {
        self.backup_strategy = Box::new(strategy);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn clean_strategy(mut self, strategy: impl CleanStrategy + 'static) -> Self {
        self.clean_strategy = Box::new(strategy);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn flattener(mut self, flattener: impl Flattener + 'static) -> Self {
        self.flattener = Arc::new(flattener);
        self
    }

    /// Create the folder and start the worker.
    pub fn build(self) -> Result<FilePrinter> {
        self.backup_strategy.validate()?;

        std::fs::create_dir_all(&self.folder).map_err(|e| {
            LoggerError::io_operation(
                "creating log folder",
                format!("Cannot create {}", self.folder.display()),
                e,
            )
        })?;

        let (sender, receiver) = unbounded();
        let folder = self.folder.clone();
        let worker = Worker {
            folder: self.folder,
            file_name_generator: self.file_name_generator,
            backup_strategy: self.backup_strategy,
            clean_strategy: self.clean_strategy,
            flattener: self.flattener,
            writer: None,
            open_failed: false,
        };

        let handle = thread::Builder::new()
            .name("zlog-file-printer".to_string())
            .spawn(move || worker.run(receiver))
            .map_err(|e| {
                LoggerError::io_operation("spawning file printer worker", "spawn failed", e)
            })?;

        Ok(FilePrinter {
            folder,
            sender: RwLock::new(Some(sender)),
            worker: Mutex::new(Some(handle)),
        })
    }
}

/// State owned exclusively by the worker thread.
struct Worker {
    folder: PathBuf,
    file_name_generator: Box<dyn FileNameGenerator>,
    backup_strategy: Box<dyn BackupStrategy>,
    clean_strategy: Box<dyn CleanStrategy>,
    flattener: Arc<dyn Flattener>,
    writer: Option<LogWriter>,
    /// Set after an open failure is reported, cleared by the next success.
    open_failed: bool,
}

impl Worker {
    fn run(mut self, receiver: Receiver<Job>) {
        for job in receiver.iter() {
            let result = catch_unwind(AssertUnwindSafe(|| self.handle(job)));
            if let Err(panic_info) = result {
                platform::error(format!(
                    "File printer worker panicked: {}. Worker continues.",
                    platform::panic_message(panic_info.as_ref())
                ));
            }
        }

        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.close() {
                platform::error(format!("Failed to close log file on shutdown: {}", e));
            }
        }
    }

    fn handle(&mut self, job: Job) {
        match job {
            Job::Write {
                time_millis,
                level,
                tag,
                message,
            } => {
                if let Err(e) = self.write(time_millis, level, &tag, &message) {
                    platform::error(format!("File printer failed to write log: {}", e));
                }
            }
            Job::Flush(ack) => {
                if let Some(writer) = self.writer.as_mut() {
                    if let Err(e) = writer.flush() {
                        platform::error(e.to_string());
                    }
                }
                let _ = ack.send(());
            }
        }
    }

    fn write(&mut self, time_millis: i64, level: LogLevel, tag: &str, message: &str) -> Result<()> {
        let wanted = match &self.writer {
            None => Some(self.file_name_generator.generate_file_name(level, time_millis)),
            Some(writer) if self.file_name_generator.is_file_name_changeable() => {
                let name = self.file_name_generator.generate_file_name(level, time_millis);
                (name != writer.file_name()).then_some(name)
            }
            Some(_) => None,
        };

        if let Some(name) = wanted {
            self.close_current();
            if !self.open(&name) {
                return Ok(());
            }
        }

        let needs_backup = self
            .writer
            .as_ref()
            .map_or(false, |w| self.backup_strategy.should_backup(w.path()));
        if needs_backup {
            self.rotate()?;
        }

        let line = self.flattener.flatten(time_millis, level, tag, message);
        match self.writer.as_mut() {
            Some(writer) => writer.append_line(&line),
            None => Ok(()),
        }
    }

    /// Move the active file aside and reopen a fresh one under the same name.
    fn rotate(&mut self) -> Result<()> {
        let Some(writer) = self.writer.take() else {
            return Ok(());
        };
        let name = writer.file_name().to_string();
        let path = writer.path().to_path_buf();
        writer.close()?;

        // Reopen even if the backup failed so logging continues
        let backed_up = backup::backup(&path, self.backup_strategy.as_ref());
        self.open(&name);
        backed_up.map(|_| ())
    }

    /// Open `name`, clean the folder, and report the result. Failures are
    /// reported once until an open succeeds again.
    fn open(&mut self, name: &str) -> bool {
        match LogWriter::open(&self.folder, name) {
            Ok(writer) => {
                self.open_failed = false;
                clean::clean_folder(&self.folder, writer.path(), self.clean_strategy.as_ref());
                self.writer = Some(writer);
                true
            }
            Err(e) => {
                if !self.open_failed {
                    platform::error(format!("{}. Logs are dropped until it can be opened.", e));
                    self.open_failed = true;
                }
                false
            }
        }
    }

    fn close_current(&mut self) {
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.close() {
                platform::error(e.to_string());
            }
        }
    }
}
