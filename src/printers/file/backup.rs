//! Backup strategies and the backup procedure run by the file printer worker

use crate::core::{platform, LoggerError, Result};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Unlimited backups: the active file moves to the first free index.
pub const NO_LIMIT: usize = 0;

/// Largest accepted max backup index.
pub const MAX_BACKUP_INDEX: usize = i32::MAX as usize;

/// Decides when the active log file is moved aside and how backups are named.
pub trait BackupStrategy: Send + Sync {
    fn should_backup(&self, file: &Path) -> bool;

    /// Highest backup index kept, or [`NO_LIMIT`].
    fn max_backup_index(&self) -> usize {
        NO_LIMIT
    }

    fn backup_file_name(&self, file_name: &str, index: usize) -> String {
        format!("{}.bak.{}", file_name, index)
    }

    /// Gzip backups to `<backup name>.gz`.
    fn compress(&self) -> bool {
        false
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Never moves the active file aside.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverBackupStrategy;

impl BackupStrategy for NeverBackupStrategy {
    fn should_backup(&self, _file: &Path) -> bool {
        false
    }
}

/// Backs up once the active file grows beyond `max_size` bytes.
#[derive(Debug, Clone)]
pub struct FileSizeBackupStrategy {
    max_size: u64,
    max_backup_index: usize,
    compress: bool,
}

impl FileSizeBackupStrategy {
    /// Default threshold, 1 MiB.
    pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

    pub fn new(max_size: u64) -> Self {
        Self {
            max_size,
            max_backup_index: NO_LIMIT,
            compress: false,
        }
    }

    #[must_use]
    pub fn with_max_backup_index(mut self, max_backup_index: usize) -> Self {
        self.max_backup_index = max_backup_index;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }
}

impl Default for FileSizeBackupStrategy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_SIZE)
    }
}

impl BackupStrategy for FileSizeBackupStrategy {
    fn should_backup(&self, file: &Path) -> bool {
        fs::metadata(file)
            .map(|meta| meta.len() > self.max_size)
            .unwrap_or(false)
    }

    fn max_backup_index(&self) -> usize {
        self.max_backup_index
    }

    fn compress(&self) -> bool {
        self.compress
    }

    fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(LoggerError::config(
                "FileSizeBackupStrategy",
                "max size must be greater than zero",
            ));
        }
        if self.max_backup_index > MAX_BACKUP_INDEX {
            return Err(LoggerError::config(
                "FileSizeBackupStrategy",
                format!(
                    "max backup index {} exceeds {}",
                    self.max_backup_index, MAX_BACKUP_INDEX
                ),
            ));
        }
        Ok(())
    }
}

fn backup_path(file: &Path, strategy: &dyn BackupStrategy, index: usize) -> PathBuf {
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("log");
    file.with_file_name(strategy.backup_file_name(file_name, index))
}

fn gz_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".gz");
    PathBuf::from(os)
}

/// Move `file` aside according to `strategy` and return the backup's path.
///
/// With a limit `N`: index `N` is evicted, `N-1..=1` shift up by one and the
/// active file becomes index 1. Without a limit the active file takes the
/// first free index. Compressed and plain backups are handled alike.
pub(crate) fn backup(file: &Path, strategy: &dyn BackupStrategy) -> Result<PathBuf> {
    let max_index = strategy.max_backup_index();

    let index = if max_index == NO_LIMIT {
        (1..)
            .find(|&i| {
                let candidate = backup_path(file, strategy, i);
                !candidate.exists() && !gz_path(&candidate).exists()
            })
            .unwrap_or(1)
    } else {
        evict_and_shift(file, strategy, max_index)?;
        1
    };

    let target = backup_path(file, strategy, index);
    fs::rename(file, &target).map_err(|e| {
        LoggerError::file_rotation(
            file.display().to_string(),
            format!("Failed to move log file to {}: {}", target.display(), e),
        )
    })?;

    if strategy.compress() {
        return compress_file(&target);
    }
    Ok(target)
}

fn backup_exists(file: &Path, strategy: &dyn BackupStrategy, index: usize) -> bool {
    let candidate = backup_path(file, strategy, index);
    candidate.exists() || gz_path(&candidate).exists()
}

/// Shift the run of backups starting at index 1 up by one, evicting index
/// `max_index` when the run reaches it. Backups past the first gap are left
/// alone.
fn evict_and_shift(file: &Path, strategy: &dyn BackupStrategy, max_index: usize) -> Result<()> {
    let mut last = 0;
    while last < max_index && backup_exists(file, strategy, last + 1) {
        last += 1;
    }

    if last == max_index {
        let oldest = backup_path(file, strategy, max_index);
        for candidate in [gz_path(&oldest), oldest] {
            if candidate.exists() {
                fs::remove_file(&candidate).map_err(|e| {
                    LoggerError::file_rotation(
                        candidate.display().to_string(),
                        format!("Failed to remove oldest backup: {}", e),
                    )
                })?;
            }
        }
        last -= 1;
    }

    for i in (1..=last).rev() {
        let old_path = backup_path(file, strategy, i);
        let new_path = backup_path(file, strategy, i + 1);
        for (from, to) in [
            (gz_path(&old_path), gz_path(&new_path)),
            (old_path, new_path),
        ] {
            if from.exists() {
                rename_replacing(&from, &to)?;
            }
        }
    }
    Ok(())
}

/// Rename, removing the destination first on platforms where rename does not
/// replace it.
fn rename_replacing(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }
    if to.exists() {
        let _ = fs::remove_file(to);
    }
    fs::rename(from, to).map_err(|e| {
        LoggerError::file_rotation(
            from.display().to_string(),
            format!("Failed to shift backup file: {}", e),
        )
    })
}

/// Gzip `path` to `<path>.gz` through a temporary file; the original is only
/// removed once compression has fully succeeded.
fn compress_file(path: &Path) -> Result<PathBuf> {
    use std::io::{BufReader, BufWriter};

    let gz = gz_path(path);
    let mut temp_os = gz.as_os_str().to_owned();
    temp_os.push(".tmp");
    let temp = PathBuf::from(temp_os);

    let result = (|| -> Result<()> {
        let input = File::open(path).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to open file for compression: {}", path.display()),
                e,
            )
        })?;
        let mut reader = BufReader::with_capacity(64 * 1024, input);

        let output = File::create(&temp).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to create temporary compressed file: {}", temp.display()),
                e,
            )
        })?;
        let mut encoder = flate2::write::GzEncoder::new(
            BufWriter::with_capacity(64 * 1024, output),
            flate2::Compression::default(),
        );

        std::io::copy(&mut reader, &mut encoder).map_err(|e| {
            LoggerError::io_operation("compress log file", "Failed to compress data", e)
        })?;
        encoder.finish().map_err(|e| {
            LoggerError::io_operation("compress log file", "Failed to finish compression", e)
        })?;

        fs::rename(&temp, &gz).map_err(|e| {
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to rename compressed file to: {}", gz.display()),
                e,
            )
        })
    })();

    if let Err(e) = result {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    if let Err(e) = fs::remove_file(path) {
        platform::warn(format!(
            "Compression succeeded but failed to remove original file {}: {}",
            path.display(),
            e
        ));
    }
    Ok(gz)
}
