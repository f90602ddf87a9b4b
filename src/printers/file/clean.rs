//! Retention strategies for files in the log folder

use crate::core::platform;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

pub trait CleanStrategy: Send + Sync {
    /// Whether `file` should be deleted.
    fn should_clean(&self, file: &Path) -> bool;
}

/// Keeps every file.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCleanStrategy;

impl CleanStrategy for NeverCleanStrategy {
    fn should_clean(&self, _file: &Path) -> bool {
        false
    }
}

/// Deletes files last modified more than `max_age` ago.
#[derive(Debug, Clone, Copy)]
pub struct FileLastModifiedCleanStrategy {
    max_age: Duration,
}

impl FileLastModifiedCleanStrategy {
    pub fn new(max_age: Duration) -> Self {
        Self { max_age }
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }
}

impl CleanStrategy for FileLastModifiedCleanStrategy {
    fn should_clean(&self, file: &Path) -> bool {
        let modified = match fs::metadata(file).and_then(|meta| meta.modified()) {
            Ok(modified) => modified,
            Err(_) => return false,
        };
        SystemTime::now()
            .duration_since(modified)
            .map(|age| age > self.max_age)
            .unwrap_or(false)
    }
}

/// Delete every regular file in `folder` that `strategy` selects, except
/// `active`. Returns the number of deleted files.
pub(crate) fn clean_folder(folder: &Path, active: &Path, strategy: &dyn CleanStrategy) -> usize {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            platform::error(format!(
                "Failed to list log folder {}: {}",
                folder.display(),
                e
            ));
            return 0;
        }
    };

    let mut deleted = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path == active || !path.is_file() || !strategy.should_clean(&path) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => deleted += 1,
            Err(e) => platform::warn(format!(
                "Failed to clean log file {}: {}",
                path.display(),
                e
            )),
        }
    }
    deleted
}
