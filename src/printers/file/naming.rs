//! File name generators

use crate::core::LogLevel;
use chrono::{Local, TimeZone};

/// Decides which file a log is written to.
pub trait FileNameGenerator: Send + Sync {
    /// Whether the generated name can differ between logs. A changeless
    /// generator is only asked once per opened file.
    fn is_file_name_changeable(&self) -> bool;

    fn generate_file_name(&self, level: LogLevel, time_millis: i64) -> String;
}

/// Always the same file name.
#[derive(Debug, Clone)]
pub struct ChangelessFileNameGenerator {
    file_name: String,
}

impl ChangelessFileNameGenerator {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl Default for ChangelessFileNameGenerator {
    fn default() -> Self {
        Self::new("log")
    }
}

impl FileNameGenerator for ChangelessFileNameGenerator {
    fn is_file_name_changeable(&self) -> bool {
        false
    }

    fn generate_file_name(&self, _level: LogLevel, _time_millis: i64) -> String {
        self.file_name.clone()
    }
}

/// One file per local calendar day, named `yyyy-MM-dd`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateFileNameGenerator;

impl FileNameGenerator for DateFileNameGenerator {
    fn is_file_name_changeable(&self) -> bool {
        true
    }

    fn generate_file_name(&self, _level: LogLevel, time_millis: i64) -> String {
        match Local.timestamp_millis_opt(time_millis).single() {
            Some(time) => time.format("%Y-%m-%d").to_string(),
            None => "unknown-date".to_string(),
        }
    }
}

/// One file per level, named after the level, e.g. `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelFileNameGenerator;

impl FileNameGenerator for LevelFileNameGenerator {
    fn is_file_name_changeable(&self) -> bool {
        true
    }

    fn generate_file_name(&self, level: LogLevel, _time_millis: i64) -> String {
        level.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changeless() {
        let generator = ChangelessFileNameGenerator::default();
        assert!(!generator.is_file_name_changeable());
        assert_eq!(generator.generate_file_name(LogLevel::ERROR, 0), "log");
    }

    #[test]
    fn test_date() {
        let millis = Local
            .with_ymd_and_hms(2024, 7, 1, 12, 0, 0)
            .single()
            .unwrap()
            .timestamp_millis();
        let generator = DateFileNameGenerator;
        assert!(generator.is_file_name_changeable());
        assert_eq!(generator.generate_file_name(LogLevel::INFO, millis), "2024-07-01");
    }

    #[test]
    fn test_level() {
        let generator = LevelFileNameGenerator;
        assert_eq!(generator.generate_file_name(LogLevel::WARN, 0), "WARN");
        assert_eq!(generator.generate_file_name(LogLevel::new(9), 0), "LEVEL9");
    }
}
