//! Log level definitions
//!
//! Levels are plain integers so that callers may log at custom levels. The
//! named levels sit strictly between the two sentinels [`LogLevel::ALL`] and
//! [`LogLevel::NONE`], which makes `level >= threshold` the only filtering rule.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogLevel(i32);

impl LogLevel {
    /// Passes every threshold comparison.
    pub const ALL: LogLevel = LogLevel(i32::MIN);
    pub const VERBOSE: LogLevel = LogLevel(2);
    pub const DEBUG: LogLevel = LogLevel(3);
    pub const INFO: LogLevel = LogLevel(4);
    pub const WARN: LogLevel = LogLevel(5);
    pub const ERROR: LogLevel = LogLevel(6);
    /// Fails every threshold comparison.
    pub const NONE: LogLevel = LogLevel(i32::MAX);

    #[must_use]
    pub const fn new(value: i32) -> Self {
        LogLevel(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether a message at `self` passes the `threshold`.
    #[inline]
    #[must_use]
    pub fn passes(self, threshold: LogLevel) -> bool {
        self >= threshold
    }

    /// Full level name, e.g. `INFO`. Custom levels render as `LEVEL<n>`.
    #[must_use]
    pub fn name(self) -> String {
        match self {
            LogLevel::ALL => "ALL".to_string(),
            LogLevel::VERBOSE => "VERBOSE".to_string(),
            LogLevel::DEBUG => "DEBUG".to_string(),
            LogLevel::INFO => "INFO".to_string(),
            LogLevel::WARN => "WARN".to_string(),
            LogLevel::ERROR => "ERROR".to_string(),
            LogLevel::NONE => "NONE".to_string(),
            LogLevel(value) => format!("LEVEL{}", value),
        }
    }

    /// Short level name, e.g. `I`.
    ///
    /// Custom levels are expressed relative to the nearest named level:
    /// `V-1` is one below VERBOSE, `E+2` is two above ERROR.
    #[must_use]
    pub fn short_name(self) -> String {
        match self {
            LogLevel::ALL => "A".to_string(),
            LogLevel::VERBOSE => "V".to_string(),
            LogLevel::DEBUG => "D".to_string(),
            LogLevel::INFO => "I".to_string(),
            LogLevel::WARN => "W".to_string(),
            LogLevel::ERROR => "E".to_string(),
            LogLevel::NONE => "N".to_string(),
            LogLevel(value) if value < LogLevel::VERBOSE.0 => {
                format!("V-{}", i64::from(LogLevel::VERBOSE.0) - i64::from(value))
            }
            LogLevel(value) => {
                format!("E+{}", i64::from(value) - i64::from(LogLevel::ERROR.0))
            }
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(self) -> colored::Color {
        use colored::Color::*;
        match self {
            level if level >= LogLevel::ERROR => Red,
            LogLevel::WARN => Yellow,
            LogLevel::INFO => Green,
            LogLevel::DEBUG => Blue,
            _ => BrightBlack,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::ALL
    }
}

impl From<i32> for LogLevel {
    fn from(value: i32) -> Self {
        LogLevel(value)
    }
}

impl From<LogLevel> for i32 {
    fn from(level: LogLevel) -> Self {
        level.0
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<i32>() {
            return Ok(LogLevel(value));
        }
        match trimmed.to_uppercase().as_str() {
            "ALL" => Ok(LogLevel::ALL),
            "VERBOSE" | "V" => Ok(LogLevel::VERBOSE),
            "DEBUG" | "D" => Ok(LogLevel::DEBUG),
            "INFO" | "I" => Ok(LogLevel::INFO),
            "WARN" | "WARNING" | "W" => Ok(LogLevel::WARN),
            "ERROR" | "E" => Ok(LogLevel::ERROR),
            "NONE" => Ok(LogLevel::NONE),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

impl Serialize for LogLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.0)
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Value(i32),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Value(value) => Ok(LogLevel(value)),
            Repr::Name(name) => name.parse().map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_levels_are_ordered() {
        assert!(LogLevel::ALL < LogLevel::VERBOSE);
        assert!(LogLevel::VERBOSE < LogLevel::DEBUG);
        assert!(LogLevel::DEBUG < LogLevel::INFO);
        assert!(LogLevel::INFO < LogLevel::WARN);
        assert!(LogLevel::WARN < LogLevel::ERROR);
        assert!(LogLevel::ERROR < LogLevel::NONE);
    }

    #[test]
    fn test_sentinels() {
        assert!(LogLevel::new(i32::MIN).passes(LogLevel::ALL));
        assert!(LogLevel::new(-1).passes(LogLevel::ALL));
        assert!(!LogLevel::new(i32::MAX - 1).passes(LogLevel::NONE));
        assert!(!LogLevel::ERROR.passes(LogLevel::NONE));
    }

    #[test]
    fn test_short_names() {
        assert_eq!(LogLevel::INFO.short_name(), "I");
        assert_eq!(LogLevel::new(1).short_name(), "V-1");
        assert_eq!(LogLevel::new(-1).short_name(), "V-3");
        assert_eq!(LogLevel::new(9).short_name(), "E+3");
    }

    #[test]
    fn test_names() {
        assert_eq!(LogLevel::WARN.name(), "WARN");
        assert_eq!(LogLevel::new(7).name(), "LEVEL7");
        assert_eq!(LogLevel::NONE.to_string(), "NONE");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("info".parse::<LogLevel>(), Ok(LogLevel::INFO));
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::WARN));
        assert_eq!("7".parse::<LogLevel>(), Ok(LogLevel::new(7)));
        assert_eq!("-3".parse::<LogLevel>(), Ok(LogLevel::new(-3)));
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&LogLevel::INFO).unwrap(), "4");
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::DEBUG);
        let level: LogLevel = serde_json::from_str("8").unwrap();
        assert_eq!(level, LogLevel::new(8));
    }
}
