//! Flatteners turn a log into the single line written by text printers

use crate::core::{platform, LogLevel};
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, TimeZone};
use std::fmt::Write;

/// Default strftime pattern for the `{d}` token.
pub const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Default pattern of [`PatternFlattener`].
pub const DEFAULT_PATTERN: &str = "{d} {l}/{t}: {m}";

pub trait Flattener: Send + Sync {
    fn flatten(&self, time_millis: i64, level: LogLevel, tag: &str, message: &str) -> String;
}

impl<F> Flattener for F
where
    F: Fn(i64, LogLevel, &str, &str) -> String + Send + Sync,
{
    fn flatten(&self, time_millis: i64, level: LogLevel, tag: &str, message: &str) -> String {
        self(time_millis, level, tag, message)
    }
}

/// `<millis>|<short level>|<tag>|<message>`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFlattener;

impl Flattener for DefaultFlattener {
    fn flatten(&self, time_millis: i64, level: LogLevel, tag: &str, message: &str) -> String {
        format!("{}|{}|{}|{}", time_millis, level.short_name(), tag, message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Date(String),
    LevelShort,
    LevelLong,
    Tag,
    Message,
}

/// Flattens with a pattern of placeholder tokens.
///
/// | token | output |
/// |-------|--------|
/// | `{d}` | local time, [`DEFAULT_DATE_PATTERN`] |
/// | `{d <strftime>}` | local time with the given pattern |
/// | `{l}` | short level name, e.g. `I` |
/// | `{L}` | level name, e.g. `INFO` |
/// | `{t}` | tag |
/// | `{m}` | message |
///
/// Anything else, including unknown `{...}` groups, is copied literally.
#[derive(Debug, Clone)]
pub struct PatternFlattener {
    pattern: String,
    tokens: Vec<Token>,
}

impl PatternFlattener {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let tokens = parse(&pattern);
        Self { pattern, tokens }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternFlattener {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl Flattener for PatternFlattener {
    fn flatten(&self, time_millis: i64, level: LogLevel, tag: &str, message: &str) -> String {
        let mut out = String::with_capacity(self.pattern.len() + message.len() + 32);
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Date(pattern) => {
                    if let Some(time) = Local.timestamp_millis_opt(time_millis).single() {
                        let _ = write!(out, "{}", time.format(pattern));
                    }
                }
                Token::LevelShort => out.push_str(&level.short_name()),
                Token::LevelLong => out.push_str(&level.name()),
                Token::Tag => out.push_str(tag),
                Token::Message => out.push_str(message),
            }
        }
        out
    }
}

fn parse(pattern: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        literal.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            literal.push_str(&rest[open..]);
            rest = "";
            break;
        };

        let body = &after[..close];
        match placeholder(body) {
            Some(token) => {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(token);
            }
            None => literal.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

fn placeholder(body: &str) -> Option<Token> {
    match body {
        "d" => Some(Token::Date(DEFAULT_DATE_PATTERN.to_string())),
        "l" => Some(Token::LevelShort),
        "L" => Some(Token::LevelLong),
        "t" => Some(Token::Tag),
        "m" => Some(Token::Message),
        _ => {
            let date = body.strip_prefix("d ")?.trim();
            if date.is_empty() {
                return Some(Token::Date(DEFAULT_DATE_PATTERN.to_string()));
            }
            if StrftimeItems::new(date).any(|item| matches!(item, Item::Error)) {
                platform::warn(format!("Invalid date pattern '{}', kept as literal text", date));
                return None;
            }
            Some(Token::Date(date.to_string()))
        }
    }
}
