//! Formatter slots of the message composer
//!
//! Every slot is a narrow single-method trait with a built-in default. Plain
//! closures of the matching shape implement each trait, so
//! `.json_formatter(|s: &str| s.to_uppercase())` works without a wrapper.

pub mod border;
pub mod json;
pub mod object;
pub mod stacktrace;
pub mod thread;
pub mod throwable;
pub mod xml;

pub use border::DefaultBorderFormatter;
pub use json::DefaultJsonFormatter;
pub use object::{ObjectFormatter, ObjectFormatterRegistry};
pub use stacktrace::{DefaultStackTraceFormatter, StackFrame};
pub use thread::DefaultThreadFormatter;
pub use throwable::DefaultThrowableFormatter;
pub use xml::DefaultXmlFormatter;

use std::error::Error;
use std::thread::Thread;

/// Formats a JSON string.
pub trait JsonFormatter: Send + Sync {
    fn format(&self, json: &str) -> String;
}

/// Formats an XML string.
pub trait XmlFormatter: Send + Sync {
    fn format(&self, xml: &str) -> String;
}

/// Formats an error that accompanies a log call.
pub trait ThrowableFormatter: Send + Sync {
    fn format(&self, error: &(dyn Error + 'static)) -> String;
}

/// Formats the identity of the calling thread.
pub trait ThreadFormatter: Send + Sync {
    fn format(&self, thread: &Thread) -> String;
}

/// Formats an already cropped excerpt of the call stack.
pub trait StackTraceFormatter: Send + Sync {
    fn format(&self, frames: &[StackFrame]) -> String;
}

/// Combines the ordered segments of a log into one bordered string.
pub trait BorderFormatter: Send + Sync {
    fn format(&self, segments: &[String]) -> String;
}

impl<F> JsonFormatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, json: &str) -> String {
        self(json)
    }
}

impl<F> XmlFormatter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn format(&self, xml: &str) -> String {
        self(xml)
    }
}

impl<F> ThrowableFormatter for F
where
    F: Fn(&(dyn Error + 'static)) -> String + Send + Sync,
{
    fn format(&self, error: &(dyn Error + 'static)) -> String {
        self(error)
    }
}

impl<F> ThreadFormatter for F
where
    F: Fn(&Thread) -> String + Send + Sync,
{
    fn format(&self, thread: &Thread) -> String {
        self(thread)
    }
}

impl<F> StackTraceFormatter for F
where
    F: Fn(&[StackFrame]) -> String + Send + Sync,
{
    fn format(&self, frames: &[StackFrame]) -> String {
        self(frames)
    }
}

impl<F> BorderFormatter for F
where
    F: Fn(&[String]) -> String + Send + Sync,
{
    fn format(&self, segments: &[String]) -> String {
        self(segments)
    }
}
