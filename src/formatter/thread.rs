//! Default thread formatter

use super::ThreadFormatter;
use std::thread::Thread;

/// Renders `Thread: <name>`, falling back to the thread id for unnamed threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultThreadFormatter;

impl ThreadFormatter for DefaultThreadFormatter {
    fn format(&self, thread: &Thread) -> String {
        match thread.name() {
            Some(name) => format!("Thread: {}", name),
            None => format!("Thread: {:?}", thread.id()),
        }
    }
}
