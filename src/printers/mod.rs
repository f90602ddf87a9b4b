//! Built-in printers

pub mod console;
pub mod file;

pub use console::ConsolePrinter;
pub use file::{FilePrinter, FilePrinterBuilder};
