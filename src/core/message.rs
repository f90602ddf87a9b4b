//! Runtime placeholder substitution for format strings known only at runtime
//!
//! `{}` consumes the next argument; `{{` and `}}` are literal braces. Argument
//! count mismatches and stray braces never panic: they produce a diagnostic
//! string naming the problem and the original format.

use std::fmt::{Display, Write};

/// Substitute `args` into `format`.
pub fn format_message(format: &str, args: &[&dyn Display]) -> String {
    match substitute(format, args) {
        Ok(message) => message,
        Err(problem) => malformed(format, &problem),
    }
}

fn malformed(format: &str, problem: &str) -> String {
    format!("<malformed log message: {}> {}", problem, format)
}

fn substitute(format: &str, args: &[&dyn Display]) -> Result<String, String> {
    let mut out = String::with_capacity(format.len() + args.len() * 8);
    let mut chars = format.chars().peekable();
    let mut used = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' if chars.peek() == Some(&'}') => {
                chars.next();
                let arg = args.get(used).ok_or_else(|| {
                    format!("missing argument for placeholder #{}", used + 1)
                })?;
                // Writing to a String cannot fail
                let _ = write!(out, "{}", arg);
                used += 1;
            }
            '{' => return Err("unsupported placeholder, only {} is allowed".to_string()),
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err("unmatched '}'".to_string()),
            other => out.push(other),
        }
    }

    if used != args.len() {
        return Err(format!(
            "{} placeholders but {} arguments",
            used,
            args.len()
        ));
    }
    Ok(out)
}
