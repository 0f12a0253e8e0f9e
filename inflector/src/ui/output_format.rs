//! Formatting of status and error messages written to stderr.
//!
//! Messages are colored only when the destination supports it; tests and
//! pipes receive plain text.
//! License: MIT OR Apache-2.0

use std::io::{self, Write};

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Severity of a status message, selecting its prefix and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warn,
    Error,
}

impl MessageKind {
    fn prefix(self) -> &'static str {
        match self {
            MessageKind::Info => "info",
            MessageKind::Warn => "warning",
            MessageKind::Error => "error",
        }
    }
}

/// Writes `[prefix] message` to `writer`, colored when `supports_color` is set.
pub fn print_message<W: Write>(
    writer: &mut W,
    kind: MessageKind,
    message: &str,
    supports_color: bool,
) -> io::Result<()> {
    let prefix = kind.prefix();
    if supports_color {
        match kind {
            MessageKind::Info => writeln!(writer, "[{}] {}", prefix.cyan(), message),
            MessageKind::Warn => writeln!(writer, "[{}] {}", prefix.yellow(), message),
            MessageKind::Error => writeln!(writer, "[{}] {}", prefix.red().bold(), message),
        }
    } else {
        writeln!(writer, "[{}] {}", prefix, message)
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = print_message(&mut stderr.lock(), MessageKind::Info, msg.as_ref(), supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = print_message(&mut stderr.lock(), MessageKind::Warn, msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let stderr = io::stderr();
    let supports_color = stderr.is_terminal();
    let _ = print_message(&mut stderr.lock(), MessageKind::Error, msg.as_ref(), supports_color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let mut buf = Vec::new();
        print_message(&mut buf, MessageKind::Error, "boom", false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "[error] boom\n");
    }

    #[test]
    fn test_colored_output_keeps_message() {
        let mut buf = Vec::new();
        print_message(&mut buf, MessageKind::Warn, "careful", true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.ends_with("careful\n"));
    }
}
