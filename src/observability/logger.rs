//! Structured JSON logger
//!
//! - One log line = one JSON object
//! - `event` first, then `severity`, then fields sorted by key
//! - Synchronous, no buffering
//! - ERROR goes to stderr, everything else to stdout, unless a writer sink
//!   is supplied

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless JSON line logger
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        if severity >= Severity::Error {
            Self::log_to_writer(severity, event, fields, &mut io::stderr());
        } else {
            Self::log_to_writer(severity, event, fields, &mut io::stdout());
        }
    }

    /// Writes one event line to `writer`
    pub fn log_to_writer<W: Write + ?Sized>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let line = Self::render(severity, event, fields);

        // Logging never fails the caller
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    /// Renders one event as a newline-terminated JSON object
    pub fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(128);

        output.push_str("{\"event\":");
        push_json_string(&mut output, event);
        output.push_str(",\"severity\":\"");
        output.push_str(severity.as_str());
        output.push('"');

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push(',');
            push_json_string(&mut output, key);
            output.push(':');
            push_json_string(&mut output, value);
        }

        output.push_str("}\n");
        output
    }
}

/// Destination of log lines
#[derive(Clone, Default)]
pub enum LogSink {
    /// stdout, or stderr for ERROR
    #[default]
    Stdio,
    /// A shared writer, e.g. a file or an in-memory buffer
    Writer(Arc<Mutex<dyn Write + Send>>),
}

impl LogSink {
    /// Sink writing into `writer`
    pub fn writer<W: Write + Send + 'static>(writer: Arc<Mutex<W>>) -> Self {
        LogSink::Writer(writer)
    }

    /// Writes one event line to this sink
    pub fn log(&self, severity: Severity, event: &str, fields: &[(&str, &str)]) {
        match self {
            LogSink::Stdio => Logger::log(severity, event, fields),
            LogSink::Writer(writer) => {
                // A poisoned writer drops the line rather than failing the caller
                if let Ok(mut writer) = writer.lock() {
                    Logger::log_to_writer(severity, event, fields, &mut *writer);
                }
            }
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogSink::Stdio => write!(f, "LogSink::Stdio"),
            LogSink::Writer(_) => write!(f, "LogSink::Writer(..)"),
        }
    }
}

fn push_json_string(output: &mut String, s: &str) {
    match serde_json::to_string(s) {
        Ok(quoted) => output.push_str(&quoted),
        Err(_) => output.push_str("\"\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn test_log_json_format() {
        let output = Logger::render(Severity::Info, "TEST_EVENT", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "TEST_EVENT");
        assert_eq!(parsed["severity"], "INFO");
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_fields_sorted_after_event_and_severity() {
        let output = Logger::render(
            Severity::Warn,
            "VALIDATION_FAILED",
            &[("path", "$.a"), ("code", "SCHEMA_TYPE_MISMATCH")],
        );
        assert_eq!(
            output,
            "{\"event\":\"VALIDATION_FAILED\",\"severity\":\"WARN\",\"code\":\"SCHEMA_TYPE_MISMATCH\",\"path\":\"$.a\"}\n"
        );
    }

    #[test]
    fn test_values_are_escaped() {
        let output = Logger::render(Severity::Info, "E", &[("msg", "say \"hi\"\n")]);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["msg"], "say \"hi\"\n");
    }

    #[test]
    fn test_writer_sink_collects_lines() {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let sink = LogSink::writer(Arc::clone(&buffer));

        sink.log(Severity::Info, "FIRST", &[]);
        sink.log(Severity::Error, "SECOND", &[("k", "v")]);

        let text = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("\"severity\":\"ERROR\""));
    }

    #[test]
    fn test_log_to_writer() {
        let mut buffer = Vec::new();
        Logger::log_to_writer(Severity::Trace, "E", &[("k", "v")], &mut buffer);
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("\"k\":\"v\""));
    }
}
