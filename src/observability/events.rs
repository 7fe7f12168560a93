//! Observable validation events

use std::fmt;

/// Events emitted by the validator when logging is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A validation run started
    ValidationBegin,
    /// The data conformed to the schema
    ValidationPassed,
    /// The data violated the schema
    ValidationFailed,
    /// Raw text was rejected before validation
    InputRejected,
}

impl Event {
    /// Returns the event name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ValidationBegin => "VALIDATION_BEGIN",
            Event::ValidationPassed => "VALIDATION_PASSED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::InputRejected => "INPUT_REJECTED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
