//! Schema and validation error types
//!
//! Validation error codes:
//! - SCHEMA_TYPE_MISMATCH
//! - SCHEMA_PATTERN_MISMATCH
//! - SCHEMA_LENGTH_OUT_OF_RANGE
//! - SCHEMA_NOT_IN_ENUMERATION
//! - SCHEMA_ABOVE_MAXIMUM
//! - SCHEMA_BELOW_MINIMUM
//! - SCHEMA_MALFORMED_INPUT
//! - SCHEMA_ARRAY_ELEMENT_INVALID
//! - SCHEMA_MISSING_REQUIRED
//! - SCHEMA_DEPTH_EXCEEDED
//!
//! Every validation failure is fatal for the call that produced it.
//! Construction problems (bad regex, bad config) are reported separately
//! through [`SchemaError`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kinds of validation failure.
///
/// Also used as the key of per-schema message overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Data kind does not match the schema variant
    TypeMismatch,
    /// String does not match the configured pattern
    PatternMismatch,
    /// String length outside the configured bounds
    LengthOutOfRange,
    /// Number not in the configured enumeration
    NotInEnumeration,
    /// Number greater than the configured maximum
    AboveMaximum,
    /// Number smaller than the configured minimum
    BelowMinimum,
    /// Raw text failed the `{...}` bracket check or could not be decoded
    MalformedInput,
    /// An array element failed its element schema
    ArrayElementInvalid,
    /// A declared required attribute is absent
    MissingRequired,
    /// The walk went deeper than the configured limit
    DepthExceeded,
}

impl ErrorKind {
    /// Returns the stable string code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::TypeMismatch => "SCHEMA_TYPE_MISMATCH",
            ErrorKind::PatternMismatch => "SCHEMA_PATTERN_MISMATCH",
            ErrorKind::LengthOutOfRange => "SCHEMA_LENGTH_OUT_OF_RANGE",
            ErrorKind::NotInEnumeration => "SCHEMA_NOT_IN_ENUMERATION",
            ErrorKind::AboveMaximum => "SCHEMA_ABOVE_MAXIMUM",
            ErrorKind::BelowMinimum => "SCHEMA_BELOW_MINIMUM",
            ErrorKind::MalformedInput => "SCHEMA_MALFORMED_INPUT",
            ErrorKind::ArrayElementInvalid => "SCHEMA_ARRAY_ELEMENT_INVALID",
            ErrorKind::MissingRequired => "SCHEMA_MISSING_REQUIRED",
            ErrorKind::DepthExceeded => "SCHEMA_DEPTH_EXCEEDED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single validation failure.
///
/// `path` locates the failing value in the data (`$` is the root,
/// `$.address.city`, `$.tags[2]`). `ArrayElementInvalid` failures carry the
/// element's own failure as their cause.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ErrorKind,
    path: String,
    message: String,
    cause: Option<Box<ValidationError>>,
}

impl ValidationError {
    fn new(kind: ErrorKind, path: impl Into<String>, message: String) -> Self {
        Self {
            kind,
            path: path.into(),
            message,
            cause: None,
        }
    }

    /// Data kind does not match the schema kind
    pub fn type_mismatch(path: impl Into<String>, expected: &str, actual: &str, value: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            path,
            format!("expected {}, got {} [{}]", expected, actual, value),
        )
    }

    /// String did not match its pattern
    pub fn pattern_mismatch(path: impl Into<String>, value: &str, pattern: &str) -> Self {
        Self::new(
            ErrorKind::PatternMismatch,
            path,
            format!("string [{}] does not match pattern '{}'", value, pattern),
        )
    }

    /// String length outside `[min, max]`
    pub fn length_out_of_range(
        path: impl Into<String>,
        value: &str,
        length: usize,
        min: Option<usize>,
        max: Option<usize>,
    ) -> Self {
        let min = min.map_or_else(|| "0".to_string(), |m| m.to_string());
        let max = max.map_or_else(|| "unbounded".to_string(), |m| m.to_string());
        Self::new(
            ErrorKind::LengthOutOfRange,
            path,
            format!(
                "string [{}] has length {}, allowed range is [{}, {}]",
                value, length, min, max
            ),
        )
    }

    /// Number absent from the enumeration
    pub fn not_in_enumeration(path: impl Into<String>, value: &str, allowed: &str) -> Self {
        Self::new(
            ErrorKind::NotInEnumeration,
            path,
            format!("number [{}] is not in enumeration {}", value, allowed),
        )
    }

    /// Number greater than its maximum
    pub fn above_maximum(path: impl Into<String>, value: &str, maximum: &str) -> Self {
        Self::new(
            ErrorKind::AboveMaximum,
            path,
            format!("number [{}] exceeds maximum {}", value, maximum),
        )
    }

    /// Number smaller than its minimum
    pub fn below_minimum(path: impl Into<String>, value: &str, minimum: &str) -> Self {
        Self::new(
            ErrorKind::BelowMinimum,
            path,
            format!("number [{}] is below minimum {}", value, minimum),
        )
    }

    /// Raw text rejected before or during decoding.
    ///
    /// Without a codec reason the message is the fixed `json Error`.
    pub fn malformed_input(reason: Option<&str>) -> Self {
        let message = match reason {
            Some(reason) => format!("json Error: {}", reason),
            None => "json Error".to_string(),
        };
        Self::new(ErrorKind::MalformedInput, "$", message)
    }

    /// Wraps the failure of the array element at `index`
    pub fn array_element(path: impl Into<String>, index: usize, cause: ValidationError) -> Self {
        let message = format!("element {} is invalid: {}", index, cause.message);
        Self {
            kind: ErrorKind::ArrayElementInvalid,
            path: path.into(),
            message,
            cause: Some(Box::new(cause)),
        }
    }

    /// Declared required attribute is absent
    pub fn missing_required(path: impl Into<String>, attribute: &str) -> Self {
        Self::new(
            ErrorKind::MissingRequired,
            path,
            format!("required attribute '{}' is missing", attribute),
        )
    }

    /// Nesting deeper than the configured limit
    pub fn depth_exceeded(path: impl Into<String>, limit: usize) -> Self {
        Self::new(
            ErrorKind::DepthExceeded,
            path,
            format!("nesting depth exceeds limit {}", limit),
        )
    }

    /// Replaces the message, keeping kind, path and cause
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns the failure kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the string code of the failure kind
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Returns the data path of the failing value
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the human-readable message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the wrapped element failure, if any
    pub fn cause(&self) -> Option<&ValidationError> {
        self.cause.as_deref()
    }

    /// Returns the innermost failure (self when nothing is wrapped)
    pub fn root_cause(&self) -> &ValidationError {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind.code(), self.path, self.message)
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while building schemas or loading validator configuration
#[derive(Debug, Clone, Error)]
pub enum SchemaError {
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;
