//! Raw text decoding in front of `serde_json`
//!
//! Text must begin with `{` and end with `}` before the codec sees it.
//! No whitespace is trimmed.

use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationResult};

/// Decodes `text` into a keyed mapping.
///
/// # Errors
///
/// Returns `MalformedInput` with the fixed message `json Error` when the
/// bracket check fails, or with the codec's reason appended when the text
/// is bracketed but not a valid JSON object.
pub fn decode(text: &str) -> ValidationResult<Map<String, Value>> {
    if !text.starts_with('{') || !text.ends_with('}') {
        return Err(ValidationError::malformed_input(None));
    }

    serde_json::from_str(text).map_err(|e| ValidationError::malformed_input(Some(&e.to_string())))
}
