//! Schema model and validator
//!
//! # Design Principles
//!
//! - Schemas are closed sum types, built once and read-only afterwards
//! - Validation is a synchronous recursive walk with no shared state
//! - First failure wins unless the caller asks to collect all failures
//! - Failures are typed values; nothing panics on bad data
//! - Raw text must pass the `{...}` bracket check before decoding
//! - Numbers are compared digit by digit, never rounded

mod config;
mod decode;
mod errors;
mod number;
mod types;
mod validator;

pub use config::ValidatorConfig;
pub use decode::decode;
pub use errors::{ErrorKind, SchemaError, SchemaResult, ValidationError, ValidationResult};
pub use types::{
    ArraySchema, BoolSchema, MessageOverrides, NumberSchema, ObjectSchema, Pattern, Schema,
    SchemaKind, StringSchema,
};
pub use validator::{verify, verify_str, Validator};
