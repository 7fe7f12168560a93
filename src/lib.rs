//! verischema - schema declarations and a first-failure validator for
//! decoded JSON data

pub mod observability;
pub mod schema;

pub use schema::{decode, verify, verify_str, Schema, ValidationError, Validator};
