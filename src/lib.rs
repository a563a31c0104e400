//! # json-validator
//!
//! A crate for validating JSON documents against JSON Schema Draft 4. Schemas
//! are ingested into a corpus where every sub-schema carries a canonical URI,
//! so `$ref` — local, cross-document, even cyclic — resolves by lookup during
//! validation.
//!
//! ## Usage Examples:
//! A self-contained schema only needs the root to be set:
//! ```rust
//! use json_validator::JsonValidator;
//! use serde_json::json;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": {
//!         "name": {"type": "string"},
//!         "age": {"type": "number", "minimum": 2, "maximum": 200}
//!     },
//!     "required": ["name", "age"]
//! });
//! let mut validator = JsonValidator::new();
//! validator.set_root_schema(&schema).expect("A valid schema");
//!
//! let mut instance = json!({"name": "Albert", "age": 42});
//! assert!(validator.validate(&mut instance).is_ok());
//!
//! let mut incomplete = json!({"age": 42});
//! let error = validator.validate(&mut incomplete).unwrap_err();
//! assert_eq!(error.to_string(), "root: 'name' is a required property");
//! ```
//!
//! Schemas referencing other documents are ingested until no external
//! references remain; [`JsonValidator::insert_schema`] returns the still
//! missing identifiers instead of failing:
//! ```rust
//! use json_validator::{JsonValidator, SchemaUri};
//! use serde_json::json;
//!
//! let root = json!({"$ref": "http://other/s2#"});
//! let other = json!({"type": "integer"});
//!
//! let mut validator = JsonValidator::new();
//! let missing = validator
//!     .insert_schema(&root, SchemaUri::root())
//!     .expect("A valid schema");
//! assert_eq!(missing.iter().map(ToString::to_string).collect::<Vec<_>>(), ["http://other/s2#"]);
//!
//! let uri = SchemaUri::parse("http://other/s2#").expect("A valid URI");
//! assert!(validator.insert_schema(&other, uri).expect("A valid schema").is_empty());
//! assert!(validator.insert_schema(&root, SchemaUri::root()).expect("A valid schema").is_empty());
//!
//! assert!(validator.validate(&mut json!(42)).is_ok());
//! ```
//!
//! Validation fails fast: the returned error describes the first violation
//! and names its location within the instance (`root.users[3].age`).
#![warn(
    clippy::cast_possible_truncation,
    clippy::doc_markdown,
    clippy::explicit_iter_loop,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::needless_pass_by_value,
    clippy::print_stdout,
    clippy::redundant_closure,
    clippy::trivially_copy_pass_by_ref,
    clippy::missing_const_for_fn,
    clippy::unseparated_literal_suffix,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unreachable_pub,
    variant_size_differences
)]
#![allow(clippy::unnecessary_wraps, clippy::upper_case_acronyms)]
#![cfg_attr(not(test), allow(clippy::unwrap_used))]
mod ecma;
pub mod error;
mod helpers;
pub mod paths;
mod primitive_type;
mod resolver;
mod store;
pub mod uri;
mod validator;

pub use error::{SchemaError, ValidationError, ValidationErrorKind};
pub use paths::InstanceName;
pub use uri::SchemaUri;
pub use validator::JsonValidator;

use serde_json::Value;

/// A shortcut for validating `instance` against `schema`.
/// ```rust
/// use json_validator::is_valid;
/// use serde_json::json;
///
/// let schema = json!({"maxLength": 5});
/// let instance = json!("foo");
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// This function panics if an invalid schema is passed.
#[must_use]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let mut validator = JsonValidator::new();
    validator.set_root_schema(schema).expect("Invalid schema");
    validator.validate(&mut instance.clone()).is_ok()
}
