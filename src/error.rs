//! Error types
use crate::{paths::InstanceName, uri::SchemaUri};
use serde_json::Value;
use std::{collections::BTreeSet, error, fmt};

/// The error type for schema ingestion.
///
/// Ingestion is atomic: whenever one of these is returned, the validator's
/// schema corpus is left exactly as it was before the call.
#[derive(Debug, PartialEq)]
pub enum SchemaError {
    /// The same canonical URI is bound by an already ingested document.
    AlreadyIngested {
        /// The colliding identifier.
        uri: SchemaUri,
    },
    /// Two sub-schemas of one document resolved to the same canonical URI.
    DuplicateSubschema {
        /// The duplicated identifier.
        uri: SchemaUri,
    },
    /// An `id` or `$ref` value could not be parsed as a URI reference.
    InvalidUri {
        /// The underlying parser error.
        error: url::ParseError,
    },
    /// A `$ref` points inside the ingested document, but no sub-schema with
    /// that identifier exists there.
    MissingLocalReference {
        /// The dangling reference.
        reference: SchemaUri,
    },
    /// The schema references documents that have not been ingested.
    /// Only returned by [`crate::JsonValidator::set_root_schema`];
    /// [`crate::JsonValidator::insert_schema`] reports the same set as data.
    UnresolvedExternal {
        /// Identifiers of the missing documents.
        references: BTreeSet<SchemaUri>,
    },
}

impl error::Error for SchemaError {}

impl From<url::ParseError> for SchemaError {
    #[inline]
    fn from(error: url::ParseError) -> Self {
        SchemaError::InvalidUri { error }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::AlreadyIngested { uri } => {
                write!(f, "schema '{}' is already present in the validator", uri)
            }
            SchemaError::DuplicateSubschema { uri } => {
                write!(f, "sub-schema '{}' occurs more than once in the document", uri)
            }
            SchemaError::InvalidUri { error } => write!(f, "{}", error),
            SchemaError::MissingLocalReference { reference } => {
                write!(
                    f,
                    "sub-schema '{}' is referenced but not defined in its document",
                    reference
                )
            }
            SchemaError::UnresolvedExternal { references } => {
                write!(
                    f,
                    "cannot resolve external schemas: {}",
                    references
                        .iter()
                        .map(|uri| format!("'{}'", uri))
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

/// An error that can occur during validation.
///
/// Rendered as a single descriptive message that leads with the logical
/// name of the offending value, e.g.
/// `root.users[3].age: 1 is less than the minimum of 2`.
#[derive(Debug)]
pub struct ValidationError {
    /// Logical name of the value that failed validation.
    pub name: InstanceName,
    /// The value that failed validation.
    pub instance: Value,
    /// Type of validation error.
    pub kind: ValidationErrorKind,
}

/// Kinds of errors that may happen during validation
#[derive(Debug)]
#[allow(missing_docs)]
pub enum ValidationErrorKind {
    /// The input array contains more items than the positional schemas allow.
    AdditionalItems { limit: usize },
    /// A property is not described by the schema and additional properties are forbidden.
    AdditionalProperties { property: String },
    /// The input value doesn't match any of the specified options.
    Enum { options: Value },
    /// A `patternProperties` key is not a usable regular expression.
    InvalidRegex { pattern: String, error: String },
    /// Too many items in an array.
    MaxItems { limit: u64 },
    /// Value is too large.
    Maximum { limit: f64, exclusive: bool },
    /// String is too long.
    MaxLength { limit: u64 },
    /// Too many properties in an object.
    MaxProperties { limit: u64 },
    /// Too few items in an array.
    MinItems { limit: u64 },
    /// Value is too small.
    Minimum { limit: f64, exclusive: bool },
    /// String is too short.
    MinLength { limit: u64 },
    /// Not enough properties in an object.
    MinProperties { limit: u64 },
    /// When some number is not a multiple of another number.
    MultipleOf { multiple_of: f64 },
    /// `validate` was called before a root schema was ingested.
    NoRootSchema,
    /// The schema uses a keyword this validator refuses to interpret.
    NotImplemented { keyword: String },
    /// When a required property is missing.
    Required { property: String },
    /// When the input value doesn't match the required type(s).
    Type { expected: Value },
    /// When the input array has non-unique elements.
    UniqueItems,
    /// A `$ref` does not resolve to any ingested sub-schema.
    UnresolvedReference { reference: String },
}

/// Shortcuts for creation of specific error kinds.
impl ValidationError {
    pub(crate) fn additional_items(
        name: InstanceName,
        instance: &Value,
        limit: usize,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::AdditionalItems { limit },
        }
    }
    pub(crate) fn additional_properties(
        name: InstanceName,
        instance: &Value,
        property: String,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::AdditionalProperties { property },
        }
    }
    pub(crate) fn enumeration(
        name: InstanceName,
        instance: &Value,
        options: &Value,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::Enum {
                options: options.clone(),
            },
        }
    }
    pub(crate) fn invalid_regex(
        name: InstanceName,
        pattern: &str,
        error: String,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: Value::Null,
            kind: ValidationErrorKind::InvalidRegex {
                pattern: pattern.to_string(),
                error,
            },
        }
    }
    pub(crate) fn max_items(name: InstanceName, instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MaxItems { limit },
        }
    }
    pub(crate) fn maximum(
        name: InstanceName,
        instance: &Value,
        limit: f64,
        exclusive: bool,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::Maximum { limit, exclusive },
        }
    }
    pub(crate) fn max_length(name: InstanceName, instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MaxLength { limit },
        }
    }
    pub(crate) fn max_properties(
        name: InstanceName,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MaxProperties { limit },
        }
    }
    pub(crate) fn min_items(name: InstanceName, instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MinItems { limit },
        }
    }
    pub(crate) fn minimum(
        name: InstanceName,
        instance: &Value,
        limit: f64,
        exclusive: bool,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::Minimum { limit, exclusive },
        }
    }
    pub(crate) fn min_length(name: InstanceName, instance: &Value, limit: u64) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MinLength { limit },
        }
    }
    pub(crate) fn min_properties(
        name: InstanceName,
        instance: &Value,
        limit: u64,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MinProperties { limit },
        }
    }
    pub(crate) fn multiple_of(
        name: InstanceName,
        instance: &Value,
        multiple_of: f64,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::MultipleOf { multiple_of },
        }
    }
    pub(crate) fn no_root_schema() -> ValidationError {
        ValidationError {
            name: InstanceName::default(),
            instance: Value::Null,
            kind: ValidationErrorKind::NoRootSchema,
        }
    }
    pub(crate) fn not_implemented(name: InstanceName, keyword: &str) -> ValidationError {
        ValidationError {
            name,
            instance: Value::Null,
            kind: ValidationErrorKind::NotImplemented {
                keyword: keyword.to_string(),
            },
        }
    }
    pub(crate) fn required(
        name: InstanceName,
        instance: &Value,
        property: String,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::Required { property },
        }
    }
    pub(crate) fn type_mismatch(
        name: InstanceName,
        instance: &Value,
        expected: Value,
    ) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::Type { expected },
        }
    }
    pub(crate) fn unique_items(name: InstanceName, instance: &Value) -> ValidationError {
        ValidationError {
            name,
            instance: instance.clone(),
            kind: ValidationErrorKind::UniqueItems,
        }
    }
    pub(crate) fn unresolved_reference(name: InstanceName, reference: String) -> ValidationError {
        ValidationError {
            name,
            instance: Value::Null,
            kind: ValidationErrorKind::UnresolvedReference { reference },
        }
    }
}

impl error::Error for ValidationError {}

/// Textual representation of various validation errors.
impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        match &self.kind {
            ValidationErrorKind::AdditionalItems { limit } => {
                // Safe to unwrap: the kind is only reported for arrays with
                // more items than expected
                let extras: Vec<&Value> = self
                    .instance
                    .as_array()
                    .expect("Always valid")
                    .iter()
                    .skip(*limit)
                    .collect();
                let verb = if extras.len() == 1 { "was" } else { "were" };
                write!(
                    f,
                    "additional items are not allowed ({} {} unexpected)",
                    extras
                        .iter()
                        .map(|x| x.to_string())
                        .collect::<Vec<String>>()
                        .join(", "),
                    verb
                )
            }
            ValidationErrorKind::AdditionalProperties { property } => {
                write!(f, "unknown property '{}'", property)
            }
            ValidationErrorKind::Enum { options } => {
                write!(f, "'{}' is not one of '{}'", self.instance, options)
            }
            ValidationErrorKind::InvalidRegex { pattern, error } => {
                write!(f, "'{}' is not a usable regular expression: {}", pattern, error)
            }
            ValidationErrorKind::MaxItems { limit } => write!(
                f,
                "{} has more than {} item{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::Maximum { limit, exclusive } => write!(
                f,
                "{} is greater than {}the maximum of {}",
                self.instance,
                if *exclusive { "or equal to " } else { "" },
                limit
            ),
            ValidationErrorKind::MaxLength { limit } => write!(
                f,
                "'{}' is longer than {} character{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MaxProperties { limit } => write!(
                f,
                "{} has more than {} propert{}",
                self.instance,
                limit,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MinItems { limit } => write!(
                f,
                "{} has less than {} item{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::Minimum { limit, exclusive } => write!(
                f,
                "{} is less than {}the minimum of {}",
                self.instance,
                if *exclusive { "or equal to " } else { "" },
                limit
            ),
            ValidationErrorKind::MinLength { limit } => write!(
                f,
                "'{}' is shorter than {} character{}",
                self.instance,
                limit,
                if *limit == 1 { "" } else { "s" }
            ),
            ValidationErrorKind::MinProperties { limit } => write!(
                f,
                "{} has less than {} propert{}",
                self.instance,
                limit,
                if *limit == 1 { "y" } else { "ies" }
            ),
            ValidationErrorKind::MultipleOf { multiple_of } => {
                write!(f, "{} is not a multiple of {}", self.instance, multiple_of)
            }
            ValidationErrorKind::NoRootSchema => {
                write!(f, "no root schema has been inserted, cannot validate")
            }
            ValidationErrorKind::NotImplemented { keyword } => {
                write!(f, "'{}' is not yet implemented", keyword)
            }
            ValidationErrorKind::Required { property } => {
                write!(f, "'{}' is a required property", property)
            }
            ValidationErrorKind::Type { expected } => match expected {
                Value::Array(types) => write!(
                    f,
                    "'{}' is not of types {}",
                    self.instance,
                    types
                        .iter()
                        .map(|t| match t {
                            Value::String(tag) => format!("'{}'", tag),
                            other => other.to_string(),
                        })
                        .collect::<Vec<String>>()
                        .join(", ")
                ),
                Value::String(tag) => {
                    write!(f, "'{}' is not of type '{}'", self.instance, tag)
                }
                other => write!(f, "'{}' is not of type '{}'", self.instance, other),
            },
            ValidationErrorKind::UniqueItems => {
                write!(f, "{} has non-unique elements", self.instance)
            }
            ValidationErrorKind::UnresolvedReference { reference } => write!(
                f,
                "schema reference '{}' not found; make sure all schemas have been inserted before validation",
                reference
            ),
        }
    }
}
