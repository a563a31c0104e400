use serde_json::Value;
use std::fmt;

/// The runtime kind of an instance value, used to dispatch validation and to
/// match the `type` keyword without repeated string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    pub(crate) fn of(value: &Value) -> PrimitiveType {
        match value {
            Value::Array(_) => PrimitiveType::Array,
            Value::Bool(_) => PrimitiveType::Boolean,
            Value::Null => PrimitiveType::Null,
            Value::Number(number) => {
                if number.is_f64() {
                    PrimitiveType::Number
                } else {
                    PrimitiveType::Integer
                }
            }
            Value::Object(_) => PrimitiveType::Object,
            Value::String(_) => PrimitiveType::String,
        }
    }

    /// Whether a `type` keyword tag accepts this kind of value.
    ///
    /// Integers additionally satisfy `number`; a float never satisfies
    /// `integer`.
    pub(crate) fn matches_tag(self, tag: &str) -> bool {
        match self {
            PrimitiveType::Integer => tag == "integer" || tag == "number",
            _ => tag == self.as_str(),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Array => "array",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Null => "null",
            PrimitiveType::Number => "number",
            PrimitiveType::Object => "object",
            PrimitiveType::String => "string",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
