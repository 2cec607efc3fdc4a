//! Tagged argument and return values.
//!
//! A [`Value`] carries its own discriminant. On the wire the discriminant is
//! dropped and only the literal data travels (numbers, strings, arrays); the
//! declared [`TypeName`] recorded next to each argument is what brings the
//! variant back. Reconstruction is a closed mapping: a type name outside this
//! module's set is rejected rather than resolved.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::codec::{CodecError, MessageCodec};

/// Closed set of parameter and return types a contract may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeName {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit float.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 text.
    Text,
    /// Ordered sequence of text values.
    TextArray,
    /// Ordered sequence of 32-bit integers.
    Int32Array,
}

impl TypeName {
    /// Every supported type, in wire-name order.
    pub const ALL: [TypeName; 7] = [
        TypeName::Int32,
        TypeName::Int64,
        TypeName::Float64,
        TypeName::Bool,
        TypeName::Text,
        TypeName::TextArray,
        TypeName::Int32Array,
    ];

    /// Name written into `typeName` fields on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeName::Int32 => "i32",
            TypeName::Int64 => "i64",
            TypeName::Float64 => "f64",
            TypeName::Bool => "bool",
            TypeName::Text => "string",
            TypeName::TextArray => "string[]",
            TypeName::Int32Array => "i32[]",
        }
    }

    /// Rebuild a value of this type from an erased payload.
    ///
    /// The payload is re-encoded through `codec` and decoded as this type's
    /// Rust representation, so a number never turns into text and a single
    /// string never turns into an array.
    pub fn reconstruct<C: MessageCodec>(
        &self,
        codec: &C,
        payload: &serde_json::Value,
    ) -> Result<Value, CodecError> {
        let text = codec.encode(payload)?;
        let value = match self {
            TypeName::Int32 => Value::Int32(codec.decode(&text)?),
            TypeName::Int64 => Value::Int64(codec.decode(&text)?),
            TypeName::Float64 => Value::Float64(codec.decode(&text)?),
            TypeName::Bool => Value::Bool(codec.decode(&text)?),
            TypeName::Text => Value::Text(codec.decode(&text)?),
            TypeName::TextArray => Value::TextArray(codec.decode(&text)?),
            TypeName::Int32Array => Value::Int32Array(codec.decode(&text)?),
        };
        Ok(value)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a type name is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported type name '{0}'")]
pub struct UnsupportedType(pub String);

impl FromStr for TypeName {
    type Err = UnsupportedType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TypeName::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnsupportedType(s.to_string()))
    }
}

/// A concrete argument or return value.
///
/// Serializes without its discriminant (`#[serde(untagged)]`), which is the
/// erased payload form stored in call descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 text.
    Text(String),
    /// Ordered sequence of text values.
    TextArray(Vec<String>),
    /// Ordered sequence of 32-bit integers.
    Int32Array(Vec<i32>),
}

impl Value {
    /// Discriminant of this value.
    pub fn type_name(&self) -> TypeName {
        match self {
            Value::Int32(_) => TypeName::Int32,
            Value::Int64(_) => TypeName::Int64,
            Value::Float64(_) => TypeName::Float64,
            Value::Bool(_) => TypeName::Bool,
            Value::Text(_) => TypeName::Text,
            Value::TextArray(_) => TypeName::TextArray,
            Value::Int32Array(_) => TypeName::Int32Array,
        }
    }

    /// Drop the discriminant, keeping only the literal data.
    pub fn erase(&self) -> serde_json::Value {
        match self {
            Value::Int32(v) => (*v).into(),
            Value::Int64(v) => (*v).into(),
            Value::Float64(v) => (*v).into(),
            Value::Bool(v) => (*v).into(),
            Value::Text(v) => v.as_str().into(),
            Value::TextArray(v) => v.as_slice().into(),
            Value::Int32Array(v) => v.as_slice().into(),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::TextArray(v)
    }
}

impl From<Vec<&str>> for Value {
    fn from(v: Vec<&str>) -> Self {
        Value::TextArray(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(v: [&str; N]) -> Self {
        Value::TextArray(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Value::Int32Array(v)
    }
}

/// Conversion from a dispatch result into a caller's Rust type.
///
/// `()` stands for a void method and accepts only an absent value.
pub trait FromValue: Sized {
    /// Type the caller expects, `None` for void.
    fn expected() -> Option<TypeName>;

    /// Convert, returning the original input on mismatch.
    fn from_value(value: Option<Value>) -> Result<Self, Option<Value>>;
}

impl FromValue for () {
    fn expected() -> Option<TypeName> {
        None
    }

    fn from_value(value: Option<Value>) -> Result<Self, Option<Value>> {
        match value {
            None => Ok(()),
            other => Err(other),
        }
    }
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn expected() -> Option<TypeName> {
                    Some(TypeName::$variant)
                }

                fn from_value(value: Option<Value>) -> Result<Self, Option<Value>> {
                    match value {
                        Some(Value::$variant(v)) => Ok(v),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

impl_from_value! {
    i32 => Int32,
    i64 => Int64,
    f64 => Float64,
    bool => Bool,
    String => Text,
    Vec<String> => TextArray,
    Vec<i32> => Int32Array,
}
