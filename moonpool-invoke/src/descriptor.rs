//! Serializable record of one method invocation.

use serde::{Deserialize, Serialize};

use crate::value::{TypeName, Value};

/// One positional argument: declared type name plus erased payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParameterEntry {
    type_name: String,
    value: serde_json::Value,
}

impl ParameterEntry {
    /// Build an entry from a raw type name and payload.
    pub fn new(type_name: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            type_name: type_name.into(),
            value,
        }
    }

    /// Build an entry for a declared type, erasing `value`.
    pub fn typed(declared: TypeName, value: &Value) -> Self {
        Self::new(declared.as_str(), value.erase())
    }

    /// Declared static type of the parameter.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Untyped literal data.
    pub fn value(&self) -> &serde_json::Value {
        &self.value
    }
}

/// The unit of marshaling: interface, method and ordered typed arguments.
///
/// Fields are only readable; a descriptor is built once by the capturer (or
/// by decoding wire text) and consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CallDescriptor {
    interface_type: String,
    method_name: String,
    arguments: Vec<ParameterEntry>,
}

impl CallDescriptor {
    /// Create a descriptor from its parts.
    pub fn new(
        interface_type: impl Into<String>,
        method_name: impl Into<String>,
        arguments: Vec<ParameterEntry>,
    ) -> Self {
        Self {
            interface_type: interface_type.into(),
            method_name: method_name.into(),
            arguments,
        }
    }

    /// Identifier of the target interface.
    pub fn interface_type(&self) -> &str {
        &self.interface_type
    }

    /// Name of the method within the interface.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Ordered arguments.
    pub fn arguments(&self) -> &[ParameterEntry] {
        &self.arguments
    }
}
