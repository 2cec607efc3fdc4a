//! Wire codec for call descriptors.
//!
//! # Wire Format
//!
//! ```text
//! {
//!   "interfaceType": "Example",
//!   "methodName": "Concat",
//!   "arguments": [
//!     { "typeName": "string[]", "value": ["Hello", " ", "World"] }
//!   ]
//! }
//! ```
//!
//! Values use the document's native primitives. The `typeName` next to each
//! value is what tells `"5"`, `5` and `["5"]` apart when the call is
//! dispatched; the codec itself never infers types.

use crate::codec::{JsonCodec, MessageCodec};
use crate::descriptor::CallDescriptor;
use crate::error::InvokeError;

/// Encodes and decodes [`CallDescriptor`]s as structured text.
#[derive(Debug, Clone, Default)]
pub struct CallCodec<C: MessageCodec = JsonCodec> {
    codec: C,
}

impl<C: MessageCodec> CallCodec<C> {
    /// Wrap a message codec.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Underlying message codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Encode a descriptor. Output is deterministic for a given descriptor.
    ///
    /// The JSON codec cannot fail here: every payload is already a
    /// `serde_json::Value`. Other codecs report [`InvokeError::EncodeFailed`].
    pub fn encode(&self, descriptor: &CallDescriptor) -> Result<String, InvokeError> {
        self.codec
            .encode(descriptor)
            .map_err(|e| InvokeError::EncodeFailed {
                call: format!(
                    "{}::{}",
                    descriptor.interface_type(),
                    descriptor.method_name()
                ),
                reason: e.to_string(),
            })
    }

    /// Decode wire text into a descriptor.
    ///
    /// Missing or unknown fields and wrongly shaped values are rejected as a
    /// whole; no partially filled descriptor is ever returned.
    pub fn decode(&self, text: &str) -> Result<CallDescriptor, InvokeError> {
        self.codec
            .decode(text)
            .map_err(|e| InvokeError::MalformedPayload(e.to_string()))
    }
}
