//! Pluggable text serialization for call payloads.
//!
//! The [`MessageCodec`] trait is the seam between the invocation machinery and
//! the document format. The same codec encodes whole call descriptors and
//! re-encodes individual argument payloads before they are rebuilt as their
//! declared types, so both steps agree on number, string and array layout.
//!
//! # Example
//!
//! ```rust
//! use moonpool_invoke::{JsonCodec, MessageCodec};
//!
//! let codec = JsonCodec::compact();
//! let text = codec.encode(&vec!["Hello", "World"]).unwrap();
//! assert_eq!(text, r#"["Hello","World"]"#);
//!
//! let decoded: Vec<String> = codec.decode(&text).unwrap();
//! assert_eq!(decoded, vec!["Hello".to_string(), "World".to_string()]);
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type for codec operations.
#[derive(Debug)]
pub enum CodecError {
    /// Failed to encode a value to text.
    Encode(Box<dyn std::error::Error + Send + Sync>),
    /// Failed to decode text to a value.
    Decode(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::Encode(e) => write!(f, "encode error: {}", e),
            CodecError::Decode(e) => write!(f, "decode error: {}", e),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CodecError::Encode(e) => Some(e.as_ref()),
            CodecError::Decode(e) => Some(e.as_ref()),
        }
    }
}

/// Pluggable structured-text format.
///
/// Requires `Clone + 'static` so codec instances can be stored inside the
/// dispatcher and the invoker.
pub trait MessageCodec: Clone + 'static {
    /// Encode a serializable value to text.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, msg: &T) -> Result<String, CodecError>;

    /// Decode text to a deserializable value.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Decode` if the text is not valid for `T`.
    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError>;
}

/// JSON codec using serde_json.
///
/// Pretty-printed by default so serialized calls are easy to read in logs.
#[derive(Clone, Debug, Copy)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Indented, multi-line output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Single-line output.
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Whether this codec indents its output.
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::pretty()
    }
}

impl MessageCodec for JsonCodec {
    fn encode<T: Serialize>(&self, msg: &T) -> Result<String, CodecError> {
        let encoded = if self.pretty {
            serde_json::to_string_pretty(msg)
        } else {
            serde_json::to_string(msg)
        };
        encoded.map_err(|e| CodecError::Encode(Box::new(e)))
    }

    fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, CodecError> {
        serde_json::from_str(text).map_err(|e| CodecError::Decode(Box::new(e)))
    }
}
