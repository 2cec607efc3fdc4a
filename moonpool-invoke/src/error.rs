//! Error types for call capture, wire decoding and dispatch.

use thiserror::Error;

/// Boxed error raised by an implementation while running a method.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while capturing, decoding or dispatching a call.
///
/// Every variant except [`InvokeError::Implementation`] means the invocation
/// machinery itself failed. `Implementation` carries the error returned by the
/// invoked method untouched, so callers can tell "the dispatch failed" apart
/// from "the operation failed".
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The expression handed to the capturer is not a direct method call.
    #[error("Expression should be a method call, got {0}")]
    InvalidExpressionKind(String),

    /// Wire text is missing required fields or has the wrong shape.
    #[error("Malformed call payload: {0}")]
    MalformedPayload(String),

    /// The codec refused to write a call descriptor.
    #[error("Cannot encode call {call}: {reason}")]
    EncodeFailed {
        /// `Interface::Method` of the call.
        call: String,
        /// Codec error text.
        reason: String,
    },

    /// The interface identifier does not name a known contract.
    #[error("Unknown interface: {0}")]
    UnknownInterface(String),

    /// Zero or several methods carry the requested name.
    #[error("Unknown method '{method}' on interface '{interface}' ({candidates} candidates)")]
    UnknownMethod {
        /// Interface that was searched.
        interface: String,
        /// Requested method name.
        method: String,
        /// How many methods matched the name.
        candidates: usize,
    },

    /// The capability registry has no binding for the interface.
    #[error("No implementation registered for {0}")]
    NoImplementationRegistered(String),

    /// An argument cannot be rebuilt as its declared type.
    #[error("Argument {index} of '{method}' does not match its declared type: {reason}")]
    ArgumentTypeMismatch {
        /// Method being called.
        method: String,
        /// Zero-based argument position.
        index: usize,
        /// What went wrong.
        reason: String,
    },

    /// The implementation returned a value that disagrees with the declared return type.
    #[error("Method '{method}' returned {found}, expected {expected}")]
    ReturnTypeMismatch {
        /// Method being called.
        method: String,
        /// Declared return type.
        expected: String,
        /// What the implementation produced.
        found: String,
    },

    /// Error raised by the invoked method itself.
    #[error(transparent)]
    Implementation(BoxError),
}

impl InvokeError {
    /// Wrap a domain error raised by an implementation.
    pub fn implementation<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        InvokeError::Implementation(err.into())
    }

    /// True when the error came from the invoked method rather than the dispatcher.
    pub fn is_implementation(&self) -> bool {
        matches!(self, InvokeError::Implementation(_))
    }

    /// Recover the implementation's own error, if this is one.
    pub fn into_implementation(self) -> Option<BoxError> {
        match self {
            InvokeError::Implementation(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn argument_mismatch(
        method: &str,
        index: usize,
        reason: impl Into<String>,
    ) -> Self {
        InvokeError::ArgumentTypeMismatch {
            method: method.to_string(),
            index,
            reason: reason.into(),
        }
    }
}
