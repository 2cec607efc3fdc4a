//! Configuration for the end-to-end invoker.

use crate::codec::JsonCodec;

/// Settings for [`Invoker`](crate::Invoker).
#[derive(Clone, Debug)]
pub struct InvokerConfig {
    /// Indent serialized calls.
    pub pretty_wire: bool,

    /// Log every serialized call at debug level.
    pub trace_payloads: bool,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            pretty_wire: true,
            trace_payloads: true,
        }
    }
}

impl InvokerConfig {
    /// Select indented or single-line wire text.
    pub fn with_pretty_wire(mut self, pretty: bool) -> Self {
        self.pretty_wire = pretty;
        self
    }

    /// Enable or disable logging of serialized calls.
    pub fn with_trace_payloads(mut self, enabled: bool) -> Self {
        self.trace_payloads = enabled;
        self
    }

    /// Compact wire text and no payload logging.
    pub fn quiet() -> Self {
        Self {
            pretty_wire: false,
            trace_payloads: false,
        }
    }

    /// JSON codec matching `pretty_wire`.
    pub fn codec(&self) -> JsonCodec {
        if self.pretty_wire {
            JsonCodec::pretty()
        } else {
            JsonCodec::compact()
        }
    }
}
