//! End-to-end pipeline: capture, encode, decode, dispatch.
//!
//! [`Invoker`] runs every call through its wire text, exactly as a remote
//! hop would, then dispatches the decoded descriptor locally. It is the
//! in-process stand-in for a transport and the quickest way to check that a
//! contract survives serialization.
//!
//! # Usage
//!
//! ```rust,ignore
//! let invoker = Invoker::new(contracts, registry);
//!
//! let sum: i32 = invoker.execute("Example", Expression::call("Add").arg(5).arg(3))?;
//! invoker.execute_void("Example", Expression::call("Print").arg("Hello, World!"))?;
//! ```

use crate::capture::{capture, Expression};
use crate::codec::JsonCodec;
use crate::config::InvokerConfig;
use crate::contract::{Contract, ContractCatalog};
use crate::descriptor::CallDescriptor;
use crate::dispatch::Dispatcher;
use crate::error::InvokeError;
use crate::registry::CapabilityRegistry;
use crate::value::{FromValue, Value};
use crate::wire::CallCodec;

/// Captures calls, ships them through wire text and dispatches them.
pub struct Invoker<R: CapabilityRegistry> {
    dispatcher: Dispatcher<R, JsonCodec>,
    wire: CallCodec<JsonCodec>,
    config: InvokerConfig,
}

impl<R: CapabilityRegistry> Invoker<R> {
    /// Create an invoker with the default configuration.
    pub fn new(contracts: ContractCatalog, registry: R) -> Self {
        Self::with_config(contracts, registry, InvokerConfig::default())
    }

    /// Create an invoker with an explicit configuration.
    pub fn with_config(contracts: ContractCatalog, registry: R, config: InvokerConfig) -> Self {
        let codec = config.codec();
        Self {
            dispatcher: Dispatcher::with_codec(contracts, registry, codec),
            wire: CallCodec::new(codec),
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Dispatcher used for the final step.
    pub fn dispatcher(&self) -> &Dispatcher<R, JsonCodec> {
        &self.dispatcher
    }

    /// Capture `expression` against the registered contract `interface`.
    pub fn capture(
        &self,
        interface: &str,
        expression: Expression<'_>,
    ) -> Result<CallDescriptor, InvokeError> {
        let contract = self.dispatcher.contracts().resolve(interface)?;
        capture(contract, expression)
    }

    /// Encode `descriptor` to wire text.
    pub fn encode(&self, descriptor: &CallDescriptor) -> Result<String, InvokeError> {
        self.wire.encode(descriptor)
    }

    /// Decode wire text to a descriptor.
    pub fn decode(&self, text: &str) -> Result<CallDescriptor, InvokeError> {
        self.wire.decode(text)
    }

    /// Run a call returning `T` through the whole pipeline.
    ///
    /// Use `T = ()` for void methods, or [`Invoker::execute_void`].
    pub fn execute<T: FromValue>(
        &self,
        interface: &str,
        expression: Expression<'_>,
    ) -> Result<T, InvokeError> {
        let descriptor = self.capture(interface, expression)?;
        let text = self.encode(&descriptor)?;

        if self.config.trace_payloads {
            tracing::debug!("Serialized call: {}", text);
        }

        let decoded = self.decode(&text)?;
        self.dispatcher.dispatch_as(decoded)
    }

    /// Run a void call through the whole pipeline.
    pub fn execute_void(
        &self,
        interface: &str,
        expression: Expression<'_>,
    ) -> Result<(), InvokeError> {
        self.execute::<()>(interface, expression)
    }

    /// Run a call on the statically known contract `I`.
    pub fn execute_on<I, T>(&self, expression: Expression<'_>) -> Result<T, InvokeError>
    where
        I: Contract + ?Sized,
        T: FromValue,
    {
        self.execute(I::NAME, expression)
    }

    /// Run a wire-encoded call received from elsewhere.
    pub fn execute_text(&self, text: &str) -> Result<Option<Value>, InvokeError> {
        let descriptor = self.decode(text)?;
        self.dispatcher.dispatch(descriptor)
    }
}
