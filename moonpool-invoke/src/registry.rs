//! Implementation side: the [`Invoke`] dispatch trait and the capability registry.
//!
//! An implementation routes a method name to its own code with a `match`,
//! pulling typed arguments out of [`Arguments`]:
//!
//! ```rust
//! use moonpool_invoke::{Arguments, Invoke, InvokeError, MethodResult, Value};
//!
//! struct Adder;
//!
//! impl Invoke for Adder {
//!     fn invoke(&self, method: &str, mut args: Arguments) -> MethodResult {
//!         match method {
//!             "Add" => {
//!                 let x: i32 = args.next()?;
//!                 let y: i32 = args.next()?;
//!                 Ok(Some(Value::Int32(x + y)))
//!             }
//!             _ => Err(InvokeError::implementation(format!("no method {method}"))),
//!         }
//!     }
//! }
//! ```
//!
//! The dispatcher obtains instances through a [`CapabilityRegistry`]. The
//! stock [`ImplementationRegistry`] binds interface names to
//! [`ImplementationFactory`] values and builds a fresh instance per call.

use std::collections::HashMap;
use std::fmt;

use crate::contract::Contract;
use crate::error::InvokeError;
use crate::value::{FromValue, Value};

/// Result of invoking one method: a value, or `None` for void.
pub type MethodResult = Result<Option<Value>, InvokeError>;

/// Reconstructed arguments handed to an implementation, in call order.
#[derive(Debug, Clone)]
pub struct Arguments {
    method: String,
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Arguments {
    /// Wrap already reconstructed values.
    pub fn new(method: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            values: values.into_iter(),
            position: 0,
        }
    }

    /// Take the next argument as `T`.
    ///
    /// # Errors
    ///
    /// [`InvokeError::ArgumentTypeMismatch`] when the arguments are exhausted
    /// or the next one has a different type.
    #[allow(clippy::should_implement_trait)]
    pub fn next<T: FromValue>(&mut self) -> Result<T, InvokeError> {
        let index = self.position;
        let value = self.values.next();
        self.position += 1;

        T::from_value(value).map_err(|found| {
            let expected = T::expected().map_or("void", |ty| ty.as_str());
            let found = found.map_or("nothing".to_string(), |v| v.type_name().to_string());
            InvokeError::argument_mismatch(
                &self.method,
                index,
                format!("expected {expected}, found {found}"),
            )
        })
    }

    /// Take the next argument without converting it.
    pub fn next_value(&mut self) -> Option<Value> {
        self.position += 1;
        self.values.next()
    }

    /// Arguments not taken yet.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

/// Runtime-dispatchable implementation of an interface.
///
/// Plays the role of a reflection-based `MethodInfo.Invoke`: the dispatcher
/// has already checked that `method` exists on the contract and that the
/// arguments match the declared parameter types.
pub trait Invoke {
    /// Run `method` with `args`.
    ///
    /// Domain failures should be returned as [`InvokeError::Implementation`];
    /// they reach the caller unchanged.
    fn invoke(&self, method: &str, args: Arguments) -> MethodResult;
}

/// Creates implementation instances for one interface.
///
/// Closures returning `Result<Box<dyn Invoke>, InvokeError>` implement this
/// trait directly; spell out the closure's return type so it can be inferred.
pub trait ImplementationFactory {
    /// Build a fresh instance.
    fn create(&self) -> Result<Box<dyn Invoke>, InvokeError>;
}

impl<F> ImplementationFactory for F
where
    F: Fn() -> Result<Box<dyn Invoke>, InvokeError>,
{
    fn create(&self) -> Result<Box<dyn Invoke>, InvokeError> {
        self()
    }
}

/// Source of implementation instances keyed by interface identifier.
///
/// How bindings get there (manual registration, dependency injection, ...)
/// is up to the implementor; dispatch only ever reads.
pub trait CapabilityRegistry {
    /// Resolve an instance for `interface`.
    ///
    /// # Errors
    ///
    /// [`InvokeError::NoImplementationRegistered`] when nothing is bound.
    fn resolve(&self, interface: &str) -> Result<Box<dyn Invoke>, InvokeError>;
}

/// Factory-backed [`CapabilityRegistry`].
#[derive(Default)]
pub struct ImplementationRegistry {
    factories: HashMap<String, Box<dyn ImplementationFactory>>,
}

impl ImplementationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `interface` to `factory`, replacing any previous binding.
    pub fn bind<F>(&mut self, interface: impl Into<String>, factory: F)
    where
        F: ImplementationFactory + 'static,
    {
        let interface = interface.into();
        tracing::debug!("Binding implementation for interface '{}'", interface);

        if self
            .factories
            .insert(interface.clone(), Box::new(factory))
            .is_some()
        {
            tracing::warn!("Implementation for '{}' replaced", interface);
        }
    }

    /// Bind the statically known contract `I` to `factory`.
    pub fn bind_contract<I, F>(&mut self, factory: F)
    where
        I: Contract + ?Sized,
        F: ImplementationFactory + 'static,
    {
        self.bind(I::NAME, factory);
    }

    /// Bind `interface` to instances built with `Default`.
    pub fn bind_default<T>(&mut self, interface: impl Into<String>)
    where
        T: Invoke + Default + 'static,
    {
        self.bind(interface, || -> Result<Box<dyn Invoke>, InvokeError> {
            Ok(Box::new(T::default()))
        });
    }

    /// Whether `interface` has a binding.
    pub fn is_bound(&self, interface: &str) -> bool {
        self.factories.contains_key(interface)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl CapabilityRegistry for ImplementationRegistry {
    fn resolve(&self, interface: &str) -> Result<Box<dyn Invoke>, InvokeError> {
        let factory = self
            .factories
            .get(interface)
            .ok_or_else(|| InvokeError::NoImplementationRegistered(interface.to_string()))?;
        factory.create()
    }
}

impl fmt::Debug for ImplementationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bound: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        bound.sort_unstable();
        f.debug_struct("ImplementationRegistry")
            .field("bound", &bound)
            .finish()
    }
}
