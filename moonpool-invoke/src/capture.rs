//! Invocation capture: from a structured call expression to a [`CallDescriptor`].
//!
//! An [`Expression`] is the pre-structured form of `x => x.Method(a, b, ...)`:
//! a method name plus one thunk per argument. Capturing evaluates every thunk
//! once, left to right, then pairs each value with the type the contract
//! declares for that position.
//!
//! ```rust
//! use moonpool_invoke::{capture, Expression, InterfaceDescriptor, TypeName};
//!
//! let example = InterfaceDescriptor::new("Example").method(
//!     "Add",
//!     &[("x", TypeName::Int32), ("y", TypeName::Int32)],
//!     Some(TypeName::Int32),
//! );
//!
//! let call = Expression::call("Add").arg(5).arg_with(|| 1 + 2);
//! let descriptor = capture(&example, call).unwrap();
//!
//! assert_eq!(descriptor.method_name(), "Add");
//! assert_eq!(descriptor.arguments()[1].value(), &serde_json::json!(3));
//! ```

use std::fmt;

use crate::contract::{Contract, InterfaceDescriptor};
use crate::descriptor::{CallDescriptor, ParameterEntry};
use crate::error::InvokeError;
use crate::value::Value;

/// Deferred argument computation, evaluated exactly once during capture.
pub type ArgumentThunk<'a> = Box<dyn FnOnce() -> Value + 'a>;

/// Unevaluated expression handed to the capturer.
///
/// Only [`Expression::Call`] can be captured; the other shapes exist so that
/// a source producing expressions (a parser, a builder fed by user input) can
/// hand over what it got and receive [`InvokeError::InvalidExpressionKind`].
pub enum Expression<'a> {
    /// Direct call of one method with argument expressions.
    Call {
        /// Method name.
        method: String,
        /// One thunk per argument, in call order.
        arguments: Vec<ArgumentThunk<'a>>,
    },
    /// A bare value.
    Constant(Value),
    /// Access to a named member that is not a call.
    Member(String),
}

impl<'a> Expression<'a> {
    /// Start a call expression for `method`.
    pub fn call(method: impl Into<String>) -> Self {
        Expression::Call {
            method: method.into(),
            arguments: Vec::new(),
        }
    }

    /// Append a literal argument.
    pub fn arg(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.arg_with(move || value)
    }

    /// Append an argument computed when the call is captured.
    ///
    /// Has no effect on non-call expressions, which are rejected at capture.
    pub fn arg_with<F, V>(mut self, thunk: F) -> Self
    where
        F: FnOnce() -> V + 'a,
        V: Into<Value>,
    {
        if let Expression::Call { arguments, .. } = &mut self {
            arguments.push(Box::new(move || thunk().into()));
        }
        self
    }

    fn kind(&self) -> &'static str {
        match self {
            Expression::Call { .. } => "method call",
            Expression::Constant(_) => "constant",
            Expression::Member(_) => "member access",
        }
    }
}

impl fmt::Debug for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Call { method, arguments } => f
                .debug_struct("Call")
                .field("method", method)
                .field("arguments", &arguments.len())
                .finish(),
            Expression::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Expression::Member(name) => f.debug_tuple("Member").field(name).finish(),
        }
    }
}

/// Capture `expression` as a call on the interface described by `contract`.
///
/// # Errors
///
/// - [`InvokeError::InvalidExpressionKind`] if `expression` is not a call
/// - [`InvokeError::UnknownMethod`] if the method is missing or overloaded
/// - [`InvokeError::ArgumentTypeMismatch`] if the argument count differs from
///   the method's parameter count, or a float argument is NaN or infinite
pub fn capture(
    contract: &InterfaceDescriptor,
    expression: Expression<'_>,
) -> Result<CallDescriptor, InvokeError> {
    let kind = expression.kind();
    let Expression::Call { method, arguments } = expression else {
        return Err(InvokeError::InvalidExpressionKind(kind.to_string()));
    };

    let signature = contract.find_method(&method)?;

    // Every argument is evaluated before anything is checked, like a real call.
    let values: Vec<Value> = arguments.into_iter().map(|thunk| thunk()).collect();

    if values.len() != signature.arity() {
        return Err(InvokeError::argument_mismatch(
            &method,
            values.len().min(signature.arity()),
            format!(
                "expected {} arguments, got {}",
                signature.arity(),
                values.len()
            ),
        ));
    }

    if let Some(index) = values
        .iter()
        .position(|value| matches!(value, Value::Float64(v) if !v.is_finite()))
    {
        return Err(InvokeError::argument_mismatch(
            &method,
            index,
            format!("{:?} has no wire representation", values[index]),
        ));
    }

    let entries = signature
        .parameters
        .iter()
        .zip(&values)
        .map(|(param, value)| ParameterEntry::typed(param.ty, value))
        .collect();

    tracing::debug!(
        "Captured call {}::{} with {} arguments",
        contract.name(),
        method,
        values.len()
    );

    Ok(CallDescriptor::new(contract.name(), method, entries))
}

/// Capture `expression` as a call on the statically known contract `I`.
pub fn capture_for<I: Contract + ?Sized>(
    expression: Expression<'_>,
) -> Result<CallDescriptor, InvokeError> {
    capture(&I::descriptor(), expression)
}
