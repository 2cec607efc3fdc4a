//! Resolve-and-dispatch: executing a [`CallDescriptor`] against a live implementation.
//!
//! # Dispatch Steps
//!
//! ```text
//! CallDescriptor { interfaceType, methodName, arguments }
//!   ↓ ContractCatalog::resolve        → UnknownInterface
//!   ↓ InterfaceDescriptor::find_method → UnknownMethod (none or overloaded)
//!   ↓ CapabilityRegistry::resolve     → NoImplementationRegistered
//!   ↓ TypeName::reconstruct per arg   → ArgumentTypeMismatch
//!   ↓ Invoke::invoke                  → implementation error, passed through
//!   ↓ return type check               → ReturnTypeMismatch
//! Option<Value>
//! ```

use crate::codec::{JsonCodec, MessageCodec};
use crate::contract::{ContractCatalog, MethodSignature};
use crate::descriptor::{CallDescriptor, ParameterEntry};
use crate::error::InvokeError;
use crate::registry::{Arguments, CapabilityRegistry};
use crate::value::{FromValue, TypeName, Value};

/// Executes call descriptors against implementations from a registry.
///
/// Holds no per-call state: every dispatch resolves contract, method and
/// instance from scratch and drops the descriptor when done.
pub struct Dispatcher<R: CapabilityRegistry, C: MessageCodec = JsonCodec> {
    contracts: ContractCatalog,
    registry: R,
    codec: C,
}

impl<R: CapabilityRegistry> Dispatcher<R, JsonCodec> {
    /// Create a dispatcher using the default JSON codec.
    pub fn new(contracts: ContractCatalog, registry: R) -> Self {
        Self::with_codec(contracts, registry, JsonCodec::default())
    }
}

impl<R: CapabilityRegistry, C: MessageCodec> Dispatcher<R, C> {
    /// Create a dispatcher that reconstructs arguments with `codec`.
    pub fn with_codec(contracts: ContractCatalog, registry: R, codec: C) -> Self {
        Self {
            contracts,
            registry,
            codec,
        }
    }

    /// Known contracts.
    pub fn contracts(&self) -> &ContractCatalog {
        &self.contracts
    }

    /// Capability registry used to obtain instances.
    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Execute `descriptor`, returning the method's value or `None` for void.
    pub fn dispatch(&self, descriptor: CallDescriptor) -> Result<Option<Value>, InvokeError> {
        let contract = self.contracts.resolve(descriptor.interface_type())?;
        let signature = contract.find_method(descriptor.method_name())?;
        let instance = self.registry.resolve(contract.name())?;

        let values = self.reconstruct_arguments(signature, descriptor.arguments())?;

        tracing::debug!(
            "Dispatching {}::{} with {} arguments",
            contract.name(),
            signature.name,
            values.len()
        );

        let result = instance.invoke(&signature.name, Arguments::new(&signature.name, values))?;
        check_return(signature, result)
    }

    /// Execute `descriptor` and convert the result to `T`.
    ///
    /// Use `()` for void methods.
    pub fn dispatch_as<T: FromValue>(&self, descriptor: CallDescriptor) -> Result<T, InvokeError> {
        let method = descriptor.method_name().to_string();
        let result = self.dispatch(descriptor)?;
        T::from_value(result).map_err(|found| InvokeError::ReturnTypeMismatch {
            method,
            expected: describe(T::expected()),
            found: describe(found.as_ref().map(Value::type_name)),
        })
    }

    fn reconstruct_arguments(
        &self,
        signature: &MethodSignature,
        entries: &[ParameterEntry],
    ) -> Result<Vec<Value>, InvokeError> {
        if entries.len() != signature.arity() {
            return Err(InvokeError::argument_mismatch(
                &signature.name,
                entries.len().min(signature.arity()),
                format!(
                    "expected {} arguments, got {}",
                    signature.arity(),
                    entries.len()
                ),
            ));
        }

        signature
            .parameters
            .iter()
            .zip(entries)
            .enumerate()
            .map(|(index, (param, entry))| {
                let declared = entry.type_name().parse::<TypeName>().map_err(|e| {
                    InvokeError::argument_mismatch(&signature.name, index, e.to_string())
                })?;

                if declared != param.ty {
                    return Err(InvokeError::argument_mismatch(
                        &signature.name,
                        index,
                        format!(
                            "parameter '{}' is declared as {}, payload claims {}",
                            param.name, param.ty, declared
                        ),
                    ));
                }

                declared
                    .reconstruct(&self.codec, entry.value())
                    .map_err(|e| {
                        InvokeError::argument_mismatch(&signature.name, index, e.to_string())
                    })
            })
            .collect()
    }
}

fn check_return(
    signature: &MethodSignature,
    result: Option<Value>,
) -> Result<Option<Value>, InvokeError> {
    match (signature.returns, result) {
        (None, None) => Ok(None),
        (None, Some(value)) => {
            tracing::warn!(
                "Void method '{}' returned a {} value, discarding it",
                signature.name,
                value.type_name()
            );
            Ok(None)
        }
        (Some(expected), Some(value)) if value.type_name() == expected => Ok(Some(value)),
        (Some(expected), found) => Err(InvokeError::ReturnTypeMismatch {
            method: signature.name.clone(),
            expected: expected.to_string(),
            found: describe(found.as_ref().map(Value::type_name)),
        }),
    }
}

fn describe(ty: Option<TypeName>) -> String {
    ty.map_or_else(|| "void".to_string(), |ty| ty.to_string())
}
