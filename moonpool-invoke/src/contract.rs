//! Capability contracts: explicit interface descriptors and their catalog.
//!
//! Rust has no runtime reflection to go from `"Example"` to a trait and from
//! `"Add"` to one of its methods. Instead each interface publishes an
//! [`InterfaceDescriptor`] listing its method signatures, and the
//! [`ContractCatalog`] maps interface names to those descriptors. The catalog
//! is built at startup and only read afterwards.
//!
//! ```rust
//! use moonpool_invoke::{ContractCatalog, InterfaceDescriptor, TypeName};
//!
//! let example = InterfaceDescriptor::new("Example")
//!     .method("Add", &[("x", TypeName::Int32), ("y", TypeName::Int32)], Some(TypeName::Int32))
//!     .method("Print", &[("message", TypeName::Text)], None);
//!
//! let mut catalog = ContractCatalog::new();
//! catalog.register(example);
//! assert!(catalog.resolve("Example").is_ok());
//! ```

use std::collections::HashMap;

use crate::error::InvokeError;
use crate::value::TypeName;

/// One declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name, used in diagnostics only.
    pub name: String,
    /// Declared static type.
    pub ty: TypeName,
}

/// Signature of one interface method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method name as it appears in call descriptors.
    pub name: String,
    /// Ordered parameters.
    pub parameters: Vec<Parameter>,
    /// Declared return type; `None` for void.
    pub returns: Option<TypeName>,
}

impl MethodSignature {
    /// Number of declared parameters.
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// True when the method returns nothing.
    pub fn is_void(&self) -> bool {
        self.returns.is_none()
    }
}

/// Description of an interface: its name and method signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    name: String,
    methods: Vec<MethodSignature>,
}

impl InterfaceDescriptor {
    /// Start describing an interface.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method signature.
    ///
    /// Two methods with the same name are accepted here but neither can be
    /// captured or dispatched, since calls carry no overload information.
    pub fn method(
        mut self,
        name: impl Into<String>,
        parameters: &[(&str, TypeName)],
        returns: Option<TypeName>,
    ) -> Self {
        self.methods.push(MethodSignature {
            name: name.into(),
            parameters: parameters
                .iter()
                .map(|(name, ty)| Parameter {
                    name: name.to_string(),
                    ty: *ty,
                })
                .collect(),
            returns,
        });
        self
    }

    /// Interface identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared methods, in declaration order.
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }

    /// Find the single method named `name`.
    ///
    /// Fails with [`InvokeError::UnknownMethod`] when no method or more than
    /// one method has that name.
    pub fn find_method(&self, name: &str) -> Result<&MethodSignature, InvokeError> {
        let mut candidates = self.methods.iter().filter(|m| m.name == name);
        match (candidates.next(), candidates.count()) {
            (Some(method), 0) => Ok(method),
            (first, rest) => Err(InvokeError::UnknownMethod {
                interface: self.name.clone(),
                method: name.to_string(),
                candidates: usize::from(first.is_some()) + rest,
            }),
        }
    }
}

/// A statically known interface.
///
/// Implemented by marker types (or trait objects) standing for an interface,
/// so callers can capture calls without spelling out the name.
pub trait Contract {
    /// Interface identifier used on the wire.
    ///
    /// Must equal the name of the descriptor returned by [`Contract::descriptor`].
    const NAME: &'static str;

    /// Full method table of the interface.
    fn descriptor() -> InterfaceDescriptor;
}

/// Registry of known interface descriptors keyed by name.
#[derive(Debug, Default, Clone)]
pub struct ContractCatalog {
    contracts: HashMap<String, InterfaceDescriptor>,
}

impl ContractCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one with the same name.
    pub fn register(&mut self, descriptor: InterfaceDescriptor) {
        tracing::debug!(
            "Registering contract '{}' with {} methods",
            descriptor.name(),
            descriptor.methods().len()
        );

        let name = descriptor.name().to_string();
        if self.contracts.insert(name.clone(), descriptor).is_some() {
            tracing::warn!("Contract '{}' replaced an existing registration", name);
        }
    }

    /// Register a statically known contract.
    pub fn register_contract<I: Contract + ?Sized>(&mut self) {
        self.register(I::descriptor());
    }

    /// Resolve an interface name to its descriptor.
    pub fn resolve(&self, interface: &str) -> Result<&InterfaceDescriptor, InvokeError> {
        self.contracts
            .get(interface)
            .ok_or_else(|| InvokeError::UnknownInterface(interface.to_string()))
    }

    /// Whether a contract is registered under `interface`.
    pub fn contains(&self, interface: &str) -> bool {
        self.contracts.contains_key(interface)
    }

    /// Number of registered contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
