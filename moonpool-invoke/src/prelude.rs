//! Common imports for defining contracts and implementations.

pub use crate::capture::Expression;
pub use crate::contract::{Contract, ContractCatalog, InterfaceDescriptor};
pub use crate::error::InvokeError;
pub use crate::invoker::Invoker;
pub use crate::registry::{Arguments, ImplementationRegistry, Invoke, MethodResult};
pub use crate::value::{TypeName, Value};

/// Result type for invocation operations.
pub type Result<T> = std::result::Result<T, InvokeError>;
