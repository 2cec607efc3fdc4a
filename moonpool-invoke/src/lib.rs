//! # Moonpool Invoke
//!
//! Capture a typed method call, ship it as structured text, and execute it
//! later against an implementation resolved by name.
//!
//! ## Architecture
//!
//! ```text
//! Expression ──capture──▶ CallDescriptor ──encode──▶ wire text
//!                                                       │
//! Option<Value> ◀──dispatch── CallDescriptor ◀──decode──┘
//!        ▲                          │
//!        │           ContractCatalog (name → method table)
//!        └── Invoke ◀── CapabilityRegistry (name → instance)
//! ```
//!
//! | Piece | Module |
//! |-------|--------|
//! | Call descriptor and parameter entries | [`descriptor`] |
//! | Tagged values and the closed type set | [`value`] |
//! | Interface descriptors and their catalog | [`contract`] |
//! | Expression capture | [`capture`] |
//! | Text codec and wire format | [`codec`], [`wire`] |
//! | Implementations and the registry | [`registry`] |
//! | Resolve-and-dispatch | [`dispatch`] |
//! | End-to-end pipeline | [`invoker`] |
//!
//! Everything is synchronous and single-threaded. No component keeps state
//! between calls; the catalog and the registry are filled at startup and only
//! read afterwards.

#![deny(missing_docs)]

pub mod capture;
pub mod codec;
pub mod config;
pub mod contract;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod invoker;
pub mod prelude;
pub mod registry;
pub mod value;
pub mod wire;

pub use capture::{capture, capture_for, ArgumentThunk, Expression};
pub use codec::{CodecError, JsonCodec, MessageCodec};
pub use config::InvokerConfig;
pub use contract::{Contract, ContractCatalog, InterfaceDescriptor, MethodSignature, Parameter};
pub use descriptor::{CallDescriptor, ParameterEntry};
pub use dispatch::Dispatcher;
pub use error::{BoxError, InvokeError};
pub use invoker::Invoker;
pub use registry::{
    Arguments, CapabilityRegistry, ImplementationFactory, ImplementationRegistry, Invoke,
    MethodResult,
};
pub use value::{FromValue, TypeName, UnsupportedType, Value};
pub use wire::CallCodec;
