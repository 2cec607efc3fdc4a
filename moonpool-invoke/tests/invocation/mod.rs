//! Shared fixtures for invocation tests.

pub mod dispatch;
pub mod example;
pub mod roundtrip;

use std::cell::RefCell;
use std::rc::Rc;

use moonpool_invoke::{ContractCatalog, ImplementationRegistry, Invoke, InvokeError, Invoker};

use example::{Example, ExampleImplementation};

/// Route logs to the test writer; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Catalog containing only the `Example` contract.
pub fn example_contracts() -> ContractCatalog {
    let mut contracts = ContractCatalog::new();
    contracts.register_contract::<dyn Example>();
    contracts
}

/// Invoker with `Example` bound to an implementation sharing `printed`.
pub fn example_invoker() -> (Invoker<ImplementationRegistry>, Rc<RefCell<Vec<String>>>) {
    init_tracing();

    let printed = Rc::new(RefCell::new(Vec::new()));
    let sink = printed.clone();

    let mut registry = ImplementationRegistry::new();
    registry.bind_contract::<dyn Example, _>(move || -> Result<Box<dyn Invoke>, InvokeError> {
        Ok(Box::new(ExampleImplementation::new(sink.clone())))
    });

    (Invoker::new(example_contracts(), registry), printed)
}
