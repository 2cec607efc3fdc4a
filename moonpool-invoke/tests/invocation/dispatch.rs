//! Dispatch behaviour through the full pipeline.

use moonpool_invoke::{
    CallDescriptor, ContractCatalog, Dispatcher, Expression, ImplementationRegistry,
    InvokeError, ParameterEntry, Value,
};
use serde_json::json;

use super::example::{DivideByZero, Example};
use super::{example_contracts, example_invoker};

#[test]
fn test_add_dispatches_to_sum() {
    let (invoker, _) = example_invoker();

    let sum: i32 = invoker
        .execute("Example", Expression::call("Add").arg(5).arg(3))
        .unwrap();
    assert_eq!(sum, 8);
}

#[test]
fn test_print_is_void_and_runs_once() {
    let (invoker, printed) = example_invoker();

    invoker
        .execute_void("Example", Expression::call("Print").arg("Hello, World!"))
        .unwrap();

    assert_eq!(*printed.borrow(), vec!["Hello, World!".to_string()]);
}

#[test]
fn test_concat_array_argument() {
    let (invoker, _) = example_invoker();

    let joined: String = invoker
        .execute_on::<dyn Example, _>(
            Expression::call("Concat").arg_with(|| vec!["Hello", " ", "World"]),
        )
        .unwrap();
    assert_eq!(joined, "Hello World");
}

#[test]
fn test_arguments_can_be_computed() {
    let (invoker, _) = example_invoker();
    let base = 40;

    let sum: i32 = invoker
        .execute(
            "Example",
            Expression::call("Add")
                .arg_with(|| base)
                .arg_with(|| "ab".len() as i32),
        )
        .unwrap();
    assert_eq!(sum, 42);
}

#[test]
fn test_known_interface_without_binding() {
    let dispatcher = Dispatcher::new(example_contracts(), ImplementationRegistry::new());
    let call = CallDescriptor::new(
        "Example",
        "Add",
        vec![
            ParameterEntry::new("i32", json!(1)),
            ParameterEntry::new("i32", json!(2)),
        ],
    );

    let err = dispatcher.dispatch(call).unwrap_err();
    assert!(matches!(err, InvokeError::NoImplementationRegistered(name) if name == "Example"));
}

#[test]
fn test_unknown_interface() {
    let dispatcher = Dispatcher::new(ContractCatalog::new(), ImplementationRegistry::new());
    let call = CallDescriptor::new("Missing", "Add", vec![]);

    let err = dispatcher.dispatch(call).unwrap_err();
    assert!(matches!(err, InvokeError::UnknownInterface(name) if name == "Missing"));
}

#[test]
fn test_unknown_method() {
    let (invoker, _) = example_invoker();
    let call = CallDescriptor::new("Example", "Subtract", vec![]);

    let err = invoker.dispatcher().dispatch(call).unwrap_err();
    assert!(matches!(err, InvokeError::UnknownMethod { candidates: 0, .. }));
}

#[test]
fn test_payload_shape_mismatch() {
    let (invoker, _) = example_invoker();
    let text = r#"{
        "interfaceType": "Example",
        "methodName": "Concat",
        "arguments": [{ "typeName": "string[]", "value": "Hello World" }]
    }"#;

    let err = invoker.execute_text(text).unwrap_err();
    assert!(matches!(err, InvokeError::ArgumentTypeMismatch { index: 0, .. }));
}

#[test]
fn test_domain_error_passes_through_unchanged() {
    let (invoker, _) = example_invoker();

    let err = invoker
        .execute::<i32>("Example", Expression::call("Divide").arg(7).arg(0))
        .unwrap_err();

    assert!(err.is_implementation());
    assert_eq!(err.to_string(), "cannot divide 7 by zero");

    let original = err
        .into_implementation()
        .and_then(|e| e.downcast::<DivideByZero>().ok())
        .expect("DivideByZero survives dispatch");
    assert_eq!(*original, DivideByZero { dividend: 7 });
}

#[test]
fn test_dispatch_returns_tagged_value() {
    let (invoker, _) = example_invoker();
    let text = invoker
        .encode(
            &invoker
                .capture("Example", Expression::call("Divide").arg(9).arg(3))
                .unwrap(),
        )
        .unwrap();

    assert_eq!(invoker.execute_text(&text).unwrap(), Some(Value::Int32(3)));
}
