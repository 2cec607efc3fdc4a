//! Capture and wire round-trips.

use moonpool_invoke::{
    capture_for, CallCodec, Expression, InvokeError, JsonCodec, ParameterEntry, Value,
};
use serde_json::json;

use super::example::Example;
use super::example_invoker;

fn captured_calls() -> Vec<moonpool_invoke::CallDescriptor> {
    vec![
        capture_for::<dyn Example>(Expression::call("Add").arg(5).arg(3)).unwrap(),
        capture_for::<dyn Example>(Expression::call("Print").arg("Hello, World!")).unwrap(),
        capture_for::<dyn Example>(Expression::call("Concat").arg(["Hello", " ", "World"]))
            .unwrap(),
        capture_for::<dyn Example>(Expression::call("Concat").arg(Vec::<String>::new())).unwrap(),
        capture_for::<dyn Example>(Expression::call("Print").arg("")).unwrap(),
        capture_for::<dyn Example>(Expression::call("Add").arg(i32::MIN).arg(i32::MAX)).unwrap(),
        capture_for::<dyn Example>(Expression::call("Offset").arg(i64::MIN).arg(i64::MAX))
            .unwrap(),
        capture_for::<dyn Example>(
            Expression::call("Scale")
                .arg(1.0715660391465826e-75)
                .arg(-1.603964615428183e143),
        )
        .unwrap(),
        capture_for::<dyn Example>(Expression::call("Scale").arg(0.1 + 0.2).arg(-0.0)).unwrap(),
    ]
}

/// Finite floats that a lossy float parser rebuilds one bit off.
const HARD_FLOATS: [f64; 6] = [
    1.0715660391465826e-75,
    -1.603964615428183e143,
    0.1 + 0.2,
    2.2250738585072014e-308,
    5e-324,
    f64::MAX,
];

#[test]
fn test_captured_calls_roundtrip() {
    for codec in [JsonCodec::pretty(), JsonCodec::compact()] {
        let wire = CallCodec::new(codec);
        for call in captured_calls() {
            let text = wire.encode(&call).unwrap();
            assert_eq!(wire.decode(&text).unwrap(), call, "{text}");
        }
    }
}

#[test]
fn test_concat_array_survives_wire() {
    let (invoker, _) = example_invoker();
    let call = invoker
        .capture(
            "Example",
            Expression::call("Concat").arg(["Hello", " ", "World"]),
        )
        .unwrap();

    let decoded = invoker.decode(&invoker.encode(&call).unwrap()).unwrap();
    assert_eq!(
        decoded.arguments(),
        &[ParameterEntry::new(
            "string[]",
            json!(["Hello", " ", "World"])
        )]
    );
}

#[test]
fn test_text_and_number_stay_distinct() {
    let wire = CallCodec::new(JsonCodec::compact());
    let number = capture_for::<dyn Example>(Expression::call("Add").arg(5).arg(3)).unwrap();
    let text = wire.encode(&number).unwrap();

    assert!(text.contains(r#""value":5"#));
    assert!(!text.contains(r#""value":"5""#));
}

#[test]
fn test_missing_method_name_is_malformed() {
    let (invoker, printed) = example_invoker();
    let text = r#"{"interfaceType":"Example","arguments":[{"typeName":"string","value":"hi"}]}"#;

    let err = invoker.execute_text(text).unwrap_err();
    assert!(matches!(err, InvokeError::MalformedPayload(_)));
    assert!(printed.borrow().is_empty());
}

#[test]
fn test_bare_value_is_not_a_call() {
    let err = capture_for::<dyn Example>(Expression::Constant(Value::Int32(8))).unwrap_err();
    assert!(matches!(err, InvokeError::InvalidExpressionKind(_)));
}

#[test]
fn test_floats_survive_dispatch_bit_exact() {
    let (invoker, _) = example_invoker();
    for value in HARD_FLOATS {
        let scaled: f64 = invoker
            .execute("Example", Expression::call("Scale").arg(value).arg(1.0))
            .unwrap();
        assert_eq!(scaled.to_bits(), value.to_bits(), "{value:e}");
    }
}

#[test]
fn test_i64_bounds_survive_dispatch() {
    let (invoker, _) = example_invoker();
    for bound in [i64::MIN, i64::MAX] {
        let result: i64 = invoker
            .execute_on::<dyn Example, _>(Expression::call("Offset").arg(bound).arg(0_i64))
            .unwrap();
        assert_eq!(result, bound);
    }
}

#[test]
fn test_non_finite_float_is_rejected_before_the_wire() {
    let (invoker, _) = example_invoker();
    let err = invoker
        .execute::<f64>(
            "Example",
            Expression::call("Scale").arg(2.0).arg(f64::INFINITY),
        )
        .unwrap_err();

    match err {
        InvokeError::ArgumentTypeMismatch { method, index, .. } => {
            assert_eq!(method, "Scale");
            assert_eq!(index, 1);
        }
        other => panic!("expected ArgumentTypeMismatch, got {other:?}"),
    }
}
