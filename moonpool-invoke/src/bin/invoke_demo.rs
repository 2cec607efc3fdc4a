//! Demo driver: three calls on an `Example` interface, each shipped through
//! its JSON wire text before being dispatched.
//!
//! Serialized calls are logged at debug level.

use std::process;

use moonpool_invoke::prelude::*;

struct ExampleContract;

impl Contract for ExampleContract {
    const NAME: &'static str = "Example";

    fn descriptor() -> InterfaceDescriptor {
        InterfaceDescriptor::new(Self::NAME)
            .method(
                "Add",
                &[("x", TypeName::Int32), ("y", TypeName::Int32)],
                Some(TypeName::Int32),
            )
            .method("Print", &[("message", TypeName::Text)], None)
            .method(
                "Concat",
                &[("values", TypeName::TextArray)],
                Some(TypeName::Text),
            )
    }
}

#[derive(Default)]
struct ExampleImplementation;

impl Invoke for ExampleImplementation {
    fn invoke(&self, method: &str, mut args: Arguments) -> MethodResult {
        match method {
            "Add" => {
                let x: i32 = args.next()?;
                let y: i32 = args.next()?;
                Ok(Some(Value::Int32(x + y)))
            }
            "Print" => {
                let message: String = args.next()?;
                println!("{message}");
                Ok(None)
            }
            "Concat" => {
                let values: Vec<String> = args.next()?;
                Ok(Some(Value::Text(values.concat())))
            }
            _ => Err(InvokeError::implementation(format!(
                "Example has no method {method}"
            ))),
        }
    }
}

fn run() -> Result<()> {
    let mut contracts = ContractCatalog::new();
    contracts.register_contract::<ExampleContract>();

    let mut registry = ImplementationRegistry::new();
    registry.bind_default::<ExampleImplementation>(ExampleContract::NAME);

    let invoker = Invoker::new(contracts, registry);

    let result: i32 =
        invoker.execute_on::<ExampleContract, _>(Expression::call("Add").arg(5).arg(3))?;
    println!("Result: {result}");

    invoker.execute_on::<ExampleContract, ()>(Expression::call("Print").arg("Hello, World!"))?;

    let result: String = invoker.execute_on::<ExampleContract, _>(
        Expression::call("Concat").arg(["Hello", " ", "World"]),
    )?;
    println!("Result: {result}");

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    if let Err(e) = run() {
        eprintln!("ERROR: {e}");
        process::exit(1);
    }
}
