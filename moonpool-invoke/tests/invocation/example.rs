//! The `Example` contract and its implementation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use moonpool_invoke::prelude::*;

/// Typed view of the contract, as callers and implementors see it.
pub trait Example {
    fn add(&self, x: i32, y: i32) -> i32;
    fn print(&self, message: String);
    fn concat(&self, values: Vec<String>) -> String;
    fn divide(&self, x: i32, y: i32) -> std::result::Result<i32, DivideByZero>;
    fn scale(&self, value: f64, factor: f64) -> f64;
    fn offset(&self, base: i64, delta: i64) -> i64;
}

impl Contract for dyn Example {
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
            .method(
                "Divide",
                &[("x", TypeName::Int32), ("y", TypeName::Int32)],
                Some(TypeName::Int32),
            )
            .method(
                "Scale",
                &[("value", TypeName::Float64), ("factor", TypeName::Float64)],
                Some(TypeName::Float64),
            )
            .method(
                "Offset",
                &[("base", TypeName::Int64), ("delta", TypeName::Int64)],
                Some(TypeName::Int64),
            )
    }
}

/// Domain error raised by `Divide`.
#[derive(Debug, PartialEq, Eq)]
pub struct DivideByZero {
    pub dividend: i32,
}

impl fmt::Display for DivideByZero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot divide {} by zero", self.dividend)
    }
}

impl std::error::Error for DivideByZero {}

/// Implementation recording every printed message.
pub struct ExampleImplementation {
    printed: Rc<RefCell<Vec<String>>>,
}

impl ExampleImplementation {
    pub fn new(printed: Rc<RefCell<Vec<String>>>) -> Self {
        Self { printed }
    }
}

impl Example for ExampleImplementation {
    fn add(&self, x: i32, y: i32) -> i32 {
        x + y
    }

    fn print(&self, message: String) {
        self.printed.borrow_mut().push(message);
    }

    fn concat(&self, values: Vec<String>) -> String {
        values.concat()
    }

    fn divide(&self, x: i32, y: i32) -> std::result::Result<i32, DivideByZero> {
        if y == 0 {
            return Err(DivideByZero { dividend: x });
        }
        Ok(x / y)
    }

    fn scale(&self, value: f64, factor: f64) -> f64 {
        value * factor
    }

    fn offset(&self, base: i64, delta: i64) -> i64 {
        base.wrapping_add(delta)
    }
}

impl Invoke for ExampleImplementation {
    fn invoke(&self, method: &str, mut args: Arguments) -> MethodResult {
        match method {
            "Add" => {
                let x = args.next()?;
                let y = args.next()?;
                Ok(Some(Value::Int32(self.add(x, y))))
            }
            "Print" => {
                self.print(args.next()?);
                Ok(None)
            }
            "Concat" => Ok(Some(Value::Text(self.concat(args.next()?)))),
            "Divide" => {
                let x = args.next()?;
                let y = args.next()?;
                let quotient = self.divide(x, y).map_err(InvokeError::implementation)?;
                Ok(Some(Value::Int32(quotient)))
            }
            "Scale" => {
                let value = args.next()?;
                let factor = args.next()?;
                Ok(Some(Value::Float64(self.scale(value, factor))))
            }
            "Offset" => {
                let base = args.next()?;
                let delta = args.next()?;
                Ok(Some(Value::Int64(self.offset(base, delta))))
            }
            _ => Err(InvokeError::implementation(format!(
                "Example has no method {method}"
            ))),
        }
    }
}
