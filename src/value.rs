use std::rc::Rc;

use crate::callable::{Function, NativeFunction};
use crate::class::{Class, Instance};

/// A runtime value: nil, boolean, double-precision number, text, or one of
/// the reference kinds (native function, function, class, instance).
///
/// Reference kinds sit behind `Rc` so that copying a value never copies the
/// object, and equality on them is identity.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Native(Rc<NativeFunction>),
    Function(Rc<Function>),
    Class(Rc<Class>),
    Instance(Rc<Instance>),
}

impl PartialEq for Value {
    /// Value equality: nil equals only nil; numbers, text, and booleans
    /// compare by value; callables and instances compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,

            (Value::Bool(a), Value::Bool(b)) => a == b,

            (Value::Number(a), Value::Number(b)) => a == b,

            (Value::String(a), Value::String(b)) => a == b,

            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),

            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),

            (Value::Class(a), Value::Class(b)) => Rc::ptr_eq(a, b),

            (Value::Instance(a), Value::Instance(b)) => Rc::ptr_eq(a, b),

            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => write!(f, "{}", s),

            Value::Native(native) => write!(f, "<native fn {}>", native.name),

            Value::Function(function) => write!(f, "<fn {}>", function.name()),

            Value::Class(class) => write!(f, "{}", class.name),

            Value::Instance(instance) => write!(f, "{} instance", instance.class.name),
        }
    }
}
