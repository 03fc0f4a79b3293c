//! Representation of runtime values.

use std::convert::TryFrom;
use std::fmt;

pub mod closure;
pub mod number;
pub mod symbol;

pub use self::closure::Closure;
pub use self::number::Number;
pub use self::symbol::{Symbol, ToSymbol, FALSE_TOKEN, TRUE_TOKEN};

use crate::tree::Cell;


/// Tagged variant over every runtime datum. Exactly one variant is active;
/// a `List` holds the owned head cell of its sibling chain, with the empty
/// list represented as `List(None)`.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Symbol(Symbol),
    Number(Number),
    List(Option<Box<Cell>>),
    Closure(Closure),
}


impl Value {
    pub fn empty_list() -> Value {
        Value::List(None)
    }

    pub fn truth(b: bool) -> Value {
        Value::Symbol(Symbol::truth(b))
    }

    /// Exactly one value is false: the false-literal symbol. Everything
    /// else, including the empty list and zero, is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Symbol(sym) => sym.as_str() != FALSE_TOKEN,
            _ => true,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }
}


impl Default for Value {
    fn default() -> Self {
        Value::List(None)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Symbol(sym) => write!(f, "{}", sym),
            Value::Number(num) => write!(f, "{}", num),
            Value::List(None) => write!(f, "()"),
            Value::List(Some(head)) => {
                write!(f, "(")?;
                for (i, cell) in head.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", cell)?;
                }
                write!(f, ")")
            }
            Value::Closure(closure) => {
                write!(f, "[CLOSURE_(")?;
                for (i, param) in closure.params().iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")]")
            }
        }
    }
}


// From<T> impls over variant payloads.
impl From<Symbol> for Value {
    fn from(sym: Symbol) -> Self {
        Value::Symbol(sym)
    }
}

impl From<Number> for Value {
    fn from(num: Number) -> Self {
        Value::Number(num)
    }
}

impl From<Closure> for Value {
    fn from(closure: Closure) -> Self {
        Value::Closure(closure)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::Number(Number::Integer(val))
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::Number(Number::Float(val))
    }
}


// TryFrom<Value-like> impls over variant payloads.
macro_rules! impl_try_from {
    ($($variant:ident -> $type:ty),+ $(,)?) => {
        $(
            impl TryFrom<Value> for $type {
                type Error = Value;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    if let Value::$variant(inner) = value {
                        Ok(inner)
                    } else {
                        Err(value)
                    }
                }
            }

            impl<'a> TryFrom<&'a Value> for &'a $type {
                type Error = &'a Value;

                fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
                    if let Value::$variant(inner) = value {
                        Ok(inner)
                    } else {
                        Err(value)
                    }
                }
            }
        )+
    };
}

impl_try_from!(
    Symbol -> Symbol,
    Number -> Number,
    Closure -> Closure,
);
