//! Representation of evaluation errors.
//!
//! Every evaluator and builtin operation returns a result; the first failure
//! short-circuits to the caller without local recovery. Presentation and
//! loop resumption are the REPL collaborator's concern.

use std::borrow::Cow;
use std::fmt;

use self::ErrKind::*;
use self::ExpectedCount::*;
use crate::value::{Symbol, Value};


macro_rules! err {
    ($($kind:tt)+) => {
        Err(crate::error::EvalErr::empty_context(
            crate::error::ErrKind::$($kind)+,
        ))
    };
}

macro_rules! err_ctx {
    ($form:expr, $($kind:tt)+) => {
        Err(crate::error::EvalErr::with_context(
            $form,
            crate::error::ErrKind::$($kind)+,
        ))
    };
}


#[derive(Debug)]
pub struct EvalErr {
    context: Option<Symbol>,
    pub kind: ErrKind,
}

#[derive(Debug, PartialEq)]
pub enum ErrKind {
    UsageError {
        form: Symbol,
        expected: Cow<'static, str>,
    },
    UnboundSymbol(Symbol),
    TypeError {
        given: Value,
        expected: Cow<'static, str>,
    },
    DivideByZero,
    IndexOutOfRange {
        index: i64,
        length: usize,
    },
    ArityMismatch {
        given: usize,
        expected: ExpectedCount,
    },
    NotCallable(Value),
}

#[derive(Debug, PartialEq)]
pub enum ExpectedCount {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
}

impl EvalErr {
    // Prefer using err! for convenience.
    pub fn empty_context(kind: ErrKind) -> Self {
        Self {
            context: None,
            kind,
        }
    }

    // Prefer using err_ctx! for convenience.
    pub fn with_context(form: Symbol, kind: ErrKind) -> Self {
        Self {
            context: Some(form),
            kind,
        }
    }

    pub fn context(&self) -> Option<&Symbol> {
        self.context.as_ref()
    }
}


impl PartialEq for EvalErr {
    /// Compare kind.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl fmt::Display for EvalErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Eval Error] ")?;
        match &self.kind {
            UsageError { form, expected } => {
                write!(f, "Invalid usage of \"{}\": expected {}", form, expected)
            }
            UnboundSymbol(symbol) => write!(f, "Unbound symbol: \"{}\"", symbol),
            TypeError { given, expected } => write!(
                f,
                "Invalid argument: given {}, expected {}",
                given, expected
            ),
            DivideByZero => write!(f, "Division by zero"),
            IndexOutOfRange { index, length } => write!(
                f,
                "Index out of range: given {}, length is {}",
                index, length
            ),
            ArityMismatch { given, expected } => write!(
                f,
                "Wrong argument count: given {}, expected {}",
                given, expected
            ),
            NotCallable(val) => write!(f, "Not callable: {}", val),
        }?;

        if let Some(form) = &self.context {
            write!(f, " (in {})", form)?;
        }
        Ok(())
    }
}

impl fmt::Display for ExpectedCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Exactly(exactly) => write!(f, "{}", exactly),
            AtLeast(minimum) => write!(f, "at least {}", minimum),
            AtMost(maximum) => write!(f, "at most {}", maximum),
        };
    }
}

impl std::error::Error for EvalErr {}
