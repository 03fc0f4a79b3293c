//! Arbor: a small interpreter for a parenthesized symbolic-expression
//! language.
//!
//! The reader ([`parser`]) turns a flat character stream into a tree of
//! list cells; the evaluator ([`evaluator`]) walks that tree against a
//! chain of binding frames ([`environment`]) and produces values. I/O,
//! pretty-printed presentation, and loop control live outside the core; a
//! reference REPL ships as the `arbor` binary.
//!
//! Note that this crate does *not* set up logging; clients should take
//! care of that before calling into it. See:
//!   https://github.com/rust-lang/log#in-executables.

#[macro_use]
pub mod error;

pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod parser;
pub mod tree;
pub mod value;

pub mod prelude {
    pub use crate::builtins::{Args, BuiltIn, Ret};
    pub use crate::environment::{Environment, Frame};
    pub use crate::error::{ErrKind, EvalErr, ExpectedCount};
    pub use crate::evaluator::{apply_closure, evaluate, evlis};
    pub use crate::parser::{parse, ParseError, ParseErrorReason, ReadResult, Reader};
    pub use crate::tree::{Cell, CellIter, ListBuilder};
    pub use crate::value::{Closure, Number, Symbol, ToSymbol, Value};
}

pub use crate::environment::Environment;
pub use crate::evaluator::evaluate;
pub use crate::parser::parse;
