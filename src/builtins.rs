//! The table of named operations that evaluate all of their arguments.
//!
//! Resolved once at startup; the evaluator consults it by head-symbol text
//! before falling through to environment lookup.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::error::EvalErr;
use crate::tree::{chain_len, clone_chain, iter_chain, Cell, ListBuilder};
use crate::value::number::NumberError;
use crate::value::{Number, Symbol, ToSymbol, Value};


pub type Args = Vec<Value>;
pub type Ret = Result<Value, EvalErr>;

#[derive(Clone, Copy)]
pub struct BuiltIn {
    name: &'static str,
    fun: fn(Args) -> Ret,
}

impl BuiltIn {
    pub fn new(name: &'static str, fun: fn(Args) -> Ret) -> BuiltIn {
        BuiltIn { name, fun }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: Args) -> Ret {
        (self.fun)(args)
    }
}

impl PartialEq for BuiltIn {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl fmt::Debug for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{} @ {:p}]", self.name, &self.fun)
    }
}

impl fmt::Display for BuiltIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[BUILTIN_{}]", self.name)
    }
}


macro_rules! builtins {
    [$($name:expr => $fun:expr),+ $(,)?] => {
        {
            let mut m = HashMap::new();
            $(
                m.insert($name, BuiltIn::new($name, $fun));
            )+
            m
        }
    };
}

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, BuiltIn> = builtins![
        "list" => list,
        "eq" => eq,
        "+" => add,
        "-" => sub,
        "*" => mul,
        "%" => modulo,
        "succ" => succ,
        "car" => car,
        "cdr" => cdr,
        "cadr" => cadr,
        "cons" => cons,
        "append" => append,
        "prepend" => prepend,
        "len" => len,
        "strlen" => strlen,
        "strindex" => strindex,
        "strcat" => strcat,
        "int" => int,
        "nand" => nand,
    ];
}

pub fn lookup(name: &str) -> Option<&'static BuiltIn> {
    BUILTINS.get(name)
}


pub fn list(args: Args) -> Ret {
    let mut builder = ListBuilder::new();
    for arg in args {
        builder.append(arg);
    }
    Ok(Value::List(builder.release()))
}

pub fn eq(args: Args) -> Ret {
    exactly("eq", &args, 2)?;
    Ok(Value::truth(structural_eq(&args[0], &args[1])?))
}

pub fn add(args: Args) -> Ret {
    fold_arith("+", &args, Number::add)
}

pub fn sub(args: Args) -> Ret {
    fold_arith("-", &args, Number::sub)
}

pub fn mul(args: Args) -> Ret {
    fold_arith("*", &args, Number::mul)
}

pub fn modulo(args: Args) -> Ret {
    exactly("%", &args, 2)?;
    let a = integer("%", &args[0])?;
    let b = integer("%", &args[1])?;
    if b == 0 {
        return err!(DivideByZero);
    }
    Ok(Number::Integer(a % b).into())
}

pub fn succ(args: Args) -> Ret {
    exactly("succ", &args, 1)?;
    let n = integer("succ", &args[0])?;
    Ok(Number::Integer(n + 1).into())
}

pub fn car(args: Args) -> Ret {
    exactly("car", &args, 1)?;
    match list_head("car", &args[0])? {
        Some(cell) => Ok(cell.content().clone()),
        None => err_ctx!(
            "car".to_symbol(),
            TypeError {
                given: args[0].clone(),
                expected: Cow::Borrowed("a non-empty list"),
            }
        ),
    }
}

pub fn cdr(args: Args) -> Ret {
    exactly("cdr", &args, 1)?;
    match list_head("cdr", &args[0])? {
        Some(cell) => Ok(Value::List(clone_chain(cell.next()))),
        None => err_ctx!(
            "cdr".to_symbol(),
            TypeError {
                given: args[0].clone(),
                expected: Cow::Borrowed("a non-empty list"),
            }
        ),
    }
}

pub fn cadr(args: Args) -> Ret {
    exactly("cadr", &args, 1)?;
    match list_head("cadr", &args[0])? {
        Some(cell) => match cell.next() {
            Some(second) => Ok(second.content().clone()),
            None => err_ctx!(
                "cadr".to_symbol(),
                TypeError {
                    given: args[0].clone(),
                    expected: Cow::Borrowed("a list of at least 2 elements"),
                }
            ),
        },
        None => err_ctx!(
            "cadr".to_symbol(),
            TypeError {
                given: args[0].clone(),
                expected: Cow::Borrowed("a non-empty list"),
            }
        ),
    }
}

pub fn cons(args: Args) -> Ret {
    exactly("cons", &args, 2)?;
    let tail = list_head("cons", &args[1])?;
    let mut head = Cell::new(args[0].clone());
    head.set_next(clone_chain(tail));
    Ok(Value::List(Some(Box::new(head))))
}

pub fn append(args: Args) -> Ret {
    exactly("append", &args, 2)?;
    let mut builder = ListBuilder::new();
    if let Some(head) = list_head("append", &args[0])? {
        for cell in head.iter() {
            builder.append_cell(cell.clone_detached());
        }
    }
    builder.append(args[1].clone());
    Ok(Value::List(builder.release()))
}

pub fn prepend(args: Args) -> Ret {
    exactly("prepend", &args, 2)?;
    let tail = list_head("prepend", &args[0])?;
    let mut head = Cell::new(args[1].clone());
    head.set_next(clone_chain(tail));
    Ok(Value::List(Some(Box::new(head))))
}

pub fn len(args: Args) -> Ret {
    exactly("len", &args, 1)?;
    let head = list_head("len", &args[0])?;
    Ok(Number::Integer(chain_len(head) as i64).into())
}

pub fn strlen(args: Args) -> Ret {
    exactly("strlen", &args, 1)?;
    let content = string("strlen", &args[0])?;
    Ok(Number::Integer(content.chars().count() as i64).into())
}

pub fn strindex(args: Args) -> Ret {
    exactly("strindex", &args, 2)?;
    let content = string("strindex", &args[0])?;
    let index = integer("strindex", &args[1])?;

    let length = content.chars().count();
    if index < 0 {
        return err!(IndexOutOfRange { index, length });
    }
    match content.chars().nth(index as usize) {
        Some(c) => Ok(Value::Symbol(Symbol::string_literal(c.to_string()))),
        None => err!(IndexOutOfRange { index, length }),
    }
}

pub fn strcat(args: Args) -> Ret {
    at_least("strcat", &args, 2)?;
    let mut combined = String::new();
    for arg in &args {
        combined += string("strcat", arg)?;
    }
    Ok(Value::Symbol(Symbol::string_literal(combined)))
}

pub fn int(args: Args) -> Ret {
    exactly("int", &args, 1)?;
    let content = string("int", &args[0])?;
    match content.parse::<Number>() {
        Ok(num @ Number::Integer(_)) => Ok(num.into()),
        _ => err_ctx!(
            "int".to_symbol(),
            TypeError {
                given: args[0].clone(),
                expected: Cow::Borrowed("a string literal holding an integer"),
            }
        ),
    }
}

pub fn nand(args: Args) -> Ret {
    at_least("nand", &args, 2)?;
    Ok(Value::truth(!args.iter().all(Value::is_truthy)))
}


// Structural equality. Numbers compare by value within the same kind;
// cross-kind numeric comparison is an error rather than a coercion.
fn structural_eq(a: &Value, b: &Value) -> Result<bool, EvalErr> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if !x.same_kind(y) {
                return err_ctx!(
                    "eq".to_symbol(),
                    TypeError {
                        given: b.clone(),
                        expected: Cow::Borrowed("a number of the same kind"),
                    }
                );
            }
            Ok(x == y)
        }
        (Value::Symbol(x), Value::Symbol(y)) => Ok(x == y),
        (Value::List(x), Value::List(y)) => {
            let mut xi = iter_chain(x.as_deref());
            let mut yi = iter_chain(y.as_deref());
            loop {
                match (xi.next(), yi.next()) {
                    (None, None) => return Ok(true),
                    (Some(xc), Some(yc)) => {
                        if !structural_eq(xc.content(), yc.content())? {
                            return Ok(false);
                        }
                    }
                    _ => return Ok(false),
                }
            }
        }
        (Value::Closure(x), Value::Closure(y)) => Ok(x == y),
        _ => Ok(false),
    }
}

// Result kind is float if any operand is float, else integer.
fn fold_arith(
    form: &'static str,
    args: &Args,
    op: fn(Number, Number) -> Result<Number, NumberError>,
) -> Ret {
    at_least(form, args, 1)?;
    let mut curr = number(form, &args[0])?;
    for arg in &args[1..] {
        let next = number(form, arg)?;
        curr = match op(curr, next) {
            Ok(num) => num,
            Err(NumberError::RationalArithmetic) => {
                return err_ctx!(
                    form.to_symbol(),
                    TypeError {
                        given: arg.clone(),
                        expected: Cow::Borrowed("an integer or float operand"),
                    }
                );
            }
        };
    }
    Ok(curr.into())
}

fn number(form: &'static str, arg: &Value) -> Result<Number, EvalErr> {
    match arg {
        Value::Number(num) => Ok(*num),
        _ => err_ctx!(
            form.to_symbol(),
            TypeError {
                given: arg.clone(),
                expected: Cow::Borrowed("a number"),
            }
        ),
    }
}

fn integer(form: &'static str, arg: &Value) -> Result<i64, EvalErr> {
    if let Value::Number(num) = arg {
        if let Some(val) = num.as_integer() {
            return Ok(val);
        }
    }
    err_ctx!(
        form.to_symbol(),
        TypeError {
            given: arg.clone(),
            expected: Cow::Borrowed("an integer"),
        }
    )
}

fn list_head<'a>(form: &'static str, arg: &'a Value) -> Result<Option<&'a Cell>, EvalErr> {
    match arg {
        Value::List(head) => Ok(head.as_deref()),
        _ => err_ctx!(
            form.to_symbol(),
            TypeError {
                given: arg.clone(),
                expected: Cow::Borrowed("a list"),
            }
        ),
    }
}

fn string<'a>(form: &'static str, arg: &'a Value) -> Result<&'a str, EvalErr> {
    if let Value::Symbol(sym) = arg {
        if let Some(content) = sym.string_content() {
            return Ok(content);
        }
    }
    err_ctx!(
        form.to_symbol(),
        TypeError {
            given: arg.clone(),
            expected: Cow::Borrowed("a string literal"),
        }
    )
}

fn exactly(form: &'static str, args: &Args, n: usize) -> Result<(), EvalErr> {
    if args.len() == n {
        Ok(())
    } else {
        err!(UsageError {
            form: form.to_symbol(),
            expected: Cow::Owned(format!("exactly {} arguments", n)),
        })
    }
}

fn at_least(form: &'static str, args: &Args, n: usize) -> Result<(), EvalErr> {
    if args.len() >= n {
        Ok(())
    } else {
        err!(UsageError {
            form: form.to_symbol(),
            expected: Cow::Owned(format!("at least {} arguments", n)),
        })
    }
}
