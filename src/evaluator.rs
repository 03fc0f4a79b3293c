//! Evaluation of cell trees against an environment.
//!
//! `evaluate` classifies one cell and dispatches: self-evaluation,
//! environment lookup, special-form handling, or builtin invocation.
//! Special forms live here because they control which of their argument
//! cells are evaluated; uniformly-evaluating operations live in the
//! builtins table.

use std::borrow::Cow;

use crate::builtins;
use crate::environment::{Environment, Frame};
use crate::error::{EvalErr, ExpectedCount};
use crate::tree::Cell;
use crate::value::{Closure, Number, Symbol, Value};


pub fn evaluate(cell: &Cell, env: &mut Environment) -> Result<Value, EvalErr> {
    if !cell.decorations().is_empty() {
        // Implicit quoting: strip one decoration layer, return the payload
        // verbatim. No lookup, no numeric coercion.
        let mut payload = cell.clone_detached();
        payload.strip_decoration();
        return Ok(cell_to_value(&payload));
    }

    match cell.content() {
        Value::List(None) => Ok(Value::empty_list()),
        Value::List(Some(head)) => eval_list(head, env),
        Value::Symbol(sym) => eval_symbol(sym, env),
        value => Ok(value.clone()),
    }
}

/// Evaluates every cell of a sibling chain, left to right.
pub fn evlis(args: Option<&Cell>, env: &mut Environment) -> Result<Vec<Value>, EvalErr> {
    let mut res = Vec::new();
    if let Some(head) = args {
        for cell in head.iter() {
            res.push(evaluate(cell, env)?);
        }
    }
    Ok(res)
}

/// Applies a closure to unevaluated argument cells.
///
/// Arguments are evaluated in the caller's environment, and the new frame
/// links to the caller's environment at the call site rather than the one
/// active at closure creation. Scoping is dynamic; see DESIGN.md.
pub fn apply_closure(
    closure: &Closure,
    args: Option<&Cell>,
    env: &mut Environment,
) -> Result<Value, EvalErr> {
    let evaluated = evlis(args, env)?;
    if evaluated.len() != closure.params().len() {
        return err!(ArityMismatch {
            given: evaluated.len(),
            expected: ExpectedCount::Exactly(closure.params().len()),
        });
    }

    let mut frame = Frame::new();
    for (param, value) in closure.params().iter().zip(evaluated) {
        frame.bind(param.clone(), value);
    }
    env.push(frame);
    let result = evaluate(closure.body(), env);
    env.pop();
    result
}


fn eval_list(head: &Cell, env: &mut Environment) -> Result<Value, EvalErr> {
    if head.decorations().is_empty() {
        if let Value::Symbol(name) = head.content() {
            return dispatch_form(name, head.next(), env);
        }
    }

    // Head is itself a list (or decorated): evaluate it first, then apply
    // or redispatch on what it produced.
    let func = evaluate(head, env)?;
    match func {
        Value::Closure(closure) => apply_closure(&closure, head.next(), env),
        Value::Symbol(name) => dispatch_form(&name, head.next(), env),
        other => err!(NotCallable(other)),
    }
}

fn eval_symbol(sym: &Symbol, env: &mut Environment) -> Result<Value, EvalErr> {
    if let Ok(num) = sym.as_str().parse::<Number>() {
        return Ok(Value::Number(num));
    }
    // Quote-bounded symbols are string data; like numbers, they are
    // literals, not names to resolve.
    if sym.string_content().is_some() {
        return Ok(Value::Symbol(sym.clone()));
    }
    if let Some(value) = env.lookup(sym.as_str()) {
        return Ok(value.clone());
    }
    if sym.is_boolean_literal() {
        return Ok(Value::Symbol(sym.clone()));
    }
    err!(UnboundSymbol(sym.clone()))
}

// Special forms take precedence, then the builtin table, then the
// environment; a resolved closure is applied, anything else resolved is not
// callable.
fn dispatch_form(
    name: &Symbol,
    args: Option<&Cell>,
    env: &mut Environment,
) -> Result<Value, EvalErr> {
    if let Some(result) = special_form(name, args, env) {
        return result;
    }

    if let Some(builtin) = builtins::lookup(name.as_str()) {
        let evaluated = evlis(args, env)?;
        return builtin.call(evaluated);
    }

    match eval_symbol(name, env)? {
        Value::Closure(closure) => apply_closure(&closure, args, env),
        other => err!(NotCallable(other)),
    }
}

fn special_form(
    name: &Symbol,
    args: Option<&Cell>,
    env: &mut Environment,
) -> Option<Result<Value, EvalErr>> {
    match name.as_str() {
        "quote" => Some(quote(name, args)),
        "lambda" => Some(lambda(name, args)),
        "let" => Some(let_form(name, args, env)),
        "if" => Some(if_form(name, args, env)),
        "define" => Some(define(name, args, env)),
        "progn" => Some(progn(name, args, env)),
        "apply" => Some(apply_form(name, args, env)),
        "eval" => Some(eval_form(name, args, env)),
        _ => None,
    }
}


fn quote(form: &Symbol, args: Option<&Cell>) -> Result<Value, EvalErr> {
    let cell = unary(form, args)?;
    Ok(cell_to_value(cell))
}

fn lambda(form: &Symbol, args: Option<&Cell>) -> Result<Value, EvalErr> {
    let (params_cell, body_cell) = binary(form, args)?;

    let head = match params_cell.content() {
        Value::List(head) if params_cell.decorations().is_empty() => head.as_deref(),
        _ => {
            return err!(UsageError {
                form: form.clone(),
                expected: Cow::Borrowed("a parameter list of bare symbols"),
            });
        }
    };

    let mut params = Vec::new();
    if let Some(head) = head {
        for cell in head.iter() {
            match cell.content() {
                // Parameter names are taken as plain symbol text.
                Value::Symbol(sym) if cell.decorations().is_empty() => params.push(sym.clone()),
                _ => {
                    return err!(UsageError {
                        form: form.clone(),
                        expected: Cow::Borrowed("a parameter list of bare symbols"),
                    });
                }
            }
        }
    }

    Ok(Value::Closure(Closure::new(
        params,
        body_cell.clone_detached(),
    )))
}

fn let_form(form: &Symbol, args: Option<&Cell>, env: &mut Environment) -> Result<Value, EvalErr> {
    let (bindings_cell, body_cell) = binary(form, args)?;

    let bindings_head = match bindings_cell.content() {
        Value::List(head) if bindings_cell.decorations().is_empty() => head.as_deref(),
        _ => {
            return err!(UsageError {
                form: form.clone(),
                expected: Cow::Borrowed("a list of (name value) binding pairs"),
            });
        }
    };

    // Every value expression is evaluated in the outer environment before
    // any name is bound.
    let mut pending = Vec::new();
    if let Some(head) = bindings_head {
        for pair_cell in head.iter() {
            let pair_head = match pair_cell.content() {
                Value::List(Some(pair_head)) if pair_cell.decorations().is_empty() => pair_head,
                _ => {
                    return err!(UsageError {
                        form: form.clone(),
                        expected: Cow::Borrowed("a list of (name value) binding pairs"),
                    });
                }
            };
            let name = match pair_head.content() {
                Value::Symbol(sym) if pair_head.decorations().is_empty() => sym.clone(),
                _ => {
                    return err!(UsageError {
                        form: form.clone(),
                        expected: Cow::Borrowed("a bare symbol in binding-name position"),
                    });
                }
            };
            let value_cell = match pair_head.next() {
                Some(cell) if cell.next().is_none() => cell,
                _ => {
                    return err!(UsageError {
                        form: form.clone(),
                        expected: Cow::Borrowed("exactly 2 elements per binding pair"),
                    });
                }
            };
            pending.push((name, evaluate(value_cell, env)?));
        }
    }

    let mut frame = Frame::new();
    for (name, value) in pending {
        frame.bind(name, value);
    }
    env.push(frame);
    let result = evaluate(body_cell, env);
    env.pop();
    result
}

fn if_form(form: &Symbol, args: Option<&Cell>, env: &mut Environment) -> Result<Value, EvalErr> {
    let (cond, then_branch, else_branch) = ternary(form, args)?;
    if evaluate(cond, env)?.is_truthy() {
        evaluate(then_branch, env)
    } else {
        evaluate(else_branch, env)
    }
}

fn define(form: &Symbol, args: Option<&Cell>, env: &mut Environment) -> Result<Value, EvalErr> {
    let (name_cell, value_cell) = binary(form, args)?;
    let name = match name_cell.content() {
        // The symbol position is not evaluated.
        Value::Symbol(sym) if name_cell.decorations().is_empty() => sym.clone(),
        _ => {
            return err!(UsageError {
                form: form.clone(),
                expected: Cow::Borrowed("a bare symbol to bind"),
            });
        }
    };

    let value = evaluate(value_cell, env)?;
    env.define(name, value.clone());
    Ok(value)
}

fn progn(form: &Symbol, args: Option<&Cell>, env: &mut Environment) -> Result<Value, EvalErr> {
    let first = match args {
        Some(cell) => cell,
        None => {
            return err!(UsageError {
                form: form.clone(),
                expected: Cow::Borrowed("at least 1 argument"),
            });
        }
    };

    let mut result = evaluate(first, env)?;
    for cell in first.iter().skip(1) {
        result = evaluate(cell, env)?;
    }
    Ok(result)
}

fn apply_form(form: &Symbol, args: Option<&Cell>, env: &mut Environment) -> Result<Value, EvalErr> {
    let (func_cell, list_cell) = binary(form, args)?;
    let func = evaluate(func_cell, env)?;

    let arg_chain = match evaluate(list_cell, env)? {
        Value::List(head) => head,
        other => {
            return err_ctx!(
                form.clone(),
                TypeError {
                    given: other,
                    expected: Cow::Borrowed("a list of arguments"),
                }
            );
        }
    };
    let arg_head = arg_chain.as_deref();

    match func {
        Value::Closure(closure) => apply_closure(&closure, arg_head, env),
        Value::Symbol(name) => dispatch_form(&name, arg_head, env),
        other => err!(NotCallable(other)),
    }
}

fn eval_form(form: &Symbol, args: Option<&Cell>, env: &mut Environment) -> Result<Value, EvalErr> {
    let value = evaluate(unary(form, args)?, env)?;
    match value {
        // Expression results get one extra indirection.
        value @ Value::List(_) | value @ Value::Symbol(_) => {
            let cell = Cell::new(value);
            evaluate(&cell, env)
        }
        value => Ok(value),
    }
}


// A decorated cell cannot lose its markers in a bare value, so it stays
// wrapped as a single-element list until the remaining layers are consumed.
fn cell_to_value(cell: &Cell) -> Value {
    if cell.decorations().is_empty() {
        cell.content().clone()
    } else {
        Value::List(Some(Box::new(cell.clone_detached())))
    }
}

fn unary<'a>(form: &Symbol, args: Option<&'a Cell>) -> Result<&'a Cell, EvalErr> {
    match args {
        Some(cell) if cell.next().is_none() => Ok(cell),
        _ => err!(UsageError {
            form: form.clone(),
            expected: Cow::Borrowed("exactly 1 argument"),
        }),
    }
}

fn binary<'a>(form: &Symbol, args: Option<&'a Cell>) -> Result<(&'a Cell, &'a Cell), EvalErr> {
    if let Some(first) = args {
        if let Some(second) = first.next() {
            if second.next().is_none() {
                return Ok((first, second));
            }
        }
    }
    err!(UsageError {
        form: form.clone(),
        expected: Cow::Borrowed("exactly 2 arguments"),
    })
}

fn ternary<'a>(
    form: &Symbol,
    args: Option<&'a Cell>,
) -> Result<(&'a Cell, &'a Cell, &'a Cell), EvalErr> {
    if let Some(first) = args {
        if let Some(second) = first.next() {
            if let Some(third) = second.next() {
                if third.next().is_none() {
                    return Ok((first, second, third));
                }
            }
        }
    }
    err!(UsageError {
        form: form.clone(),
        expected: Cow::Borrowed("exactly 3 arguments"),
    })
}
