mod common;

use arbor::prelude::*;


#[test]
fn basic_arithmetic() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(+ 1 2 3) (+ 2 2)");
    assert_eq!(
        results,
        vec![Number::Integer(6).into(), Number::Integer(4).into()]
    );

    let results = common::results(
        &mut env,
        "(* (+ 1 1) 3)
         (- 10 1 2)",
    );
    assert_eq!(
        results,
        vec![Number::Integer(6).into(), Number::Integer(7).into()]
    );
}

#[test]
fn float_operand_forces_float_result() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(+ 1 2 4.0)");
    assert_eq!(results, vec![Number::Float(7.0).into()]);

    let results = common::results(&mut env, "(* 2 1.5)");
    assert_eq!(results, vec![Number::Float(3.0).into()]);
}

#[test]
fn succ_is_integer_only() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(succ 3)");
    assert_eq!(results, vec![Number::Integer(4).into()]);

    let results = common::results_with_errors(&mut env, "(succ 3.0)");
    match &results[0] {
        Err(err) => assert!(matches!(err.kind, ErrKind::TypeError { .. })),
        Ok(_) => panic!(),
    }
}

#[test]
fn modulo_and_divide_by_zero() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(% 7 3)");
    assert_eq!(results, vec![Number::Integer(1).into()]);

    let results = common::results_with_errors(&mut env, "(% 7 0)");
    assert_eq!(results[0], Err(EvalErr::empty_context(ErrKind::DivideByZero)));
}

#[test]
fn let_binds_in_discarded_frame() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(let ((x 1) (b 2)) (+ x b))");
    assert_eq!(results, vec![Number::Integer(3).into()]);

    // The frame died with the call; nothing leaked outward.
    assert_eq!(env.lookup("x"), None);
    assert_eq!(env.lookup("b"), None);
    assert_eq!(env.depth(), 1);
}

#[test]
fn let_values_evaluate_in_outer_env() {
    let mut env = common::setup();

    // b's value expression sees the outer a, not the one being bound.
    let results = common::results(
        &mut env,
        "(define a 10)
         (let ((a 1) (b (+ a 1))) (+ a b))",
    );
    assert_eq!(results[1], Number::Integer(12).into());
}

#[test]
fn len_counts_top_level_elements() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(len (list (list 1 4) 2 3 4 5 6 7))");
    assert_eq!(results, vec![Number::Integer(7).into()]);
}

#[test]
fn lambda_application() {
    let mut env = common::setup();

    let results = common::results(&mut env, "((lambda (x) (+ x 2)) 5)");
    assert_eq!(results, vec![Number::Integer(7).into()]);
}

#[test]
fn lambda_arity_mismatch() {
    let mut env = common::setup();

    let results = common::results_with_errors(
        &mut env,
        "(define f (lambda (x) (+ x 2)))
         (f 1 2)",
    );
    match &results[1] {
        Err(err) => assert_eq!(
            err.kind,
            ErrKind::ArityMismatch {
                given: 2,
                expected: ExpectedCount::Exactly(1),
            }
        ),
        Ok(_) => panic!(),
    }
}

#[test]
fn cdr_of_single_element_list_is_empty() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(cdr (list 1))");
    assert_eq!(results, vec![Value::List(None)]);
}

#[test]
fn car_of_empty_list_is_error() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(car (list))");
    match &results[0] {
        Err(err) => assert!(matches!(err.kind, ErrKind::TypeError { .. })),
        Ok(_) => panic!(),
    }
}

#[test]
fn unbound_symbol_reports_name() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(+ x 1)");
    match &results[0] {
        Err(err) => assert_eq!(err.kind, ErrKind::UnboundSymbol(Symbol::new("x"))),
        Ok(_) => panic!(),
    }
}

#[test]
fn quote_and_eval_round_trip() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(+ 1 2) (eval '(+ 1 2)) (eval (quote (+ 1 2)))");
    assert_eq!(results[0], results[1]);
    assert_eq!(results[0], results[2]);
}

#[test]
fn quoted_symbol_is_not_looked_up() {
    let mut env = common::setup();

    let results = common::results(&mut env, "'anna '5");
    assert_eq!(
        results,
        vec![
            Value::Symbol(Symbol::new("anna")),
            Value::Symbol(Symbol::new("5")),
        ]
    );
}

#[test]
fn quoted_list_is_unevaluated() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(len '(undefined symbols here)) (car '(a b))");
    assert_eq!(results[0], Number::Integer(3).into());
    assert_eq!(results[1], Value::Symbol(Symbol::new("a")));
}

#[test]
fn self_evaluating_idempotence() {
    let mut env = common::setup();

    let tree = parse("5 4.0").unwrap();
    let first = evaluate(&tree, &mut env).unwrap();
    let second = evaluate(&tree, &mut env).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Number::Integer(5).into());
    assert_eq!(env.depth(), 1);
}

#[test]
fn define_persists_across_lines() {
    let mut env = common::setup();

    common::results(&mut env, "(define a 2)");
    let results = common::results(&mut env, "(+ a 1)");
    assert_eq!(results, vec![Number::Integer(3).into()]);
}

#[test]
fn dynamic_scope_visible_at_call_site() {
    let mut env = common::setup();

    // Closures do not capture their defining environment: the body's free
    // y resolves against whatever is bound where the closure is called.
    let results = common::results(
        &mut env,
        "(define f (lambda (x) (+ x y)))
         (let ((y 10)) (f 1))",
    );
    assert_eq!(results[1], Number::Integer(11).into());

    let results = common::results_with_errors(&mut env, "(f 1)");
    match &results[0] {
        Err(err) => assert_eq!(err.kind, ErrKind::UnboundSymbol(Symbol::new("y"))),
        Ok(_) => panic!(),
    }
}

#[test]
fn recursive_closure() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(define fact (lambda (n)
           (if (eq n 1) 1
             (* n (fact (- n 1))))))

         (fact 4)",
    );
    assert_eq!(results[1], Number::Integer(24).into());
}

#[test]
fn if_branches_and_truthiness() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(if (eq 1 1) 10 20)
         (if false 1 2)
         (if () 1 2)
         (if 0 1 2)",
    );
    assert_eq!(
        results,
        vec![
            Number::Integer(10).into(),
            Number::Integer(2).into(),
            // The empty list and zero are both true; only false is false.
            Number::Integer(1).into(),
            Number::Integer(1).into(),
        ]
    );
}

#[test]
fn if_requires_three_subexpressions() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(if false 1)");
    match &results[0] {
        Err(err) => assert!(matches!(err.kind, ErrKind::UsageError { .. })),
        Ok(_) => panic!(),
    }
}

#[test]
fn booleans_evaluate_to_themselves() {
    let mut env = common::setup();

    let results = common::results(&mut env, "true false");
    assert_eq!(results, vec![Value::truth(true), Value::truth(false)]);
}

#[test]
fn eq_structural() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(eq 1 1)
         (eq 1 2)
         (eq 'a 'a)
         (eq '(a b) '(a b))
         (eq (list 1 2) (list 1 2))
         (eq '(a) '(a b))",
    );
    assert_eq!(
        results,
        vec![
            Value::truth(true),
            Value::truth(false),
            Value::truth(true),
            Value::truth(true),
            Value::truth(true),
            Value::truth(false),
        ]
    );
}

#[test]
fn eq_cross_kind_numbers_is_error() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(eq 1 1.0)");
    match &results[0] {
        Err(err) => assert!(matches!(err.kind, ErrKind::TypeError { .. })),
        Ok(_) => panic!(),
    }
}

#[test]
fn list_construction() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(eq (cons 1 (list 2 3)) (list 1 2 3))
         (eq (prepend (list 2 3) 1) (list 1 2 3))
         (eq (append (list 1 2) 3) (list 1 2 3))
         (eq (append (list) 1) (list 1))
         (cadr (list 1 2 3))",
    );
    assert_eq!(
        results,
        vec![
            Value::truth(true),
            Value::truth(true),
            Value::truth(true),
            Value::truth(true),
            Number::Integer(2).into(),
        ]
    );
}

#[test]
fn progn_returns_last_value() {
    let mut env = common::setup();

    let results = common::results(&mut env, "(progn (define a 1) (+ a 2))");
    assert_eq!(results, vec![Number::Integer(3).into()]);
}

#[test]
fn basic_apply() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(apply '+ '(1 2))
         (apply (lambda (a b) (+ a b)) (list 1 2))",
    );
    assert_eq!(
        results,
        vec![Number::Integer(3).into(), Number::Integer(3).into()]
    );
}

#[test]
fn string_operations() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(strlen \"abc\")
         (strcat \"ab\" \"cd\")
         (strindex \"abc\" 1)
         (int \"42\")",
    );
    assert_eq!(
        results,
        vec![
            Number::Integer(3).into(),
            Value::Symbol(Symbol::string_literal("abcd")),
            Value::Symbol(Symbol::string_literal("b")),
            Number::Integer(42).into(),
        ]
    );
}

#[test]
fn string_literals_self_evaluate() {
    let mut env = common::setup();

    let results = common::results(&mut env, "\"ab\"");
    assert_eq!(results, vec![Value::Symbol(Symbol::string_literal("ab"))]);
}

#[test]
fn strindex_is_bounds_checked() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(strindex \"abc\" 5)");
    match &results[0] {
        Err(err) => assert_eq!(
            err.kind,
            ErrKind::IndexOutOfRange {
                index: 5,
                length: 3,
            }
        ),
        Ok(_) => panic!(),
    }
}

#[test]
fn string_builtins_reject_plain_symbols() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(strlen 'abc)");
    match &results[0] {
        Err(err) => assert!(matches!(err.kind, ErrKind::TypeError { .. })),
        Ok(_) => panic!(),
    }
}

#[test]
fn nand_over_truthiness() {
    let mut env = common::setup();

    let results = common::results(
        &mut env,
        "(nand true true)
         (nand true false)
         (nand 1 2 3)
         (nand true true false)",
    );
    assert_eq!(
        results,
        vec![
            Value::truth(false),
            Value::truth(true),
            Value::truth(false),
            Value::truth(true),
        ]
    );
}

#[test]
fn empty_list_evaluates_to_itself() {
    let mut env = common::setup();

    let results = common::results(&mut env, "()");
    assert_eq!(results, vec![Value::List(None)]);
}

#[test]
fn number_head_is_not_callable() {
    let mut env = common::setup();

    let results = common::results_with_errors(&mut env, "(1 2)");
    match &results[0] {
        Err(err) => assert_eq!(err.kind, ErrKind::NotCallable(Number::Integer(1).into())),
        Ok(_) => panic!(),
    }
}

#[test]
fn evaluated_head_position() {
    let mut env = common::setup();

    // The head is itself a list: evaluate it, then apply what it produced.
    let results = common::results(
        &mut env,
        "(define pick (lambda (n) (if (eq n 1) 'car 'cdr)))
         ((pick 1) (list 7 8))",
    );
    assert_eq!(results[1], Number::Integer(7).into());
}

#[test]
fn stacked_decorations_strip_one_layer() {
    let mut env = common::setup();

    let results = common::results(&mut env, "`,x");
    match &results[0] {
        Value::List(Some(cell)) => {
            assert_eq!(cell.decorations(), &[','][..]);
            assert_eq!(cell.content(), &Value::Symbol(Symbol::new("x")));
        }
        other => panic!("expected a still-decorated payload, got {}", other),
    }
}

#[test]
fn rational_stub_displays_but_does_not_add() {
    let mut env = common::setup();

    env.define("r".to_symbol(), Number::Rational(1, 2).into());
    assert_eq!(format!("{}", Value::from(Number::Rational(1, 2))), "1/2");

    let results = common::results_with_errors(&mut env, "(+ r 1)");
    match &results[0] {
        Err(err) => assert!(matches!(err.kind, ErrKind::TypeError { .. })),
        Ok(_) => panic!(),
    }
}
