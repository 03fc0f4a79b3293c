use arbor::prelude::*;


pub fn setup() -> Environment {
    // Integration tests will call this method multiple times; ignore the error.
    if let Err(_err) = env_logger::try_init() {}

    Environment::root()
}

pub fn results(env: &mut Environment, s: &str) -> Vec<Value> {
    results_with_errors(env, s)
        .into_iter()
        .map(|e| e.unwrap())
        .collect::<Vec<_>>()
}

pub fn results_with_errors(env: &mut Environment, s: &str) -> Vec<Result<Value, EvalErr>> {
    let tree = parse(s);
    let mut res = Vec::new();
    let mut current = tree.as_deref();
    while let Some(cell) = current {
        res.push(evaluate(cell, env));
        current = cell.next();
    }
    res
}
