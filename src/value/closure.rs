use super::Symbol;
use crate::tree::Cell;


/// First-class function value: formal parameter names paired with an
/// unevaluated body expression. Does not capture an environment; the frame
/// created at application time links to the caller's environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Closure {
    params: Vec<Symbol>,
    body: Box<Cell>,
}

impl Closure {
    pub fn new(params: Vec<Symbol>, body: Cell) -> Closure {
        Closure { params, body: Box::new(body) }
    }

    pub fn params(&self) -> &Vec<Symbol> {
        &self.params
    }

    pub fn body(&self) -> &Cell {
        &self.body
    }
}
