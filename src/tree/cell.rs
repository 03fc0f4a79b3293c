use std::fmt;

use crate::value::Value;


/// One position in a list. Nesting is expressed by a cell's content being a
/// `Value::List` holding the head cell of a child chain; sibling chains are
/// simple forward lists, never shared, never cyclic.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    content: Value,
    decorations: Vec<char>,
    next: Option<Box<Cell>>,
}

impl Cell {
    pub fn new(content: Value) -> Cell {
        Cell {
            content,
            decorations: Vec::new(),
            next: None,
        }
    }

    pub fn with_decorations(content: Value, decorations: Vec<char>) -> Cell {
        Cell {
            content,
            decorations,
            next: None,
        }
    }

    pub fn content(&self) -> &Value {
        &self.content
    }

    pub fn decorations(&self) -> &[char] {
        &self.decorations
    }

    pub fn next(&self) -> Option<&Cell> {
        match &self.next {
            Some(cell) => Some(cell.as_ref()),
            None => None,
        }
    }

    pub fn set_next(&mut self, next: Option<Box<Cell>>) {
        self.next = next;
    }

    pub fn into_content(self) -> Value {
        self.content
    }

    /// Clone of this cell alone, detached from its sibling chain.
    pub fn clone_detached(&self) -> Cell {
        Cell {
            content: self.content.clone(),
            decorations: self.decorations.clone(),
            next: None,
        }
    }

    /// Removes the outermost (first-collected) decoration, if any.
    pub fn strip_decoration(&mut self) -> Option<char> {
        if self.decorations.is_empty() {
            None
        } else {
            Some(self.decorations.remove(0))
        }
    }

    pub fn iter(&self) -> super::CellIter {
        super::CellIter {
            current: Some(self),
        }
    }
}


impl Default for Cell {
    fn default() -> Self {
        Cell::new(Value::default())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.decorations {
            write!(f, "{}", c)?;
        }
        write!(f, "{}", self.content)
    }
}
