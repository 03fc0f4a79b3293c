//! Chain of lexical binding frames.
//!
//! Modeled as a stack: the root frame lives for the process, while every
//! `let` or closure application pushes a child frame that is popped before
//! the creating call returns. Lookup walks innermost-out, so the nearest
//! enclosing frame wins.

use std::collections::HashMap;

use log::{debug, warn};

use crate::value::{Symbol, Value};


#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    values: HashMap<String, Value>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Environment {
    frames: Vec<Frame>,
}


impl Frame {
    pub fn new() -> Frame {
        Default::default()
    }

    /// Redefining a name overwrites.
    pub fn bind(&mut self, name: Symbol, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl Environment {
    pub fn root() -> Environment {
        Environment {
            frames: vec![Frame::new()],
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn push(&mut self, frame: Frame) {
        debug!("Pushing env frame at depth {}", self.depth());
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<Frame> {
        match self.depth() {
            0 => panic!(),
            1 => {
                warn!("Ignoring pop of root environment frame");
                None
            }
            _ => {
                debug!("Popping env frame at depth {}", self.depth());
                self.frames.pop()
            }
        }
    }

    /// Binds in the currently active frame.
    pub fn define(&mut self, name: Symbol, value: Value) {
        let len = self.depth();
        self.frames[len - 1].bind(name, value);
    }

    /// Chained lookup, nearest frame first.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        for frame in self.frames.iter().rev() {
            if let Some(value) = frame.lookup(name) {
                return Some(value);
            }
        }
        None
    }
}


#[cfg(test)]
#[path = "./environment_test.rs"]
mod environment_test;
