//! Module for reading Arbor text into the cell tree.
//!
//! Single pass, left to right, no backtracking. Nesting is tracked with a
//! reader-local stack of lists under construction rather than parent
//! back-references, so the released tree carries no back-edges. Errors are
//! collected, not propagated: reading is best-effort, and a stray character
//! costs a diagnostic rather than the whole read.

use std::fmt;
use std::mem;

use log::warn;

use crate::tree::{Cell, ListBuilder};
use crate::value::{Symbol, Value};

use self::ParseErrorReason::*;

/// Prefix markers signaling quoting intent for the following atom or list.
pub const DECORATIONS: [char; 4] = ['\'', '`', ',', '@'];


/// Reads `input` into a chain of top-level cells, logging any diagnostics.
///
/// `None` means the input held no expression at all.
pub fn parse(input: &str) -> Option<Box<Cell>> {
    let result = Reader::new().read(input);
    for error in &result.errors {
        warn!("{}", error);
    }
    result.tree
}


pub struct Reader {
    levels: Vec<Level>,
    accum: Accum,
    decorations: Vec<char>,
    errors: Vec<ParseError>,
}

pub struct ReadResult {
    pub tree: Option<Box<Cell>>,
    pub errors: Vec<ParseError>,
}

// Content state of the cell under the cursor.
enum Accum {
    Empty,
    Text(String),
    Closed(Value),
}

// One enclosing list still being read. The decorations collected before its
// opening paren belong to the outer cell, not the first inner one.
struct Level {
    list: ListBuilder,
    outer_decorations: Vec<char>,
}


impl Reader {
    pub fn new() -> Self {
        Self {
            levels: vec![Level {
                list: ListBuilder::new(),
                outer_decorations: Vec::new(),
            }],
            accum: Accum::Empty,
            decorations: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn read(mut self, input: &str) -> ReadResult {
        for (pos, c) in input.char_indices() {
            match c {
                '(' => self.open_list(pos),
                ')' => self.close_list(pos),
                c if c.is_whitespace() => self.finish_cell(),
                c if DECORATIONS.contains(&c) => self.decoration(c),
                c => self.text_char(c),
            }
        }

        self.finish_cell();
        while self.levels.len() > 1 {
            self.errors.push(ParseError {
                reason: UnclosedList,
                position: input.len(),
            });
            self.fold_level();
            self.finish_cell();
        }

        let root = match self.levels.pop() {
            Some(level) => level,
            None => panic!(), // Root level outlives the read.
        };
        ReadResult {
            tree: root.list.release(),
            errors: self.errors,
        }
    }

    fn open_list(&mut self, pos: usize) {
        match &self.accum {
            Accum::Empty => {
                let outer_decorations = mem::take(&mut self.decorations);
                self.levels.push(Level {
                    list: ListBuilder::new(),
                    outer_decorations,
                });
            }
            // The cell already holds closed or non-empty content.
            // Reported, not fatal; the offending character is dropped.
            _ => {
                self.errors.push(ParseError {
                    reason: UnexpectedOpen,
                    position: pos,
                });
            }
        }
    }

    fn close_list(&mut self, pos: usize) {
        self.finish_cell();
        if self.levels.len() == 1 {
            self.errors.push(ParseError {
                reason: UnmatchedClose,
                position: pos,
            });
            return;
        }
        self.fold_level();
    }

    // The finished inner list becomes the closed content of the outer cell;
    // reading resumes with the outer list's siblings.
    fn fold_level(&mut self) {
        let level = match self.levels.pop() {
            Some(level) => level,
            None => panic!(),
        };
        self.accum = Accum::Closed(Value::List(level.list.release()));
        self.decorations = level.outer_decorations;
    }

    fn decoration(&mut self, c: char) {
        match &mut self.accum {
            Accum::Empty => self.decorations.push(c),
            // Positional: embedded in a token, it is ordinary text.
            Accum::Text(text) => text.push(c),
            Accum::Closed(_) => {
                self.finish_cell();
                self.decorations.push(c);
            }
        }
    }

    fn text_char(&mut self, c: char) {
        match &mut self.accum {
            Accum::Empty => self.accum = Accum::Text(c.to_string()),
            Accum::Text(text) => text.push(c),
            Accum::Closed(_) => {
                self.finish_cell();
                self.accum = Accum::Text(c.to_string());
            }
        }
    }

    // Closes the cell under the cursor and appends it to the innermost list.
    // A cell with no content and no decorations is never produced, so runs
    // of whitespace collapse to a single separator.
    fn finish_cell(&mut self) {
        let decorations = mem::take(&mut self.decorations);
        let content = match mem::replace(&mut self.accum, Accum::Empty) {
            Accum::Empty => {
                if decorations.is_empty() {
                    return;
                }
                // Decoration with no payload; keep it on an empty symbol.
                Value::Symbol(Symbol::new(""))
            }
            Accum::Text(text) => Value::Symbol(Symbol::new(text)),
            Accum::Closed(value) => value,
        };

        match self.levels.last_mut() {
            Some(level) => level.list.append_cell(Cell::with_decorations(content, decorations)),
            None => panic!(),
        }
    }
}


#[derive(Debug, PartialEq)]
pub enum ParseErrorReason {
    UnexpectedOpen,
    UnmatchedClose,
    UnclosedList,
}

#[derive(Debug, PartialEq)]
pub struct ParseError {
    pub reason: ParseErrorReason,
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Parse Error] ")?;
        match self.reason {
            UnexpectedOpen => write!(f, "Unexpected '(' inside an atom"),
            UnmatchedClose => write!(f, "Unmatched ')'"),
            UnclosedList => write!(f, "List still open at end of input"),
        }?;
        write!(f, " at offset {}", self.position)
    }
}


#[cfg(test)]
#[path = "./parser_test.rs"]
mod parser_test;
