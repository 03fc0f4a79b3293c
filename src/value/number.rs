//! Representation of Arbor numbers.

use std::{fmt, mem, str};

use lazy_static::lazy_static;
use regex::Regex;

use self::Number::*;


lazy_static! {
    static ref INTEGER: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    static ref FLOAT: Regex = Regex::new(r"^[0-9]+\.[0-9]+$").unwrap();
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    // Stub variant; arithmetic involving it is rejected.
    Rational(i64, i64),
}

/// Failure local to numeric operations; callers map this onto their own
/// error kinds, keeping this module free of evaluator concerns.
#[derive(Debug, PartialEq)]
pub enum NumberError {
    RationalArithmetic,
}

#[derive(Debug)]
pub struct ParseNumberError(pub String);


impl Number {
    /// Result kind is float if either operand is float, else integer.
    pub fn add(self, other: Number) -> Result<Number, NumberError> {
        match Number::promote(self, other)? {
            (Integer(a), Integer(b)) => Ok(Integer(a + b)),
            (Float(a), Float(b)) => Ok(Float(a + b)),
            _ => Err(NumberError::RationalArithmetic),
        }
    }

    pub fn sub(self, other: Number) -> Result<Number, NumberError> {
        match Number::promote(self, other)? {
            (Integer(a), Integer(b)) => Ok(Integer(a - b)),
            (Float(a), Float(b)) => Ok(Float(a - b)),
            _ => Err(NumberError::RationalArithmetic),
        }
    }

    pub fn mul(self, other: Number) -> Result<Number, NumberError> {
        match Number::promote(self, other)? {
            (Integer(a), Integer(b)) => Ok(Integer(a * b)),
            (Float(a), Float(b)) => Ok(Float(a * b)),
            _ => Err(NumberError::RationalArithmetic),
        }
    }

    pub fn same_kind(&self, other: &Number) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Integer(val) = self {
            Some(*val)
        } else {
            None
        }
    }

    // Floats contaminate; rationals pass through for the caller to reject.
    fn promote(a: Number, b: Number) -> Result<(Number, Number), NumberError> {
        match (a, b) {
            (Rational(..), _) | (_, Rational(..)) => Err(NumberError::RationalArithmetic),
            (Integer(x), Float(y)) => Ok((Float(x as f64), Float(y))),
            (Float(x), Integer(y)) => Ok((Float(x), Float(y as f64))),
            pair => Ok(pair),
        }
    }
}


impl str::FromStr for Number {
    type Err = ParseNumberError;

    /// Literal grammar: integer is an optional leading `-` then digits;
    /// float is digits, exactly one `.`, digits. No exponent form, no
    /// leading `-` on floats.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if INTEGER.is_match(s) {
            if let Ok(int) = s.parse::<i64>() {
                return Ok(Integer(int));
            }
        }

        if FLOAT.is_match(s) {
            if let Ok(f) = s.parse::<f64>() {
                return Ok(Float(f));
            }
        }

        Err(ParseNumberError(s.to_string()))
    }
}


impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer(val) => write!(f, "{}", val),
            Float(val) => write!(f, "{}", val),
            Rational(num, den) => write!(f, "{}/{}", num, den),
        }
    }
}


#[cfg(test)]
#[path = "./number_test.rs"]
mod number_test;
