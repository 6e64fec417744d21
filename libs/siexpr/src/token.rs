//! Token types for the expression tokenizer.

use num_rational::BigRational;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Operator associativity. All current operators are left-associative; the
/// converter still handles `Right` so the table can grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Left,
    #[allow(dead_code)]
    Right,
}

/// A binary arithmetic operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    /// The four operator characters the grammar recognizes.
    pub const SYMBOLS: [char; 4] = ['/', '*', '+', '-'];

    pub fn from_char(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Add),
            '-' => Some(Op::Sub),
            '*' => Some(Op::Mul),
            '/' => Some(Op::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    pub fn precedence(self) -> u32 {
        match self {
            Op::Mul | Op::Div => 3,
            Op::Add | Op::Sub => 2,
        }
    }

    pub fn assoc(self) -> Assoc {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div => Assoc::Left,
        }
    }

    /// Apply the operator to exact operands. Division by zero is an
    /// arithmetic error, distinct from any grammar failure.
    pub fn apply(self, lhs: &BigRational, rhs: &BigRational) -> Result<BigRational> {
        match self {
            Op::Add => Ok(lhs + rhs),
            Op::Sub => Ok(lhs - rhs),
            Op::Mul => Ok(lhs * rhs),
            Op::Div => {
                if rhs.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
        }
    }
}

/// A token in a tokenized arithmetic expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Number(BigRational),
    Op(Op),
    OpenParen,
    CloseParen,
}
