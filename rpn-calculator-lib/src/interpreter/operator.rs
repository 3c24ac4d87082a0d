use crate::interpreter::error::Result;
use crate::interpreter::number::{self, Number};
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Exponentiate,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

impl BinaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Modulo => '%',
            BinaryOperator::Exponentiate => '^',
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOperator> {
        match symbol {
            "+" => Some(BinaryOperator::Add),
            "-" => Some(BinaryOperator::Subtract),
            "*" => Some(BinaryOperator::Multiply),
            "/" => Some(BinaryOperator::Divide),
            "%" => Some(BinaryOperator::Modulo),
            "^" => Some(BinaryOperator::Exponentiate),
            _ => None,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            BinaryOperator::Exponentiate => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 2,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => 3,
            BinaryOperator::Exponentiate => 4,
        }
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    pub(crate) fn precedence_lt(&self, other: &Self) -> bool {
        self.precedence().lt(&other.precedence())
    }

    /// Whether this (incoming) operator lets `stacked` be emitted before it.
    ///
    /// That is the case when `stacked` binds tighter, or binds equally tight and
    /// groups to the left.
    pub(crate) fn yields_to(&self, stacked: &Self) -> bool {
        stacked.precedence_gt(self)
            || (stacked.precedence_eq(self) && stacked.associativity() == Associativity::Left)
    }

    /// Applies the operator as `a OP b`.
    pub fn evaluate(&self, a: &Number, b: &Number) -> Result<Number> {
        match self {
            BinaryOperator::Add => Ok(a + b),
            BinaryOperator::Subtract => Ok(a - b),
            BinaryOperator::Multiply => Ok(a * b),
            BinaryOperator::Divide => number::divide(a, b),
            BinaryOperator::Modulo => number::remainder(a, b),
            BinaryOperator::Exponentiate => number::power(a, b),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl str::FromStr for BinaryOperator {
    type Err = ();

    fn from_str(input: &str) -> std::result::Result<BinaryOperator, Self::Err> {
        BinaryOperator::from_symbol(input).ok_or(())
    }
}
