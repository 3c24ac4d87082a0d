use crate::interpreter::error::{ExpressionError, Result};
use crate::interpreter::number::{self, Number};
use itertools::Itertools;
use num_traits::Zero;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// How many arguments a function accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    /// Any number of arguments, but at least one.
    Variadic,
}

/// A named function that can be called from an expression, e.g. `max(1, 2)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    SquareRoot,
    Sine,
    Cosine,
    Tangent,
    Maximum,
    Minimum,
    Mean,
    Median,
    Mode,
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::SquareRoot => "sqrt",
            Function::Sine => "sin",
            Function::Cosine => "cos",
            Function::Tangent => "tan",
            Function::Maximum => "max",
            Function::Minimum => "min",
            Function::Mean => "mean",
            Function::Median => "median",
            Function::Mode => "mode",
        }
    }

    pub fn from_name(name: &str) -> Option<Function> {
        match name {
            "sqrt" => Some(Function::SquareRoot),
            "sin" => Some(Function::Sine),
            "cos" => Some(Function::Cosine),
            "tan" => Some(Function::Tangent),
            "max" => Some(Function::Maximum),
            "min" => Some(Function::Minimum),
            "mean" => Some(Function::Mean),
            "median" => Some(Function::Median),
            "mode" => Some(Function::Mode),
            _ => None,
        }
    }

    pub fn arity(&self) -> Arity {
        match self {
            Function::SquareRoot | Function::Sine | Function::Cosine | Function::Tangent => {
                Arity::Fixed(1)
            }
            Function::Maximum
            | Function::Minimum
            | Function::Mean
            | Function::Median
            | Function::Mode => Arity::Variadic,
        }
    }

    /// Applies the function to its arguments, after checking them against its arity.
    ///
    /// # Arguments
    ///
    /// * `arguments`: The argument values, in the order they were written.
    ///
    /// returns: The result of the call.
    pub fn compute(&self, arguments: &[Number]) -> Result<Number> {
        self.check_arity(arguments.len())?;

        match self {
            Function::SquareRoot => number::square_root(&arguments[0]),
            Function::Sine => self.transcendental(&arguments[0], f64::sin),
            Function::Cosine => self.transcendental(&arguments[0], f64::cos),
            Function::Tangent => self.transcendental(&arguments[0], f64::tan),
            Function::Maximum => Ok(arguments
                .iter()
                .max()
                .cloned()
                .unwrap_or_else(Number::zero)),
            Function::Minimum => Ok(arguments
                .iter()
                .min()
                .cloned()
                .unwrap_or_else(Number::zero)),
            Function::Mean => Ok(mean(arguments)),
            Function::Median => Ok(median(arguments)),
            Function::Mode => Ok(mode(arguments)),
        }
    }

    fn check_arity(&self, found: usize) -> Result<()> {
        match self.arity() {
            Arity::Fixed(expected) if found < expected => {
                Err(ExpressionError::InsufficientOperands)
            }
            Arity::Fixed(expected) if found > expected => Err(ExpressionError::ArityMismatch {
                function: self.name().into(),
                expected,
                found,
            }),
            Arity::Variadic if found == 0 => Err(ExpressionError::InsufficientOperands),
            _ => Ok(()),
        }
    }

    fn transcendental(&self, argument: &Number, operation: fn(f64) -> f64) -> Result<Number> {
        number::from_f64(operation(number::to_f64(argument)), self.name())
    }
}

fn mean(arguments: &[Number]) -> Number {
    let sum: Number = arguments.iter().sum();
    sum / Number::from_integer(arguments.len().into())
}

fn median(arguments: &[Number]) -> Number {
    let sorted = arguments.iter().sorted().collect_vec();
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        mean(&[sorted[middle - 1].clone(), sorted[middle].clone()])
    } else {
        sorted[middle].clone()
    }
}

/// The most frequent argument; the smallest one wins a tie.
fn mode(arguments: &[Number]) -> Number {
    let counts = arguments.iter().counts();
    counts
        .into_iter()
        .sorted()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value.clone())
        .unwrap_or_else(Number::zero)
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl str::FromStr for Function {
    type Err = ();

    fn from_str(input: &str) -> std::result::Result<Function, Self::Err> {
        Function::from_name(input).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::number::parse_number;
    use parameterized_macro::parameterized;

    fn numbers(texts: &[&str]) -> Vec<Number> {
        texts.iter().map(|text| parse_number(text).unwrap()).collect()
    }

    #[parameterized(
    function = { Function::Maximum, Function::Minimum, Function::Mean, Function::Median, Function::Median, Function::Mode, Function::Mode },
    arguments = { &["1", "4", "2"], &["1", "4", "2"], &["1", "2", "3", "5"], &["3", "1", "2"], &["4", "1", "3", "2"], &["2", "7", "7", "2", "3"], &["5"] },
    expected = { "4", "1", "2.75", "2", "2.5", "2", "5" }
    )]
    fn variadic_function_computes_expected_value(
        function: Function,
        arguments: &[&str],
        expected: &str,
    ) {
        let actual = function.compute(&numbers(arguments)).unwrap();
        assert_eq!(actual, parse_number(expected).unwrap());
    }

    #[test]
    fn square_root_computes_exact_root() {
        let actual = Function::SquareRoot.compute(&numbers(&["9"])).unwrap();
        assert_eq!(actual, parse_number("3").unwrap());
    }

    #[test]
    fn sine_matches_floating_point_sine() {
        let actual = Function::Sine.compute(&numbers(&["180"])).unwrap();
        assert_eq!(actual, Number::from_float(180f64.sin()).unwrap());
    }

    #[test]
    fn fixed_arity_function_without_arguments_returns_err() {
        assert_eq!(
            Function::SquareRoot.compute(&[]),
            Err(ExpressionError::InsufficientOperands)
        );
    }

    #[test]
    fn fixed_arity_function_with_too_many_arguments_returns_err() {
        assert_eq!(
            Function::Sine.compute(&numbers(&["1", "2"])),
            Err(ExpressionError::ArityMismatch {
                function: "sin".into(),
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn variadic_function_without_arguments_returns_err() {
        assert_eq!(
            Function::Maximum.compute(&[]),
            Err(ExpressionError::InsufficientOperands)
        );
    }

    #[test]
    fn names_resolve_to_functions() {
        assert_eq!("median".parse(), Ok(Function::Median));
        assert_eq!(Function::from_name("avg"), None);
        assert_eq!(Function::Maximum.arity(), Arity::Variadic);
        assert_eq!(Function::SquareRoot.arity(), Arity::Fixed(1));
    }
}
