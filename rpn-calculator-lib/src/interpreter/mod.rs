pub mod error;
pub mod evaluator;
pub mod expression;
pub mod function;
pub mod lexer;
pub mod number;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::error::Result;
use crate::interpreter::expression::Expression;
use crate::interpreter::number::Number;

/// Calculates the value of the given infix expression.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format, without variables.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::calculate;
/// use rpn_calculator::interpreter::number::format_decimal;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let value = calculate("(1 + 2) * sqrt(4)")?;
/// assert_eq!(format_decimal(&value, 10), "6");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn calculate(expression: &str) -> Result<Number> {
    Expression::from_infix(expression)?.evaluate()
}

/// Normalizes the given infix expression by converting it to postfix and back again.
///
/// Redundant parentheses are dropped, whitespace is made uniform and unary minus is
/// written out as a subtraction from zero.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The regenerated infix text.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::regenerate;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// assert_eq!(regenerate("((2+3))*4")?, "(2 + 3) * 4");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn regenerate(expression: &str) -> Result<String> {
    Expression::from_infix(expression)?.to_infix()
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;
    use crate::interpreter::error::ExpressionError;
    use crate::interpreter::number::format_decimal;
    use parameterized_macro::parameterized;

    #[test]
    fn simple_expression_regenerates_to_itself() {
        let expression = "1 + 2";

        let regenerated_expression = regenerate(expression).unwrap();

        assert_eq!(regenerated_expression, expression)
    }

    #[test]
    fn redundant_parentheses_are_stripped_when_regenerating() {
        let redundant_expression = "((1)) + ((2 * (3)))";
        let expected_expression = "1 + (2 * 3)";

        let regenerated_expression = regenerate(redundant_expression).unwrap();

        assert_eq!(regenerated_expression, expected_expression)
    }

    #[parameterized(
    expression = {
    "1 + 1",
    "10 - 2 * 3",
    "(10 - 2) * 3",
    "2 ^ 10",
    "1 / 3 * 3",
    "max(1, 7, 3) % 4",
    "median(1, 2, 3, 4) * 2",
    "-(-(1))",
    },
    expected = { "2", "4", "24", "1024", "1", "3", "5", "1" }
    )]
    fn calculate_expression_returns_correct_value(expression: &str, expected: &str) {
        let value = calculate(expression).unwrap();
        assert_eq!(format_decimal(&value, 10), expected);
    }

    #[test]
    fn variables_cannot_be_calculated_without_bindings() {
        assert_eq!(
            calculate("$x + 1"),
            Err(ExpressionError::UnboundVariable("$x".into()))
        );
    }
}
