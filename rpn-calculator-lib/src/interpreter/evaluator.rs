use crate::interpreter::error::{ExpressionError, Result};
use crate::interpreter::number::{parse_number, Number};
use crate::interpreter::token::Token;
use log::trace;
use num_traits::ToPrimitive;
use std::collections::HashMap;

/// Values for the variables of an expression, keyed by name without the leading `$`.
pub type Bindings = HashMap<String, Number>;

/// Calculates the value of a postfix expression.
///
/// Only the value on top of the stack is returned when the walk is over. Anything left
/// beneath it is ignored, so `1 2` evaluates to `2` without complaint.
///
/// # Arguments
///
/// * `tokens`: The expression, in postfix order.
/// * `bindings`: Values for the variables the expression refers to.
///
/// returns: The value of the expression.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::evaluator::{evaluate, Bindings};
/// use rpn_calculator::interpreter::number::parse_number;
/// use rpn_calculator::interpreter::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens: Vec<Token> = ["10", "20", "+"].into_iter().map(Token::from).collect();
/// let value = evaluate(&tokens, &Bindings::new())?;
/// assert_eq!(Some(value), parse_number("30"));
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn evaluate(tokens: &[Token], bindings: &Bindings) -> Result<Number> {
    let mut operands: Vec<Number> = Vec::new();

    for token in tokens {
        trace!("evaluating {} with {} operand(s) on the stack", token, operands.len());
        match token {
            Token::Function(function) => {
                let count = argument_count(&pop_operand(&mut operands)?)?;
                if operands.len() < count {
                    return Err(ExpressionError::InsufficientOperands);
                }
                let arguments = operands.split_off(operands.len() - count);
                operands.push(function.compute(&arguments)?);
            }
            Token::Operator(operator) => {
                let b = pop_operand(&mut operands)?;
                let a = pop_operand(&mut operands)?;
                operands.push(operator.evaluate(&a, &b)?);
            }
            Token::Literal(text) => {
                let value =
                    parse_number(text).ok_or_else(|| ExpressionError::InvalidTerm(text.clone()))?;
                operands.push(value);
            }
            Token::Variable(name) => operands.push(lookup(name, bindings)?),
        }
    }

    pop_operand(&mut operands)
}

fn pop_operand(operands: &mut Vec<Number>) -> Result<Number> {
    operands.pop().ok_or(ExpressionError::InsufficientOperands)
}

/// Reads the value preceding a function name as its number of arguments.
pub(crate) fn argument_count(value: &Number) -> Result<usize> {
    if !value.is_integer() {
        return Err(ExpressionError::InvalidArgumentCount(value.to_string()));
    }
    value
        .to_integer()
        .to_usize()
        .ok_or_else(|| ExpressionError::InvalidArgumentCount(value.to_string()))
}

fn lookup(variable: &str, bindings: &Bindings) -> Result<Number> {
    let name = variable.trim_start_matches('$');
    bindings
        .get(name)
        .cloned()
        .ok_or_else(|| ExpressionError::UnboundVariable(variable.into()))
}
