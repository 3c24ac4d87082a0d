mod infix_converter;

pub use crate::interpreter::parser::infix_converter::infix_to_postfix;
use crate::interpreter::error::Result;
use crate::interpreter::lexer;
use crate::interpreter::token::Token;
use itertools::Itertools;
use log::debug;

/// Parses the given infix expression into an equivalent sequence of postfix tokens,
/// which can be evaluated without any knowledge of precedence or parentheses.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent postfix tokens.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use rpn_calculator::interpreter::parser::parse;
///
/// let postfix = parse("2 + 3 * 4")?;
/// assert_eq!(format!("{:?}", postfix), "[2, 3, 4, *, +]");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(expression: &str) -> Result<Vec<Token>> {
    let atoms = lexer::tokenize(expression);
    let postfix_tokens = infix_to_postfix(atoms)?;
    debug!(
        "parsed {:?} into postfix {}",
        expression,
        postfix_tokens.iter().join(" ")
    );
    Ok(postfix_tokens)
}
