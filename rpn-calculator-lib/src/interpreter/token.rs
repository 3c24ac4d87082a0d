use crate::interpreter::function::Function;
use crate::interpreter::lexer::is_variable;
use crate::interpreter::operator::BinaryOperator;
use std::convert::Infallible;
use std::fmt;
use std::fmt::Formatter;
use std::str;

/// A term of a postfix expression.
///
/// Literal text is kept verbatim, so it is only checked to be a number when it is used.
/// The argument count that precedes every function name is a literal as well.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Literal(String),
    Variable(String),
    Operator(BinaryOperator),
    Function(Function),
}

impl Token {
    pub(crate) fn argument_count(count: usize) -> Token {
        Token::Literal(count.to_string())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::Literal(text) | Token::Variable(text) => write!(f, "{}", text),
            Token::Operator(operator) => write!(f, "{}", operator),
            Token::Function(function) => write!(f, "{}", function),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl str::FromStr for Token {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Token, Self::Err> {
        if let Some(operator) = BinaryOperator::from_symbol(input) {
            return Ok(Token::Operator(operator));
        }
        if let Some(function) = Function::from_name(input) {
            return Ok(Token::Function(function));
        }
        if is_variable(input) {
            return Ok(Token::Variable(input.into()));
        }
        Ok(Token::Literal(input.into()))
    }
}

impl From<&str> for Token {
    fn from(input: &str) -> Token {
        match input.parse() {
            Ok(token) => token,
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn terms_are_classified_by_their_text() {
        assert_eq!(Token::from("+"), Token::Operator(BinaryOperator::Add));
        assert_eq!(Token::from("max"), Token::Function(Function::Maximum));
        assert_eq!(Token::from("$foo"), Token::Variable("$foo".into()));
        assert_eq!(Token::from("5.1E-1"), Token::Literal("5.1E-1".into()));
    }

    #[test]
    fn unrecognised_terms_are_kept_as_literals() {
        assert_eq!(Token::from("avg"), Token::Literal("avg".into()));
    }

    #[test]
    fn tokens_display_their_original_text() {
        let texts = ["1.50", "$x", "^", "sqrt"];
        for text in texts {
            assert_eq!(Token::from(text).to_string(), text);
        }
    }
}
