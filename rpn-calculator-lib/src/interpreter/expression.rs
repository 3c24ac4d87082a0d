use crate::interpreter::error::Result;
use crate::interpreter::evaluator::{evaluate, Bindings};
use crate::interpreter::number::Number;
use crate::interpreter::parser::parse;
use crate::interpreter::syntax::expression_tree::{new_tree, Node};
use crate::interpreter::token::Token;
use itertools::Itertools;
use log::debug;
use std::fmt;
use std::fmt::{Display, Formatter};

/// An arithmetic expression, stored as its postfix (Reverse-Polish) tokens.
///
/// The tokens are never changed once the expression has been built. Every operation
/// works on a fresh walk over them, so one expression can be evaluated and printed
/// any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expression {
    tokens: Vec<Token>,
}

impl Expression {
    pub fn new(tokens: Vec<Token>) -> Expression {
        Expression { tokens }
    }

    /// Builds an expression out of postfix terms, such as `["1", "2", "+"]`.
    ///
    /// Terms that are not operators, functions or variables are kept as literals and
    /// only rejected once the expression is evaluated or printed.
    pub fn from_postfix<I, S>(terms: I) -> Expression
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = terms
            .into_iter()
            .map(|term| Token::from(term.as_ref()))
            .collect();
        Expression::new(tokens)
    }

    /// Parses an expression written in infix notation.
    ///
    /// # Arguments
    ///
    /// * `text`: The infix expression, e.g. `"max(1 + 3, 2)"`.
    ///
    /// returns: The equivalent postfix expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use rpn_calculator::interpreter::expression::Expression;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let expression = Expression::from_infix("4+-1")?;
    /// assert_eq!(expression.to_string(), "4 0 1 - +");
    /// assert_eq!(expression.to_infix()?, "4 + (0 - 1)");
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn from_infix(text: &str) -> Result<Expression> {
        parse(text).map(Expression::new)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Calculates the value of an expression without any variables.
    pub fn evaluate(&self) -> Result<Number> {
        self.evaluate_with(&Bindings::new())
    }

    /// Calculates the value of the expression, taking variable values from `bindings`.
    pub fn evaluate_with(&self, bindings: &Bindings) -> Result<Number> {
        let value = evaluate(&self.tokens, bindings)?;
        debug!("evaluated {} to {}", self, value);
        Ok(value)
    }

    pub fn to_tree(&self) -> Result<Node> {
        new_tree(&self.tokens)
    }

    /// Regenerates infix text with enough parentheses to keep the meaning of the expression.
    pub fn to_infix(&self) -> Result<String> {
        let infix = self.to_tree()?.to_infix();
        debug!("regenerated {} as {:?}", self, infix);
        Ok(infix)
    }

    /// The names of the variables used in the expression, sorted and without duplicates.
    pub fn variables(&self) -> Vec<String> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                Token::Variable(name) => Some(name.clone()),
                _ => None,
            })
            .sorted()
            .dedup()
            .collect()
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.iter().join(" "))
    }
}
