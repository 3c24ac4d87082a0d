use crate::interpreter::error::{ExpressionError, Result};
use crate::interpreter::function::Function;
use crate::interpreter::lexer::is_variable;
use crate::interpreter::number::parse_number;
use crate::interpreter::operator::BinaryOperator;
use crate::interpreter::token::Token;
use log::trace;

/// An entry of the operator stack, waiting to be moved to the output.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Pending {
    OpenParenthesis,
    Operator(BinaryOperator),
    Function(Function),
}

/// What an opening parenthesis was opened for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Parenthesis {
    Precedence,
    /// Counts the commas seen directly inside the call, and whether only parentheses
    /// have been seen since it was opened.
    Function { arguments: usize, empty: bool },
}

struct InfixConverter {
    operators: Vec<Pending>,
    output: Vec<Token>,
    parentheses: Vec<Parenthesis>,
    /// Whether the next operator is unary: at the start, after `(`, `,` or another operator.
    unary_context: bool,
    /// Whether the previous atom was a function name.
    after_function: bool,
}

/// Converts the atoms of an infix expression into postfix tokens.
///
/// Unary minus is rewritten as a subtraction from zero and unary plus is dropped.
/// Every function name is preceded in the output by the number of arguments it was given.
///
/// # Arguments
///
/// * `atoms`: The atoms of an infix expression, as produced by the lexer.
///
/// returns: The equivalent postfix tokens.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::lexer::tokenize;
/// use rpn_calculator::interpreter::parser::infix_to_postfix;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let postfix = infix_to_postfix(tokenize("max(1 + 3, 2)"))?;
/// let terms: Vec<String> = postfix.iter().map(ToString::to_string).collect();
/// assert_eq!(terms, ["1", "3", "+", "2", "2", "max"]);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn infix_to_postfix(atoms: Vec<String>) -> Result<Vec<Token>> {
    let mut converter = InfixConverter {
        operators: Vec::new(),
        output: Vec::new(),
        parentheses: Vec::new(),
        unary_context: true,
        after_function: false,
    };

    for atom in atoms {
        converter.convert_atom(&atom)?;
    }

    converter.transfer_leftover_operators()
}

impl InfixConverter {
    fn convert_atom(&mut self, atom: &str) -> Result<()> {
        trace!("converting atom {:?}, operator stack {:?}", atom, self.operators);

        let function = Function::from_name(atom);
        if let Some(function) = function {
            self.operators.push(Pending::Function(function));
        } else if let Some(operator) = BinaryOperator::from_symbol(atom) {
            self.convert_operator(operator);
        } else {
            match atom {
                "," => self.convert_comma(),
                "(" => self.convert_open_parenthesis(),
                ")" => self.convert_closing_parenthesis()?,
                operand => self.convert_operand(operand)?,
            }
        }

        self.after_function = function.is_some();
        if atom != "(" && atom != ")" {
            self.mark_calls_filled();
        }
        Ok(())
    }

    fn convert_operator(&mut self, operator: BinaryOperator) {
        if self.unary_context {
            if operator == BinaryOperator::Subtract {
                self.output.push(Token::Literal("0".into()));
                self.operators.push(Pending::Operator(operator));
            }
            return;
        }

        while let Some(&Pending::Operator(stacked)) = self.operators.last() {
            if !operator.yields_to(&stacked) {
                break;
            }
            self.operators.pop();
            self.output.push(Token::Operator(stacked));
        }

        self.operators.push(Pending::Operator(operator));
        self.unary_context = true;
    }

    fn convert_comma(&mut self) {
        self.drain_until_open_parenthesis();
        if let Some(Parenthesis::Function { arguments, .. }) = self.parentheses.last_mut() {
            *arguments += 1;
        }
        self.unary_context = true;
    }

    fn convert_open_parenthesis(&mut self) {
        self.operators.push(Pending::OpenParenthesis);
        self.parentheses.push(if self.after_function {
            Parenthesis::Function {
                arguments: 0,
                empty: true,
            }
        } else {
            Parenthesis::Precedence
        });
        self.unary_context = true;
    }

    fn convert_closing_parenthesis(&mut self) -> Result<()> {
        let empty_group = self.parentheses.last() == Some(&Parenthesis::Precedence)
            && self.operators.last() == Some(&Pending::OpenParenthesis);

        if empty_group {
            self.operators.pop();
            self.parentheses.pop();
        } else {
            if !self.drain_until_open_parenthesis() {
                return Err(ExpressionError::UnbalancedParentheses);
            }
            self.operators.pop(); // Discard the open parenthesis.

            if let Some(Parenthesis::Function { arguments, empty }) = self.parentheses.pop() {
                self.close_function(arguments, empty);
            }
        }

        self.unary_context = false;
        Ok(())
    }

    fn close_function(&mut self, commas: usize, empty: bool) {
        let arguments = if empty {
            commas
        } else {
            commas + 1
        };
        self.output.push(Token::argument_count(arguments));

        if let Some(&Pending::Function(function)) = self.operators.last() {
            self.operators.pop();
            self.output.push(Token::Function(function));
        }
    }

    /// Records that every open call has seen something other than parentheses.
    fn mark_calls_filled(&mut self) {
        for parenthesis in &mut self.parentheses {
            if let Parenthesis::Function { empty, .. } = parenthesis {
                *empty = false;
            }
        }
    }

    fn convert_operand(&mut self, operand: &str) -> Result<()> {
        let token = if is_variable(operand) {
            Token::Variable(operand.into())
        } else if parse_number(operand).is_some() {
            Token::Literal(operand.into())
        } else {
            return Err(ExpressionError::InvalidTerm(operand.into()));
        };

        self.output.push(token);
        self.unary_context = false;
        Ok(())
    }

    /// Moves operators to the output until an open parenthesis is on top of the stack.
    ///
    /// returns: Whether an open parenthesis was found.
    fn drain_until_open_parenthesis(&mut self) -> bool {
        while let Some(&pending) = self.operators.last() {
            match pending {
                Pending::OpenParenthesis => return true,
                Pending::Operator(operator) => self.output.push(Token::Operator(operator)),
                Pending::Function(function) => self.output.push(Token::Function(function)),
            }
            self.operators.pop();
        }
        false
    }

    fn transfer_leftover_operators(mut self) -> Result<Vec<Token>> {
        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::OpenParenthesis => return Err(ExpressionError::UnbalancedParentheses),
                Pending::Operator(operator) => self.output.push(Token::Operator(operator)),
                Pending::Function(function) => self.output.push(Token::Function(function)),
            }
        }
        Ok(self.output)
    }
}
