use crate::interpreter::error::{ExpressionError, Result};
use crate::interpreter::evaluator::argument_count;
use crate::interpreter::function::Function;
use crate::interpreter::lexer::is_variable;
use crate::interpreter::number::parse_number;
use crate::interpreter::operator::{Associativity, BinaryOperator};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_call, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use itertools::Itertools;
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Terminal symbols (leaves)
    Literal(String),
    Variable(String),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    Call {
        function: Function,
        arguments: Vec<Node>,
    },
}

impl Node {
    pub fn new_literal(text: impl Into<String>) -> Node {
        Node::Literal(text.into())
    }

    pub fn new_variable(name: impl Into<String>) -> Node {
        Node::Variable(name.into())
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_call(function: Function, arguments: Vec<Node>) -> Node {
        Node::Call {
            function,
            arguments,
        }
    }

    pub fn as_binary_operator(&self) -> Option<BinaryOperator> {
        match self {
            Node::BinaryOperation { operator, .. } => Some(*operator),
            Node::Literal(_) | Node::Variable(_) | Node::Call { .. } => None,
        }
    }

    /// The names of the variables used in the tree, sorted and without duplicates.
    pub fn variables(&self) -> Vec<String> {
        let mut collector = VariableCollector::default();
        self.accept(&mut collector);
        collector.names
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::Literal(text) => visitor.visit_literal(text),
            Node::Variable(name) => visitor.visit_variable(name),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::Call {
                function,
                arguments,
            } => visitor.visit_call(function, arguments),
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

/// Generates an expression tree based off of the given tokens.
///
/// # Arguments
///
/// * `tokens`: Tokens, ordered in postfix notation, to convert to an expression tree.
///
/// returns: The root of the generated expression tree.
pub fn new_tree(tokens: &[Token]) -> Result<Node> {
    let mut operands: Vec<Node> = Vec::new();

    for token in tokens {
        let node = match token {
            Token::Literal(text) => {
                parse_number(text).ok_or_else(|| ExpressionError::InvalidTerm(text.clone()))?;
                Node::new_literal(text.as_str())
            }
            Token::Variable(name) => {
                if !is_variable(name) {
                    return Err(ExpressionError::InvalidTerm(name.clone()));
                }
                Node::new_variable(name.as_str())
            }
            Token::Function(function) => {
                let count = pop_argument_count(&mut operands)?;
                if operands.len() < count {
                    return Err(ExpressionError::InsufficientOperands);
                }
                let arguments = operands.split_off(operands.len() - count);
                Node::new_call(*function, arguments)
            }
            Token::Operator(operator) => {
                let operand_two = operands
                    .pop()
                    .ok_or(ExpressionError::InsufficientOperands)?;
                let operand_one = operands
                    .pop()
                    .ok_or(ExpressionError::InsufficientOperands)?;
                Node::new_binary_operation(*operator, operand_one, operand_two)
            }
        };
        operands.push(node);
    }

    operands.pop().ok_or(ExpressionError::InsufficientOperands)
}

fn pop_argument_count(operands: &mut Vec<Node>) -> Result<usize> {
    match operands.pop() {
        Some(Node::Literal(text)) => {
            let value =
                parse_number(&text).ok_or(ExpressionError::InvalidArgumentCount(text))?;
            argument_count(&value)
        }
        Some(node) => Err(ExpressionError::InvalidArgumentCount(node.to_infix())),
        None => Err(ExpressionError::InsufficientOperands),
    }
}

impl Node {
    /// Writes the tree back out as infix text.
    ///
    /// Operands of an operator are wrapped in parentheses when they bind looser than the
    /// operator, and both operands are wrapped whenever the right one is an operation
    /// itself. The left operand of a right-associative operator is always wrapped if it
    /// is an operation. This errs on the side of too many parentheses, e.g. `4 + (1 + 1)`, but
    /// never loses the meaning of the expression.
    pub fn to_infix(&self) -> String {
        match self {
            Node::Literal(text) | Node::Variable(text) => text.clone(),
            Node::Call {
                function,
                arguments,
            } => format!(
                "{}({})",
                function,
                arguments.iter().map(Node::to_infix).join(", ")
            ),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                let right_is_operation = right_operand.as_binary_operator().is_some();
                let left_groups_first = operator.associativity() == Associativity::Right;
                format!(
                    "{} {} {}",
                    left_operand.build_operand(operator, right_is_operation || left_groups_first),
                    operator,
                    right_operand.build_operand(operator, right_is_operation)
                )
            }
        }
    }

    fn build_operand(&self, parent_operator: &BinaryOperator, wrap_operations: bool) -> String {
        let predicate = || match self.as_binary_operator() {
            // When a child operator has lower precedence, it and its operands needs
            // to be wrapped in parentheses.
            Some(operator) => operator.precedence_lt(parent_operator) || wrap_operations,
            None => false,
        };
        parenthesize_if(predicate, self.to_infix())
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

fn parenthesize_if(predicate: impl Fn() -> bool, interior: String) -> String {
    if predicate() {
        format!("({})", interior)
    } else {
        interior
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal(&mut self, text: &str) {
        self.builder.add_empty_child(text.to_string());
    }
    fn visit_variable(&mut self, name: &str) {
        self.builder.add_empty_child(name.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_call(&mut self, function: &Function, arguments: &[Node]) {
        self.builder.begin_child(format!("{}()", function));
        walk_call(self, arguments);
        self.builder.end_child();
    }
}

#[derive(Default)]
struct VariableCollector {
    names: Vec<String>,
}

impl SyntaxVisitor for VariableCollector {
    fn visit_variable(&mut self, name: &str) {
        if let Err(position) = self.names.binary_search_by(|known| known.as_str().cmp(name)) {
            self.names.insert(position, name.to_string());
        }
    }
}
