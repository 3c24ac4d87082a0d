use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExpressionError>;

/// Everything that can go wrong while parsing, evaluating or regenerating an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("not enough operands on the stack")]
    InsufficientOperands,

    #[error("cannot handle term: {0}")]
    InvalidTerm(String),

    #[error("argument count must be a non-negative integer, found {0}")]
    InvalidArgumentCount(String),

    #[error("{function} takes {expected} argument(s) but {found} were given")]
    ArityMismatch {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("variable {0} has no bound value")]
    UnboundVariable(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("result of {0} is undefined")]
    Undefined(String),
}
