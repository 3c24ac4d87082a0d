use regex::Regex;
use std::sync::OnceLock;

/// Numbers (integer, decimal or scientific), `$variables`, names, parentheses,
/// operators and commas. Any other non-whitespace character becomes an atom of its own,
/// so that the parser can report it.
static ATOM_PATTERN: OnceLock<Regex> = OnceLock::new();

static VARIABLE_PATTERN: OnceLock<Regex> = OnceLock::new();

fn atom_pattern() -> &'static Regex {
    ATOM_PATTERN.get_or_init(|| {
        Regex::new(r"\d*\.?\d+(?:[eE][+-]?\d+)?|\$[a-z]+|[A-Za-z_]\w*|[()^*/%+\-,]|\S")
            .expect("atom pattern is a valid regex")
    })
}

fn variable_pattern() -> &'static Regex {
    VARIABLE_PATTERN.get_or_init(|| {
        Regex::new(r"^\$[a-z]+$").expect("variable pattern is a valid regex")
    })
}

/// Splits an infix expression into its atoms. Whitespace between atoms is insignificant.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
///
/// returns: The atoms of the expression, in order.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::lexer::tokenize;
///
/// let atoms = tokenize("20*(-4.1+$x)^4");
/// assert_eq!(atoms, ["20", "*", "(", "-", "4.1", "+", "$x", ")", "^", "4"]);
/// ```
pub fn tokenize(expression: &str) -> Vec<String> {
    atom_pattern()
        .find_iter(expression)
        .map(|atom| atom.as_str().to_string())
        .collect()
}

/// Whether the term is a variable reference, a `$` followed by lowercase letters.
pub fn is_variable(term: &str) -> bool {
    variable_pattern().is_match(term)
}
