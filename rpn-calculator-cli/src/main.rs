use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{info, warn};
use rpn_calculator::interpreter::error::ExpressionError;
use rpn_calculator::interpreter::evaluator::Bindings;
use rpn_calculator::interpreter::expression::Expression;
use rpn_calculator::interpreter::lexer::is_variable;
use rpn_calculator::interpreter::number::{format_decimal, parse_number, Number};

/// Converts an arithmetic expression to postfix notation, prints it back in infix
/// notation and evaluates it
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to convert, in infix notation unless --postfix is given
    expression: String,

    /// Read the expression as whitespace separated postfix terms
    #[clap(long)]
    postfix: bool,

    /// Value of a variable, e.g. `--var x=2.5` for `$x`
    #[clap(long = "var", value_name = "NAME=VALUE", parse(try_from_str = parse_binding))]
    variables: Vec<(String, Number)>,

    /// Number of decimal places to print the value with
    #[clap(long, default_value_t = 10)]
    digits: u32,

    /// Also print the expression tree
    #[clap(long)]
    tree: bool,

    #[clap(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let expression = if args.postfix {
        Expression::from_postfix(args.expression.split_whitespace())
    } else {
        Expression::from_infix(&args.expression)
            .with_context(|| format!("Failed to parse {:?}", args.expression))?
    };
    info!("expression uses variables {:?}", expression.variables());

    println!("postfix: {}", expression);

    let tree = expression
        .to_tree()
        .context("Failed to build the expression tree")?;
    println!("infix: {}", tree.to_infix());
    if args.tree {
        print!("{}", tree);
    }

    let bindings: Bindings = args.variables.into_iter().collect();
    match expression.evaluate_with(&bindings) {
        Ok(value) => println!("value: {}", format_decimal(&value, args.digits)),
        Err(ExpressionError::UnboundVariable(variable)) => {
            warn!("not evaluating, {} has no value (use --var)", variable)
        }
        Err(error) => return Err(error).context("Failed to evaluate the expression"),
    }

    Ok(())
}

/// Parses `name=value` (or `$name=value`) into a variable binding.
fn parse_binding(text: &str) -> Result<(String, Number), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, found {:?}", text))?;
    let name = name.trim().trim_start_matches('$');
    if !is_variable(&format!("${}", name)) {
        return Err(format!("{:?} is not a valid variable name", name));
    }
    let value = value.trim();
    let number = parse_number(value).ok_or_else(|| format!("{:?} is not a number", value))?;
    Ok((name.to_string(), number))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_is_split_into_name_and_value() {
        let (name, value) = parse_binding("$foo=-2.5").unwrap();

        assert_eq!(name, "foo");
        assert_eq!(Some(value), parse_number("-2.5"));
    }

    #[test]
    fn binding_without_value_returns_err() {
        assert!(parse_binding("foo").is_err());
        assert!(parse_binding("Foo=1").is_err());
        assert!(parse_binding("foo=one").is_err());
    }

    #[test]
    fn arguments_are_parsed() {
        let args = Arguments::parse_from([
            "rpn-calculator",
            "--var",
            "x=1",
            "--var",
            "y=2",
            "--digits",
            "3",
            "$x + $y",
        ]);

        assert_eq!(args.expression, "$x + $y");
        assert_eq!(args.variables.len(), 2);
        assert_eq!(args.digits, 3);
        assert!(!args.postfix);
    }
}
