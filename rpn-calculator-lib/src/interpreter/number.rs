use crate::interpreter::error::{ExpressionError, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use regex::Regex;
use std::sync::OnceLock;

/// The value every operand, operator and function works with.
///
/// Literals are parsed exactly, so `0.01 + 1.1` is exactly `1.11`.
pub type Number = BigRational;

/// Decimal places kept when a square root is not exact.
pub const SQRT_PRECISION: u32 = 20;

/// Integer exponents up to this magnitude are raised exactly.
const EXACT_EXPONENT_LIMIT: i32 = 1 << 16;

/// Literals whose decimal point moves further than this are not accepted.
const LITERAL_SHIFT_LIMIT: u64 = 1 << 16;

static NUMBER_PATTERN: OnceLock<Regex> = OnceLock::new();

fn number_pattern() -> &'static Regex {
    NUMBER_PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<sign>[+-]?)(?P<integer>\d*)(?:\.(?P<fraction>\d+))?(?:[eE](?P<exponent>[+-]?\d+))?$",
        )
        .expect("number pattern is a valid regex")
    })
}

fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Parses a number literal in integer, decimal or scientific notation.
///
/// # Arguments
///
/// * `text`: The literal, e.g. `"12"`, `".5"` or `"5.1E-1"`. A leading sign is accepted.
///
/// returns: The exact value of the literal, or `None` if it is not a number.
///
/// # Examples
///
/// ```
/// use rpn_calculator::interpreter::number::{parse_number, Number};
///
/// assert_eq!(parse_number("5e-1"), Some(Number::new(1.into(), 2.into())));
/// assert_eq!(parse_number("$x"), None);
/// ```
pub fn parse_number(text: &str) -> Option<Number> {
    let captures = number_pattern().captures(text)?;
    let integer = captures.name("integer").map_or("", |m| m.as_str());
    let fraction = captures.name("fraction").map_or("", |m| m.as_str());
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    let exponent: i64 = match captures.name("exponent") {
        Some(exponent) => exponent.as_str().parse().ok()?,
        None => 0,
    };
    let digits: BigInt = format!("{}{}", integer, fraction).parse().ok()?;
    let shift = exponent.checked_sub(fraction.len() as i64)?;
    if shift.unsigned_abs() > LITERAL_SHIFT_LIMIT {
        return None;
    }
    let scale = pow10(u32::try_from(shift.unsigned_abs()).ok()?);

    let value = if shift >= 0 {
        Number::from_integer(digits * scale)
    } else {
        Number::new(digits, scale)
    };
    Some(if &captures["sign"] == "-" { -value } else { value })
}

pub(crate) fn divide(dividend: &Number, divisor: &Number) -> Result<Number> {
    if divisor.is_zero() {
        return Err(ExpressionError::DivisionByZero);
    }
    Ok(dividend / divisor)
}

/// Floored modulo: the result takes the sign of the divisor.
pub(crate) fn remainder(dividend: &Number, divisor: &Number) -> Result<Number> {
    let quotient = divide(dividend, divisor)?;
    Ok(dividend - divisor * quotient.floor())
}

pub(crate) fn power(base: &Number, exponent: &Number) -> Result<Number> {
    if exponent.is_integer() {
        if let Some(exponent) = exponent.to_integer().to_i32() {
            if exponent.abs() <= EXACT_EXPONENT_LIMIT {
                if base.is_zero() && exponent < 0 {
                    return Err(ExpressionError::DivisionByZero);
                }
                return Ok(base.pow(exponent));
            }
        }
    }
    from_f64(to_f64(base).powf(to_f64(exponent)), "^")
}

pub(crate) fn square_root(value: &Number) -> Result<Number> {
    if value.is_negative() {
        return Err(ExpressionError::Undefined("sqrt".into()));
    }
    let scale = pow10(SQRT_PRECISION);
    let scaled = value.numer() * &scale * &scale / value.denom();
    Ok(Number::new(scaled.sqrt(), scale))
}

pub(crate) fn to_f64(value: &Number) -> f64 {
    let numerator = value.numer().to_f64().unwrap_or(f64::NAN);
    let denominator = value.denom().to_f64().unwrap_or(f64::NAN);
    numerator / denominator
}

pub(crate) fn from_f64(value: f64, operation: &str) -> Result<Number> {
    Number::from_float(value).ok_or_else(|| ExpressionError::Undefined(operation.into()))
}

/// Formats a number as decimal text, rounded to at most `digits` fractional digits.
///
/// Integral values print without a decimal point and trailing zeros are trimmed.
pub fn format_decimal(value: &Number, digits: u32) -> String {
    if value.is_integer() {
        return value.to_integer().to_string();
    }

    let scaled = (value * Number::from_integer(pow10(digits)))
        .round()
        .to_integer();
    let sign = if scaled.is_negative() { "-" } else { "" };
    let width = digits as usize;
    let padded = format!("{:0>1$}", scaled.abs().to_string(), width + 1);
    let (integer, fraction) = padded.split_at(padded.len() - width);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized_macro::parameterized;

    fn ratio(numerator: i64, denominator: i64) -> Number {
        Number::new(numerator.into(), denominator.into())
    }

    #[parameterized(
    text = { "12", "0.1", ".01", "5e1", "5e-1", "5.1E-1", "-3", "+2.5" },
    expected = { ratio(12, 1), ratio(1, 10), ratio(1, 100), ratio(50, 1), ratio(1, 2), ratio(51, 100), ratio(-3, 1), ratio(5, 2) }
    )]
    fn number_literals_parse_exactly(text: &str, expected: Number) {
        assert_eq!(parse_number(text), Some(expected));
    }

    #[parameterized(text = { "", ".", "5.", "1.2.3", "$foo", "e5", "1e", "--1", "(" })]
    fn malformed_literals_are_rejected(text: &str) {
        assert_eq!(parse_number(text), None);
    }

    #[parameterized(text = { "1e999999999", "1e-70000", "0.5E+4294967295" })]
    fn literals_with_huge_exponents_are_rejected(text: &str) {
        assert_eq!(parse_number(text), None);
    }

    #[test]
    fn literal_exponent_at_limit_is_parsed() {
        let expected = Number::from_integer(pow10(65_536));
        assert_eq!(parse_number("1e65536"), Some(expected));
    }

    #[test]
    fn remainder_takes_sign_of_divisor() {
        assert_eq!(remainder(&ratio(6, 1), &ratio(4, 1)).unwrap(), ratio(2, 1));
        assert_eq!(remainder(&ratio(-7, 1), &ratio(3, 1)).unwrap(), ratio(2, 1));
        assert_eq!(remainder(&ratio(7, 1), &ratio(-3, 1)).unwrap(), ratio(-2, 1));
    }

    #[test]
    fn dividing_by_zero_returns_err() {
        assert_eq!(
            divide(&ratio(1, 1), &ratio(0, 1)),
            Err(ExpressionError::DivisionByZero)
        );
        assert_eq!(
            remainder(&ratio(1, 1), &ratio(0, 1)),
            Err(ExpressionError::DivisionByZero)
        );
        assert_eq!(
            power(&ratio(0, 1), &ratio(-1, 1)),
            Err(ExpressionError::DivisionByZero)
        );
    }

    #[test]
    fn integer_powers_are_exact() {
        assert_eq!(power(&ratio(3, 2), &ratio(5, 1)).unwrap(), ratio(243, 32));
        assert_eq!(power(&ratio(2, 1), &ratio(-2, 1)).unwrap(), ratio(1, 4));
    }

    #[test]
    fn fractional_power_uses_floating_point() {
        assert_eq!(power(&ratio(4, 1), &ratio(1, 2)).unwrap(), ratio(2, 1));
        assert!(matches!(
            power(&ratio(-8, 1), &ratio(1, 3)),
            Err(ExpressionError::Undefined(_))
        ));
    }

    #[test]
    fn square_root_of_perfect_square_is_exact() {
        assert_eq!(square_root(&ratio(9, 1)).unwrap(), ratio(3, 1));
        assert_eq!(square_root(&ratio(441, 100)).unwrap(), ratio(21, 10));
    }

    #[test]
    fn square_root_has_at_least_five_decimal_places() {
        let root = square_root(&ratio(2, 1)).unwrap();
        assert_eq!(format_decimal(&root, 5), "1.41421");
    }

    #[test]
    fn square_root_of_negative_is_undefined() {
        assert!(matches!(
            square_root(&ratio(-1, 1)),
            Err(ExpressionError::Undefined(_))
        ));
    }

    #[parameterized(
    value = { ratio(14, 1), ratio(-3, 1), ratio(111, 100), ratio(1, 3), ratio(-2, 3), ratio(1, 1_000_000) },
    expected = { "14", "-3", "1.11", "0.3333333333", "-0.6666666667", "0.000001" }
    )]
    fn decimal_formatting_rounds_and_trims(value: Number, expected: &str) {
        assert_eq!(format_decimal(&value, 10), expected);
    }

    #[test]
    fn decimal_formatting_with_no_digits_rounds_to_integer() {
        assert_eq!(format_decimal(&ratio(5, 2), 0), "3");
    }
}
