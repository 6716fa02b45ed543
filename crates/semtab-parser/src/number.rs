//! Numeric literal recognition for modifiers.

use winnow::{
    Parser as _,
    ascii::{digit0, digit1},
    combinator::{alt, opt},
    error::{ContextError, ErrMode},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// `-?(digits(.digits?)?|.digits)`
fn numeric_literal<'a>(input: &mut &'a str) -> IResult<&'a str> {
    (
        opt('-'),
        alt(((digit1, opt(('.', digit0))).void(), ('.', digit1).void())),
    )
        .take()
        .parse_next(input)
}

/// Returns `true` if `text` is a numeric literal such as `1`, `1.0`, `.2`
/// or `-3.5`.
///
/// A modifier that is a numeric literal fixes its parameter to that value;
/// any other modifier is a label.
///
/// # Example
///
/// ```
/// use semtab_parser::is_numeric_literal;
///
/// assert!(is_numeric_literal(".2"));
/// assert!(!is_numeric_literal("a1"));
/// ```
pub fn is_numeric_literal(text: &str) -> bool {
    let mut input = text;
    numeric_literal.parse_next(&mut input).is_ok() && input.is_empty()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn float_literal_strategy() -> impl Strategy<Value = String> {
        (any::<bool>(), 0u32..10000, 0u32..10000).prop_map(|(negative, integer, fraction)| {
            let sign = if negative { "-" } else { "" };
            format!("{sign}{integer}.{fraction}")
        })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every literal produced by formatting a float is numeric and parses as `f64`.
    fn check_float_literals_are_numeric(literal: &str) -> Result<(), TestCaseError> {
        prop_assert!(is_numeric_literal(literal), "`{literal}` not recognized");
        prop_assert!(literal.parse::<f64>().is_ok());
        Ok(())
    }

    /// Names starting with a letter are never numeric.
    fn check_names_are_not_numeric(name: &str) -> Result<(), TestCaseError> {
        prop_assert!(!is_numeric_literal(name), "`{name}` recognized as number");
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn float_literals_are_numeric(literal in float_literal_strategy()) {
            check_float_literals_are_numeric(&literal)?;
        }

        #[test]
        fn names_are_not_numeric(name in "[a-zA-Z_][a-zA-Z0-9_.]{0,12}") {
            check_names_are_not_numeric(&name)?;
        }
    }
}
