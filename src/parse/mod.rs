mod error;
mod grammar;

pub use error::ParseError;

use crate::Expr;

/// Parse a rule condition such as `#{age} >= 18 && #{status} != 'New'`
/// into an expression tree.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not a valid condition.
pub fn parse_condition(input: &str) -> Result<Expr, ParseError> {
    use winnow::Parser;
    grammar::condition
        .parse(input)
        .map_err(|e| ParseError::new(e.to_string()))
}
