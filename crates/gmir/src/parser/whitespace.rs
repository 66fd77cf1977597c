//! Whitespace parsing utilities.

use nom::{character::complete::multispace0, combinator::map, IResult};

/// Parse optional whitespace (spaces, tabs, newlines) and discard it.
pub(crate) fn blank(input: &str) -> IResult<&str, ()> {
    map(multispace0, |_| ())(input)
}
