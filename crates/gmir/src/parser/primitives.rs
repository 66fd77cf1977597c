//! Primitive parsers for types, registers, names, and literals.

use alloc::string::{String, ToString};

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::char,
    combinator::{map, map_res, opt, recognize},
    sequence::{pair, preceded, separated_pair},
    IResult,
};

use crate::types::Llt;

/// Parse an integer literal
pub(crate) fn integer(input: &str) -> IResult<&str, i64> {
    map_res(
        recognize(pair(
            opt(char('-')),
            take_while1(|c: char| c.is_ascii_digit()),
        )),
        |s: &str| s.parse::<i64>(),
    )(input)
}

pub(crate) fn decimal<T: core::str::FromStr>(input: &str) -> IResult<&str, T> {
    map_res(take_while1(|c: char| c.is_ascii_digit()), |s: &str| {
        s.parse::<T>()
    })(input)
}

/// Parse a type: s32, v4s32, p64
pub(crate) fn parse_llt(input: &str) -> IResult<&str, Llt> {
    alt((
        map(
            preceded(
                char('v'),
                separated_pair(decimal::<u16>, char('s'), decimal::<u32>),
            ),
            |(lanes, bits)| Llt::vector(lanes, bits),
        ),
        map(preceded(char('s'), decimal::<u32>), Llt::scalar),
        map(preceded(char('p'), decimal::<u32>), Llt::pointer),
    ))(input)
}

/// Parse a register reference (%0, %1, etc.), returning the text index
pub(crate) fn parse_reg_index(input: &str) -> IResult<&str, u32> {
    preceded(char('%'), decimal::<u32>)(input)
}

/// Parse a function name (@name)
pub(crate) fn parse_function_name(input: &str) -> IResult<&str, String> {
    map(
        preceded(
            char('@'),
            take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        ),
        |s: &str| s.to_string(),
    )(input)
}

/// Parse a block index (block0, block1, etc.)
pub(crate) fn parse_block_index(input: &str) -> IResult<&str, usize> {
    preceded(tag("block"), decimal::<usize>)(input)
}

/// Parse an opcode mnemonic (G_ADD, COPY, etc.), returning the raw text
pub(crate) fn parse_mnemonic(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer() {
        assert_eq!(integer("42"), Ok(("", 42)));
        assert_eq!(integer("-42"), Ok(("", -42)));
        assert_eq!(integer("0 "), Ok((" ", 0)));
    }

    #[test]
    fn test_parse_llt() {
        assert_eq!(parse_llt("s32"), Ok(("", Llt::scalar(32))));
        assert_eq!(parse_llt("s1"), Ok(("", Llt::scalar(1))));
        assert_eq!(parse_llt("v4s32"), Ok(("", Llt::vector(4, 32))));
        assert_eq!(parse_llt("p64"), Ok(("", Llt::pointer(64))));
        assert!(parse_llt("i32").is_err());
    }

    #[test]
    fn test_parse_reg_index() {
        assert_eq!(parse_reg_index("%0"), Ok(("", 0)));
        assert_eq!(parse_reg_index("%42,"), Ok((",", 42)));
        assert!(parse_reg_index("42").is_err());
    }

    #[test]
    fn test_parse_function_name() {
        assert_eq!(parse_function_name("@add"), Ok(("", "add".to_string())));
        assert_eq!(
            parse_function_name("@lower_fn "),
            Ok((" ", "lower_fn".to_string()))
        );
    }

    #[test]
    fn test_parse_block_index() {
        assert_eq!(parse_block_index("block0"), Ok(("", 0)));
        assert_eq!(parse_block_index("block12:"), Ok((":", 12)));
    }

    #[test]
    fn test_parse_mnemonic() {
        assert_eq!(parse_mnemonic("G_ADD s32"), Ok((" s32", "G_ADD")));
        assert_eq!(parse_mnemonic("COPY %0"), Ok((" %0", "COPY")));
        assert!(parse_mnemonic("block0").is_err());
    }
}
