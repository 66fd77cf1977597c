//! Block parser.

use alloc::vec::Vec;

use nom::{
    character::complete::char,
    multi::many0,
    sequence::terminated,
    IResult,
};

use super::{
    instructions::{parse_instruction, ParsedInst},
    primitives::parse_block_index,
    whitespace::blank,
};

/// One block as written: its text index and its instructions in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedBlock {
    pub index: usize,
    pub insts: Vec<ParsedInst>,
}

/// Parse a block: `blockN:` followed by zero or more instruction lines.
pub(crate) fn parse_block(input: &str) -> IResult<&str, ParsedBlock> {
    let (input, _) = blank(input)?;
    let (input, index) = terminated(parse_block_index, blank)(input)?;
    let (input, _) = terminated(char(':'), blank)(input)?;

    // many0 stops when the next line is another block header or the
    // closing brace.
    let (input, insts) = many0(terminated(parse_instruction, blank))(input)?;

    Ok((input, ParsedBlock { index, insts }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::Opcode;

    #[test]
    fn test_parse_block_simple() {
        let input = "block0:\n    %0 = G_ADD s32, %1, %2\n    RET";
        let (rest, block) = parse_block(input).unwrap();
        assert_eq!(rest, "");
        assert_eq!(block.index, 0);
        assert_eq!(block.insts.len(), 2);
        assert_eq!(block.insts[0].opcode, Opcode::Add);
        assert_eq!(block.insts[1].opcode, Opcode::Ret);
    }

    #[test]
    fn test_parse_block_empty() {
        let (rest, block) = parse_block("block2:").unwrap();
        assert_eq!(rest, "");
        assert_eq!(block.index, 2);
        assert!(block.insts.is_empty());
    }

    #[test]
    fn test_parse_block_stops_at_next_block() {
        let input = "block0:\n    BR block1\nblock1:\n    RET";
        let (rest, block) = parse_block(input).unwrap();
        assert_eq!(block.index, 0);
        assert_eq!(block.insts.len(), 1);
        assert!(rest.starts_with("block1:"));
    }

    #[test]
    fn test_parse_block_missing_colon() {
        assert!(parse_block("block0\n    RET").is_err());
    }
}
