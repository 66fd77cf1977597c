//! Instruction parser.
//!
//! One instruction per line:
//!
//! ```text
//! %0 = G_ADD s32, %1, %2
//! %3, %4 = G_EXTRACT s32, %5, 0, 32
//! BR block1 !4
//! ```

use alloc::vec::Vec;

use nom::{
    branch::alt,
    character::complete::{char, not_line_ending},
    combinator::{all_consuming, map, opt},
    error::{Error, ErrorKind},
    multi::{separated_list0, separated_list1},
    sequence::{preceded, terminated},
    IResult,
};

use super::{
    primitives::{decimal, integer, parse_block_index, parse_llt, parse_mnemonic, parse_reg_index},
    whitespace::blank,
};
use crate::{
    inst::DebugLoc,
    opcode::Opcode,
    types::Llt,
};

/// A non-define operand as written in the text format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsedOperand {
    /// Register use, by text index.
    Reg(u32),
    /// Integer immediate.
    Imm(i64),
    /// Block target.
    Block(usize),
}

/// One instruction as written, before register mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedInst {
    /// Text indexes of the define operands (left of `=`).
    pub defs: Vec<u32>,
    pub opcode: Opcode,
    pub ty: Llt,
    pub operands: Vec<ParsedOperand>,
    pub loc: DebugLoc,
}

fn parse_operand(input: &str) -> IResult<&str, ParsedOperand> {
    alt((
        map(parse_reg_index, ParsedOperand::Reg),
        map(parse_block_index, ParsedOperand::Block),
        map(integer, ParsedOperand::Imm),
    ))(input)
}

/// Parse the define list and `=`: `%0, %1 = `
fn parse_defs(input: &str) -> IResult<&str, Vec<u32>> {
    terminated(
        separated_list1(
            terminated(char(','), blank),
            terminated(parse_reg_index, blank),
        ),
        terminated(char('='), blank),
    )(input)
}

/// Parse one full instruction line (no leading/trailing whitespace).
fn inst_line(input: &str) -> IResult<&str, ParsedInst> {
    let (input, defs) = opt(parse_defs)(input)?;
    let (input, mnemonic) = terminated(parse_mnemonic, blank)(input)?;
    let opcode = match Opcode::from_mnemonic(mnemonic) {
        Some(opcode) => opcode,
        None => return Err(nom::Err::Error(Error::new(input, ErrorKind::Tag))),
    };
    let (input, ty) = opt(terminated(parse_llt, blank))(input)?;
    let (input, _) = opt(terminated(char(','), blank))(input)?;
    let (input, operands) = separated_list0(
        terminated(char(','), blank),
        terminated(parse_operand, blank),
    )(input)?;
    let (input, loc) = opt(preceded(char('!'), decimal::<u32>))(input)?;

    Ok((
        input,
        ParsedInst {
            defs: defs.unwrap_or_default(),
            opcode,
            ty: ty.unwrap_or(Llt::None),
            operands,
            loc: loc.map(DebugLoc::new).unwrap_or(DebugLoc::UNKNOWN),
        },
    ))
}

/// Parse a single instruction, consuming exactly one line of input.
pub(crate) fn parse_instruction(input: &str) -> IResult<&str, ParsedInst> {
    let (rest, line) = not_line_ending(input)?;
    let line = line.trim();
    if line.is_empty() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::NonEmpty)));
    }
    let (_, inst) = all_consuming(inst_line)(line)?;
    Ok((rest, inst))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_parse_generic_with_uses() {
        let (rest, inst) = parse_instruction("%0 = G_ADD s32, %1, %2").unwrap();
        assert_eq!(rest, "");
        assert_eq!(inst.defs, vec![0]);
        assert_eq!(inst.opcode, Opcode::Add);
        assert_eq!(inst.ty, Llt::scalar(32));
        assert_eq!(
            inst.operands,
            vec![ParsedOperand::Reg(1), ParsedOperand::Reg(2)]
        );
        assert!(inst.loc.is_unknown());
    }

    #[test]
    fn test_parse_multiple_defs() {
        let (_, inst) = parse_instruction("%3, %4 = G_EXTRACT s32, %5, 0, 32").unwrap();
        assert_eq!(inst.defs, vec![3, 4]);
        assert_eq!(inst.opcode, Opcode::Extract);
        assert_eq!(
            inst.operands,
            vec![
                ParsedOperand::Reg(5),
                ParsedOperand::Imm(0),
                ParsedOperand::Imm(32)
            ]
        );
    }

    #[test]
    fn test_parse_branch_with_loc() {
        let (_, inst) = parse_instruction("BR block1 !4").unwrap();
        assert_eq!(inst.opcode, Opcode::Br);
        assert_eq!(inst.ty, Llt::None);
        assert_eq!(inst.operands, vec![ParsedOperand::Block(1)]);
        assert_eq!(inst.loc, DebugLoc::new(4));
    }

    #[test]
    fn test_parse_copy() {
        let (_, inst) = parse_instruction("%6 = COPY %0").unwrap();
        assert_eq!(inst.opcode, Opcode::Copy);
        assert_eq!(inst.defs, vec![6]);
        assert_eq!(inst.operands, vec![ParsedOperand::Reg(0)]);
    }

    #[test]
    fn test_parse_frame_index() {
        let (_, inst) = parse_instruction("%0 = G_FRAME_INDEX p64, 3").unwrap();
        assert_eq!(inst.opcode, Opcode::FrameIndex);
        assert_eq!(inst.ty, Llt::pointer(64));
        assert_eq!(inst.operands, vec![ParsedOperand::Imm(3)]);
    }

    #[test]
    fn test_parse_bare_ret() {
        let (_, inst) = parse_instruction("RET").unwrap();
        assert_eq!(inst.opcode, Opcode::Ret);
        assert!(inst.defs.is_empty());
        assert!(inst.operands.is_empty());
    }

    #[test]
    fn test_parse_stops_at_line_end() {
        let input = "%0 = COPY %1\n    %2 = COPY %3";
        let (rest, inst) = parse_instruction(input).unwrap();
        assert_eq!(inst.defs, vec![0]);
        assert!(rest.starts_with('\n'));
    }

    #[test]
    fn test_parse_rejects_negative_loc_tag() {
        assert!(parse_instruction("BR block1 !-4").is_err());
    }

    #[test]
    fn test_parse_unknown_mnemonic() {
        assert!(parse_instruction("%0 = G_BOGUS s32, %1").is_err());
    }

    #[test]
    fn test_parse_block_header_is_not_instruction() {
        assert!(parse_instruction("block0:").is_err());
    }
}
