//! Function parser and assembly into IR storage.

use alloc::{format, string::String, vec::Vec};

use nom::{
    bytes::complete::tag,
    character::complete::char,
    combinator::opt,
    multi::many1,
    sequence::terminated,
    IResult,
};

use super::{
    block::{parse_block, ParsedBlock},
    error::ParseError,
    instructions::ParsedOperand,
    primitives::parse_function_name,
    whitespace::blank,
};
use crate::{
    function::Function,
    inst::InstData,
    opcode::OpcodeRegistry,
    types::Llt,
    vreg::VReg,
};

/// One function as written, before assembly.
#[derive(Debug, Clone)]
pub(crate) struct ParsedFunction {
    pub name: Option<String>,
    pub blocks: Vec<ParsedBlock>,
}

/// Parse a function (internal; leading whitespace handled by the caller).
pub(crate) fn parse_function_internal(input: &str) -> IResult<&str, ParsedFunction> {
    let (input, _) = terminated(tag("function"), blank)(input)?;
    let (input, name) = opt(terminated(parse_function_name, blank))(input)?;
    let (input, _) = terminated(char('{'), blank)(input)?;
    let (input, blocks) = many1(parse_block)(input)?;
    let (input, _) = terminated(char('}'), blank)(input)?;

    Ok((input, ParsedFunction { name, blocks }))
}

fn semantic_error(message: String) -> ParseError {
    ParseError::semantic(message)
}

/// Turn a parsed function into IR storage, checking opcode typing and block
/// references against the registry.
pub(crate) fn assemble(parsed: ParsedFunction) -> Result<Function, ParseError> {
    let registry = OpcodeRegistry::new();
    let mut func = match parsed.name {
        Some(name) => Function::with_name(name),
        None => Function::new(),
    };

    for (position, block) in parsed.blocks.iter().enumerate() {
        if block.index != position {
            return Err(semantic_error(format!(
                "block{} declared out of order (expected block{})",
                block.index, position
            )));
        }
        func.add_block();
    }
    let block_count = func.block_count();

    // Text register indexes become the minted vreg indexes, so printing a
    // parsed function reproduces the register names. Def sites refine the
    // register type.
    fn reg_for(func: &mut Function, index: u32, ty: Llt) -> VReg {
        while func.vreg_count() <= index as usize {
            func.new_vreg(Llt::None);
        }
        let reg = VReg::new(index);
        if ty != Llt::None && func.vreg_ty(reg) == Some(Llt::None) {
            func.set_vreg_ty(reg, ty);
        }
        reg
    }

    for block in &parsed.blocks {
        for inst in &block.insts {
            if inst.ty.is_valid() != registry.is_generic(inst.opcode) {
                let message = if registry.is_generic(inst.opcode) {
                    format!("generic instruction {} requires a type", inst.opcode)
                } else {
                    format!("non-generic instruction {} cannot carry a type", inst.opcode)
                };
                return Err(semantic_error(message));
            }

            let operand_count = inst.defs.len() + inst.operands.len();
            let min_operands = registry.desc(inst.opcode).min_operands;
            if operand_count < min_operands {
                return Err(semantic_error(format!(
                    "{} needs at least {} operands, found {}",
                    inst.opcode, min_operands, operand_count
                )));
            }

            let mut data = InstData::new(inst.opcode, inst.ty, inst.loc);
            for def in &inst.defs {
                let reg = reg_for(&mut func, *def, inst.ty);
                data.add_def(reg);
            }
            for operand in &inst.operands {
                match operand {
                    ParsedOperand::Reg(index) => {
                        let reg = reg_for(&mut func, *index, Llt::None);
                        data.add_use(reg);
                    }
                    ParsedOperand::Imm(value) => data.add_imm(*value),
                    ParsedOperand::Block(target) => {
                        if *target >= block_count {
                            return Err(semantic_error(format!(
                                "branch target block{} does not exist",
                                target
                            )));
                        }
                        data.add_block(*target);
                    }
                }
            }

            let handle = func.create_inst(data);
            func.push_back(block.index, handle);
        }
    }

    Ok(func)
}
