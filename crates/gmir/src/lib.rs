//! Generic machine IR (gmir).
//!
//! This crate defines the core IR types used during instruction-selection
//! lowering, before target-specific instructions exist:
//! - Types (`Llt`: scalar / vector / pointer width descriptors)
//! - Virtual registers (`VReg`)
//! - Opcodes and the opcode descriptor table (`Opcode`, `OpcodeRegistry`)
//! - Instructions (`Inst` handles into a function-level arena, `InstData`)
//! - Blocks (basic blocks as linked lists of instructions)
//! - Functions (blocks, instruction storage, vreg type table)
//! - A text format (`Display` + nom parser)

#![no_std]

extern crate alloc;

mod block;
mod function;
mod inst;
mod opcode;
pub mod parser;
mod types;
mod vreg;

pub use block::Block;
pub use function::Function;
pub use inst::{DebugLoc, Inst, InstData, Operand};
pub use opcode::{Opcode, OpcodeDesc, OpcodeRegistry};
pub use types::Llt;
pub use vreg::VReg;
