//! IR instructions and operands.

use alloc::vec::Vec;
use core::fmt;

use crate::{opcode::Opcode, types::Llt, vreg::VReg};

/// An opaque debug location stamped onto instructions.
///
/// The IR assumes no structure beyond "copyable tag"; the zero value means
/// unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct DebugLoc(u32);

impl DebugLoc {
    /// The unknown location.
    pub const UNKNOWN: DebugLoc = DebugLoc(0);

    /// Create a location from a raw tag.
    pub fn new(tag: u32) -> Self {
        DebugLoc(tag)
    }

    /// Get the raw tag.
    pub fn tag(&self) -> u32 {
        self.0
    }

    /// Check whether this is the unknown location.
    pub fn is_unknown(&self) -> bool {
        self.0 == 0
    }
}

/// A single instruction operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// A virtual register, either defined (result) or used (input) by the
    /// instruction.
    Reg { reg: VReg, def: bool },
    /// An integer literal (frame slot index, bit index, ...).
    Imm(i64),
    /// A basic-block target (branch destination).
    Block(usize),
}

impl Operand {
    /// Check if this operand defines a register.
    pub fn is_def(&self) -> bool {
        matches!(self, Operand::Reg { def: true, .. })
    }

    /// Check if this operand uses a register.
    pub fn is_use(&self) -> bool {
        matches!(self, Operand::Reg { def: false, .. })
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg { reg, .. } => write!(f, "{}", reg),
            Operand::Imm(value) => write!(f, "{}", value),
            Operand::Block(index) => write!(f, "block{}", index),
        }
    }
}

/// A stable handle to an instruction in a function's instruction arena.
///
/// Handles stay valid across insertions; instructions are owned by the
/// [`Function`] they were created in and linked into exactly one block.
///
/// [`Function`]: crate::Function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Inst(u32);

impl Inst {
    pub(crate) fn new(index: usize) -> Self {
        Inst(index as u32)
    }

    /// Get the raw arena index of this handle.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// The payload of one instruction: opcode, type, operands, debug location.
///
/// By convention all define operands precede use operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstData {
    /// The operation.
    pub opcode: Opcode,
    /// Type descriptor. [`Llt::None`] exactly when the opcode is non-generic.
    pub ty: Llt,
    /// Ordered operand list, defs first.
    pub operands: Vec<Operand>,
    /// Debug location active when the instruction was built.
    pub loc: DebugLoc,
}

impl InstData {
    /// Create instruction data with no operands.
    pub fn new(opcode: Opcode, ty: Llt, loc: DebugLoc) -> Self {
        Self {
            opcode,
            ty,
            operands: Vec::new(),
            loc,
        }
    }

    /// Append a define (result) operand.
    pub fn add_def(&mut self, reg: VReg) {
        self.operands.push(Operand::Reg { reg, def: true });
    }

    /// Append a use (input) operand.
    pub fn add_use(&mut self, reg: VReg) {
        self.operands.push(Operand::Reg { reg, def: false });
    }

    /// Append an integer literal operand.
    pub fn add_imm(&mut self, value: i64) {
        self.operands.push(Operand::Imm(value));
    }

    /// Append a block-target operand.
    pub fn add_block(&mut self, block: usize) {
        self.operands.push(Operand::Block(block));
    }

    /// Registers defined by this instruction, in operand order.
    pub fn defs(&self) -> Vec<VReg> {
        self.operands
            .iter()
            .filter_map(|op| match op {
                Operand::Reg { reg, def: true } => Some(*reg),
                _ => None,
            })
            .collect()
    }

    /// Registers used by this instruction, in operand order.
    pub fn uses(&self) -> Vec<VReg> {
        self.operands
            .iter()
            .filter_map(|op| match op {
                Operand::Reg { reg, def: false } => Some(*reg),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for InstData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defs: Vec<&Operand> = self.operands.iter().filter(|op| op.is_def()).collect();
        let rest: Vec<&Operand> = self.operands.iter().filter(|op| !op.is_def()).collect();

        for (i, op) in defs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", op)?;
        }
        if !defs.is_empty() {
            write!(f, " = ")?;
        }

        write!(f, "{}", self.opcode)?;
        if self.ty.is_valid() {
            write!(f, " {}", self.ty)?;
            if !rest.is_empty() {
                write!(f, ",")?;
            }
        }
        for (i, op) in rest.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}", op)?;
        }

        if !self.loc.is_unknown() {
            write!(f, " !{}", self.loc.tag())?;
        }
        Ok(())
    }
}
