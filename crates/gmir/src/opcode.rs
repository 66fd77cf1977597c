//! Opcodes and the opcode descriptor table.

use core::fmt;

/// An IR opcode.
///
/// Opcodes are partitioned into two disjoint classes:
/// - *generic* opcodes (the `G_*` mnemonics), whose semantics are
///   parametrized by an explicit [`Llt`] and which have not yet been lowered
///   to a target-specific form;
/// - *non-generic* opcodes, which carry no type.
///
/// Which class an opcode belongs to is answered by [`OpcodeRegistry`], not by
/// matching on the opcode directly.
///
/// [`Llt`]: crate::Llt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Generic, pre-lowering.
    /// Integer add, truncated to the type width.
    Add,
    /// Integer subtract, truncated to the type width.
    Sub,
    /// Integer multiply, truncated to the type width.
    Mul,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Materialize the address of a stack slot.
    FrameIndex,
    /// Extract one or more bit ranges from a source register.
    Extract,
    /// Concatenate registers bitwise, operand 0 at bit 0 of the result.
    Sequence,

    // Non-generic.
    /// Register-to-register copy, bit for bit.
    Copy,
    /// Unconditional branch to a block.
    Br,
    /// Return from the function.
    Ret,
}

impl Opcode {
    /// Look up an opcode by its text-format mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        DESCS
            .iter()
            .find(|d| d.mnemonic == mnemonic)
            .map(|d| d.opcode)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", DESCS[*self as usize].mnemonic)
    }
}

/// Descriptor for a single opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeDesc {
    /// The opcode this entry describes.
    pub opcode: Opcode,
    /// Text-format mnemonic.
    pub mnemonic: &'static str,
    /// Whether the opcode is generic (requires a concrete type).
    pub generic: bool,
    /// Minimum number of operands a well-formed instruction carries.
    pub min_operands: usize,
}

/// Descriptor table, indexed by opcode discriminant.
static DESCS: &[OpcodeDesc] = &[
    OpcodeDesc { opcode: Opcode::Add, mnemonic: "G_ADD", generic: true, min_operands: 3 },
    OpcodeDesc { opcode: Opcode::Sub, mnemonic: "G_SUB", generic: true, min_operands: 3 },
    OpcodeDesc { opcode: Opcode::Mul, mnemonic: "G_MUL", generic: true, min_operands: 3 },
    OpcodeDesc { opcode: Opcode::And, mnemonic: "G_AND", generic: true, min_operands: 3 },
    OpcodeDesc { opcode: Opcode::Or, mnemonic: "G_OR", generic: true, min_operands: 3 },
    OpcodeDesc { opcode: Opcode::FrameIndex, mnemonic: "G_FRAME_INDEX", generic: true, min_operands: 2 },
    OpcodeDesc { opcode: Opcode::Extract, mnemonic: "G_EXTRACT", generic: true, min_operands: 3 },
    OpcodeDesc { opcode: Opcode::Sequence, mnemonic: "G_SEQUENCE", generic: true, min_operands: 2 },
    OpcodeDesc { opcode: Opcode::Copy, mnemonic: "COPY", generic: false, min_operands: 2 },
    OpcodeDesc { opcode: Opcode::Br, mnemonic: "BR", generic: false, min_operands: 1 },
    OpcodeDesc { opcode: Opcode::Ret, mnemonic: "RET", generic: false, min_operands: 0 },
];

/// Registry answering questions about opcodes.
///
/// Owns the opcode descriptor table. The builder queries `is_generic` once
/// per construction call to validate typing.
#[derive(Debug, Clone)]
pub struct OpcodeRegistry {
    descs: &'static [OpcodeDesc],
}

impl OpcodeRegistry {
    /// Create a registry over the built-in descriptor table.
    pub fn new() -> Self {
        Self { descs: DESCS }
    }

    /// Get the descriptor for an opcode.
    pub fn desc(&self, opcode: Opcode) -> &OpcodeDesc {
        &self.descs[opcode as usize]
    }

    /// Check whether an opcode is generic (requires a concrete type).
    pub fn is_generic(&self, opcode: Opcode) -> bool {
        self.desc(opcode).generic
    }

    /// Get the text-format mnemonic of an opcode.
    pub fn mnemonic(&self, opcode: Opcode) -> &'static str {
        self.desc(opcode).mnemonic
    }

    /// Iterate over all opcode descriptors.
    pub fn descs(&self) -> impl Iterator<Item = &OpcodeDesc> {
        self.descs.iter()
    }
}

impl Default for OpcodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
