//! Basic blocks.

use crate::inst::Inst;

/// A basic block in a function.
///
/// A block is an ordered sequence of instructions with a single entry and a
/// single exit. Instruction storage lives in the owning [`Function`]'s arena;
/// the block only tracks the ends of its doubly-linked instruction list, which
/// is what makes insertion at an arbitrary position O(1).
///
/// [`Function`]: crate::Function
#[derive(Debug, Clone, Default)]
pub struct Block {
    /// First instruction in the block, if any.
    pub(crate) first: Option<Inst>,
    /// Last instruction in the block, if any.
    pub(crate) last: Option<Inst>,
    /// Number of instructions in the block.
    pub(crate) len: usize,
}

impl Block {
    /// Create a new empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the first instruction in this block.
    pub fn first_inst(&self) -> Option<Inst> {
        self.first
    }

    /// Get the last instruction in this block.
    pub fn last_inst(&self) -> Option<Inst> {
        self.last
    }

    /// Get the number of instructions in this block.
    pub fn inst_count(&self) -> usize {
        self.len
    }

    /// Check whether the block has no instructions.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
