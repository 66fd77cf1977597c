//! Functions.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{
    block::Block,
    inst::{Inst, InstData},
    types::Llt,
    vreg::VReg,
};

/// Per-instruction linkage into the owning block's list.
#[derive(Debug, Clone, Copy, Default)]
struct InstNode {
    prev: Option<Inst>,
    next: Option<Inst>,
    block: Option<usize>,
}

/// A function in the IR.
///
/// A function owns:
/// - its basic blocks (indexed by `usize`, block 0 is the entry),
/// - the instruction arena all [`Inst`] handles point into,
/// - the virtual-register type table.
///
/// Instructions are kept in per-block doubly-linked lists over the arena, so
/// splicing an instruction at any position is O(1) and handles never move.
#[derive(Debug, Clone, Default)]
pub struct Function {
    /// Optional function name (for debugging and printing).
    name: Option<String>,
    blocks: Vec<Block>,
    insts: Vec<InstData>,
    nodes: Vec<InstNode>,
    vregs: Vec<Llt>,
}

impl Function {
    /// Create a new empty function.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new function with a name.
    pub fn with_name(name: String) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    /// Set the function name.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Get the function name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    // ---- Blocks ----

    /// Append a new empty block and return its index.
    pub fn add_block(&mut self) -> usize {
        let index = self.blocks.len();
        self.blocks.push(Block::new());
        index
    }

    /// Get a block by index.
    pub fn block(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Get the number of blocks in this function.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check whether a block index belongs to this function.
    pub fn contains_block(&self, index: usize) -> bool {
        index < self.blocks.len()
    }

    // ---- Virtual registers ----

    /// Mint a new virtual register of the given type.
    pub fn new_vreg(&mut self, ty: Llt) -> VReg {
        let reg = VReg::new(self.vregs.len() as u32);
        self.vregs.push(ty);
        reg
    }

    /// Get the type of a virtual register.
    pub fn vreg_ty(&self, reg: VReg) -> Option<Llt> {
        self.vregs.get(reg.index() as usize).copied()
    }

    /// Set the type of an existing virtual register.
    pub fn set_vreg_ty(&mut self, reg: VReg, ty: Llt) {
        self.vregs[reg.index() as usize] = ty;
    }

    /// Get the number of virtual registers minted so far.
    pub fn vreg_count(&self) -> usize {
        self.vregs.len()
    }

    // ---- Instructions ----

    /// Allocate an instruction in the arena, not yet linked into any block.
    pub fn create_inst(&mut self, data: InstData) -> Inst {
        let inst = Inst::new(self.insts.len());
        self.insts.push(data);
        self.nodes.push(InstNode::default());
        inst
    }

    /// Get the data of an instruction.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not created by this function.
    pub fn inst(&self, inst: Inst) -> &InstData {
        &self.insts[inst.index()]
    }

    /// Get the data of an instruction mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle was not created by this function.
    pub fn inst_mut(&mut self, inst: Inst) -> &mut InstData {
        &mut self.insts[inst.index()]
    }

    /// The block an instruction is currently linked into, if any.
    ///
    /// Returns `None` both for unlinked instructions and for handles that do
    /// not belong to this function, so it doubles as a containment query.
    pub fn inst_block(&self, inst: Inst) -> Option<usize> {
        self.nodes.get(inst.index()).and_then(|n| n.block)
    }

    /// The instruction after `inst` in its block.
    pub fn next_inst(&self, inst: Inst) -> Option<Inst> {
        self.nodes.get(inst.index()).and_then(|n| n.next)
    }

    /// The instruction before `inst` in its block.
    pub fn prev_inst(&self, inst: Inst) -> Option<Inst> {
        self.nodes.get(inst.index()).and_then(|n| n.prev)
    }

    // ---- Splicing ----

    /// Link `inst` at the front of `block`.
    ///
    /// # Panics
    ///
    /// Panics if `inst` is already linked or `block` is out of range.
    pub fn push_front(&mut self, block: usize, inst: Inst) {
        self.assert_unlinked(inst);
        let old_first = self.blocks[block].first;
        self.nodes[inst.index()] = InstNode {
            prev: None,
            next: old_first,
            block: Some(block),
        };
        if let Some(first) = old_first {
            self.nodes[first.index()].prev = Some(inst);
        } else {
            self.blocks[block].last = Some(inst);
        }
        self.blocks[block].first = Some(inst);
        self.blocks[block].len += 1;
    }

    /// Link `inst` at the back of `block`.
    ///
    /// # Panics
    ///
    /// Panics if `inst` is already linked or `block` is out of range.
    pub fn push_back(&mut self, block: usize, inst: Inst) {
        self.assert_unlinked(inst);
        let old_last = self.blocks[block].last;
        self.nodes[inst.index()] = InstNode {
            prev: old_last,
            next: None,
            block: Some(block),
        };
        if let Some(last) = old_last {
            self.nodes[last.index()].next = Some(inst);
        } else {
            self.blocks[block].first = Some(inst);
        }
        self.blocks[block].last = Some(inst);
        self.blocks[block].len += 1;
    }

    /// Link `inst` immediately before `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if `inst` is already linked or `anchor` is not linked into a
    /// block of this function.
    pub fn insert_before(&mut self, anchor: Inst, inst: Inst) {
        self.assert_unlinked(inst);
        let block = self
            .inst_block(anchor)
            .expect("insert_before: anchor instruction is not in a block");
        let prev = self.nodes[anchor.index()].prev;
        self.nodes[inst.index()] = InstNode {
            prev,
            next: Some(anchor),
            block: Some(block),
        };
        self.nodes[anchor.index()].prev = Some(inst);
        if let Some(prev) = prev {
            self.nodes[prev.index()].next = Some(inst);
        } else {
            self.blocks[block].first = Some(inst);
        }
        self.blocks[block].len += 1;
    }

    /// Link `inst` immediately after `anchor`.
    ///
    /// # Panics
    ///
    /// Panics if `inst` is already linked or `anchor` is not linked into a
    /// block of this function.
    pub fn insert_after(&mut self, anchor: Inst, inst: Inst) {
        self.assert_unlinked(inst);
        let block = self
            .inst_block(anchor)
            .expect("insert_after: anchor instruction is not in a block");
        let next = self.nodes[anchor.index()].next;
        self.nodes[inst.index()] = InstNode {
            prev: Some(anchor),
            next,
            block: Some(block),
        };
        self.nodes[anchor.index()].next = Some(inst);
        if let Some(next) = next {
            self.nodes[next.index()].prev = Some(inst);
        } else {
            self.blocks[block].last = Some(inst);
        }
        self.blocks[block].len += 1;
    }

    fn assert_unlinked(&self, inst: Inst) {
        assert!(
            self.inst_block(inst).is_none(),
            "instruction {:?} is already linked into a block",
            inst
        );
    }

    // ---- Iteration ----

    /// Iterate over the instruction handles of a block, in order.
    pub fn block_insts(&self, block: usize) -> InstIter<'_> {
        InstIter {
            function: self,
            cursor: self.blocks.get(block).and_then(|b| b.first),
        }
    }
}

/// Iterator over the instructions of one block.
#[derive(Debug)]
pub struct InstIter<'a> {
    function: &'a Function,
    cursor: Option<Inst>,
}

impl Iterator for InstIter<'_> {
    type Item = Inst;

    fn next(&mut self) -> Option<Inst> {
        let inst = self.cursor?;
        self.cursor = self.function.next_inst(inst);
        Some(inst)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            writeln!(f, "function @{} {{", name)?;
        } else {
            writeln!(f, "function {{")?;
        }
        for block in 0..self.blocks.len() {
            writeln!(f, "block{}:", block)?;
            for inst in self.block_insts(block) {
                writeln!(f, "    {}", self.inst(inst))?;
            }
        }
        writeln!(f, "}}")?;
        Ok(())
    }
}
