//! Instruction builder.

use gmir::{DebugLoc, Function, Inst, InstData, Llt, Opcode, OpcodeRegistry, VReg};

/// The insertion cursor: where the next built instruction is spliced.
///
/// The cursor is an anchor, not a moving position: building an instruction
/// does not advance it. Repeated builds at a `BlockBack` or `Before` anchor
/// therefore appear in call order, while repeated builds at a `BlockFront` or
/// `After` anchor appear in reverse call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPt {
    /// At the very front of a block.
    BlockFront(usize),
    /// At the very end of a block.
    BlockBack(usize),
    /// Immediately before an instruction.
    Before(Inst),
    /// Immediately after an instruction.
    After(Inst),
}

/// Builder for constructing and inserting generic machine IR instructions.
///
/// The builder owns the function under construction and keeps the insertion
/// point and debug location applied to every instruction it creates; both are
/// changed through the related setters.
///
/// All preconditions here are internal-consistency contracts with the calling
/// lowering pass, not input validation: violating one panics with a
/// diagnostic, there is no recoverable error path.
#[derive(Debug)]
pub struct InstBuilder<'a> {
    /// Function under construction.
    function: Option<Function>,
    /// Answers opcode genericness; bound together with the function.
    registry: Option<&'a OpcodeRegistry>,
    /// Debug location stamped onto every built instruction.
    loc: DebugLoc,
    /// Current insertion point, if established.
    point: Option<InsertPt>,
}

impl<'a> InstBuilder<'a> {
    /// Create an unbound builder. Call [`set_function`](Self::set_function)
    /// before building anything.
    pub fn new() -> Self {
        Self {
            function: None,
            registry: None,
            loc: DebugLoc::UNKNOWN,
            point: None,
        }
    }

    /// Bind the function to build into, together with the opcode registry.
    ///
    /// Any previously set insertion point is invalidated; re-establish it
    /// with [`set_basic_block`](Self::set_basic_block) or
    /// [`set_instruction`](Self::set_instruction).
    pub fn set_function(&mut self, function: Function, registry: &'a OpcodeRegistry) {
        self.function = Some(function);
        self.registry = Some(registry);
        self.point = None;
    }

    /// Get the function under construction.
    ///
    /// # Panics
    ///
    /// Panics if no function is bound.
    pub fn function(&self) -> &Function {
        self.function
            .as_ref()
            .expect("InstBuilder: no function bound")
    }

    /// Get the function under construction mutably.
    ///
    /// # Panics
    ///
    /// Panics if no function is bound.
    pub fn function_mut(&mut self) -> &mut Function {
        self.function
            .as_mut()
            .expect("InstBuilder: no function bound")
    }

    /// Finish building and return the function.
    ///
    /// # Panics
    ///
    /// Panics if no function is bound.
    pub fn finish(self) -> Function {
        self.function.expect("InstBuilder: no function bound")
    }

    /// Mint a new virtual register of the given type in the bound function.
    pub fn new_vreg(&mut self, ty: Llt) -> VReg {
        self.function_mut().new_vreg(ty)
    }

    /// Get the current insertion point.
    pub fn insert_point(&self) -> Option<InsertPt> {
        self.point
    }

    /// Get the debug location applied to built instructions.
    pub fn debug_loc(&self) -> DebugLoc {
        self.loc
    }

    /// Set the debug location for all instructions built after this call.
    pub fn set_debug_loc(&mut self, loc: DebugLoc) {
        self.loc = loc;
    }

    /// Set the insertion point to the beginning (`at_beginning = true`) or
    /// end of `block`.
    ///
    /// # Panics
    ///
    /// Panics if no function is bound or `block` is not in it.
    pub fn set_basic_block(&mut self, block: usize, at_beginning: bool) {
        assert!(
            self.function().contains_block(block),
            "InstBuilder: block{} is not in the current function",
            block
        );
        self.point = Some(if at_beginning {
            InsertPt::BlockFront(block)
        } else {
            InsertPt::BlockBack(block)
        });
    }

    /// Set the insertion point immediately before (`before = true`) or after
    /// `inst`.
    ///
    /// # Panics
    ///
    /// Panics if no function is bound or `inst` is not linked into one of its
    /// blocks.
    pub fn set_instruction(&mut self, inst: Inst, before: bool) {
        assert!(
            self.function().inst_block(inst).is_some(),
            "InstBuilder: anchor instruction is not in the current function"
        );
        self.point = Some(if before {
            InsertPt::Before(inst)
        } else {
            InsertPt::After(inst)
        });
    }

    /// Build and insert `<empty> = opcode [ty] <empty>`.
    ///
    /// `ty` is the type of the instruction if `opcode` is generic, and must
    /// be [`Llt::None`] if it is not. The instruction carries the current
    /// debug location and no operands, and is spliced at the insertion point
    /// set by the last call to `set_basic_block` or `set_instruction`. The
    /// insertion point is not advanced.
    ///
    /// # Panics
    ///
    /// Panics if no insertion point has been established, or if `ty` does not
    /// match the opcode's genericness.
    pub fn build_instr(&mut self, opcode: Opcode, ty: Llt) -> Inst {
        let registry = self
            .registry
            .expect("InstBuilder: no function bound");
        let point = self
            .point
            .expect("InstBuilder: insertion point is not set");
        if registry.is_generic(opcode) {
            assert!(
                ty.is_valid(),
                "InstBuilder: generic opcode {} requires a concrete type",
                opcode
            );
        } else {
            assert!(
                !ty.is_valid(),
                "InstBuilder: non-generic opcode {} cannot carry a type",
                opcode
            );
        }

        let loc = self.loc;
        let func = self.function_mut();
        let inst = func.create_inst(InstData::new(opcode, ty, loc));
        match point {
            InsertPt::BlockFront(block) => func.push_front(block, inst),
            InsertPt::BlockBack(block) => func.push_back(block, inst),
            InsertPt::Before(anchor) => func.insert_before(anchor, inst),
            InsertPt::After(anchor) => func.insert_after(anchor, inst),
        }
        inst
    }

    /// Build and insert `res = opcode [ty] uses...`.
    ///
    /// Delegates to [`build_instr`](Self::build_instr), then appends one
    /// define operand followed by the uses in the order given.
    pub fn build_instr_with(
        &mut self,
        opcode: Opcode,
        ty: Llt,
        res: VReg,
        uses: &[VReg],
    ) -> Inst {
        let inst = self.build_instr(opcode, ty);
        let data = self.function_mut().inst_mut(inst);
        data.add_def(res);
        for reg in uses {
            data.add_use(*reg);
        }
        inst
    }

    /// Build and insert `res = G_FRAME_INDEX ty, index`.
    ///
    /// Materializes the address of stack slot `index`.
    pub fn build_frame_index(&mut self, ty: Llt, res: VReg, index: i64) -> Inst {
        let inst = self.build_instr(Opcode::FrameIndex, ty);
        let data = self.function_mut().inst_mut(inst);
        data.add_def(res);
        data.add_imm(index);
        inst
    }

    /// Build and insert `res = G_ADD ty, op0, op1`.
    ///
    /// Sets `res` to the sum of `op0` and `op1`, truncated to the type width.
    pub fn build_add(&mut self, ty: Llt, res: VReg, op0: VReg, op1: VReg) -> Inst {
        self.build_instr_with(Opcode::Add, ty, res, &[op0, op1])
    }

    /// Build and insert `BR blockN`, an untyped unconditional branch to
    /// `target`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a block of the current function.
    pub fn build_br(&mut self, target: usize) -> Inst {
        assert!(
            self.function().contains_block(target),
            "InstBuilder: branch target block{} is not in the current function",
            target
        );
        let inst = self.build_instr(Opcode::Br, Llt::None);
        self.function_mut().inst_mut(inst).add_block(target);
        inst
    }

    /// Build and insert `res = COPY op`, a bit-for-bit register copy.
    pub fn build_copy(&mut self, res: VReg, op: VReg) -> Inst {
        self.build_instr_with(Opcode::Copy, Llt::None, res, &[op])
    }

    /// Build and insert `results... = G_EXTRACT ty, src, indexes...`.
    ///
    /// If `ty` is N bits wide, sets `results[i]` to bits
    /// `[indexes[i], indexes[i] + N)` of `src`. Whether each index leaves a
    /// valid window inside `src` is checked by the verifier, not here.
    ///
    /// # Panics
    ///
    /// Panics if `results` and `indexes` differ in length.
    pub fn build_extract(
        &mut self,
        ty: Llt,
        results: &[VReg],
        src: VReg,
        indexes: &[u64],
    ) -> Inst {
        assert_eq!(
            results.len(),
            indexes.len(),
            "InstBuilder: G_EXTRACT needs one result per bit index"
        );
        let inst = self.build_instr(Opcode::Extract, ty);
        let data = self.function_mut().inst_mut(inst);
        for res in results {
            data.add_def(*res);
        }
        data.add_use(src);
        for index in indexes {
            data.add_imm(*index as i64);
        }
        inst
    }

    /// Build and insert `res = G_SEQUENCE ty, ops...`, concatenating the
    /// operands bitwise with `ops[0]` at bit 0 of `res`.
    ///
    /// # Panics
    ///
    /// Panics if the operand widths do not sum to the width of `ty`.
    pub fn build_sequence(&mut self, ty: Llt, res: VReg, ops: &[VReg]) -> Inst {
        let total: u64 = ops
            .iter()
            .map(|op| {
                self.function()
                    .vreg_ty(*op)
                    .expect("InstBuilder: G_SEQUENCE operand is not a register of the current function")
                    .size_bits()
            })
            .sum();
        assert_eq!(
            total,
            ty.size_bits(),
            "InstBuilder: G_SEQUENCE operand widths must sum to the result width"
        );
        self.build_instr_with(Opcode::Sequence, ty, res, ops)
    }
}

impl Default for InstBuilder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn bound_builder(registry: &OpcodeRegistry) -> (InstBuilder<'_>, usize) {
        let mut func = Function::new();
        let block = func.add_block();
        let mut builder = InstBuilder::new();
        builder.set_function(func, registry);
        (builder, block)
    }

    #[test]
    fn test_build_at_block_end() {
        let registry = OpcodeRegistry::new();
        let (mut builder, block) = bound_builder(&registry);
        builder.set_basic_block(block, false);

        let res = builder.new_vreg(Llt::scalar(32));
        let a = builder.new_vreg(Llt::scalar(32));
        let b = builder.new_vreg(Llt::scalar(32));
        let inst = builder.build_add(Llt::scalar(32), res, a, b);

        let func = builder.finish();
        assert_eq!(func.inst_block(inst), Some(block));
        assert_eq!(func.inst(inst).opcode, Opcode::Add);
        assert_eq!(func.inst(inst).defs(), vec![res]);
        assert_eq!(func.inst(inst).uses(), vec![a, b]);
    }

    #[test]
    #[should_panic(expected = "insertion point is not set")]
    fn test_build_without_insertion_point() {
        let registry = OpcodeRegistry::new();
        let (mut builder, _) = bound_builder(&registry);
        builder.build_instr(Opcode::Add, Llt::scalar(32));
    }

    #[test]
    #[should_panic(expected = "no function bound")]
    fn test_build_unbound() {
        let mut builder = InstBuilder::new();
        builder.build_instr(Opcode::Add, Llt::scalar(32));
    }

    #[test]
    #[should_panic(expected = "is not in the current function")]
    fn test_set_basic_block_out_of_range() {
        let registry = OpcodeRegistry::new();
        let (mut builder, _) = bound_builder(&registry);
        builder.set_basic_block(7, true);
    }

    #[test]
    fn test_set_function_clears_insertion_point() {
        let registry = OpcodeRegistry::new();
        let (mut builder, block) = bound_builder(&registry);
        builder.set_basic_block(block, false);
        assert!(builder.insert_point().is_some());

        let mut other = Function::new();
        other.add_block();
        builder.set_function(other, &registry);
        assert_eq!(builder.insert_point(), None);
    }
}
