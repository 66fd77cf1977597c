//! Virtual register references.

use core::fmt;

/// A virtual register in the IR.
///
/// A `VReg` is a reference to a value slot owned by a [`Function`]; the IR
/// types here never create or destroy registers on their own. Mint new ones
/// with [`Function::new_vreg`].
///
/// [`Function`]: crate::Function
/// [`Function::new_vreg`]: crate::Function::new_vreg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VReg(u32);

impl VReg {
    /// Create a register reference from a raw index.
    pub fn new(index: u32) -> Self {
        VReg(index)
    }

    /// Get the raw index of this register.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}
