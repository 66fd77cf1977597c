//! Low-level type descriptors for generic instructions.

use core::fmt;

/// A low-level type (LLT) describing the bit-width and shape of a value.
///
/// Generic instructions carry exactly one `Llt`; non-generic (already
/// target-lowered) instructions carry [`Llt::None`], the "no type" sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Llt {
    /// No type. The only legal type for non-generic opcodes.
    None,
    /// A scalar integer-like value of the given width in bits.
    Scalar { bits: u32 },
    /// A vector of `lanes` scalar elements, each `bits` wide.
    Vector { lanes: u16, bits: u32 },
    /// A pointer of the given width in bits.
    Pointer { bits: u32 },
}

impl Llt {
    /// Create a scalar type of the given width.
    pub fn scalar(bits: u32) -> Self {
        Llt::Scalar { bits }
    }

    /// Create a vector type with `lanes` elements of `bits` each.
    pub fn vector(lanes: u16, bits: u32) -> Self {
        Llt::Vector { lanes, bits }
    }

    /// Create a pointer type of the given width.
    pub fn pointer(bits: u32) -> Self {
        Llt::Pointer { bits }
    }

    /// Check whether this is a concrete type (not the sentinel).
    pub fn is_valid(&self) -> bool {
        !matches!(self, Llt::None)
    }

    /// Check if this is a scalar type.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Llt::Scalar { .. })
    }

    /// Check if this is a vector type.
    pub fn is_vector(&self) -> bool {
        matches!(self, Llt::Vector { .. })
    }

    /// Check if this is a pointer type.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Llt::Pointer { .. })
    }

    /// Total width of this type in bits. The sentinel has width 0.
    pub fn size_bits(&self) -> u64 {
        match self {
            Llt::None => 0,
            Llt::Scalar { bits } => u64::from(*bits),
            Llt::Vector { lanes, bits } => u64::from(*lanes) * u64::from(*bits),
            Llt::Pointer { bits } => u64::from(*bits),
        }
    }
}

impl fmt::Display for Llt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Llt::None => write!(f, "_"),
            Llt::Scalar { bits } => write!(f, "s{}", bits),
            Llt::Vector { lanes, bits } => write!(f, "v{}s{}", lanes, bits),
            Llt::Pointer { bits } => write!(f, "p{}", bits),
        }
    }
}
