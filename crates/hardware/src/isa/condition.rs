//! Condition codes.
//!
//! Every ARM instruction, the Thumb conditional branch and the Thumb-2 T3 branch carry a
//! 4-bit condition evaluated against the CPSR flags before execution.

use crate::core::arch::psr::Flags;

/// The sixteen condition codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Equal (Z).
    Eq = 0x0,
    /// Not equal (!Z).
    Ne = 0x1,
    /// Carry set / unsigned higher or same (C).
    Cs = 0x2,
    /// Carry clear / unsigned lower (!C).
    Cc = 0x3,
    /// Minus (N).
    Mi = 0x4,
    /// Plus or zero (!N).
    Pl = 0x5,
    /// Overflow (V).
    Vs = 0x6,
    /// No overflow (!V).
    Vc = 0x7,
    /// Unsigned higher (C && !Z).
    Hi = 0x8,
    /// Unsigned lower or same (!C || Z).
    Ls = 0x9,
    /// Signed greater or equal (N == V).
    Ge = 0xA,
    /// Signed less than (N != V).
    Lt = 0xB,
    /// Signed greater than (!Z && N == V).
    Gt = 0xC,
    /// Signed less or equal (Z || N != V).
    Le = 0xD,
    /// Always.
    Al = 0xE,
    /// Never (ARMv5 reuses this encoding for the unconditional instruction space).
    Nv = 0xF,
}

impl Condition {
    /// All conditions in encoding order.
    pub const ALL: [Self; 16] = [
        Self::Eq,
        Self::Ne,
        Self::Cs,
        Self::Cc,
        Self::Mi,
        Self::Pl,
        Self::Vs,
        Self::Vc,
        Self::Hi,
        Self::Ls,
        Self::Ge,
        Self::Lt,
        Self::Gt,
        Self::Le,
        Self::Al,
        Self::Nv,
    ];

    /// Decodes a 4-bit condition field.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self::ALL[(bits & 0xF) as usize]
    }

    /// Evaluates the condition against a flag set.
    pub const fn passes(self, flags: Flags) -> bool {
        let Flags { n, z, c, v } = flags;
        match self {
            Self::Eq => z,
            Self::Ne => !z,
            Self::Cs => c,
            Self::Cc => !c,
            Self::Mi => n,
            Self::Pl => !n,
            Self::Vs => v,
            Self::Vc => !v,
            Self::Hi => c && !z,
            Self::Ls => !c || z,
            Self::Ge => n == v,
            Self::Lt => n != v,
            Self::Gt => !z && n == v,
            Self::Le => z || n != v,
            Self::Al => true,
            Self::Nv => false,
        }
    }

    /// Assembler suffix (empty for AL).
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Cs => "cs",
            Self::Cc => "cc",
            Self::Mi => "mi",
            Self::Pl => "pl",
            Self::Vs => "vs",
            Self::Vc => "vc",
            Self::Hi => "hi",
            Self::Ls => "ls",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Gt => "gt",
            Self::Le => "le",
            Self::Al | Self::Nv => "",
        }
    }
}
