//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the data-processing datapath of the ARM core: the barrel
//! shifter feeding the second operand, the sixteen data-processing opcodes and the
//! multiplier.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: AddWithCarry and its subtract forms
//! - [`logic`]:      AND, EOR, ORR, MOV, BIC, MVN
//! - [`multiply`]:   MUL/MLA and the 64-bit long multiplies
//! - [`shifts`]:     LSL, LSR, ASR, ROR, RRX with carry-out

/// Integer add and subtract with carry/overflow.
pub mod arithmetic;

/// Bitwise logical operations.
pub mod logic;

/// 32-bit and 64-bit multiplies.
pub mod multiply;

/// Barrel shifter.
pub mod shifts;

use crate::core::arch::psr::Flags;
use crate::isa::op::AluOp;

/// Output of the barrel shifter: the second operand and its carry-out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShifterOutput {
    /// Shifter operand value.
    pub value: u32,
    /// Shifter carry-out.
    pub carry: bool,
}

/// Output of a data-processing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AluOutput {
    /// Result value (meaningless for TST/TEQ/CMP/CMN).
    pub value: u32,
    /// Condition flags the operation would set.
    pub flags: Flags,
}

/// Arithmetic Logic Unit for data-processing instructions.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes a data-processing opcode.
    ///
    /// # Arguments
    ///
    /// * `op` - The opcode.
    /// * `rn` - First operand.
    /// * `operand` - Shifter operand with its carry-out.
    /// * `flags` - Current condition flags (C feeds ADC/SBC/RSC, V is kept by logical ops).
    ///
    /// # Returns
    ///
    /// The result and the flags an `S`-suffixed form would write.
    ///
    /// # Examples
    ///
    /// ```
    /// use armsim_core::core::arch::psr::Flags;
    /// use armsim_core::core::units::alu::{Alu, ShifterOutput};
    /// use armsim_core::isa::op::AluOp;
    ///
    /// let out = Alu::execute(
    ///     AluOp::Add,
    ///     0x7FFF_FFFF,
    ///     ShifterOutput { value: 1, carry: false },
    ///     Flags::default(),
    /// );
    /// assert_eq!(out.value, 0x8000_0000);
    /// assert!(out.flags.n && out.flags.v && !out.flags.c && !out.flags.z);
    /// ```
    pub const fn execute(op: AluOp, rn: u32, operand: ShifterOutput, flags: Flags) -> AluOutput {
        let b = operand.value;
        let arith = match op {
            AluOp::Sub | AluOp::Cmp => Some(arithmetic::sub(rn, b)),
            AluOp::Rsb => Some(arithmetic::sub(b, rn)),
            AluOp::Add | AluOp::Cmn => Some(arithmetic::add(rn, b)),
            AluOp::Adc => Some(arithmetic::add_with_carry(rn, b, flags.c)),
            AluOp::Sbc => Some(arithmetic::sub_with_carry(rn, b, flags.c)),
            AluOp::Rsc => Some(arithmetic::sub_with_carry(b, rn, flags.c)),
            _ => None,
        };
        if let Some(result) = arith {
            return AluOutput {
                value: result.value,
                flags: Flags {
                    n: result.value >> 31 != 0,
                    z: result.value == 0,
                    c: result.carry,
                    v: result.overflow,
                },
            };
        }
        let value = match logic::execute(op, rn, b) {
            Some(value) => value,
            None => 0,
        };
        AluOutput {
            value,
            flags: Flags {
                n: value >> 31 != 0,
                z: value == 0,
                c: operand.carry,
                v: flags.v,
            },
        }
    }
}

/// Flags after a flag-setting multiply: N and Z from the result, C and V unchanged.
pub const fn multiply_flags(negative: bool, zero: bool, flags: Flags) -> Flags {
    Flags {
        n: negative,
        z: zero,
        c: flags.c,
        v: flags.v,
    }
}
