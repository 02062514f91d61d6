//! Instruction words and field extraction.
//!
//! Provides the fetched instruction representation and bit-field accessors for the ARM
//! encoding. Thumb and Thumb-2 forms use the generic [`InstructionBits::bits`] accessor.

use crate::common::constants::{ARM_INSTRUCTION_SIZE, THUMB_INSTRUCTION_SIZE, THUMB2_INSTRUCTION_SIZE};

/// A fetched instruction: the raw value plus its encoded length.
///
/// 32-bit Thumb-2 instructions hold the first halfword in bits 31:16 and the second in
/// bits 15:0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstructionWord {
    /// Raw encoding.
    pub word: u32,
    /// Encoded length in bytes (2 or 4).
    pub length: u32,
}

impl InstructionWord {
    /// A 32-bit ARM instruction.
    pub const fn arm(word: u32) -> Self {
        Self {
            word,
            length: ARM_INSTRUCTION_SIZE,
        }
    }

    /// A 16-bit Thumb instruction.
    pub const fn thumb(halfword: u16) -> Self {
        Self {
            word: halfword as u32,
            length: THUMB_INSTRUCTION_SIZE,
        }
    }

    /// A 32-bit Thumb-2 instruction assembled from its two halfwords.
    pub const fn thumb2(first: u16, second: u16) -> Self {
        Self {
            word: ((first as u32) << 16) | second as u32,
            length: THUMB2_INSTRUCTION_SIZE,
        }
    }

    /// Returns `true` if a Thumb halfword is the first half of a 32-bit instruction.
    ///
    /// Bits 15:11 of `0b11101`, `0b11110` or `0b11111` introduce a 32-bit encoding.
    pub const fn is_thumb2_prefix(halfword: u16) -> bool {
        matches!(halfword >> 11, 0b11101..=0b11111)
    }
}

/// Trait for extracting ARM instruction fields.
pub trait InstructionBits {
    /// Extracts bits `hi..=lo` as an unsigned value.
    fn bits(&self, hi: u32, lo: u32) -> u32;

    /// Tests a single bit.
    fn bit(&self, n: u32) -> bool;

    /// Condition field (bits 31:28).
    fn cond(&self) -> u32;

    /// First operand / base register (bits 19:16).
    fn rn(&self) -> usize;

    /// Destination register (bits 15:12).
    fn rd(&self) -> usize;

    /// Shift / multiply operand register (bits 11:8).
    fn rs(&self) -> usize;

    /// Second operand register (bits 3:0).
    fn rm(&self) -> usize;

    /// Data-processing opcode (bits 24:21).
    fn alu_opcode(&self) -> u32;

    /// Register list of a block transfer (bits 15:0).
    fn reg_list(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn bits(&self, hi: u32, lo: u32) -> u32 {
        let width = hi - lo + 1;
        if width >= 32 {
            *self >> lo
        } else {
            (*self >> lo) & ((1 << width) - 1)
        }
    }

    #[inline(always)]
    fn bit(&self, n: u32) -> bool {
        (*self >> n) & 1 != 0
    }

    #[inline(always)]
    fn cond(&self) -> u32 {
        *self >> 28
    }

    #[inline(always)]
    fn rn(&self) -> usize {
        ((*self >> 16) & 0xF) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((*self >> 12) & 0xF) as usize
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((*self >> 8) & 0xF) as usize
    }

    #[inline(always)]
    fn rm(&self) -> usize {
        (*self & 0xF) as usize
    }

    #[inline(always)]
    fn alu_opcode(&self) -> u32 {
        (*self >> 21) & 0xF
    }

    #[inline(always)]
    fn reg_list(&self) -> u32 {
        *self & 0xFFFF
    }
}

/// Sign-extends the low `bits` bits of `value`.
///
/// # Arguments
///
/// * `value` - The value to sign-extend.
/// * `bits` - Width of the signed field (1-32).
#[inline(always)]
pub const fn sign_extend(value: u32, bits: u32) -> i32 {
    let shift = 32 - bits;
    ((value << shift) as i32) >> shift
}
