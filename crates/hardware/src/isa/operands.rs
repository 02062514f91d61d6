//! Operand field extraction shared by the executor and the disassembler.
//!
//! These helpers turn raw encoding fields into values: rotated immediates, branch
//! offsets and shift specifications. They never touch architectural state.

use super::instruction::{InstructionBits, sign_extend};

/// Barrel shifter operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftType {
    /// Logical shift left.
    Lsl,
    /// Logical shift right.
    Lsr,
    /// Arithmetic shift right.
    Asr,
    /// Rotate right.
    Ror,
    /// Rotate right by one through carry.
    Rrx,
}

impl ShiftType {
    /// Decodes the 2-bit shift field of a register operand.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            0b00 => Self::Lsl,
            0b01 => Self::Lsr,
            0b10 => Self::Asr,
            _ => Self::Ror,
        }
    }

    /// Lower-case assembler name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lsl => "lsl",
            Self::Lsr => "lsr",
            Self::Asr => "asr",
            Self::Ror => "ror",
            Self::Rrx => "rrx",
        }
    }
}

/// Decodes an immediate shift (`shift_imm` in bits 11:7, `shift` in bits 6:5).
///
/// LSR #0 and ASR #0 encode a shift by 32; ROR #0 encodes RRX.
///
/// # Returns
///
/// The shift type and the effective amount (0-32).
pub const fn immediate_shift(word: u32) -> (ShiftType, u32) {
    let amount = (word >> 7) & 0x1F;
    match ShiftType::from_bits(word >> 5) {
        ShiftType::Lsr if amount == 0 => (ShiftType::Lsr, 32),
        ShiftType::Asr if amount == 0 => (ShiftType::Asr, 32),
        ShiftType::Ror if amount == 0 => (ShiftType::Rrx, 1),
        kind => (kind, amount),
    }
}

/// Addressing mode 1 immediate: `imm8` rotated right by `2 * rotate_imm`.
///
/// # Returns
///
/// The rotated value and the rotate amount in bits (0 means "carry unchanged").
pub const fn rotated_immediate(word: u32) -> (u32, u32) {
    let rotate = ((word >> 8) & 0xF) * 2;
    ((word & 0xFF).rotate_right(rotate), rotate)
}

/// Addressing mode 3 split immediate (`immedH` in bits 11:8, `immedL` in bits 3:0).
pub const fn split_immediate(word: u32) -> u32 {
    ((word >> 4) & 0xF0) | (word & 0xF)
}

/// BKPT comment field (bits 19:8 and 3:0 in ARM, 7:0 in Thumb).
pub const fn arm_bkpt_immediate(word: u32) -> u32 {
    ((word >> 4) & 0xFFF0) | (word & 0xF)
}

/// Byte offset of an ARM B/BL relative to the PC read value.
pub fn arm_branch_offset(word: u32) -> i32 {
    sign_extend(word.bits(23, 0), 24) << 2
}

/// Byte offset of an ARM BLX (immediate); bit 24 (H) supplies the halfword bit.
pub fn arm_blx_offset(word: u32) -> i32 {
    arm_branch_offset(word) | ((word.bits(24, 24) as i32) << 1)
}

/// Byte offset of a Thumb conditional branch relative to the PC read value.
pub fn thumb_cond_branch_offset(word: u32) -> i32 {
    sign_extend(word.bits(7, 0), 8) << 1
}

/// Byte offset of a Thumb unconditional branch relative to the PC read value.
pub fn thumb_branch_offset(word: u32) -> i32 {
    sign_extend(word.bits(10, 0), 11) << 1
}

/// Byte offset of a Thumb-2 conditional branch (encoding T3).
pub fn thumb2_cond_branch_offset(word: u32) -> i32 {
    let first = word >> 16;
    let second = word & 0xFFFF;
    let s = first.bits(10, 10);
    let j1 = second.bits(13, 13);
    let j2 = second.bits(11, 11);
    let imm = (s << 20) | (j2 << 19) | (j1 << 18) | (first.bits(5, 0) << 12) | (second.bits(10, 0) << 1);
    sign_extend(imm, 21)
}

/// Byte offset of a Thumb-2 B (T4), BL or BLX; `I1 = !(J1 ^ S)`, `I2 = !(J2 ^ S)`.
pub fn thumb2_branch_offset(word: u32) -> i32 {
    let first = word >> 16;
    let second = word & 0xFFFF;
    let s = first.bits(10, 10);
    let i1 = (!(second.bits(13, 13) ^ s)) & 1;
    let i2 = (!(second.bits(11, 11) ^ s)) & 1;
    let imm = (s << 24) | (i1 << 23) | (i2 << 22) | (first.bits(9, 0) << 12) | (second.bits(10, 0) << 1);
    sign_extend(imm, 25)
}

/// Number of registers in a block-transfer register list.
pub const fn reg_count(list: u32) -> u32 {
    (list & 0xFFFF).count_ones()
}
