//! Thumb-2 (32-bit) instruction decoder.
//!
//! Only the top level of the 32-bit space is walked: `op1` (first halfword bits 12:11),
//! `op2` (first halfword bits 10:4) and `op` (second halfword bit 15). Within the
//! "branches and miscellaneous control" group the B, BL, BLX, SMC and permanently
//! undefined forms are decoded; everything else is unsupported.

use crate::common::error::{CoreError, CoreResult};
use crate::isa::instruction::InstructionBits;
use crate::isa::op::Thumb2Op;

fn unsupported(word: u32, what: &'static str) -> CoreError {
    CoreError::Unsupported { word, what }
}

/// Decodes a 32-bit Thumb-2 instruction (first halfword in bits 31:16).
///
/// # Errors
///
/// Returns `CoreError::Unsupported` for every form outside the branch group.
pub fn decode(word: u32) -> CoreResult<Thumb2Op> {
    let first = word >> 16;
    let second = word & 0xFFFF;
    let op1 = first.bits(12, 11);
    let op2 = first.bits(10, 4);
    let op = second.bit(15);

    match op1 {
        0b01 => Err(unsupported(word, "thumb-2 load/store multiple, dual or data-processing")),
        0b10 if !op => Err(unsupported(word, "thumb-2 data-processing immediate")),
        0b10 => decode_branch_control(word, op2, second.bits(14, 12)),
        0b11 => Err(unsupported(word, "thumb-2 load/store, data-processing or coprocessor")),
        // op1 == 00 is a 16-bit encoding and never reaches this decoder.
        _ => Err(unsupported(word, "thumb-2 encoding with op1 == 0")),
    }
}

/// Branches and miscellaneous control: `11110 op2 .... | 1 op1' ...`.
fn decode_branch_control(word: u32, op2: u32, op1: u32) -> CoreResult<Thumb2Op> {
    match op1 {
        0b000 | 0b010 => {
            // Bit 13 of the second halfword is J1 and does not select the form.
            if op2 & 0b011_1000 != 0b011_1000 {
                return Ok(Thumb2Op::BCond);
            }
            match (op1, op2) {
                (0b000, 0b111_1111) => Ok(Thumb2Op::Smc),
                (0b010, 0b111_1111) => Ok(Thumb2Op::Udf),
                (_, 0b011_1000 | 0b011_1001) => Err(unsupported(word, "thumb-2 msr")),
                (_, 0b011_1010) => Err(unsupported(word, "thumb-2 hint or cps")),
                (_, 0b011_1011) => Err(unsupported(word, "thumb-2 miscellaneous control")),
                (_, 0b011_1100) => Err(unsupported(word, "thumb-2 bxj")),
                (_, 0b011_1101) => Err(unsupported(word, "thumb-2 subs pc, lr")),
                (_, 0b011_1110 | 0b011_1111) => Err(unsupported(word, "thumb-2 mrs")),
                _ => Err(unsupported(word, "thumb-2 branch/control")),
            }
        }
        0b001 | 0b011 => Ok(Thumb2Op::B),
        0b100 | 0b110 => Ok(Thumb2Op::BlxImm),
        _ => Ok(Thumb2Op::Bl),
    }
}
