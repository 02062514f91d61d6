//! Thumb (16-bit) instruction decoder.
//!
//! Bits 15:13 select one of eight groups:
//! 1. **000:** Shift by immediate, add/subtract register or 3-bit immediate.
//! 2. **001:** Move/compare/add/subtract 8-bit immediate.
//! 3. **010:** Register data-processing, high-register ops and BX/BLX, literal load,
//!    register-offset load/store.
//! 4. **011:** Word/byte load/store with 5-bit immediate offset.
//! 5. **100:** Halfword load/store with immediate offset, SP-relative load/store.
//! 6. **101:** PC/SP address generation and the miscellaneous block (SP adjust,
//!    PUSH/POP, BKPT).
//! 7. **110:** Load/store multiple, conditional branch, SWI.
//! 8. **111:** Unconditional branch (the remaining prefixes are 32-bit Thumb-2 words).

use crate::isa::instruction::InstructionBits;
use crate::isa::op::ThumbOp;

/// Register data-processing opcodes (bits 9:6 of `010000 op Rm Rd`).
const DATA_PROCESSING: [ThumbOp; 16] = [
    ThumbOp::And,
    ThumbOp::Eor,
    ThumbOp::LslReg,
    ThumbOp::LsrReg,
    ThumbOp::AsrReg,
    ThumbOp::Adc,
    ThumbOp::Sbc,
    ThumbOp::RorReg,
    ThumbOp::Tst,
    ThumbOp::Neg,
    ThumbOp::CmpReg,
    ThumbOp::Cmn,
    ThumbOp::Orr,
    ThumbOp::Mul,
    ThumbOp::Bic,
    ThumbOp::Mvn,
];

/// Register-offset load/store opcodes (bits 11:9 of `0101 op Rm Rn Rd`).
const REGISTER_OFFSET: [ThumbOp; 8] = [
    ThumbOp::StrReg,
    ThumbOp::StrhReg,
    ThumbOp::StrbReg,
    ThumbOp::LdrsbReg,
    ThumbOp::LdrReg,
    ThumbOp::LdrhReg,
    ThumbOp::LdrbReg,
    ThumbOp::LdrshReg,
];

/// Decodes a 16-bit Thumb instruction.
pub fn decode(halfword: u16) -> ThumbOp {
    let word = u32::from(halfword);
    match word.bits(15, 13) {
        0b000 => match word.bits(12, 11) {
            0b00 => ThumbOp::LslImm,
            0b01 => ThumbOp::LsrImm,
            0b10 => ThumbOp::AsrImm,
            _ => match word.bits(10, 9) {
                0b00 => ThumbOp::AddReg,
                0b01 => ThumbOp::SubReg,
                0b10 => ThumbOp::AddImm3,
                _ => ThumbOp::SubImm3,
            },
        },
        0b001 => match word.bits(12, 11) {
            0b00 => ThumbOp::MovImm,
            0b01 => ThumbOp::CmpImm,
            0b10 => ThumbOp::AddImm8,
            _ => ThumbOp::SubImm8,
        },
        0b010 => decode_group_010(word),
        0b011 => match word.bits(12, 11) {
            0b00 => ThumbOp::StrImm,
            0b01 => ThumbOp::LdrImm,
            0b10 => ThumbOp::StrbImm,
            _ => ThumbOp::LdrbImm,
        },
        0b100 => match (word.bit(12), word.bit(11)) {
            (false, false) => ThumbOp::StrhImm,
            (false, true) => ThumbOp::LdrhImm,
            (true, false) => ThumbOp::StrSp,
            (true, true) => ThumbOp::LdrSp,
        },
        0b101 => {
            if word.bit(12) {
                decode_miscellaneous(word)
            } else if word.bit(11) {
                ThumbOp::AddSpReg
            } else {
                ThumbOp::AddPc
            }
        }
        0b110 => {
            if !word.bit(12) {
                if word.bit(11) { ThumbOp::Ldmia } else { ThumbOp::Stmia }
            } else {
                match word.bits(11, 8) {
                    0b1110 => ThumbOp::Undefined,
                    0b1111 => ThumbOp::Swi,
                    _ => ThumbOp::BCond,
                }
            }
        }
        _ => {
            if word.bits(12, 11) == 0b00 {
                ThumbOp::B
            } else {
                // 32-bit prefixes never reach the 16-bit decoder.
                ThumbOp::Undefined
            }
        }
    }
}

fn decode_group_010(word: u32) -> ThumbOp {
    if word.bit(12) {
        return REGISTER_OFFSET[word.bits(11, 9) as usize];
    }
    if word.bit(11) {
        return ThumbOp::LdrLiteral;
    }
    if !word.bit(10) {
        return DATA_PROCESSING[word.bits(9, 6) as usize];
    }
    match word.bits(9, 8) {
        0b00 => ThumbOp::AddHi,
        0b01 => ThumbOp::CmpHi,
        0b10 => ThumbOp::MovHi,
        _ => {
            if word.bit(7) {
                ThumbOp::BlxReg
            } else {
                ThumbOp::Bx
            }
        }
    }
}

/// `1011 xxxx xxxx xxxx`.
fn decode_miscellaneous(word: u32) -> ThumbOp {
    match word.bits(11, 8) {
        0b0000 => {
            if word.bit(7) {
                ThumbOp::SubSpImm
            } else {
                ThumbOp::AddSpImm
            }
        }
        0b0100 | 0b0101 => ThumbOp::Push,
        0b1100 | 0b1101 => ThumbOp::Pop,
        0b1110 => ThumbOp::Bkpt,
        // CBZ/CBNZ, extends, REV, CPS and IT belong to later architecture versions.
        _ => ThumbOp::Undefined,
    }
}
