//! ARM instruction decoder.
//!
//! The tree follows the ARMv5TE encoding table: bits 27:25 split the space into
//! data-processing, load/store, block transfer/branch and coprocessor/SWI groups,
//! then bits 24:20 and bits 7:4 narrow each group down to a single form. The
//! miscellaneous block (`cond 00010 xx0 ...`) and the multiply/extra load-store block
//! (`bit7 == 1 && bit4 == 1`) carve out of the data-processing space first.

use crate::common::error::{CoreError, CoreResult};
use crate::isa::instruction::InstructionBits;
use crate::isa::op::{AluOp, ArmOp, ShifterForm};

/// Condition field value selecting the unconditional instruction space.
const COND_UNCONDITIONAL: u32 = 0xF;

/// Decodes a 32-bit ARM instruction.
///
/// # Errors
///
/// Returns `CoreError::Unsupported` for the coprocessor "2" forms in the unconditional
/// space.
pub fn decode(word: u32) -> CoreResult<ArmOp> {
    if word.cond() == COND_UNCONDITIONAL {
        return decode_unconditional(word);
    }

    let op = match word.bits(27, 26) {
        0b00 => decode_data_processing(word),
        0b01 => decode_load_store(word),
        0b10 => {
            if word.bit(25) {
                if word.bit(24) { ArmOp::Bl } else { ArmOp::B }
            } else {
                decode_block_transfer(word)
            }
        }
        _ => decode_coprocessor(word),
    };
    Ok(op)
}

fn decode_unconditional(word: u32) -> CoreResult<ArmOp> {
    // 1111 101H imm24
    if word.bits(27, 25) == 0b101 {
        return Ok(ArmOp::BlxImm);
    }
    // 1111 01x1 x101 nnnn 1111 ...
    if word.bits(27, 26) == 0b01
        && word.bit(24)
        && word.bit(22)
        && !word.bit(21)
        && word.bit(20)
        && word.bits(15, 12) == 0xF
    {
        return Ok(ArmOp::Pld);
    }
    if word.bits(27, 26) == 0b11 && word.bits(25, 24) != 0b11 {
        return Err(CoreError::Unsupported {
            word,
            what: "unconditional coprocessor instruction",
        });
    }
    Ok(ArmOp::Undefined)
}

fn decode_data_processing(word: u32) -> ArmOp {
    let opcode = word.alu_opcode();
    let s = word.bit(20);
    // Opcodes 10xx without S are the test/compare slots reused for status and
    // miscellaneous instructions.
    let misc_slot = opcode & 0b1100 == 0b1000 && !s;

    if word.bit(25) {
        if misc_slot {
            return if word.bit(21) {
                ArmOp::MsrImm
            } else {
                // MOVW/MOVT arrive in ARMv6T2.
                ArmOp::Undefined
            };
        }
        return ArmOp::from_alu(AluOp::from_bits(opcode), ShifterForm::Immediate);
    }

    let bit4 = word.bit(4);
    let bit7 = word.bit(7);

    if bit4 && bit7 {
        return decode_multiply_extra(word);
    }
    if misc_slot {
        return decode_miscellaneous(word);
    }
    let form = if bit4 {
        ShifterForm::RegisterShift
    } else {
        ShifterForm::ImmediateShift
    };
    ArmOp::from_alu(AluOp::from_bits(opcode), form)
}

/// `cond 00010 op 0 .... .... .... op2 ....` with bit 4 clear or bit 7 clear.
fn decode_miscellaneous(word: u32) -> ArmOp {
    let op = word.bits(22, 21);
    if word.bit(7) {
        // Signed 16-bit multiplies: bits 7:4 = 1yx0.
        return match op {
            0b00 => ArmOp::Smlaxy,
            0b01 if word.bit(5) => ArmOp::Smulwy,
            0b01 => ArmOp::Smlawy,
            0b10 => ArmOp::Smlalxy,
            _ => ArmOp::Smulxy,
        };
    }
    match (word.bits(6, 4), op) {
        (0b000, 0b00 | 0b10) => ArmOp::Mrs,
        (0b000, _) => ArmOp::MsrReg,
        (0b001, 0b01) => ArmOp::Bx,
        (0b001, 0b11) => ArmOp::Clz,
        (0b011, 0b01) => ArmOp::BlxReg,
        (0b101, 0b00) => ArmOp::Qadd,
        (0b101, 0b01) => ArmOp::Qsub,
        (0b101, 0b10) => ArmOp::Qdadd,
        (0b101, _) => ArmOp::Qdsub,
        (0b111, 0b01) => ArmOp::Bkpt,
        _ => ArmOp::Undefined,
    }
}

/// `cond 000x xxxx .... .... .... 1xx1 ....`: multiplies, swaps and halfword/doubleword
/// transfers.
fn decode_multiply_extra(word: u32) -> ArmOp {
    let load = word.bit(20);
    let imm = word.bit(22);
    match word.bits(6, 5) {
        0b00 => {
            if word.bit(24) {
                match word.bits(23, 20) {
                    0b0000 => ArmOp::Swp,
                    0b0100 => ArmOp::Swpb,
                    _ => ArmOp::Undefined,
                }
            } else {
                match word.bits(23, 21) {
                    0b000 => ArmOp::Mul,
                    0b001 => ArmOp::Mla,
                    0b100 => ArmOp::Umull,
                    0b101 => ArmOp::Umlal,
                    0b110 => ArmOp::Smull,
                    0b111 => ArmOp::Smlal,
                    _ => ArmOp::Undefined,
                }
            }
        }
        0b01 => match (load, imm) {
            (true, true) => ArmOp::LdrhImm,
            (true, false) => ArmOp::LdrhReg,
            (false, true) => ArmOp::StrhImm,
            (false, false) => ArmOp::StrhReg,
        },
        0b10 => match (load, imm) {
            (true, true) => ArmOp::LdrsbImm,
            (true, false) => ArmOp::LdrsbReg,
            (false, true) => ArmOp::LdrdImm,
            (false, false) => ArmOp::LdrdReg,
        },
        _ => match (load, imm) {
            (true, true) => ArmOp::LdrshImm,
            (true, false) => ArmOp::LdrshReg,
            (false, true) => ArmOp::StrdImm,
            (false, false) => ArmOp::StrdReg,
        },
    }
}

fn decode_load_store(word: u32) -> ArmOp {
    let reg = word.bit(25);
    if reg && word.bit(4) {
        // Media instructions (ARMv6) occupy this slot.
        return ArmOp::Undefined;
    }
    let pre = word.bit(24);
    let byte = word.bit(22);
    let writeback = word.bit(21);
    let load = word.bit(20);

    if !pre && writeback {
        return match (load, byte) {
            (true, false) => ArmOp::Ldrt,
            (true, true) => ArmOp::Ldrbt,
            (false, false) => ArmOp::Strt,
            (false, true) => ArmOp::Strbt,
        };
    }
    match (load, byte, reg) {
        (true, false, false) => ArmOp::LdrImm,
        (true, false, true) => ArmOp::LdrReg,
        (true, true, false) => ArmOp::LdrbImm,
        (true, true, true) => ArmOp::LdrbReg,
        (false, false, false) => ArmOp::StrImm,
        (false, false, true) => ArmOp::StrReg,
        (false, true, false) => ArmOp::StrbImm,
        (false, true, true) => ArmOp::StrbReg,
    }
}

fn decode_block_transfer(word: u32) -> ArmOp {
    let user = word.bit(22);
    if word.bit(20) {
        match (user, word.bit(15)) {
            (false, _) => ArmOp::Ldm,
            (true, false) => ArmOp::LdmUser,
            (true, true) => ArmOp::LdmException,
        }
    } else if user {
        ArmOp::StmUser
    } else {
        ArmOp::Stm
    }
}

fn decode_coprocessor(word: u32) -> ArmOp {
    match word.bits(25, 24) {
        0b11 => ArmOp::Swi,
        0b10 => {
            if !word.bit(4) {
                ArmOp::Cdp
            } else if word.bit(20) {
                ArmOp::Mrc
            } else {
                ArmOp::Mcr
            }
        }
        _ => {
            if word.bits(24, 21) == 0b0010 {
                if word.bit(20) { ArmOp::Mrrc } else { ArmOp::Mcrr }
            } else if word.bits(24, 21) == 0b0000 {
                // P=0, U=0, W=0 is unindexed-without-offset: undefined.
                ArmOp::Undefined
            } else if word.bit(20) {
                ArmOp::Ldc
            } else {
                ArmOp::Stc
            }
        }
    }
}
