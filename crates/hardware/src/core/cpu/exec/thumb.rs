//! 16-bit Thumb instructions.
//!
//! Low-register data processing always sets the flags; the high-register forms (except
//! CMP) never do. Word loads rotate unaligned data like their ARM counterparts and POP
//! or a load into r15 selects the instruction set from bit 0 of the loaded value.

use crate::common::{AccessSize, AccessType, CoreResult, REG_LR, REG_PC, REG_SP};
use crate::core::arch::ExceptionKind;
use crate::core::cpu::Cpu;
use crate::core::units::alu::multiply::multiply;
use crate::core::units::alu::shifts::barrel_shift;
use crate::core::units::alu::{Alu, ShifterOutput, multiply_flags};
use crate::isa::instruction::{InstructionBits, sign_extend};
use crate::isa::op::{AluOp, ThumbOp};
use crate::isa::operands::{self, ShiftType};
use crate::stats::InstructionClass;

use super::block_transfer::block_range;

/// Low register in bits `lo + 2 ..= lo`.
fn low_reg(word: u32, lo: u32) -> usize {
    word.bits(lo + 2, lo) as usize
}

/// Width and signedness of a Thumb load or store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Width {
    Word,
    Half,
    Byte,
    SignedHalf,
    SignedByte,
}

impl Cpu {
    /// Executes one 16-bit Thumb instruction.
    ///
    /// # Returns
    ///
    /// The statistics class of the instruction.
    pub(crate) fn execute_thumb(&mut self, op: ThumbOp, word: u32) -> CoreResult<InstructionClass> {
        use ThumbOp::*;

        let class = match op {
            LslImm | LsrImm | AsrImm => {
                let kind = match op {
                    LslImm => ShiftType::Lsl,
                    LsrImm => ShiftType::Lsr,
                    _ => ShiftType::Asr,
                };
                let mut amount = word.bits(10, 6);
                if amount == 0 && kind != ShiftType::Lsl {
                    amount = 32;
                }
                self.thumb_shift(low_reg(word, 0), self.regs.read(low_reg(word, 3)), kind, amount);
                InstructionClass::Alu
            }
            AddReg | SubReg | AddImm3 | SubImm3 => {
                let operand = match op {
                    AddReg | SubReg => self.regs.read(low_reg(word, 6)),
                    _ => word.bits(8, 6),
                };
                let alu = if matches!(op, AddReg | AddImm3) { AluOp::Add } else { AluOp::Sub };
                let rn = self.regs.read(low_reg(word, 3));
                self.thumb_alu(alu, low_reg(word, 0), rn, operand);
                InstructionClass::Alu
            }
            MovImm | CmpImm | AddImm8 | SubImm8 => {
                let rd = low_reg(word, 8);
                let alu = match op {
                    MovImm => AluOp::Mov,
                    CmpImm => AluOp::Cmp,
                    AddImm8 => AluOp::Add,
                    _ => AluOp::Sub,
                };
                self.thumb_alu(alu, rd, self.regs.read(rd), word.bits(7, 0));
                InstructionClass::Alu
            }
            LslReg | LsrReg | AsrReg | RorReg => {
                let kind = match op {
                    LslReg => ShiftType::Lsl,
                    LsrReg => ShiftType::Lsr,
                    AsrReg => ShiftType::Asr,
                    _ => ShiftType::Ror,
                };
                let rd = low_reg(word, 0);
                let amount = self.regs.read(low_reg(word, 3)) & 0xFF;
                self.thumb_shift(rd, self.regs.read(rd), kind, amount);
                InstructionClass::Alu
            }
            And | Eor | Adc | Sbc | Tst | CmpReg | Cmn | Orr | Bic | Mvn => {
                let alu = match op {
                    And => AluOp::And,
                    Eor => AluOp::Eor,
                    Adc => AluOp::Adc,
                    Sbc => AluOp::Sbc,
                    Tst => AluOp::Tst,
                    CmpReg => AluOp::Cmp,
                    Cmn => AluOp::Cmn,
                    Orr => AluOp::Orr,
                    Bic => AluOp::Bic,
                    _ => AluOp::Mvn,
                };
                let rd = low_reg(word, 0);
                self.thumb_alu(alu, rd, self.regs.read(rd), self.regs.read(low_reg(word, 3)));
                InstructionClass::Alu
            }
            Neg => {
                let rm = self.regs.read(low_reg(word, 3));
                self.thumb_alu(AluOp::Rsb, low_reg(word, 0), rm, 0);
                InstructionClass::Alu
            }
            Mul => {
                let rd = low_reg(word, 0);
                let result = multiply(self.regs.read(low_reg(word, 3)), self.regs.read(rd), 0);
                self.regs.write(rd, result);
                let flags = multiply_flags(result >> 31 != 0, result == 0, self.regs.cpsr().flags());
                self.regs.set_flags(flags);
                InstructionClass::Multiply
            }
            AddHi | CmpHi | MovHi => {
                let rd = ((word.bits(7, 7) << 3) | word.bits(2, 0)) as usize;
                let rm = self.regs.read(word.bits(6, 3) as usize);
                match op {
                    CmpHi => self.thumb_alu(AluOp::Cmp, rd, self.regs.read(rd), rm),
                    _ => {
                        let value = if op == AddHi {
                            self.regs.read(rd).wrapping_add(rm)
                        } else {
                            rm
                        };
                        if rd == REG_PC {
                            self.branch_to(value);
                        } else {
                            self.regs.write(rd, value);
                        }
                    }
                }
                InstructionClass::Alu
            }
            Bx | BlxReg => {
                let target = self.regs.read(word.bits(6, 3) as usize);
                if op == BlxReg {
                    let ret = self.regs.pc().wrapping_add(2) | 1;
                    self.regs.write(REG_LR, ret);
                }
                self.branch_exchange(target);
                InstructionClass::Branch
            }
            LdrLiteral => {
                let address = (self.regs.read(REG_PC) & !3).wrapping_add(word.bits(7, 0) << 2);
                self.thumb_load(low_reg(word, 8), address, Width::Word)?;
                InstructionClass::Load
            }
            StrReg | StrhReg | StrbReg | LdrsbReg | LdrReg | LdrhReg | LdrbReg | LdrshReg => {
                let address = self
                    .regs
                    .read(low_reg(word, 3))
                    .wrapping_add(self.regs.read(low_reg(word, 6)));
                let rd = low_reg(word, 0);
                match op {
                    StrReg => self.thumb_store(rd, address, AccessSize::Word)?,
                    StrhReg => self.thumb_store(rd, address, AccessSize::Half)?,
                    StrbReg => self.thumb_store(rd, address, AccessSize::Byte)?,
                    LdrsbReg => self.thumb_load(rd, address, Width::SignedByte)?,
                    LdrReg => self.thumb_load(rd, address, Width::Word)?,
                    LdrhReg => self.thumb_load(rd, address, Width::Half)?,
                    LdrbReg => self.thumb_load(rd, address, Width::Byte)?,
                    _ => self.thumb_load(rd, address, Width::SignedHalf)?,
                }
                if matches!(op, StrReg | StrhReg | StrbReg) {
                    InstructionClass::Store
                } else {
                    InstructionClass::Load
                }
            }
            StrImm | LdrImm | StrbImm | LdrbImm | StrhImm | LdrhImm => {
                let imm = word.bits(10, 6);
                let base = self.regs.read(low_reg(word, 3));
                let rd = low_reg(word, 0);
                match op {
                    StrImm => self.thumb_store(rd, base.wrapping_add(imm << 2), AccessSize::Word)?,
                    LdrImm => self.thumb_load(rd, base.wrapping_add(imm << 2), Width::Word)?,
                    StrbImm => self.thumb_store(rd, base.wrapping_add(imm), AccessSize::Byte)?,
                    LdrbImm => self.thumb_load(rd, base.wrapping_add(imm), Width::Byte)?,
                    StrhImm => self.thumb_store(rd, base.wrapping_add(imm << 1), AccessSize::Half)?,
                    _ => self.thumb_load(rd, base.wrapping_add(imm << 1), Width::Half)?,
                }
                if matches!(op, StrImm | StrbImm | StrhImm) {
                    InstructionClass::Store
                } else {
                    InstructionClass::Load
                }
            }
            StrSp | LdrSp => {
                let address = self.regs.read(REG_SP).wrapping_add(word.bits(7, 0) << 2);
                let rd = low_reg(word, 8);
                if op == StrSp {
                    self.thumb_store(rd, address, AccessSize::Word)?;
                    InstructionClass::Store
                } else {
                    self.thumb_load(rd, address, Width::Word)?;
                    InstructionClass::Load
                }
            }
            AddPc | AddSpReg => {
                let base = if op == AddPc {
                    self.regs.read(REG_PC) & !3
                } else {
                    self.regs.read(REG_SP)
                };
                self.regs
                    .write(low_reg(word, 8), base.wrapping_add(word.bits(7, 0) << 2));
                InstructionClass::Alu
            }
            AddSpImm | SubSpImm => {
                let sp = self.regs.read(REG_SP);
                let offset = word.bits(6, 0) << 2;
                let sp = if op == AddSpImm {
                    sp.wrapping_add(offset)
                } else {
                    sp.wrapping_sub(offset)
                };
                self.regs.write(REG_SP, sp);
                InstructionClass::Alu
            }
            Push => {
                self.thumb_push(word)?;
                InstructionClass::Store
            }
            Pop => {
                self.thumb_pop(word)?;
                InstructionClass::Load
            }
            Stmia | Ldmia => {
                self.thumb_multiple(op, word)?;
                if op == Stmia {
                    InstructionClass::Store
                } else {
                    InstructionClass::Load
                }
            }
            BCond => {
                let target = self
                    .regs
                    .read(REG_PC)
                    .wrapping_add_signed(operands::thumb_cond_branch_offset(word));
                self.branch_to(target);
                InstructionClass::Branch
            }
            B => {
                let target = self
                    .regs
                    .read(REG_PC)
                    .wrapping_add_signed(operands::thumb_branch_offset(word));
                self.branch_to(target);
                InstructionClass::Branch
            }
            Swi => {
                self.raise_exception(
                    ExceptionKind::SoftwareInterrupt,
                    format!("swi {:#x}", word.bits(7, 0)),
                )?;
                InstructionClass::System
            }
            Bkpt => {
                self.raise_exception(
                    ExceptionKind::PrefetchAbort,
                    format!("bkpt {:#x}", word.bits(7, 0)),
                )?;
                InstructionClass::System
            }
            Undefined => {
                self.raise_exception(
                    ExceptionKind::Undefined,
                    format!("undefined thumb instruction {word:#06x}"),
                )?;
                InstructionClass::System
            }
        };
        Ok(class)
    }

    /// Runs a flag-setting ALU operation with the shifter carry equal to C.
    fn thumb_alu(&mut self, op: AluOp, rd: usize, rn: u32, operand: u32) {
        let flags = self.regs.cpsr().flags();
        let out = Alu::execute(
            op,
            rn,
            ShifterOutput {
                value: operand,
                carry: flags.c,
            },
            flags,
        );
        if !op.is_test() {
            self.regs.write(rd, out.value);
        }
        self.regs.set_flags(out.flags);
    }

    /// Shifts `value` into `rd`, setting N, Z and C.
    fn thumb_shift(&mut self, rd: usize, value: u32, kind: ShiftType, amount: u32) {
        let mut flags = self.regs.cpsr().flags();
        let (result, carry) = barrel_shift(value, kind, amount, flags.c);
        self.regs.write(rd, result);
        flags.n = result >> 31 != 0;
        flags.z = result == 0;
        flags.c = carry;
        self.regs.set_flags(flags);
    }

    fn thumb_load(&mut self, rd: usize, address: u32, width: Width) -> CoreResult<()> {
        let privileged = self.is_privileged();
        let loaded = match width {
            Width::Word => self.load_word(address, privileged)?,
            Width::Half | Width::SignedHalf => {
                self.read_memory(address, AccessSize::Half, AccessType::Read, privileged)?
            }
            Width::Byte | Width::SignedByte => {
                self.read_memory(address, AccessSize::Byte, AccessType::Read, privileged)?
            }
        };
        let Some(value) = loaded else {
            tracing::trace!(address = format_args!("{address:#010x}"), "thumb load aborted");
            return Ok(());
        };
        let value = match width {
            Width::SignedHalf => sign_extend(value, 16) as u32,
            Width::SignedByte => sign_extend(value, 8) as u32,
            _ => value,
        };
        self.regs.write(rd, value);
        Ok(())
    }

    fn thumb_store(&mut self, rd: usize, address: u32, size: AccessSize) -> CoreResult<()> {
        let privileged = self.is_privileged();
        let value = self.regs.read(rd);
        if !self.write_memory(address, size, value, privileged)? {
            tracing::trace!(address = format_args!("{address:#010x}"), "thumb store aborted");
        }
        Ok(())
    }

    /// PUSH: full-descending store of the low registers and optionally LR.
    fn thumb_push(&mut self, word: u32) -> CoreResult<()> {
        let list = word.bits(7, 0) | (word.bits(8, 8) << REG_LR);
        let sp = self.regs.read(REG_SP);
        let (start, new_sp) = block_range(sp, operands::reg_count(list), true, false);
        let values: Vec<u32> = super::block_transfer::listed_registers(list)
            .map(|idx| self.regs.read(idx))
            .collect();
        if self.store_block(start, &values)? {
            self.regs.write(REG_SP, new_sp);
        }
        Ok(())
    }

    /// POP: full-descending load of the low registers and optionally the PC.
    fn thumb_pop(&mut self, word: u32) -> CoreResult<()> {
        let list = word.bits(7, 0) | (word.bits(8, 8) << REG_PC);
        let sp = self.regs.read(REG_SP);
        let (start, new_sp) = block_range(sp, operands::reg_count(list), false, true);
        let Some(loaded) = self.load_block(start, list)? else {
            return Ok(());
        };
        self.regs.write(REG_SP, new_sp);
        for (idx, value) in loaded {
            self.write_loaded(idx, value);
        }
        Ok(())
    }

    /// LDMIA/STMIA with base writeback (suppressed for LDMIA when the base is loaded).
    fn thumb_multiple(&mut self, op: ThumbOp, word: u32) -> CoreResult<()> {
        let rn = low_reg(word, 8);
        let list = word.bits(7, 0);
        let base = self.regs.read(rn);
        let (start, new_base) = block_range(base, operands::reg_count(list), false, true);
        if op == ThumbOp::Stmia {
            let values: Vec<u32> = super::block_transfer::listed_registers(list)
                .map(|idx| self.regs.read(idx))
                .collect();
            if self.store_block(start, &values)? {
                self.regs.write(rn, new_base);
            }
            return Ok(());
        }
        let Some(loaded) = self.load_block(start, list)? else {
            return Ok(());
        };
        if list & (1 << rn) == 0 {
            self.regs.write(rn, new_base);
        }
        for (idx, value) in loaded {
            self.regs.write(idx, value);
        }
        Ok(())
    }
}
