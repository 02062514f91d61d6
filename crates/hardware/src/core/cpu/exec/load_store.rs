//! Single and doubleword loads and stores.
//!
//! This module implements the ARM memory instructions outside the block transfers:
//! 1. **Addressing mode 2:** Word and unsigned byte transfers with a 12-bit immediate or
//!    a scaled register offset; offset, pre-indexed and post-indexed forms. The `T`
//!    variants translate as if in User mode.
//! 2. **Addressing mode 3:** Halfword, signed byte/halfword and doubleword transfers with
//!    a split 8-bit immediate or a register offset.
//! 3. **Swap:** SWP and SWPB.
//!
//! An aborted access leaves the base register unchanged. A load into r15 behaves as BX.

use crate::common::{AccessSize, AccessType, CoreResult, REG_PC};
use crate::core::cpu::Cpu;
use crate::core::units::alu::shifts::barrel_shift;
use crate::isa::instruction::{InstructionBits, sign_extend};
use crate::isa::op::ArmOp;
use crate::isa::operands;

/// Resolved address of a single transfer.
#[derive(Clone, Copy, Debug)]
struct Addressing {
    /// Address of the access.
    address: u32,
    /// Value for the base register, if it is written back.
    writeback: Option<u32>,
}

impl Addressing {
    /// Applies the P, U and W bits to a base value and an unsigned offset.
    fn resolve(word: u32, base: u32, offset: u32) -> Self {
        let indexed = if word.bit(23) {
            base.wrapping_add(offset)
        } else {
            base.wrapping_sub(offset)
        };
        if word.bit(24) {
            Self {
                address: indexed,
                writeback: word.bit(21).then_some(indexed),
            }
        } else {
            Self {
                address: base,
                writeback: Some(indexed),
            }
        }
    }
}

impl Cpu {
    /// Writes a loaded value; loads into r15 switch instruction set from bit 0.
    pub(crate) fn write_loaded(&mut self, rd: usize, value: u32) {
        if rd == REG_PC {
            self.branch_exchange(value);
        } else {
            self.regs.write(rd, value);
        }
    }

    /// Executes an addressing mode 2 transfer (LDR, STR, LDRB, STRB and the T forms).
    pub(crate) fn arm_load_store(&mut self, op: ArmOp, word: u32) -> CoreResult<()> {
        let offset = if word.bit(25) {
            let (kind, amount) = operands::immediate_shift(word);
            barrel_shift(self.regs.read(word.rm()), kind, amount, self.regs.cpsr().c()).0
        } else {
            word.bits(11, 0)
        };
        let rn = word.rn();
        let rd = word.rd();
        let addressing = Addressing::resolve(word, self.regs.read(rn), offset);
        let privileged =
            self.is_privileged() && !matches!(op, ArmOp::Ldrt | ArmOp::Strt | ArmOp::Ldrbt | ArmOp::Strbt);
        let byte = word.bit(22);

        if word.bit(20) {
            let loaded = if byte {
                self.read_memory(addressing.address, AccessSize::Byte, AccessType::Read, privileged)?
            } else {
                self.load_word(addressing.address, privileged)?
            };
            let Some(value) = loaded else {
                return Ok(());
            };
            if let Some(base) = addressing.writeback {
                self.regs.write(rn, base);
            }
            self.write_loaded(rd, value);
        } else {
            let size = if byte { AccessSize::Byte } else { AccessSize::Word };
            let value = self.regs.read(rd);
            if !self.write_memory(addressing.address, size, value, privileged)? {
                return Ok(());
            }
            if let Some(base) = addressing.writeback {
                self.regs.write(rn, base);
            }
        }
        Ok(())
    }

    /// Executes an addressing mode 3 transfer (halfword, signed and doubleword forms).
    pub(crate) fn arm_load_store_extra(&mut self, op: ArmOp, word: u32) -> CoreResult<()> {
        let offset = if word.bit(22) {
            operands::split_immediate(word)
        } else {
            self.regs.read(word.rm())
        };
        let rn = word.rn();
        let rd = word.rd();
        let addressing = Addressing::resolve(word, self.regs.read(rn), offset);
        let address = addressing.address;
        let privileged = self.is_privileged();

        match op {
            ArmOp::LdrhImm | ArmOp::LdrhReg | ArmOp::LdrsbImm | ArmOp::LdrsbReg
            | ArmOp::LdrshImm | ArmOp::LdrshReg => {
                let (size, signed_bits) = match op {
                    ArmOp::LdrhImm | ArmOp::LdrhReg => (AccessSize::Half, None),
                    ArmOp::LdrsbImm | ArmOp::LdrsbReg => (AccessSize::Byte, Some(8)),
                    _ => (AccessSize::Half, Some(16)),
                };
                let Some(raw) = self.read_memory(address, size, AccessType::Read, privileged)? else {
                    return Ok(());
                };
                let value = match signed_bits {
                    Some(bits) => sign_extend(raw, bits) as u32,
                    None => raw,
                };
                if let Some(base) = addressing.writeback {
                    self.regs.write(rn, base);
                }
                self.write_loaded(rd, value);
            }
            ArmOp::StrhImm | ArmOp::StrhReg => {
                let value = self.regs.read(rd);
                if !self.write_memory(address, AccessSize::Half, value, privileged)? {
                    return Ok(());
                }
                if let Some(base) = addressing.writeback {
                    self.regs.write(rn, base);
                }
            }
            ArmOp::LdrdImm | ArmOp::LdrdReg => {
                let Some(low) = self.load_word(address, privileged)? else {
                    return Ok(());
                };
                let Some(high) = self.load_word(address.wrapping_add(4), privileged)? else {
                    return Ok(());
                };
                if let Some(base) = addressing.writeback {
                    self.regs.write(rn, base);
                }
                self.regs.write(rd & !1, low);
                self.regs.write((rd & !1) + 1, high);
            }
            _ => {
                let low = self.regs.read(rd & !1);
                let high = self.regs.read((rd & !1) + 1);
                if !self.write_memory(address, AccessSize::Word, low, privileged)? {
                    return Ok(());
                }
                if !self.write_memory(address.wrapping_add(4), AccessSize::Word, high, privileged)? {
                    return Ok(());
                }
                if let Some(base) = addressing.writeback {
                    self.regs.write(rn, base);
                }
            }
        }
        Ok(())
    }

    /// SWP/SWPB: Rd = [Rn]; [Rn] = Rm.
    pub(crate) fn arm_swap(&mut self, op: ArmOp, word: u32) -> CoreResult<()> {
        let address = self.regs.read(word.rn());
        let source = self.regs.read(word.rm());
        let privileged = self.is_privileged();
        let (loaded, size) = if op == ArmOp::Swpb {
            (
                self.read_memory(address, AccessSize::Byte, AccessType::Read, privileged)?,
                AccessSize::Byte,
            )
        } else {
            (self.load_word(address, privileged)?, AccessSize::Word)
        };
        let Some(value) = loaded else {
            return Ok(());
        };
        if !self.write_memory(address, size, source, privileged)? {
            return Ok(());
        }
        self.regs.write(word.rd(), value);
        Ok(())
    }
}
