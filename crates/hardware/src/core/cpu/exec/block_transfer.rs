//! Block transfers (addressing mode 4).
//!
//! Registers are transferred lowest-numbered first at ascending addresses, whichever
//! direction the base moves. All loads complete before any register is written, so an
//! abort part way through leaves the register file and the base untouched. Stores have
//! no such guarantee: words stored before the aborting one stay in memory.

use crate::common::constants::NUM_GPRS;
use crate::common::{AccessSize, CoreResult, REG_PC};
use crate::core::arch::Bank;
use crate::core::cpu::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::op::ArmOp;
use crate::isa::operands;

/// Lowest address and written-back base of a block transfer.
///
/// # Arguments
///
/// * `base` - Value of Rn.
/// * `count` - Number of registers transferred.
/// * `before` - P bit: adjust before each transfer.
/// * `up` - U bit: the base moves up.
///
/// # Returns
///
/// `(start_address, new_base)`.
pub(crate) const fn block_range(base: u32, count: u32, before: bool, up: bool) -> (u32, u32) {
    let span = count.wrapping_mul(4);
    match (before, up) {
        (false, true) => (base, base.wrapping_add(span)),
        (true, true) => (base.wrapping_add(4), base.wrapping_add(span)),
        (false, false) => (
            base.wrapping_sub(span).wrapping_add(4),
            base.wrapping_sub(span),
        ),
        (true, false) => (base.wrapping_sub(span), base.wrapping_sub(span)),
    }
}

/// Registers named by a 16-bit list, lowest first.
pub(crate) fn listed_registers(list: u32) -> impl Iterator<Item = usize> {
    (0..NUM_GPRS).filter(move |&idx| list & (1 << idx) != 0)
}

impl Cpu {
    /// Loads one word per listed register from consecutive addresses.
    ///
    /// # Returns
    ///
    /// `(register, value)` pairs in list order, or `None` if an access aborted.
    pub(crate) fn load_block(
        &mut self,
        start: u32,
        list: u32,
    ) -> CoreResult<Option<Vec<(usize, u32)>>> {
        let privileged = self.is_privileged();
        let mut loaded = Vec::with_capacity(operands::reg_count(list) as usize);
        let mut address = start;
        for idx in listed_registers(list) {
            let Some(value) = self.load_word(address & !3, privileged)? else {
                return Ok(None);
            };
            loaded.push((idx, value));
            address = address.wrapping_add(4);
        }
        Ok(Some(loaded))
    }

    /// Stores `values` to consecutive words starting at `start`.
    ///
    /// # Returns
    ///
    /// `false` if a store aborted.
    pub(crate) fn store_block(&mut self, start: u32, values: &[u32]) -> CoreResult<bool> {
        let privileged = self.is_privileged();
        let mut address = start;
        for &value in values {
            if !self.write_memory(address & !3, AccessSize::Word, value, privileged)? {
                return Ok(false);
            }
            address = address.wrapping_add(4);
        }
        Ok(true)
    }

    /// Executes LDM and STM, including the user-bank and exception-return forms.
    ///
    /// # Errors
    ///
    /// `NoSpsr`/`InvalidMode` from the exception-return form, which restores the CPSR
    /// from the SPSR.
    pub(crate) fn arm_block_transfer(&mut self, op: ArmOp, word: u32) -> CoreResult<()> {
        let rn = word.rn();
        let list = word.reg_list();
        let base = self.regs.read(rn);
        let (start, new_base) =
            block_range(base, operands::reg_count(list), word.bit(24), word.bit(23));
        let writeback = word.bit(21);
        if writeback && (list >> rn) & 1 == 1 {
            tracing::warn!(
                pc = format_args!("{:#010x}", self.regs.pc()),
                rn,
                "block transfer with writeback and base in list"
            );
        }

        match op {
            ArmOp::Stm | ArmOp::StmUser => {
                let values: Vec<u32> = listed_registers(list)
                    .map(|idx| {
                        if op == ArmOp::StmUser {
                            self.regs.read_banked(Bank::User, idx)
                        } else {
                            self.regs.read(idx)
                        }
                    })
                    .collect();
                if self.store_block(start, &values)? && writeback {
                    self.regs.write(rn, new_base);
                }
            }
            _ => {
                let Some(loaded) = self.load_block(start, list)? else {
                    return Ok(());
                };
                if writeback {
                    self.regs.write(rn, new_base);
                }
                for (idx, value) in loaded {
                    match op {
                        ArmOp::LdmUser => self.regs.write_banked(Bank::User, idx, value),
                        ArmOp::LdmException if idx == REG_PC => {
                            let spsr = self.regs.spsr()?;
                            self.regs.set_cpsr(spsr)?;
                            self.branch_to(value);
                        }
                        _ => self.write_loaded(idx, value),
                    }
                }
            }
        }
        Ok(())
    }
}
