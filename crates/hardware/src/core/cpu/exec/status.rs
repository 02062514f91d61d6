//! Status register transfers.
//!
//! MSR writes the byte lanes selected by the 4-bit field mask. In User mode only the flags
//! byte of the CPSR is writable, and MSR never changes the T bit.

use crate::common::CoreResult;
use crate::core::arch::psr::{Psr, field_mask_bytes};
use crate::core::cpu::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::op::{ArmOp, ShifterForm};

/// Bits MSR may write when executed in User mode.
const USER_WRITABLE: u32 = 0xFF00_0000;

impl Cpu {
    /// MRS: copy the CPSR (R = 0) or the SPSR (R = 1) into Rd.
    ///
    /// # Errors
    ///
    /// [`CoreError::NoSpsr`](crate::common::CoreError::NoSpsr) for the SPSR form in User
    /// or System mode.
    pub(crate) fn arm_mrs(&mut self, word: u32) -> CoreResult<()> {
        let value = if word.bit(22) {
            self.regs.spsr()?
        } else {
            self.regs.cpsr()
        };
        self.regs.write(word.rd(), value.bits());
        Ok(())
    }

    /// MSR with an immediate or register operand.
    ///
    /// # Errors
    ///
    /// [`CoreError::InvalidMode`](crate::common::CoreError::InvalidMode) if the written
    /// control byte names no mode, and `NoSpsr` for the SPSR form without an SPSR.
    pub(crate) fn arm_msr(&mut self, op: ArmOp, word: u32) -> CoreResult<()> {
        let operand = if op == ArmOp::MsrImm {
            self.shifter_operand(ShifterForm::Immediate, word).value
        } else {
            self.regs.read(word.rm())
        };
        let mut mask = field_mask_bytes(word.bits(19, 16));

        if word.bit(22) {
            let spsr = self.regs.spsr()?;
            return self
                .regs
                .set_spsr(Psr((spsr.bits() & !mask) | (operand & mask)));
        }

        if !self.is_privileged() {
            mask &= USER_WRITABLE;
        }
        let cpsr = self.regs.cpsr();
        let updated = Psr((cpsr.bits() & !mask) | (operand & mask)).with_thumb(cpsr.thumb());
        self.regs.set_cpsr(updated)
    }
}
