//! Coprocessor register transfers.
//!
//! MCR, MRC and CDP are routed by the coprocessor number in bits 11:8. Slot 15 is the
//! built-in system control coprocessor; slots 0-14 hold whatever the embedder attached.
//! An empty slot or an id the coprocessor does not implement is a host configuration
//! error, not an undefined instruction.
//!
//! A cp15 write that changes the control, translation table base or domain registers
//! reconfigures the MMU and the vector base before the next instruction; the wait for
//! interrupt operation blocks until an interrupt line is asserted.

use super::Cpu;
use crate::common::constants::SYSTEM_CONTROL_COPROCESSOR;
use crate::common::{CoreError, CoreResult, REG_PC};
use crate::core::arch::Flags;
use crate::core::arch::coproc::{Coprocessor, CoprocessorRegId};
use crate::core::arch::cp15::{SystemControl, SystemControlEffect};
use crate::isa::instruction::InstructionBits;
use crate::isa::op::ArmOp;

impl Cpu {
    fn coprocessor_mut(&mut self, number: u32) -> CoreResult<&mut (dyn Coprocessor + 'static)> {
        if number == SYSTEM_CONTROL_COPROCESSOR {
            return Ok(&mut self.cp15);
        }
        self.coprocessors
            .get_mut(number as usize)
            .and_then(|slot| slot.as_deref_mut())
            .ok_or(CoreError::UnknownCoprocessor { number })
    }

    /// Executes MCR, MRC or CDP.
    ///
    /// # Arguments
    ///
    /// * `op` - `Mcr`, `Mrc` or `Cdp`.
    /// * `word` - The instruction word.
    ///
    /// # Errors
    ///
    /// * [`CoreError::UnknownCoprocessor`] if the addressed slot is empty.
    /// * [`CoreError::InvalidCoprocessorRegister`] if the register id is not implemented.
    /// * Whatever the coprocessor returns from a CDP.
    pub(crate) fn coprocessor_transfer(&mut self, op: ArmOp, word: u32) -> CoreResult<()> {
        let number = word.bits(11, 8);
        let id = CoprocessorRegId::from_instruction(word);

        if op == ArmOp::Cdp {
            return self.coprocessor_mut(number)?.data_operation(word);
        }

        let access = if op == ArmOp::Mrc { "read" } else { "write" };
        let coprocessor = self.coprocessor_mut(number)?;
        if !coprocessor.is_valid_id(id) {
            return Err(CoreError::InvalidCoprocessorRegister {
                number,
                id: id.0,
                access,
            });
        }

        let rd = word.rd();
        if op == ArmOp::Mrc {
            let value = coprocessor.get_register(id);
            tracing::trace!(number, %id, value, "mrc");
            if rd == REG_PC {
                self.regs.set_flags(Flags::from_nibble(value));
            } else {
                self.regs.write(rd, value);
            }
            return Ok(());
        }

        let value = self.regs.read(rd);
        tracing::trace!(number, %id, value, "mcr");
        self.coprocessor_mut(number)?.set_register(id, value);
        if number == SYSTEM_CONTROL_COPROCESSOR {
            self.apply_system_control_effect(id);
        }
        Ok(())
    }

    fn apply_system_control_effect(&mut self, id: CoprocessorRegId) {
        match SystemControl::effect_of_write(id) {
            SystemControlEffect::None => {}
            SystemControlEffect::Reconfigure => {
                self.mmu.configure(self.cp15.mmu_config());
                self.signals.set_high_vectors(self.cp15.high_vectors());
            }
            SystemControlEffect::WaitForInterrupt => {
                tracing::debug!(pc = format_args!("{:#010x}", self.regs.pc()), "wait for interrupt");
                self.interrupts.wait_for_interrupt();
            }
        }
    }
}
