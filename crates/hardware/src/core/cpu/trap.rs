//! Exception Raising and Dispatch.
//!
//! This module implements the exception side of the step loop. It performs the following:
//! 1. **Raising:** Records an exception in the pending set together with the fetch address
//!    and instruction set state the return address is derived from.
//! 2. **Interrupt Sampling:** Reads the IRQ and FIQ lines once per step and raises the
//!    first unmasked one.
//! 3. **Servicing:** Takes the highest-priority pending exception and performs entry:
//!    mode switch, SPSR and LR setup, interrupt masking and the jump to the vector.

use super::Cpu;
use crate::common::constants::{HIGH_VECTOR_BASE, LOW_VECTOR_BASE, REG_LR, REG_PC};
use crate::common::CoreResult;
use crate::core::arch::{ExceptionKind, PendingException};
use crate::soc::traits::IrqLine;

impl Cpu {
    /// Raises an exception against the instruction currently being executed.
    ///
    /// # Arguments
    ///
    /// * `kind` - Exception to raise.
    /// * `reason` - Description kept with the pending entry.
    ///
    /// # Errors
    ///
    /// [`CoreError::ExceptionAlreadyPending`](crate::common::CoreError::ExceptionAlreadyPending)
    /// if another exception is outstanding.
    pub fn raise_exception(&mut self, kind: ExceptionKind, reason: impl Into<String>) -> CoreResult<()> {
        let fetch_address = self.regs.pc();
        self.raise_at(kind, reason.into(), fetch_address)
    }

    fn raise_at(&mut self, kind: ExceptionKind, reason: String, fetch_address: u32) -> CoreResult<()> {
        tracing::debug!(
            exception = %kind,
            pc = format_args!("{fetch_address:#010x}"),
            %reason,
            "exception raised"
        );
        self.pending.raise(
            kind,
            PendingException {
                reason,
                fetch_address,
                thumb: self.regs.is_thumb(),
            },
        )?;
        self.signals.set_exception_raised(true);
        Ok(())
    }

    /// Samples the interrupt lines and raises the first unmasked asserted one.
    ///
    /// Interrupts are taken between instructions: the instruction at the current PC has
    /// not executed, so the handler's `subs pc, lr, #4` must land back on it.
    ///
    /// # Returns
    ///
    /// The interrupt raised, if any.
    pub(super) fn sample_interrupts(&mut self) -> CoreResult<Option<ExceptionKind>> {
        let cpsr = self.regs.cpsr();
        for line in IrqLine::ALL {
            let (kind, masked) = match line {
                IrqLine::Irq => (ExceptionKind::Irq, cpsr.irq_disabled()),
                IrqLine::Fiq => (ExceptionKind::Fiq, cpsr.fiq_disabled()),
            };
            if masked || !self.interrupts.is_asserted(line) {
                continue;
            }
            let reason = self.interrupts.message(line);
            let fetch_address = self.regs.pc().wrapping_sub(4);
            self.raise_at(kind, reason, fetch_address)?;
            return Ok(Some(kind));
        }
        Ok(None)
    }

    /// Services the highest-priority pending exception.
    ///
    /// Does nothing unless the exception-raised signal is set.
    pub(super) fn service_pending_exception(&mut self) -> CoreResult<()> {
        if !self.signals.exception_raised() {
            return Ok(());
        }
        let Some((kind, pending)) = self.pending.take_highest() else {
            self.signals.set_exception_raised(false);
            return Ok(());
        };
        self.signals.set_exception_raised(false);

        let saved = self.regs.cpsr();
        let return_address = pending
            .fetch_address
            .wrapping_add(kind.return_offset(pending.thumb));

        let mut entered = saved
            .with_mode(kind.target_mode())
            .with_thumb(false)
            .with_irq_disabled(true);
        if kind.masks_fiq() {
            entered = entered.with_fiq_disabled(true);
        }
        self.regs.set_cpsr(entered)?;
        self.regs.set_spsr(saved)?;
        self.regs.write_raw(REG_LR, return_address);

        let base = if self.signals.high_vectors() {
            HIGH_VECTOR_BASE
        } else {
            LOW_VECTOR_BASE
        };
        self.regs.write(REG_PC, base.wrapping_add(kind.vector_offset()));
        self.stats.record_exception(kind);

        tracing::debug!(
            exception = %kind,
            reason = %pending.reason,
            lr = format_args!("{return_address:#010x}"),
            vector = format_args!("{:#010x}", self.regs.pc()),
            "exception entry"
        );
        Ok(())
    }
}
