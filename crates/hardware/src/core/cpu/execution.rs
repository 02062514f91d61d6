//! Main Execution Loop.
//!
//! This module implements the per-step cycle of the CPU. It performs the following:
//! 1. **Exception Dispatch:** Services at most one pending exception.
//! 2. **Interrupt Sampling:** Raises an unmasked asserted IRQ or FIQ and ends the step.
//! 3. **Fetch and Decode:** Reads one ARM word, Thumb halfword or Thumb-2 halfword pair
//!    through the MMU and maps it to an operation tag.
//! 4. **Execute and Advance:** Runs the instruction and moves the PC past it unless the
//!    instruction wrote r15 or raised an exception.

use super::Cpu;
use super::exec::ExecOutcome;
use crate::common::{CoreResult, REG_PC};
use crate::core::arch::ExceptionKind;
use crate::isa::{decode, disassemble};
use crate::isa::instruction::InstructionWord;

/// Result of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction executed and the PC moved on.
    Retired,
    /// An instruction was fetched but its condition failed.
    ConditionFailed,
    /// The step ended by raising an exception; it is serviced on the next step.
    Raised(ExceptionKind),
}

impl Cpu {
    /// Executes one step.
    ///
    /// # Returns
    ///
    /// What the step did. Architected exceptions are reported as
    /// [`StepOutcome::Raised`], never as errors.
    ///
    /// # Errors
    ///
    /// Any [`CoreError`](crate::common::CoreError): unsupported encodings, host
    /// configuration errors and broken invariants. The core state is left as it was at
    /// the point of failure.
    pub fn step(&mut self) -> CoreResult<StepOutcome> {
        self.stats.steps += 1;
        self.mmu.clear_fault();

        self.service_pending_exception()?;
        if let Some(kind) = self.sample_interrupts()? {
            return Ok(StepOutcome::Raised(kind));
        }
        self.signals.set_jumped(false);

        let Some(insn) = self.fetch()? else {
            return Ok(StepOutcome::Raised(ExceptionKind::PrefetchAbort));
        };
        let thumb = self.regs.is_thumb();
        let op = decode::decode(insn, thumb)?;
        if self.trace || cfg!(feature = "always-trace") {
            tracing::trace!(
                pc = format_args!("{:#010x}", self.regs.pc()),
                word = format_args!("{:#010x}", insn.word),
                "{}",
                disassemble(op, insn, self.regs.pc())
            );
        }

        let outcome = self.execute(op, insn, true)?;

        let raised = self.pending.outstanding();
        debug_assert_eq!(raised.is_some(), self.signals.exception_raised());
        if let Some(kind) = raised {
            return Ok(StepOutcome::Raised(kind));
        }
        if !self.signals.jumped() {
            let next = self.regs.pc().wrapping_add(insn.length);
            self.regs.write_raw(REG_PC, next);
        }

        match outcome {
            ExecOutcome::Completed(class) => {
                self.stats.record_retired(class);
                Ok(StepOutcome::Retired)
            }
            ExecOutcome::Skipped => {
                self.stats.condition_failed += 1;
                Ok(StepOutcome::ConditionFailed)
            }
            ExecOutcome::Disassembled(_) => Ok(StepOutcome::Retired),
        }
    }

    /// Steps until `max_steps` have run or a host error occurs.
    ///
    /// # Arguments
    ///
    /// * `max_steps` - Step budget.
    ///
    /// # Returns
    ///
    /// The number of steps executed.
    pub fn run(&mut self, max_steps: u64) -> CoreResult<u64> {
        for executed in 0..max_steps {
            if let Err(err) = self.step() {
                tracing::debug!(steps = executed, %err, "run stopped");
                self.dump_state();
                return Err(err);
            }
        }
        Ok(max_steps)
    }

    /// Fetches the instruction at the PC.
    ///
    /// In Thumb state a first halfword with bits 15:11 of `11101`, `11110` or `11111`
    /// starts a 32-bit instruction and the following halfword is fetched as well.
    ///
    /// # Returns
    ///
    /// The instruction, or `None` if the fetch aborted.
    fn fetch(&mut self) -> CoreResult<Option<InstructionWord>> {
        let pc = self.regs.pc();
        if !self.regs.is_thumb() {
            return Ok(self.fetch_word(pc)?.map(InstructionWord::arm));
        }
        let Some(first) = self.fetch_halfword(pc)? else {
            return Ok(None);
        };
        if !InstructionWord::is_thumb2_prefix(first) {
            return Ok(Some(InstructionWord::thumb(first)));
        }
        Ok(self
            .fetch_halfword(pc.wrapping_add(2))?
            .map(|second| InstructionWord::thumb2(first, second)))
    }
}
