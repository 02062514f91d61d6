//! 32-bit Thumb-2 branch and control instructions.
//!
//! Offsets are relative to the Thumb view of r15 (fetch address + 4). BL and BLX leave
//! the address of the next instruction in LR with bit 0 set; BLX continues in ARM state
//! at a word-aligned target.

use crate::common::{CoreError, CoreResult, REG_LR, REG_PC};
use crate::core::arch::ExceptionKind;
use crate::core::cpu::Cpu;
use crate::isa::op::Thumb2Op;
use crate::isa::operands;
use crate::stats::InstructionClass;

impl Cpu {
    /// Executes one 32-bit Thumb-2 instruction.
    ///
    /// # Errors
    ///
    /// [`CoreError::Unsupported`] for SMC.
    pub(crate) fn execute_thumb2(
        &mut self,
        op: Thumb2Op,
        word: u32,
    ) -> CoreResult<InstructionClass> {
        let base = self.regs.read(REG_PC);
        match op {
            Thumb2Op::BCond => {
                self.branch_to(base.wrapping_add_signed(operands::thumb2_cond_branch_offset(word)));
            }
            Thumb2Op::B => {
                self.branch_to(base.wrapping_add_signed(operands::thumb2_branch_offset(word)));
            }
            Thumb2Op::Bl => {
                self.regs.write(REG_LR, base | 1);
                self.branch_to(base.wrapping_add_signed(operands::thumb2_branch_offset(word)));
            }
            Thumb2Op::BlxImm => {
                self.regs.write(REG_LR, base | 1);
                let target = (base & !3).wrapping_add_signed(operands::thumb2_branch_offset(word));
                self.regs.set_thumb(false);
                self.branch_to(target);
            }
            Thumb2Op::Smc => {
                return Err(CoreError::Unsupported {
                    word,
                    what: "secure monitor call",
                });
            }
            Thumb2Op::Udf => {
                self.raise_exception(
                    ExceptionKind::Undefined,
                    format!("permanently undefined {word:#010x}"),
                )?;
                return Ok(InstructionClass::System);
            }
        }
        Ok(InstructionClass::Branch)
    }
}
