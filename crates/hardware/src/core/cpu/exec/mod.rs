//! Instruction Executor.
//!
//! `execute` consumes the operation tag produced by the decoder with an exhaustive match.
//! Handlers are grouped by instruction class:
//! 1. **Data processing:** ALU operations with addressing mode 1, CLZ.
//! 2. **Multiply:** MUL/MLA and the 64-bit long multiplies.
//! 3. **Load/store:** Addressing modes 2 and 3, doubleword transfers, swaps.
//! 4. **Block transfer:** LDM/STM with addressing mode 4.
//! 5. **Branch:** B/BL/BX/BLX in all three instruction sets.
//! 6. **Status:** MRS and MSR.
//! 7. **Thumb:** The 16-bit instruction set.
//! 8. **Thumb-2:** The 32-bit branch and control forms.
//!
//! Coprocessor transfers live in `cpu::coproc`. A handler returns early once it has raised
//! an exception; the step loop then skips the PC advance.

/// LDM/STM.
pub mod block_transfer;
/// Branches and interworking.
pub mod branch;
/// Data-processing instructions.
pub mod data_processing;
/// Single and doubleword loads and stores, swaps.
pub mod load_store;
/// Multiplies.
pub mod multiply;
/// MRS/MSR.
pub mod status;
/// 16-bit Thumb instructions.
pub mod thumb;
/// 32-bit Thumb-2 instructions.
pub mod thumb2;

use super::Cpu;
use crate::common::{CoreError, CoreResult};
use crate::core::arch::ExceptionKind;
use crate::isa::condition::Condition;
use crate::isa::disasm::{Disassembly, disassemble};
use crate::isa::instruction::{InstructionBits, InstructionWord};
use crate::isa::op::{ArmOp, OperationId, Thumb2Op, ThumbOp};
use crate::isa::operands;
use crate::stats::InstructionClass;

/// Result of [`Cpu::execute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecOutcome {
    /// `commit == false`: the instruction's disassembly; no state was touched.
    Disassembled(Disassembly),
    /// The condition failed; the instruction had no effect.
    Skipped,
    /// The instruction executed (it may have raised an exception).
    Completed(InstructionClass),
}

impl Cpu {
    /// Executes, or disassembles, one decoded instruction.
    ///
    /// # Arguments
    ///
    /// * `op` - Tag returned by the decoder for `insn`.
    /// * `insn` - The instruction word.
    /// * `commit` - `false` to only disassemble.
    ///
    /// # Errors
    ///
    /// [`CoreError::Unsupported`] for implemented-as-unsupported forms, and the host errors
    /// of the coprocessor and status paths.
    pub fn execute(
        &mut self,
        op: OperationId,
        insn: InstructionWord,
        commit: bool,
    ) -> CoreResult<ExecOutcome> {
        if !commit {
            return Ok(ExecOutcome::Disassembled(disassemble(
                op,
                insn,
                self.regs.pc(),
            )));
        }
        if !self.condition_passed(op, insn.word) {
            return Ok(ExecOutcome::Skipped);
        }
        let class = match op {
            OperationId::Arm(op) => self.execute_arm(op, insn.word)?,
            OperationId::Thumb(op) => self.execute_thumb(op, insn.word)?,
            OperationId::Thumb2(op) => self.execute_thumb2(op, insn.word)?,
        };
        Ok(ExecOutcome::Completed(class))
    }

    fn condition_passed(&self, op: OperationId, word: u32) -> bool {
        let cond = match op {
            // The decoder only yields these tags from the unconditional space.
            OperationId::Arm(_) if word.cond() == 0xF => return true,
            OperationId::Arm(_) => word.cond(),
            OperationId::Thumb(ThumbOp::BCond) => word.bits(11, 8),
            OperationId::Thumb2(Thumb2Op::BCond) => (word >> 16).bits(9, 6),
            _ => return true,
        };
        Condition::from_bits(cond).passes(self.regs.cpsr().flags())
    }

    fn execute_arm(&mut self, op: ArmOp, word: u32) -> CoreResult<InstructionClass> {
        use ArmOp::*;

        let class = match op {
            Mul | Mla | Umull | Umlal | Smull | Smlal => {
                self.arm_multiply(op, word);
                InstructionClass::Multiply
            }
            Smlaxy | Smlawy | Smulwy | Smlalxy | Smulxy => {
                return Err(CoreError::Unsupported {
                    word,
                    what: "signed halfword multiply",
                });
            }
            Qadd | Qsub | Qdadd | Qdsub => {
                return Err(CoreError::Unsupported {
                    word,
                    what: "saturating arithmetic",
                });
            }
            Clz => {
                self.arm_clz(word);
                InstructionClass::Alu
            }
            Mrs => {
                self.arm_mrs(word)?;
                InstructionClass::Alu
            }
            MsrImm | MsrReg => {
                self.arm_msr(op, word)?;
                InstructionClass::Alu
            }
            B | Bl | Bx | BlxReg | BlxImm => {
                self.arm_branch(op, word);
                InstructionClass::Branch
            }
            LdrImm | LdrReg | LdrbImm | LdrbReg | Ldrt | Ldrbt => {
                self.arm_load_store(op, word)?;
                InstructionClass::Load
            }
            StrImm | StrReg | StrbImm | StrbReg | Strt | Strbt => {
                self.arm_load_store(op, word)?;
                InstructionClass::Store
            }
            LdrhImm | LdrhReg | LdrsbImm | LdrsbReg | LdrshImm | LdrshReg | LdrdImm | LdrdReg => {
                self.arm_load_store_extra(op, word)?;
                InstructionClass::Load
            }
            StrhImm | StrhReg | StrdImm | StrdReg => {
                self.arm_load_store_extra(op, word)?;
                InstructionClass::Store
            }
            Swp | Swpb => {
                self.arm_swap(op, word)?;
                InstructionClass::Store
            }
            Pld => InstructionClass::Load,
            Ldm | LdmUser | LdmException => {
                self.arm_block_transfer(op, word)?;
                InstructionClass::Load
            }
            Stm | StmUser => {
                self.arm_block_transfer(op, word)?;
                InstructionClass::Store
            }
            Mcr | Mrc | Cdp => {
                self.coprocessor_transfer(op, word)?;
                InstructionClass::System
            }
            Ldc | Stc | Mcrr | Mrrc => {
                return Err(CoreError::Unsupported {
                    word,
                    what: "coprocessor load/store or double transfer",
                });
            }
            Swi => {
                self.raise_exception(
                    ExceptionKind::SoftwareInterrupt,
                    format!("swi {:#x}", word.bits(23, 0)),
                )?;
                InstructionClass::System
            }
            Bkpt => {
                self.raise_exception(
                    ExceptionKind::PrefetchAbort,
                    format!("bkpt {:#x}", operands::arm_bkpt_immediate(word)),
                )?;
                InstructionClass::System
            }
            Undefined => {
                self.raise_exception(
                    ExceptionKind::Undefined,
                    format!("undefined instruction {word:#010x}"),
                )?;
                InstructionClass::System
            }
            other => {
                let Some((alu, form)) = other.alu() else {
                    return Err(CoreError::Unsupported {
                        word,
                        what: "operation without an ARM handler",
                    });
                };
                self.arm_data_processing(alu, form, word)?;
                InstructionClass::Alu
            }
        };
        Ok(class)
    }
}
