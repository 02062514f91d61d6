//! Branches and interworking.
//!
//! Branch targets are relative to the pipeline view of r15 (fetch address + 8 in ARM
//! state). BX, BLX and loads into r15 select the instruction set from bit 0 of the target.

use crate::common::{REG_LR, REG_PC};
use crate::core::cpu::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::op::ArmOp;
use crate::isa::operands;

impl Cpu {
    /// Writes the PC, forcing the alignment of the current instruction set.
    pub(crate) fn branch_to(&mut self, target: u32) {
        let mask = if self.regs.is_thumb() { !1 } else { !3 };
        self.regs.write(REG_PC, target & mask);
    }

    /// Writes the PC and selects Thumb state from bit 0 of `target`.
    pub(crate) fn branch_exchange(&mut self, target: u32) {
        self.regs.set_thumb(target & 1 != 0);
        self.branch_to(target);
    }

    /// Executes B, BL, BX and both forms of BLX.
    pub(crate) fn arm_branch(&mut self, op: ArmOp, word: u32) {
        let pc = self.regs.pc();
        let next = pc.wrapping_add(4);
        match op {
            ArmOp::B | ArmOp::Bl => {
                let target = self
                    .regs
                    .read(REG_PC)
                    .wrapping_add_signed(operands::arm_branch_offset(word));
                if op == ArmOp::Bl {
                    self.regs.write(REG_LR, next);
                }
                self.branch_to(target);
            }
            ArmOp::BlxImm => {
                let target = self
                    .regs
                    .read(REG_PC)
                    .wrapping_add_signed(operands::arm_blx_offset(word));
                self.regs.write(REG_LR, next);
                self.regs.set_thumb(true);
                self.branch_to(target);
            }
            _ => {
                let target = self.regs.read(word.rm());
                if op == ArmOp::BlxReg {
                    self.regs.write(REG_LR, next);
                }
                self.branch_exchange(target);
            }
        }
    }
}
