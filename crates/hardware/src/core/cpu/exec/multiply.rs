//! Multiply instructions.
//!
//! MUL/MLA put Rd in bits 19:16 and the accumulator in bits 15:12; the long forms put
//! RdHi in bits 19:16 and RdLo in bits 15:12. Flag-setting forms update N and Z only.

use crate::core::cpu::Cpu;
use crate::core::units::alu::multiply::{multiply, multiply_long};
use crate::core::units::alu::multiply_flags;
use crate::isa::instruction::InstructionBits;
use crate::isa::op::ArmOp;

impl Cpu {
    /// Executes MUL, MLA, UMULL, UMLAL, SMULL or SMLAL.
    pub(crate) fn arm_multiply(&mut self, op: ArmOp, word: u32) {
        let rm = self.regs.read(word.rm());
        let rs = self.regs.read(word.rs());
        let hi_reg = word.rn();
        let lo_reg = word.rd();
        let set_flags = word.bit(20);
        let flags = self.regs.cpsr().flags();

        match op {
            ArmOp::Mul | ArmOp::Mla => {
                let acc = if op == ArmOp::Mla {
                    self.regs.read(lo_reg)
                } else {
                    0
                };
                let result = multiply(rm, rs, acc);
                self.regs.write(hi_reg, result);
                if set_flags {
                    self.regs
                        .set_flags(multiply_flags(result >> 31 != 0, result == 0, flags));
                }
            }
            _ => {
                let signed = matches!(op, ArmOp::Smull | ArmOp::Smlal);
                let acc = if matches!(op, ArmOp::Umlal | ArmOp::Smlal) {
                    (u64::from(self.regs.read(hi_reg)) << 32) | u64::from(self.regs.read(lo_reg))
                } else {
                    0
                };
                let result = multiply_long(rm, rs, acc, signed);
                self.regs.write(lo_reg, result as u32);
                self.regs.write(hi_reg, (result >> 32) as u32);
                if set_flags {
                    self.regs
                        .set_flags(multiply_flags(result >> 63 != 0, result == 0, flags));
                }
            }
        }
    }
}
