//! Data-processing instructions.
//!
//! Addressing mode 1 builds the shifter operand from a rotated immediate, a register
//! shifted by an immediate (LSR/ASR #0 mean 32, ROR #0 means RRX) or a register shifted by
//! the bottom byte of Rs. In the register-shift form r15 reads one word further ahead.

use crate::common::{CoreResult, REG_PC};
use crate::core::cpu::Cpu;
use crate::core::units::alu::shifts::barrel_shift;
use crate::core::units::alu::{Alu, ShifterOutput};
use crate::isa::instruction::InstructionBits;
use crate::isa::op::{AluOp, ShifterForm};
use crate::isa::operands::{self, ShiftType};

impl Cpu {
    /// Evaluates addressing mode 1.
    ///
    /// # Arguments
    ///
    /// * `form` - Operand form selected by the decoder.
    /// * `word` - The instruction word.
    ///
    /// # Returns
    ///
    /// The operand and the shifter carry-out.
    pub(crate) fn shifter_operand(&self, form: ShifterForm, word: u32) -> ShifterOutput {
        let carry_in = self.regs.cpsr().c();
        match form {
            ShifterForm::Immediate => {
                let (value, rotate) = operands::rotated_immediate(word);
                let carry = if rotate == 0 {
                    carry_in
                } else {
                    value >> 31 != 0
                };
                ShifterOutput { value, carry }
            }
            ShifterForm::ImmediateShift => {
                let (kind, amount) = operands::immediate_shift(word);
                let (value, carry) =
                    barrel_shift(self.regs.read(word.rm()), kind, amount, carry_in);
                ShifterOutput { value, carry }
            }
            ShifterForm::RegisterShift => {
                let amount = self.regs.read(word.rs()) & 0xFF;
                let kind = ShiftType::from_bits(word >> 5);
                let (value, carry) =
                    barrel_shift(self.read_shift_operand(word.rm()), kind, amount, carry_in);
                ShifterOutput { value, carry }
            }
        }
    }

    fn read_shift_operand(&self, idx: usize) -> u32 {
        let value = self.regs.read(idx);
        if idx == REG_PC { value.wrapping_add(4) } else { value }
    }

    /// Executes an ARM data-processing instruction.
    ///
    /// With `S` set and Rd = r15 the result goes to the PC and the CPSR is restored from
    /// the SPSR (exception return).
    ///
    /// # Errors
    ///
    /// [`CoreError::NoSpsr`](crate::common::CoreError::NoSpsr) or
    /// [`CoreError::InvalidMode`](crate::common::CoreError::InvalidMode) from an exception
    /// return in a mode without an SPSR or with a malformed saved mode.
    pub(crate) fn arm_data_processing(
        &mut self,
        op: AluOp,
        form: ShifterForm,
        word: u32,
    ) -> CoreResult<()> {
        let operand = self.shifter_operand(form, word);
        let rn = if form == ShifterForm::RegisterShift {
            self.read_shift_operand(word.rn())
        } else {
            self.regs.read(word.rn())
        };
        let out = Alu::execute(op, rn, operand, self.regs.cpsr().flags());
        let set_flags = word.bit(20);
        let rd = word.rd();

        if op.is_test() {
            self.regs.set_flags(out.flags);
            return Ok(());
        }
        if rd == REG_PC {
            if set_flags {
                let spsr = self.regs.spsr()?;
                self.regs.set_cpsr(spsr)?;
            }
            self.branch_to(out.value);
            return Ok(());
        }
        self.regs.write(rd, out.value);
        if set_flags {
            self.regs.set_flags(out.flags);
        }
        Ok(())
    }

    /// CLZ: Rd = number of leading zero bits in Rm.
    pub(crate) fn arm_clz(&mut self, word: u32) {
        let value = self.regs.read(word.rm());
        self.regs.write(word.rd(), value.leading_zeros());
    }
}
