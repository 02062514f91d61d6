//! ALU bitwise operations.

use crate::isa::op::AluOp;

/// Applies a logical data-processing opcode.
///
/// # Arguments
///
/// * `op` - One of AND, EOR, TST, TEQ, ORR, MOV, BIC, MVN.
/// * `a` - First operand (Rn; ignored by MOV and MVN).
/// * `b` - Shifter operand.
///
/// # Returns
///
/// The result, or `None` for arithmetic opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> Option<u32> {
    match op {
        AluOp::And | AluOp::Tst => Some(a & b),
        AluOp::Eor | AluOp::Teq => Some(a ^ b),
        AluOp::Orr => Some(a | b),
        AluOp::Mov => Some(b),
        AluOp::Bic => Some(a & !b),
        AluOp::Mvn => Some(!b),
        _ => None,
    }
}
