//! Instruction decoder.
//!
//! Decoding is a pure function from an instruction word to an [`OperationId`]. It is
//! organised as one decision tree per instruction set:
//! 1. **ARM:** Dispatch on bits 27:26, then the I/S bits, opcode and bits 7 and 4.
//! 2. **Thumb:** Dispatch on bits 15:13, then on progressively narrower sub-fields.
//! 3. **Thumb-2:** Top-level op1/op2 dispatch with only the branch and control leaves
//!    implemented; every other 32-bit form is reported as unsupported.
//!
//! Encodings the architecture leaves undefined decode to an explicit `Undefined` tag.
//! Encodings that are defined but not implemented here return
//! [`CoreError::Unsupported`](crate::common::CoreError::Unsupported).

/// ARM instruction set decoder.
pub mod arm;
/// 16-bit Thumb decoder.
pub mod thumb;
/// 32-bit Thumb-2 decoder.
pub mod thumb2;

use crate::common::error::CoreResult;

use super::instruction::InstructionWord;
use super::op::OperationId;

/// Decodes a fetched instruction.
///
/// # Arguments
///
/// * `insn` - The fetched instruction word and its length.
/// * `thumb` - Whether the core is in Thumb state.
///
/// # Returns
///
/// The operation tag for the instruction.
///
/// # Errors
///
/// Returns `CoreError::Unsupported` for encodings outside the implemented subset.
pub fn decode(insn: InstructionWord, thumb: bool) -> CoreResult<OperationId> {
    if !thumb {
        return arm::decode(insn.word).map(OperationId::Arm);
    }
    if insn.length == 4 {
        thumb2::decode(insn.word).map(OperationId::Thumb2)
    } else {
        Ok(OperationId::Thumb(thumb::decode(insn.word as u16)))
    }
}
