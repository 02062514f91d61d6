//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the encodings, decoders and disassembler for the three instruction sets the
//! core understands.
//!
//! # Instruction sets
//!
//! * ARM: the 32-bit ARMv5TE instruction set, including the DSP extension encodings.
//! * Thumb: the 16-bit Thumb instruction set.
//! * Thumb-2: the 32-bit branch and control subset.

/// Register name mappings.
pub mod abi;

/// Condition codes and their evaluation.
pub mod condition;

/// Instruction decoders for ARM, Thumb and Thumb-2.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction words and bit extraction utilities.
pub mod instruction;

/// Operation identifiers produced by the decoder.
pub mod op;

/// Operand field helpers shared by the executor and disassembler.
pub mod operands;

pub use condition::Condition;
pub use decode::decode;
pub use disasm::{Disassembly, disassemble};
pub use instruction::{InstructionBits, InstructionWord};
pub use op::{AluOp, ArmOp, OperationId, ShifterForm, Thumb2Op, ThumbOp};
