//! Global Core Constants.
//!
//! This module defines constants shared across the core. It includes:
//! 1. **Instruction Sizes:** Byte widths of ARM, Thumb and Thumb-2 encodings.
//! 2. **PC Read Offsets:** The pipeline-visible PC skew in each instruction set state.
//! 3. **Vector Bases:** Low and high exception vector table locations.
//! 4. **Register Indices:** Architectural aliases for the stack pointer, link register and PC.

/// Size of an ARM instruction in bytes.
pub const ARM_INSTRUCTION_SIZE: u32 = 4;

/// Size of a 16-bit Thumb instruction in bytes.
pub const THUMB_INSTRUCTION_SIZE: u32 = 2;

/// Size of a 32-bit Thumb-2 instruction in bytes.
pub const THUMB2_INSTRUCTION_SIZE: u32 = 4;

/// Value added to the fetch address when r15 is read as an operand in ARM state.
pub const ARM_PC_OFFSET: u32 = 8;

/// Value added to the fetch address when r15 is read as an operand in Thumb state.
pub const THUMB_PC_OFFSET: u32 = 4;

/// Exception vector table base when the cp15 V bit is clear.
pub const LOW_VECTOR_BASE: u32 = 0x0000_0000;

/// Exception vector table base when the cp15 V bit is set.
pub const HIGH_VECTOR_BASE: u32 = 0xFFFF_0000;

/// Register index of the stack pointer (r13).
pub const REG_SP: usize = 13;

/// Register index of the link register (r14).
pub const REG_LR: usize = 14;

/// Register index of the program counter (r15).
pub const REG_PC: usize = 15;

/// Number of architecturally visible general-purpose registers (r0-r15).
pub const NUM_GPRS: usize = 16;

/// Number of coprocessor slots on the coprocessor bus.
pub const NUM_COPROCESSORS: usize = 16;

/// Coprocessor number of the built-in system control coprocessor.
pub const SYSTEM_CONTROL_COPROCESSOR: u32 = 15;
