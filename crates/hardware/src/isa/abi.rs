//! ARM register names.
//!
//! Canonical names used in disassembly and state dumps. r13-r15 use their procedure
//! call standard aliases.

/// Register names indexed by register number.
pub const REG_NAMES: [&str; 16] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "sp", "lr",
    "pc",
];

/// Returns the canonical name of register `idx`.
///
/// # Arguments
///
/// * `idx` - Register number; only the low four bits are used.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES[idx & 0xF]
}
