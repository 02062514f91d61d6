//! Multiplier.
//!
//! 32x32 multiplies keep the low word; long multiplies produce the full 64-bit product
//! and optionally accumulate into RdHi:RdLo. Only N and Z are architecturally defined
//! after a flag-setting multiply.

/// `a * b + acc`, low 32 bits.
#[inline]
pub const fn multiply(a: u32, b: u32, acc: u32) -> u32 {
    a.wrapping_mul(b).wrapping_add(acc)
}

/// 64-bit product of two 32-bit operands plus a 64-bit accumulator.
///
/// # Arguments
///
/// * `a`, `b` - Operands (Rm and Rs).
/// * `acc` - RdHi:RdLo for the accumulating forms, zero otherwise.
/// * `signed` - Interpret the operands as two's complement (SMULL/SMLAL).
#[inline]
pub const fn multiply_long(a: u32, b: u32, acc: u64, signed: bool) -> u64 {
    let product = if signed {
        (a as i32 as i64).wrapping_mul(b as i32 as i64) as u64
    } else {
        (a as u64).wrapping_mul(b as u64)
    };
    product.wrapping_add(acc)
}
