//! ALU arithmetic operations.
//!
//! Every add and subtract form reduces to `AddWithCarry(a, b, carry_in)`:
//! SUB is `a + !b + 1`, SBC is `a + !b + C`, RSB and RSC swap the operands. The carry
//! out of a subtraction is therefore NOT borrow.

/// Result of an add/subtract with its carry and overflow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArithResult {
    /// 32-bit result.
    pub value: u32,
    /// Unsigned carry out of bit 31.
    pub carry: bool,
    /// Signed overflow.
    pub overflow: bool,
}

/// Computes `a + b + carry_in`.
///
/// # Returns
///
/// The sum with carry-out and signed overflow.
#[inline]
pub const fn add_with_carry(a: u32, b: u32, carry_in: bool) -> ArithResult {
    let wide = a as u64 + b as u64 + carry_in as u64;
    let value = wide as u32;
    ArithResult {
        value,
        carry: wide > u32::MAX as u64,
        overflow: (!(a ^ b) & (a ^ value)) >> 31 != 0,
    }
}

/// Computes `a + b`.
#[inline]
pub const fn add(a: u32, b: u32) -> ArithResult {
    add_with_carry(a, b, false)
}

/// Computes `a - b`; carry is set when no borrow occurs (`a >= b`).
#[inline]
pub const fn sub(a: u32, b: u32) -> ArithResult {
    add_with_carry(a, !b, true)
}

/// Computes `a - b - !carry_in`.
#[inline]
pub const fn sub_with_carry(a: u32, b: u32, carry_in: bool) -> ArithResult {
    add_with_carry(a, !b, carry_in)
}
