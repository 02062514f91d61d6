//! Barrel shifter.
//!
//! Implements LSL, LSR, ASR, ROR and RRX with the ARM carry-out rules. The same routine
//! serves immediate shifts (amounts already normalised so LSR/ASR #0 arrive as 32) and
//! register shifts (amount taken from the bottom byte of Rs, so anything from 0 to 255).
//! A zero amount always passes the value and the incoming carry through unchanged.

use crate::isa::operands::ShiftType;

/// Shifts `value` and returns the result together with the shifter carry-out.
///
/// # Arguments
///
/// * `value` - The operand to shift.
/// * `kind` - Shift operation.
/// * `amount` - Shift distance (0-255); ignored for RRX.
/// * `carry_in` - Current C flag, used for zero shifts and RRX.
///
/// # Returns
///
/// `(result, carry_out)`.
pub const fn barrel_shift(value: u32, kind: ShiftType, amount: u32, carry_in: bool) -> (u32, bool) {
    if let ShiftType::Rrx = kind {
        return (((carry_in as u32) << 31) | (value >> 1), value & 1 != 0);
    }
    if amount == 0 {
        return (value, carry_in);
    }
    match kind {
        ShiftType::Lsl => match amount {
            1..=31 => (value << amount, (value >> (32 - amount)) & 1 != 0),
            32 => (0, value & 1 != 0),
            _ => (0, false),
        },
        ShiftType::Lsr => match amount {
            1..=31 => (value >> amount, (value >> (amount - 1)) & 1 != 0),
            32 => (0, value >> 31 != 0),
            _ => (0, false),
        },
        ShiftType::Asr => {
            if amount < 32 {
                (((value as i32) >> amount) as u32, (value >> (amount - 1)) & 1 != 0)
            } else if value >> 31 != 0 {
                (u32::MAX, true)
            } else {
                (0, false)
            }
        }
        _ => {
            let rotate = amount & 31;
            if rotate == 0 {
                (value, value >> 31 != 0)
            } else {
                (value.rotate_right(rotate), (value >> (rotate - 1)) & 1 != 0)
            }
        }
    }
}
