//! Program Status Registers.
//!
//! This module defines the CPSR/SPSR layout. It provides:
//! 1. **Field Masks:** Bit positions of the condition flags, Q, the interrupt masks and T.
//! 2. **Register Storage:** The `Psr` newtype with typed accessors.
//! 3. **Byte Lanes:** The field-mask expansion used by MSR.

use super::mode::{MODE_MASK, ProcessorMode};

/// Negative flag (bit 31).
pub const PSR_N: u32 = 1 << 31;

/// Zero flag (bit 30).
pub const PSR_Z: u32 = 1 << 30;

/// Carry flag (bit 29).
pub const PSR_C: u32 = 1 << 29;

/// Overflow flag (bit 28).
pub const PSR_V: u32 = 1 << 28;

/// Sticky saturation flag (bit 27).
pub const PSR_Q: u32 = 1 << 27;

/// IRQ disable (bit 7).
pub const PSR_I: u32 = 1 << 7;

/// FIQ disable (bit 6).
pub const PSR_F: u32 = 1 << 6;

/// Thumb state (bit 5).
pub const PSR_T: u32 = 1 << 5;

/// Mask covering N, Z, C and V.
pub const PSR_NZCV: u32 = PSR_N | PSR_Z | PSR_C | PSR_V;

/// Snapshot of the four condition flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    /// Negative.
    pub n: bool,
    /// Zero.
    pub z: bool,
    /// Carry (NOT borrow for subtraction).
    pub c: bool,
    /// Signed overflow.
    pub v: bool,
}

impl Flags {
    /// Builds a flag set from the top nibble of a 32-bit value.
    pub const fn from_nibble(value: u32) -> Self {
        Self {
            n: value & PSR_N != 0,
            z: value & PSR_Z != 0,
            c: value & PSR_C != 0,
            v: value & PSR_V != 0,
        }
    }
}

/// A program status register value (CPSR or SPSR).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Psr(pub u32);

impl Psr {
    /// Status register of a freshly reset core: Supervisor mode, IRQ and FIQ masked, ARM state.
    pub const RESET: Self = Self(PSR_I | PSR_F | ProcessorMode::Supervisor as u32);

    /// Returns the raw 32-bit value.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns the decoded mode, or `None` if the mode field is reserved.
    #[inline]
    pub const fn mode(self) -> Option<ProcessorMode> {
        ProcessorMode::from_bits(self.0)
    }

    /// Returns the raw 5-bit mode field.
    #[inline(always)]
    pub const fn mode_bits(self) -> u32 {
        self.0 & MODE_MASK
    }

    /// Returns a copy with the mode field replaced.
    #[inline]
    pub const fn with_mode(self, mode: ProcessorMode) -> Self {
        Self((self.0 & !MODE_MASK) | mode.bits())
    }

    #[inline(always)]
    const fn with_bit(self, mask: u32, set: bool) -> Self {
        if set { Self(self.0 | mask) } else { Self(self.0 & !mask) }
    }

    /// Negative flag.
    #[inline(always)]
    pub const fn n(self) -> bool {
        self.0 & PSR_N != 0
    }

    /// Zero flag.
    #[inline(always)]
    pub const fn z(self) -> bool {
        self.0 & PSR_Z != 0
    }

    /// Carry flag.
    #[inline(always)]
    pub const fn c(self) -> bool {
        self.0 & PSR_C != 0
    }

    /// Overflow flag.
    #[inline(always)]
    pub const fn v(self) -> bool {
        self.0 & PSR_V != 0
    }

    /// Sticky saturation flag.
    #[inline(always)]
    pub const fn q(self) -> bool {
        self.0 & PSR_Q != 0
    }

    /// IRQ masked.
    #[inline(always)]
    pub const fn irq_disabled(self) -> bool {
        self.0 & PSR_I != 0
    }

    /// FIQ masked.
    #[inline(always)]
    pub const fn fiq_disabled(self) -> bool {
        self.0 & PSR_F != 0
    }

    /// Executing Thumb instructions.
    #[inline(always)]
    pub const fn thumb(self) -> bool {
        self.0 & PSR_T != 0
    }

    /// Returns the four condition flags.
    #[inline]
    pub const fn flags(self) -> Flags {
        Flags::from_nibble(self.0)
    }

    /// Returns a copy with N, Z, C and V replaced.
    #[inline]
    pub const fn with_flags(self, flags: Flags) -> Self {
        self.with_bit(PSR_N, flags.n)
            .with_bit(PSR_Z, flags.z)
            .with_bit(PSR_C, flags.c)
            .with_bit(PSR_V, flags.v)
    }

    /// Returns a copy with the T bit replaced.
    #[inline]
    pub const fn with_thumb(self, thumb: bool) -> Self {
        self.with_bit(PSR_T, thumb)
    }

    /// Returns a copy with the I bit replaced.
    #[inline]
    pub const fn with_irq_disabled(self, disabled: bool) -> Self {
        self.with_bit(PSR_I, disabled)
    }

    /// Returns a copy with the F bit replaced.
    #[inline]
    pub const fn with_fiq_disabled(self, disabled: bool) -> Self {
        self.with_bit(PSR_F, disabled)
    }

    /// Returns a copy with the Q bit replaced.
    #[inline]
    pub const fn with_q(self, q: bool) -> Self {
        self.with_bit(PSR_Q, q)
    }
}

impl std::fmt::Display for Psr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flag = |set: bool, c: char| if set { c } else { c.to_ascii_lowercase() };
        let mode = self.mode().map_or("???", ProcessorMode::name);
        write!(
            f,
            "{}{}{}{}{} {}{}{} {mode}",
            flag(self.n(), 'N'),
            flag(self.z(), 'Z'),
            flag(self.c(), 'C'),
            flag(self.v(), 'V'),
            flag(self.q(), 'Q'),
            flag(self.irq_disabled(), 'I'),
            flag(self.fiq_disabled(), 'F'),
            flag(self.thumb(), 'T'),
        )
    }
}

/// Expands the MSR 4-bit field mask (`c`, `x`, `s`, `f` in bits 0-3) into byte lanes.
///
/// # Arguments
///
/// * `field_mask` - Instruction bits 19:16.
///
/// # Returns
///
/// A 32-bit mask with `0xFF` in every selected byte.
pub const fn field_mask_bytes(field_mask: u32) -> u32 {
    let mut mask = 0;
    let mut lane = 0;
    while lane < 4 {
        if field_mask & (1 << lane) != 0 {
            mask |= 0xFF << (lane * 8);
        }
        lane += 1;
    }
    mask
}
