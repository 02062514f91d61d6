//! ARM Processor Modes.
//!
//! This module defines the seven processor modes of the ARMv5TE architecture and the six
//! register banks they select. It implements the following:
//! 1. **Mode Classification:** User, FIQ, IRQ, Supervisor, Abort, Undefined and System.
//! 2. **Serialization:** Conversion between the 5-bit CPSR mode field and enum variants.
//! 3. **Bank Selection:** Mapping from mode to the register bank that mode uses.

/// ARM processor modes, discriminants equal to the CPSR mode field encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessorMode {
    /// Unprivileged application mode.
    User = 0x10,

    /// Fast interrupt mode; banks r8-r14.
    Fiq = 0x11,

    /// Interrupt mode.
    Irq = 0x12,

    /// Supervisor mode, entered on reset and software interrupt.
    Supervisor = 0x13,

    /// Abort mode, entered on prefetch and data aborts.
    Abort = 0x17,

    /// Undefined mode, entered on undefined instructions.
    Undefined = 0x1B,

    /// Privileged mode sharing the user register bank.
    System = 0x1F,
}

/// Mask of the mode field within a program status register.
pub const MODE_MASK: u32 = 0x1F;

impl ProcessorMode {
    /// Decodes a 5-bit mode field.
    ///
    /// # Arguments
    ///
    /// * `bits` - Value whose low five bits hold the mode field.
    ///
    /// # Returns
    ///
    /// The matching mode, or `None` for the 25 reserved encodings.
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits & MODE_MASK {
            0x10 => Some(Self::User),
            0x11 => Some(Self::Fiq),
            0x12 => Some(Self::Irq),
            0x13 => Some(Self::Supervisor),
            0x17 => Some(Self::Abort),
            0x1B => Some(Self::Undefined),
            0x1F => Some(Self::System),
            _ => None,
        }
    }

    /// Returns the 5-bit mode field encoding.
    #[inline(always)]
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Returns the register bank this mode selects.
    ///
    /// User and System share a bank; every other mode has its own.
    pub const fn bank(self) -> Bank {
        match self {
            Self::User | Self::System => Bank::User,
            Self::Fiq => Bank::Fiq,
            Self::Irq => Bank::Irq,
            Self::Supervisor => Bank::Supervisor,
            Self::Abort => Bank::Abort,
            Self::Undefined => Bank::Undefined,
        }
    }

    /// Returns `true` for every mode other than User.
    #[inline(always)]
    pub const fn is_privileged(self) -> bool {
        !matches!(self, Self::User)
    }

    /// Returns `true` if the mode owns a saved program status register.
    #[inline(always)]
    pub const fn has_spsr(self) -> bool {
        !matches!(self, Self::User | Self::System)
    }

    /// Returns the conventional three-letter mode name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "usr",
            Self::Fiq => "fiq",
            Self::Irq => "irq",
            Self::Supervisor => "svc",
            Self::Abort => "abt",
            Self::Undefined => "und",
            Self::System => "sys",
        }
    }
}

impl std::fmt::Display for ProcessorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the six physical register banks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bank {
    /// Shared by User and System modes.
    User = 0,
    /// FIQ bank (private r8-r14 and SPSR).
    Fiq = 1,
    /// IRQ bank (private r13, r14 and SPSR).
    Irq = 2,
    /// Supervisor bank.
    Supervisor = 3,
    /// Abort bank.
    Abort = 4,
    /// Undefined bank.
    Undefined = 5,
}

impl Bank {
    /// Number of banks.
    pub const COUNT: usize = 6;

    /// All banks in index order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::User,
        Self::Fiq,
        Self::Irq,
        Self::Supervisor,
        Self::Abort,
        Self::Undefined,
    ];

    /// Returns the bank's position in the alias table.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }
}
