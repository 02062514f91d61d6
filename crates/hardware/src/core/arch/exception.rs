//! Architected exceptions and the pending exception set.
//!
//! This module describes the seven ARM exceptions and holds the per-step pending set.
//! It provides:
//! 1. **Exception Table:** Target mode, vector offset, return-address adjustment and mask
//!    behaviour of every exception kind.
//! 2. **Priority Order:** Reset > Undefined > SWI > Prefetch Abort > Data Abort > IRQ > FIQ.
//! 3. **Pending Set:** Seven slots carrying a reason string, with the single-outstanding
//!    invariant enforced at raise time.

use crate::common::error::{CoreError, CoreResult};

use super::mode::ProcessorMode;

/// One of the seven architected exceptions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExceptionKind {
    /// Reset.
    Reset = 0,
    /// Undefined instruction.
    Undefined = 1,
    /// Software interrupt (SWI).
    SoftwareInterrupt = 2,
    /// Instruction fetch abort (also raised by BKPT).
    PrefetchAbort = 3,
    /// Data access abort.
    DataAbort = 4,
    /// Normal interrupt request.
    Irq = 5,
    /// Fast interrupt request.
    Fiq = 6,
}

impl ExceptionKind {
    /// Number of exception kinds.
    pub const COUNT: usize = 7;

    /// Every kind in dispatch priority order, highest first.
    pub const PRIORITY_ORDER: [Self; Self::COUNT] = [
        Self::Reset,
        Self::Undefined,
        Self::SoftwareInterrupt,
        Self::PrefetchAbort,
        Self::DataAbort,
        Self::Irq,
        Self::Fiq,
    ];

    /// Mode the core enters when servicing this exception.
    pub const fn target_mode(self) -> ProcessorMode {
        match self {
            Self::Reset | Self::SoftwareInterrupt => ProcessorMode::Supervisor,
            Self::Undefined => ProcessorMode::Undefined,
            Self::PrefetchAbort | Self::DataAbort => ProcessorMode::Abort,
            Self::Irq => ProcessorMode::Irq,
            Self::Fiq => ProcessorMode::Fiq,
        }
    }

    /// Offset of this exception's entry in the vector table.
    ///
    /// Offset `0x14` is the reserved (address exception) slot and is never used.
    pub const fn vector_offset(self) -> u32 {
        match self {
            Self::Reset => 0x00,
            Self::Undefined => 0x04,
            Self::SoftwareInterrupt => 0x08,
            Self::PrefetchAbort => 0x0C,
            Self::DataAbort => 0x10,
            Self::Irq => 0x18,
            Self::Fiq => 0x1C,
        }
    }

    /// Value added to the recorded fetch address to form the banked link register.
    ///
    /// # Arguments
    ///
    /// * `thumb` - Whether the core was in Thumb state when the exception was raised.
    pub const fn return_offset(self, thumb: bool) -> u32 {
        match self {
            Self::Reset => 0,
            Self::Undefined | Self::SoftwareInterrupt => {
                if thumb {
                    2
                } else {
                    4
                }
            }
            Self::PrefetchAbort => 4,
            Self::DataAbort | Self::Irq | Self::Fiq => 8,
        }
    }

    /// Returns `true` if entry also masks FIQ.
    pub const fn masks_fiq(self) -> bool {
        matches!(self, Self::Reset | Self::Fiq)
    }

    /// Human-readable exception name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Undefined => "undefined instruction",
            Self::SoftwareInterrupt => "software interrupt",
            Self::PrefetchAbort => "prefetch abort",
            Self::DataAbort => "data abort",
            Self::Irq => "irq",
            Self::Fiq => "fiq",
        }
    }
}

impl std::fmt::Display for ExceptionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A raised, not yet serviced, exception.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingException {
    /// Why the exception was raised (for logs and debuggers).
    pub reason: String,
    /// Fetch address the return offset is applied to.
    pub fetch_address: u32,
    /// Instruction set state at the time of the raise.
    pub thumb: bool,
}

/// The seven-slot pending exception set.
///
/// At most one slot is ever occupied; a second raise before the first is serviced is
/// reported as [`CoreError::ExceptionAlreadyPending`].
#[derive(Clone, Debug, Default)]
pub struct PendingExceptions {
    slots: [Option<PendingException>; ExceptionKind::COUNT],
}

impl PendingExceptions {
    /// Creates an empty pending set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a raised exception.
    ///
    /// # Arguments
    ///
    /// * `kind` - The exception being raised.
    /// * `pending` - Reason, fetch address and state captured at the raise site.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ExceptionAlreadyPending`] if any slot is already occupied.
    pub fn raise(&mut self, kind: ExceptionKind, pending: PendingException) -> CoreResult<()> {
        if let Some(outstanding) = self.outstanding() {
            return Err(CoreError::ExceptionAlreadyPending {
                raised: kind,
                pending: outstanding,
            });
        }
        self.slots[kind as usize] = Some(pending);
        Ok(())
    }

    /// Returns the highest-priority outstanding exception, if any.
    pub fn outstanding(&self) -> Option<ExceptionKind> {
        ExceptionKind::PRIORITY_ORDER
            .into_iter()
            .find(|&kind| self.slots[kind as usize].is_some())
    }

    /// Returns the slot contents for `kind`.
    pub fn get(&self, kind: ExceptionKind) -> Option<&PendingException> {
        self.slots[kind as usize].as_ref()
    }

    /// Removes and returns the highest-priority outstanding exception.
    pub fn take_highest(&mut self) -> Option<(ExceptionKind, PendingException)> {
        let kind = self.outstanding()?;
        self.slots[kind as usize].take().map(|p| (kind, p))
    }

    /// Returns `true` if no exception is outstanding.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Drops every outstanding exception.
    pub fn clear(&mut self) {
        self.slots = Default::default();
    }
}
