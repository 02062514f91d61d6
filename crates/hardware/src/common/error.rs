//! Host-level error definitions.
//!
//! Architected exceptions (aborts, undefined instructions, interrupts) are guest-visible
//! events and never appear here; they are raised into the pending exception set and
//! serviced by the dispatcher. This module covers the remaining two categories:
//! 1. **Configuration Errors:** The guest touched something the host never wired up
//!    (an empty coprocessor slot, an unknown cp15 register, an unimplemented encoding).
//! 2. **Invariant Violations:** The core's own bookkeeping was broken (a second exception
//!    raised while one is outstanding, a translation started with a fault still latched).
//!
//! Either category aborts the current step and is returned to the embedder.

use thiserror::Error;

use crate::core::arch::exception::ExceptionKind;
use crate::core::arch::mode::ProcessorMode;

/// Fatal error returned from the step loop.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The instruction decodes to a form this core does not implement.
    #[error("unsupported instruction {word:#010x}: {what}")]
    Unsupported {
        /// Raw instruction word (Thumb-2 words hold the first halfword in bits 31:16).
        word: u32,
        /// Short description of the unimplemented form.
        what: &'static str,
    },

    /// A coprocessor instruction addressed an empty slot.
    #[error("no coprocessor attached at p{number}")]
    UnknownCoprocessor {
        /// Coprocessor number (0-15).
        number: u32,
    },

    /// A coprocessor register access named an id the coprocessor does not implement.
    #[error("p{number}: invalid register id {id:#06x} ({access})")]
    InvalidCoprocessorRegister {
        /// Coprocessor number (0-15).
        number: u32,
        /// Composite CRn:opcode1:CRm:opcode2 id.
        id: u16,
        /// `"read"` or `"write"`.
        access: &'static str,
    },

    /// A CPSR or SPSR write carried a mode field that names no processor mode.
    #[error("malformed processor mode {bits:#07b}")]
    InvalidMode {
        /// The 5-bit mode field that was rejected.
        bits: u32,
    },

    /// SPSR accessed from a mode that has no saved status register.
    #[error("no SPSR in {mode} mode")]
    NoSpsr {
        /// The mode that was active at the time of access.
        mode: ProcessorMode,
    },

    /// An exception was raised while another one was still outstanding.
    #[error("{raised} raised while {pending} is still pending")]
    ExceptionAlreadyPending {
        /// The exception whose raise was rejected.
        raised: ExceptionKind,
        /// The exception already sitting in the pending set.
        pending: ExceptionKind,
    },

    /// A translation was requested before the previous fault was cleared.
    #[error("translation of {va:#010x} attempted with a fault still latched")]
    TranslationWhileFaulted {
        /// The virtual address whose translation was refused.
        va: u32,
    },
}

/// Convenience alias for results carrying a [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
