//! Shared core signal flags.
//!
//! A handful of single-bit facts about the core are read from more than one place:
//! the register file sets "jumped" on a PC write, the dispatcher tests "exception raised"
//! on every step, and the system control coprocessor flips the vector base. They live here
//! as single-writer atomics so a debugger or interrupt thread can observe them without
//! taking any lock held by the stepping thread.

use std::sync::atomic::{AtomicBool, Ordering};

/// Atomic flags shared between the register file, the dispatcher and cp15.
#[derive(Debug, Default)]
pub struct CoreSignals {
    exception_raised: AtomicBool,
    jumped: AtomicBool,
    high_vectors: AtomicBool,
}

impl CoreSignals {
    /// Creates a new flag set with every flag clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an exception has been raised and not yet serviced.
    #[inline]
    pub fn exception_raised(&self) -> bool {
        self.exception_raised.load(Ordering::Acquire)
    }

    /// Sets or clears the exception-raised flag.
    #[inline]
    pub fn set_exception_raised(&self, raised: bool) {
        self.exception_raised.store(raised, Ordering::Release);
    }

    /// Returns `true` if the current instruction wrote r15.
    #[inline]
    pub fn jumped(&self) -> bool {
        self.jumped.load(Ordering::Acquire)
    }

    /// Sets or clears the jumped flag.
    #[inline]
    pub fn set_jumped(&self, jumped: bool) {
        self.jumped.store(jumped, Ordering::Release);
    }

    /// Returns `true` if exception vectors live at `0xFFFF0000`.
    #[inline]
    pub fn high_vectors(&self) -> bool {
        self.high_vectors.load(Ordering::Acquire)
    }

    /// Selects the high (`true`) or low (`false`) vector base.
    #[inline]
    pub fn set_high_vectors(&self, high: bool) {
        self.high_vectors.store(high, Ordering::Release);
    }
}
