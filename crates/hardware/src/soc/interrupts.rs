//! Level-sensitive interrupt lines.
//!
//! `InterruptLines` is the default [`InterruptController`]. Line state lives in atomics
//! so the step loop samples it without locking; the mutex and condition variable exist
//! only to park a core executing wait-for-interrupt until some line is asserted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, PoisonError};

use crate::soc::traits::{InterruptController, IrqLine};

/// IRQ and FIQ input lines shared between the core and interrupt sources.
#[derive(Debug, Default)]
pub struct InterruptLines {
    irq: AtomicBool,
    fiq: AtomicBool,
    messages: Mutex<[String; 2]>,
    wake_lock: Mutex<()>,
    wake: Condvar,
}

impl InterruptLines {
    /// Creates both lines deasserted.
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&self, line: IrqLine) -> &AtomicBool {
        match line {
            IrqLine::Irq => &self.irq,
            IrqLine::Fiq => &self.fiq,
        }
    }

    /// Asserts `line` and wakes a waiting core.
    ///
    /// # Arguments
    ///
    /// * `line` - Line to drive.
    /// * `source` - Description reported through [`InterruptController::message`].
    pub fn assert(&self, line: IrqLine, source: impl Into<String>) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)[line as usize] = source.into();
        self.line(line).store(true, Ordering::Release);
        let _guard = self.wake_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.wake.notify_all();
    }

    /// Deasserts `line`.
    pub fn deassert(&self, line: IrqLine) {
        self.line(line).store(false, Ordering::Release);
    }

    fn any_asserted(&self) -> bool {
        IrqLine::ALL.into_iter().any(|line| self.is_asserted(line))
    }
}

impl InterruptController for InterruptLines {
    fn is_asserted(&self, line: IrqLine) -> bool {
        self.line(line).load(Ordering::Acquire)
    }

    fn message(&self, line: IrqLine) -> String {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)[line as usize]
            .clone()
    }

    fn wait_for_interrupt(&self) {
        let mut guard = self.wake_lock.lock().unwrap_or_else(PoisonError::into_inner);
        while !self.any_asserted() {
            guard = self
                .wake
                .wait(guard)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}
