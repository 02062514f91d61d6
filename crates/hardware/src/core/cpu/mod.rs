//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which owns the entire processor state.
//! It coordinates the following:
//! 1. **State Management:** The banked register file, the pending exception set and the
//!    shared signal flags.
//! 2. **Coprocessor Bus:** Fifteen extension slots plus the built-in system control
//!    coprocessor in slot 15.
//! 3. **Memory Path:** The MMU and the bus it translates onto.
//! 4. **System Integration:** The interrupt controller sampled once per step.

/// Coprocessor register transfers (MCR/MRC/CDP) and cp15 side effects.
pub mod coproc;

/// Instruction executor.
pub mod exec;

/// Step loop: dispatch, interrupt sampling, fetch, decode, execute.
pub mod execution;

/// Translated loads and stores.
pub mod memory;

/// Exception raising and servicing.
pub mod trap;

use std::fmt;
use std::sync::Arc;

use crate::common::constants::{NUM_COPROCESSORS, REG_PC, SYSTEM_CONTROL_COPROCESSOR};
use crate::common::{CoreError, CoreResult, CoreSignals, RegisterFile};
use crate::config::Config;
use crate::core::arch::coproc::Coprocessor;
use crate::core::arch::cp15::SystemControl;
use crate::core::arch::{ExceptionKind, PendingExceptions};
use crate::core::units::mmu::Mmu;
use crate::soc::System;
use crate::soc::traits::{Bus, InterruptController};
use crate::stats::SimStats;

pub use self::exec::ExecOutcome;
pub use self::execution::StepOutcome;

/// Number of extension coprocessor slots (0-14).
const EXTENSION_SLOTS: usize = NUM_COPROCESSORS - 1;

/// Main CPU structure containing all processor state and components.
pub struct Cpu {
    /// Banked general-purpose registers, CPSR and SPSRs.
    pub regs: RegisterFile,
    /// System control coprocessor (slot 15).
    pub cp15: SystemControl,
    /// Memory Management Unit.
    pub mmu: Mmu,
    /// Raised, not yet serviced, exceptions.
    pub pending: PendingExceptions,
    /// Execution statistics.
    pub stats: SimStats,
    /// Log every executed instruction at `trace` level.
    pub trace: bool,

    coprocessors: [Option<Box<dyn Coprocessor>>; EXTENSION_SLOTS],
    signals: Arc<CoreSignals>,
    bus: Box<dyn Bus>,
    interrupts: Arc<dyn InterruptController>,
}

impl Cpu {
    /// Creates a new CPU attached to a system built from the same configuration.
    ///
    /// # Arguments
    ///
    /// * `system` - RAM and interrupt lines.
    /// * `config` - Start state and cp15 identification.
    ///
    /// # Returns
    ///
    /// A core in the reset state: Supervisor mode, IRQ and FIQ masked, PC at
    /// `config.general.start_pc`.
    pub fn new(system: System, config: &Config) -> Self {
        Self::with_parts(Box::new(system.ram), system.interrupts, config)
    }

    /// Creates a new CPU on an arbitrary bus and interrupt controller.
    ///
    /// # Arguments
    ///
    /// * `bus` - Physical memory.
    /// * `interrupts` - IRQ/FIQ source.
    /// * `config` - Start state and cp15 identification.
    pub fn with_parts(
        bus: Box<dyn Bus>,
        interrupts: Arc<dyn InterruptController>,
        config: &Config,
    ) -> Self {
        let signals = Arc::new(CoreSignals::new());
        let mut regs = RegisterFile::new(Arc::clone(&signals));
        regs.write_raw(REG_PC, config.general.start_pc);
        regs.set_thumb(config.general.start_thumb);

        let cp15 = SystemControl::new(
            config.cpu.main_id,
            config.cpu.cache_type,
            config.general.high_vectors,
        );
        signals.set_high_vectors(cp15.high_vectors());

        let mut mmu = Mmu::new();
        mmu.configure(cp15.mmu_config());

        Self {
            regs,
            cp15,
            mmu,
            pending: PendingExceptions::new(),
            stats: SimStats::default(),
            trace: config.general.trace_instructions,
            coprocessors: std::array::from_fn(|_| None),
            signals,
            bus,
            interrupts,
        }
    }

    /// Installs a coprocessor in an extension slot.
    ///
    /// # Arguments
    ///
    /// * `number` - Slot number, 0-14.
    /// * `coprocessor` - The device; replaces any previous occupant.
    ///
    /// # Errors
    ///
    /// [`CoreError::UnknownCoprocessor`] for slot 15 (reserved for cp15) or above.
    pub fn attach_coprocessor(
        &mut self,
        number: u32,
        coprocessor: Box<dyn Coprocessor>,
    ) -> CoreResult<()> {
        if number == SYSTEM_CONTROL_COPROCESSOR || number as usize >= EXTENSION_SLOTS {
            return Err(CoreError::UnknownCoprocessor { number });
        }
        tracing::debug!(number, name = coprocessor.name(), "coprocessor attached");
        self.coprocessors[number as usize] = Some(coprocessor);
        Ok(())
    }

    /// Flags shared with interrupt sources and debuggers.
    pub fn signals(&self) -> &Arc<CoreSignals> {
        &self.signals
    }

    /// The bus the core translates onto.
    pub fn bus(&self) -> &dyn Bus {
        self.bus.as_ref()
    }

    /// Mutable access to the bus (for loaders and debuggers).
    pub fn bus_mut(&mut self) -> &mut dyn Bus {
        self.bus.as_mut()
    }

    /// Highest-priority outstanding exception, if any.
    pub fn pending_exception(&self) -> Option<ExceptionKind> {
        self.pending.outstanding()
    }

    /// Logs the active register bank and the exception state at debug level.
    pub fn dump_state(&self) {
        tracing::debug!(
            pc = format_args!("{:#010x}", self.regs.pc()),
            mode = %self.regs.mode(),
            thumb = self.regs.is_thumb(),
            pending = ?self.pending.outstanding(),
            "cpu state"
        );
        self.regs.dump();
    }
}

impl fmt::Debug for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots: Vec<usize> = self
            .coprocessors
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|_| i))
            .collect();
        f.debug_struct("Cpu")
            .field("regs", &self.regs)
            .field("mmu", &self.mmu)
            .field("pending", &self.pending)
            .field("coprocessors", &slots)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}
