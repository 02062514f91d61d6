//! Banked Register File.
//!
//! This module provides the `RegisterFile`, the single owner of the ARM general-purpose
//! registers, the PC, the CPSR and the five SPSRs. It provides:
//! 1. **Flat Storage:** Every physical register cell lives in one array.
//! 2. **Alias Table:** A per-bank map from architectural register number (r0-r15, SPSR)
//!    to physical cell, built once at compile time. r0-r7 and the PC are shared by
//!    every bank, r8-r12 by every bank except FIQ.
//! 3. **Bank Selection:** The active bank is derived from the CPSR mode field and is
//!    re-resolved by every CPSR write, which is the only way to change it.
//! 4. **Pipeline View of r15:** Operand reads of the PC see the fetch address plus 8 (ARM)
//!    or 4 (Thumb); writes mark the step as having jumped.

use std::fmt::Write as _;
use std::sync::Arc;

use super::constants::{ARM_PC_OFFSET, NUM_GPRS, REG_PC, THUMB_PC_OFFSET};
use super::error::{CoreError, CoreResult};
use super::signals::CoreSignals;
use crate::core::arch::mode::{Bank, ProcessorMode};
use crate::core::arch::psr::{Flags, Psr};

/// Architectural slot index of the SPSR in a bank row.
const SPSR_SLOT: usize = 16;

/// Slots per bank: r0-r15 plus SPSR.
const SLOTS: usize = 17;

/// Physical cell layout.
const CELL_LOW: usize = 0; // r0-r7, shared
const CELL_HIGH_USR: usize = 8; // r8-r12, all banks but FIQ
const CELL_HIGH_FIQ: usize = 13; // r8-r12, FIQ
const CELL_SP_LR: usize = 18; // r13/r14 pairs, one per bank
const CELL_PC: usize = 30;
const CELL_SPSR: usize = 31; // one per bank except User
const NUM_CELLS: usize = 36;

/// Per-bank map from architectural slot to physical cell.
type AliasTable = [[Option<usize>; SLOTS]; Bank::COUNT];

const fn build_alias_table() -> AliasTable {
    let mut table = [[None; SLOTS]; Bank::COUNT];
    let mut bank = 0;
    while bank < Bank::COUNT {
        let mut reg = 0;
        while reg < 8 {
            table[bank][reg] = Some(CELL_LOW + reg);
            reg += 1;
        }
        while reg < 13 {
            let base = if bank == Bank::Fiq as usize {
                CELL_HIGH_FIQ
            } else {
                CELL_HIGH_USR
            };
            table[bank][reg] = Some(base + reg - 8);
            reg += 1;
        }
        table[bank][13] = Some(CELL_SP_LR + bank * 2);
        table[bank][14] = Some(CELL_SP_LR + bank * 2 + 1);
        table[bank][REG_PC] = Some(CELL_PC);
        table[bank][SPSR_SLOT] = if bank == Bank::User as usize {
            None
        } else {
            Some(CELL_SPSR + bank - 1)
        };
        bank += 1;
    }
    table
}

static ALIAS: AliasTable = build_alias_table();

/// Banked ARM register file with CPSR.
#[derive(Debug)]
pub struct RegisterFile {
    cells: [u32; NUM_CELLS],
    cpsr: Psr,
    bank: Bank,
    signals: Arc<CoreSignals>,
}

impl RegisterFile {
    /// Creates a register file in the reset state (Supervisor, IRQ/FIQ masked, ARM state).
    ///
    /// # Arguments
    ///
    /// * `signals` - Shared flags; PC writes set `jumped` here.
    pub fn new(signals: Arc<CoreSignals>) -> Self {
        Self {
            cells: [0; NUM_CELLS],
            cpsr: Psr::RESET,
            bank: ProcessorMode::Supervisor.bank(),
            signals,
        }
    }

    #[inline(always)]
    fn cell(&self, bank: Bank, idx: usize) -> usize {
        // r0-r15 are present in every row.
        ALIAS[bank.index()][idx].unwrap_or(CELL_PC)
    }

    /// Returns the bank currently selected by the CPSR mode.
    #[inline(always)]
    pub const fn bank(&self) -> Bank {
        self.bank
    }

    /// Returns the current processor mode.
    #[inline]
    pub fn mode(&self) -> ProcessorMode {
        self.cpsr.mode().unwrap_or(ProcessorMode::Supervisor)
    }

    /// Returns `true` when executing Thumb code.
    #[inline(always)]
    pub const fn is_thumb(&self) -> bool {
        self.cpsr.thumb()
    }

    /// Offset applied to the fetch address when the PC is read as an operand.
    #[inline(always)]
    pub const fn pc_offset(&self) -> u32 {
        if self.cpsr.thumb() {
            THUMB_PC_OFFSET
        } else {
            ARM_PC_OFFSET
        }
    }

    /// Reads a register as an instruction operand.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register number (0-15).
    ///
    /// # Returns
    ///
    /// The register value; r15 reads as the fetch address plus the pipeline offset.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == REG_PC {
            self.cells[CELL_PC].wrapping_add(self.pc_offset())
        } else {
            self.cells[self.cell(self.bank, idx)]
        }
    }

    /// Writes a register as an instruction result.
    ///
    /// Writing r15 redirects the fetch address and marks the step as jumped.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx == REG_PC {
            self.cells[CELL_PC] = val;
            self.signals.set_jumped(true);
        } else {
            let cell = self.cell(self.bank, idx);
            self.cells[cell] = val;
        }
    }

    /// Reads a register without the PC pipeline offset.
    #[inline]
    pub fn read_raw(&self, idx: usize) -> u32 {
        self.cells[self.cell(self.bank, idx)]
    }

    /// Writes a register without touching the jumped flag.
    #[inline]
    pub fn write_raw(&mut self, idx: usize, val: u32) {
        let cell = self.cell(self.bank, idx);
        self.cells[cell] = val;
    }

    /// Returns the fetch address of the current instruction.
    #[inline(always)]
    pub const fn pc(&self) -> u32 {
        self.cells[CELL_PC]
    }

    /// Reads a register from an explicit bank (LDM/STM with the S bit, debuggers).
    pub fn read_banked(&self, bank: Bank, idx: usize) -> u32 {
        if idx == REG_PC {
            return self.read(REG_PC);
        }
        self.cells[self.cell(bank, idx)]
    }

    /// Writes a register in an explicit bank.
    pub fn write_banked(&mut self, bank: Bank, idx: usize, val: u32) {
        if idx == REG_PC {
            self.write(REG_PC, val);
            return;
        }
        let cell = self.cell(bank, idx);
        self.cells[cell] = val;
    }

    /// Returns the current program status register.
    #[inline(always)]
    pub const fn cpsr(&self) -> Psr {
        self.cpsr
    }

    /// Replaces the CPSR and re-selects the register bank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidMode`] if the mode field names no mode; the CPSR is
    /// left unchanged in that case.
    pub fn set_cpsr(&mut self, value: Psr) -> CoreResult<()> {
        let mode = value.mode().ok_or_else(|| CoreError::InvalidMode {
            bits: value.mode_bits(),
        })?;
        let previous = self.mode();
        self.cpsr = value;
        self.bank = mode.bank();
        if previous != mode {
            tracing::debug!(from = %previous, to = %mode, "mode switch");
        }
        Ok(())
    }

    /// Replaces the condition flags, leaving every other CPSR bit alone.
    #[inline]
    pub fn set_flags(&mut self, flags: Flags) {
        self.cpsr = self.cpsr.with_flags(flags);
    }

    /// Sets the Q flag.
    #[inline]
    pub fn set_q(&mut self) {
        self.cpsr = self.cpsr.with_q(true);
    }

    /// Switches between ARM and Thumb state.
    #[inline]
    pub fn set_thumb(&mut self, thumb: bool) {
        self.cpsr = self.cpsr.with_thumb(thumb);
    }

    /// Reads the SPSR of the active bank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoSpsr`] in User and System modes.
    pub fn spsr(&self) -> CoreResult<Psr> {
        ALIAS[self.bank.index()][SPSR_SLOT]
            .map(|cell| Psr(self.cells[cell]))
            .ok_or_else(|| CoreError::NoSpsr { mode: self.mode() })
    }

    /// Writes the SPSR of the active bank.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoSpsr`] in User and System modes.
    pub fn set_spsr(&mut self, value: Psr) -> CoreResult<()> {
        let cell = ALIAS[self.bank.index()][SPSR_SLOT]
            .ok_or_else(|| CoreError::NoSpsr { mode: self.mode() })?;
        self.cells[cell] = value.bits();
        Ok(())
    }

    /// Logs every visible register at debug level.
    pub fn dump(&self) {
        let mut line = String::new();
        for idx in 0..NUM_GPRS {
            let value = if idx == REG_PC {
                self.pc()
            } else {
                self.read_raw(idx)
            };
            let _ = write!(line, "{}={value:#010x} ", crate::isa::abi::REG_NAMES[idx]);
            if idx % 4 == 3 {
                tracing::debug!("{}", line.trim_end());
                line.clear();
            }
        }
        tracing::debug!("cpsr={:#010x} [{}]", self.cpsr.bits(), self.cpsr);
        if let Ok(spsr) = self.spsr() {
            tracing::debug!("spsr={:#010x} [{}]", spsr.bits(), spsr);
        }
    }
}
