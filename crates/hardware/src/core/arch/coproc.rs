//! Coprocessor bus contract.
//!
//! This module defines the interface between the core and the sixteen coprocessor slots.
//! It provides:
//! 1. **Register Ids:** The composite CRn:opcode1:CRm:opcode2 key used by MCR/MRC.
//! 2. **Slot Contract:** The [`Coprocessor`] trait implemented by cp15 and by any
//!    embedder-supplied extension.

use crate::common::error::{CoreError, CoreResult};

/// Composite coprocessor register id: CRn in bits 15:12, opcode1 in 11:8, CRm in 7:4,
/// opcode2 in 3:0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoprocessorRegId(pub u16);

impl CoprocessorRegId {
    /// Builds an id from its four fields.
    ///
    /// # Arguments
    ///
    /// * `crn` - Primary register (0-15).
    /// * `opcode1` - First opcode (0-7).
    /// * `crm` - Secondary register (0-15).
    /// * `opcode2` - Second opcode (0-7).
    pub const fn new(crn: u32, opcode1: u32, crm: u32, opcode2: u32) -> Self {
        Self((((crn & 0xF) << 12) | ((opcode1 & 0xF) << 8) | ((crm & 0xF) << 4) | (opcode2 & 0xF)) as u16)
    }

    /// Extracts the id from an MCR/MRC/CDP instruction word.
    pub const fn from_instruction(word: u32) -> Self {
        Self::new((word >> 16) & 0xF, (word >> 21) & 0x7, word & 0xF, (word >> 5) & 0x7)
    }

    /// Primary register number.
    pub const fn crn(self) -> u32 {
        (self.0 as u32 >> 12) & 0xF
    }

    /// First opcode.
    pub const fn opcode1(self) -> u32 {
        (self.0 as u32 >> 8) & 0xF
    }

    /// Secondary register number.
    pub const fn crm(self) -> u32 {
        (self.0 as u32 >> 4) & 0xF
    }

    /// Second opcode.
    pub const fn opcode2(self) -> u32 {
        self.0 as u32 & 0xF
    }
}

impl std::fmt::Display for CoprocessorRegId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "c{}, {}, c{}, {}",
            self.crn(),
            self.opcode1(),
            self.crm(),
            self.opcode2()
        )
    }
}

/// A device occupying one coprocessor slot.
///
/// The core validates every id with [`is_valid_id`](Coprocessor::is_valid_id) before
/// calling the accessors; an invalid id is a fatal host error.
pub trait Coprocessor: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str {
        "coprocessor"
    }

    /// Returns `true` if `id` names a register this coprocessor implements.
    fn is_valid_id(&self, id: CoprocessorRegId) -> bool;

    /// Reads a register (MRC).
    fn get_register(&self, id: CoprocessorRegId) -> u32;

    /// Writes a register (MCR).
    fn set_register(&mut self, id: CoprocessorRegId, value: u32);

    /// Executes a CDP data operation.
    ///
    /// # Errors
    ///
    /// The default implementation reports the instruction as unsupported.
    fn data_operation(&mut self, word: u32) -> CoreResult<()> {
        Err(CoreError::Unsupported {
            word,
            what: "coprocessor data operation",
        })
    }
}
