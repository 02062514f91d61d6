//! Top-level `System` construction.
//!
//! Builds the collaborators the core runs against from configuration:
//! 1. **RAM:** A [`Ram`] bus sized and placed per `memory`, with the optional read-only window.
//! 2. **Interrupts:** A shared [`InterruptLines`] pair that outside code asserts.

use std::sync::Arc;

use crate::config::Config;
use crate::soc::interrupts::InterruptLines;
use crate::soc::memory::Ram;

/// Backing system for a core: RAM and interrupt lines.
#[derive(Debug)]
pub struct System {
    /// Main memory; becomes the core's bus.
    pub ram: Ram,
    /// Interrupt lines; keep a clone to assert interrupts after the core is built.
    pub interrupts: Arc<InterruptLines>,
}

impl System {
    /// Builds a system from configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Provides RAM base, size and read-only window.
    pub fn new(config: &Config) -> Self {
        let mut ram = Ram::new(config.memory.ram_base, config.memory.ram_size);
        ram.set_read_only(config.memory.rom_size);
        Self {
            ram,
            interrupts: Arc::new(InterruptLines::new()),
        }
    }

    /// Copies a binary image into RAM at a physical address.
    ///
    /// # Returns
    ///
    /// `false` if the image does not fit.
    pub fn load_binary_at(&mut self, data: &[u8], addr: u32) -> bool {
        self.ram.load(addr, data)
    }
}
