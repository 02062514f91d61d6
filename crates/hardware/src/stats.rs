//! Execution statistics collection and reporting.
//!
//! This module tracks counters for the step loop. It provides:
//! 1. **Throughput:** Steps taken, instructions retired and host-side MIPS.
//! 2. **Instruction mix:** Counts by group (ALU, multiply, load, store, branch, system).
//! 3. **Exceptions:** Exceptions taken per kind and MMU faults.

use std::time::Instant;

use crate::core::arch::ExceptionKind;

/// Instruction group used for the instruction-mix counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionClass {
    /// Data processing, status transfer.
    Alu,
    /// Multiplies.
    Multiply,
    /// Loads, including block loads.
    Load,
    /// Stores, including block stores and swaps.
    Store,
    /// Branches and interworking branches.
    Branch,
    /// Coprocessor transfers, SWI, BKPT.
    System,
}

/// Execution statistics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Steps taken (including steps that only serviced an exception).
    pub steps: u64,
    /// Instructions that passed their condition and completed.
    pub instructions_retired: u64,
    /// Instructions skipped because their condition failed.
    pub condition_failed: u64,

    /// Data processing and status transfer instructions retired.
    pub inst_alu: u64,
    /// Multiply instructions retired.
    pub inst_multiply: u64,
    /// Load instructions retired.
    pub inst_load: u64,
    /// Store instructions retired.
    pub inst_store: u64,
    /// Branch instructions retired.
    pub inst_branch: u64,
    /// System instructions retired.
    pub inst_system: u64,

    /// Exceptions serviced, indexed by `ExceptionKind as usize`.
    pub exceptions_taken: [u64; ExceptionKind::COUNT],
    /// Translation faults reported by the MMU.
    pub mmu_faults: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            steps: 0,
            instructions_retired: 0,
            condition_failed: 0,
            inst_alu: 0,
            inst_multiply: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_system: 0,
            exceptions_taken: [0; ExceptionKind::COUNT],
            mmu_faults: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "exceptions"];

impl SimStats {
    /// Counts one retired instruction of the given class.
    pub fn record_retired(&mut self, class: InstructionClass) {
        self.instructions_retired += 1;
        let counter = match class {
            InstructionClass::Alu => &mut self.inst_alu,
            InstructionClass::Multiply => &mut self.inst_multiply,
            InstructionClass::Load => &mut self.inst_load,
            InstructionClass::Store => &mut self.inst_store,
            InstructionClass::Branch => &mut self.inst_branch,
            InstructionClass::System => &mut self.inst_system,
        };
        *counter += 1;
    }

    /// Counts one serviced exception.
    pub fn record_exception(&mut self, kind: ExceptionKind) {
        self.exceptions_taken[kind as usize] += 1;
    }

    /// Total exceptions serviced across all kinds.
    pub fn total_exceptions(&self) -> u64 {
        self.exceptions_taken.iter().sum()
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Arguments
    ///
    /// * `sections` - Names from [`STATS_SECTIONS`], or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64();
        let instr = self.instructions_retired.max(1) as f64;

        if want("summary") {
            let mips = if seconds > 0.0 {
                (self.instructions_retired as f64 / seconds) / 1_000_000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("ARM CORE EXECUTION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {:.4} s", seconds);
            println!("sim_steps                {}", self.steps);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_cond_failed          {}", self.condition_failed);
            println!("sim_mips                 {:.2}", mips);
            println!("----------------------------------------------------------");
        }
        if want("instruction_mix") {
            let row = |name: &str, count: u64| {
                println!(
                    "  {:<22} {} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / instr) * 100.0
                );
            };
            println!("INSTRUCTION MIX");
            row("op.alu", self.inst_alu);
            row("op.multiply", self.inst_multiply);
            row("op.load", self.inst_load);
            row("op.store", self.inst_store);
            row("op.branch", self.inst_branch);
            row("op.system", self.inst_system);
            println!("----------------------------------------------------------");
        }
        if want("exceptions") {
            println!("EXCEPTIONS");
            for kind in ExceptionKind::PRIORITY_ORDER {
                println!(
                    "  {:<22} {}",
                    kind.name(),
                    self.exceptions_taken[kind as usize]
                );
            }
            println!("  {:<22} {}", "mmu faults", self.mmu_faults);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
