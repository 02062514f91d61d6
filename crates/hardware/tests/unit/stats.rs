//! Statistics collection through the step loop.

use armsim_core::core::arch::ExceptionKind;
use armsim_core::stats::{InstructionClass, STATS_SECTIONS, SimStats};

use crate::common::builder::arm;
use crate::common::harness::{PROGRAM_BASE, TestContext};

#[test]
fn record_retired_counts_by_class() {
    let mut stats = SimStats::default();
    stats.record_retired(InstructionClass::Alu);
    stats.record_retired(InstructionClass::Alu);
    stats.record_retired(InstructionClass::Load);
    stats.record_retired(InstructionClass::Branch);
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.inst_alu, 2);
    assert_eq!(stats.inst_load, 1);
    assert_eq!(stats.inst_branch, 1);
    assert_eq!(stats.inst_store, 0);
}

#[test]
fn exceptions_are_counted_per_kind() {
    let mut stats = SimStats::default();
    stats.record_exception(ExceptionKind::Irq);
    stats.record_exception(ExceptionKind::Irq);
    stats.record_exception(ExceptionKind::DataAbort);
    assert_eq!(stats.exceptions_taken[ExceptionKind::Irq as usize], 2);
    assert_eq!(stats.total_exceptions(), 3);
}

#[test]
fn sections_are_named() {
    assert_eq!(STATS_SECTIONS, &["summary", "instruction_mix", "exceptions"]);
    SimStats::default().print_sections(&["summary".to_string()]);
}

#[test]
fn step_loop_feeds_the_counters() {
    let program = [
        arm::mov_imm(0, 1),
        arm::with_cond(arm::mov_imm(1, 2), 0x0), // EQ, fails with Z clear
        arm::str_imm(0, 13, 0),
        arm::mul(2, 0, 0),
    ];
    let mut ctx = TestContext::new().load_arm(PROGRAM_BASE, &program);
    ctx.set_reg(13, 0x9000);
    ctx.run(4);

    let stats = &ctx.cpu.stats;
    assert_eq!(stats.steps, 4);
    assert_eq!(stats.instructions_retired, 3);
    assert_eq!(stats.condition_failed, 1);
    assert_eq!(stats.inst_alu, 1);
    assert_eq!(stats.inst_store, 1);
    assert_eq!(stats.inst_multiply, 1);
}
