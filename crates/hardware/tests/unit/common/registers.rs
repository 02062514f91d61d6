//! Register File Unit Tests.
//!
//! Verifies the alias table (which registers are shared between which modes), the
//! pipeline view of r15, CPSR writes and SPSR access.

use std::sync::Arc;

use armsim_core::common::{CoreError, CoreSignals, RegisterFile};
use armsim_core::core::arch::{Bank, ProcessorMode, Psr};
use proptest::prelude::*;

const ALL_MODES: [ProcessorMode; 7] = [
    ProcessorMode::User,
    ProcessorMode::Fiq,
    ProcessorMode::Irq,
    ProcessorMode::Supervisor,
    ProcessorMode::Abort,
    ProcessorMode::Undefined,
    ProcessorMode::System,
];

fn regs() -> (RegisterFile, Arc<CoreSignals>) {
    let signals = Arc::new(CoreSignals::new());
    (RegisterFile::new(Arc::clone(&signals)), signals)
}

fn switch(regs: &mut RegisterFile, mode: ProcessorMode) {
    let cpsr = regs.cpsr().with_mode(mode);
    regs.set_cpsr(cpsr).expect("valid mode");
}

// ══════════════════════════════════════════════════════════
// 1. Reset state
// ══════════════════════════════════════════════════════════

#[test]
fn reset_state_is_supervisor_with_interrupts_masked() {
    let (regs, _) = regs();
    assert_eq!(regs.mode(), ProcessorMode::Supervisor);
    assert_eq!(regs.bank(), Bank::Supervisor);
    assert!(regs.cpsr().irq_disabled());
    assert!(regs.cpsr().fiq_disabled());
    assert!(!regs.is_thumb());
    assert_eq!(regs.pc(), 0);
}

// ══════════════════════════════════════════════════════════
// 2. Banking
// ══════════════════════════════════════════════════════════

#[test]
fn svc_stack_pointer_does_not_alias_user_stack_pointer() {
    let (mut regs, _) = regs();
    regs.set_cpsr(Psr(0x10)).expect("user mode");
    regs.write(13, 0x1000);

    regs.set_cpsr(Psr(0x13)).expect("svc mode");
    assert_eq!(regs.bank(), Bank::Supervisor);
    regs.write(13, 0x2000);

    regs.set_cpsr(Psr(0x10)).expect("user mode");
    assert_eq!(regs.read(13), 0x1000);
}

#[test]
fn fiq_banks_r8_to_r14() {
    let (mut regs, _) = regs();
    switch(&mut regs, ProcessorMode::User);
    for idx in 8..=14 {
        regs.write(idx, idx as u32);
    }
    switch(&mut regs, ProcessorMode::Fiq);
    for idx in 8..=14 {
        regs.write(idx, 0xF00 + idx as u32);
    }
    switch(&mut regs, ProcessorMode::User);
    for idx in 8..=14 {
        assert_eq!(regs.read(idx), idx as u32, "r{idx}");
    }
}

#[test]
fn irq_shares_r8_to_r12_with_user() {
    let (mut regs, _) = regs();
    switch(&mut regs, ProcessorMode::User);
    regs.write(10, 0xAAAA);
    switch(&mut regs, ProcessorMode::Irq);
    assert_eq!(regs.read(10), 0xAAAA);
    regs.write(10, 0xBBBB);
    switch(&mut regs, ProcessorMode::User);
    assert_eq!(regs.read(10), 0xBBBB);
}

#[test]
fn system_mode_uses_the_user_bank() {
    let (mut regs, _) = regs();
    switch(&mut regs, ProcessorMode::System);
    assert_eq!(regs.bank(), Bank::User);
    regs.write(13, 0x1234);
    regs.write(14, 0x5678);
    switch(&mut regs, ProcessorMode::User);
    assert_eq!(regs.read(13), 0x1234);
    assert_eq!(regs.read(14), 0x5678);
}

#[test]
fn banked_access_reaches_another_mode() {
    let (mut regs, _) = regs();
    regs.write_banked(Bank::User, 13, 0xCAFE);
    assert_eq!(regs.mode(), ProcessorMode::Supervisor);
    assert_ne!(regs.read(13), 0xCAFE);
    assert_eq!(regs.read_banked(Bank::User, 13), 0xCAFE);
    switch(&mut regs, ProcessorMode::User);
    assert_eq!(regs.read(13), 0xCAFE);
}

proptest! {
    #[test]
    fn writes_in_one_bank_never_leak_into_another(
        a in 0usize..7,
        b in 0usize..7,
        idx in 0usize..15,
        before in any::<u32>(),
        after in any::<u32>(),
    ) {
        let (mut regs, _) = regs();
        let (mode_a, mode_b) = (ALL_MODES[a], ALL_MODES[b]);

        switch(&mut regs, mode_a);
        regs.write(idx, before);
        switch(&mut regs, mode_b);
        regs.write(idx, after);
        switch(&mut regs, mode_a);

        let fiq = mode_a == ProcessorMode::Fiq || mode_b == ProcessorMode::Fiq;
        let shared = idx < 8 || mode_a.bank() == mode_b.bank() || (idx < 13 && !fiq);
        let expected = if shared { after } else { before };
        prop_assert_eq!(regs.read(idx), expected);
    }
}

// ══════════════════════════════════════════════════════════
// 3. Program counter
// ══════════════════════════════════════════════════════════

#[test]
fn pc_reads_eight_ahead_in_arm_and_four_in_thumb() {
    let (mut regs, _) = regs();
    regs.write_raw(15, 0x100);
    assert_eq!(regs.read(15), 0x108);
    regs.set_thumb(true);
    assert_eq!(regs.read(15), 0x104);
    assert_eq!(regs.pc(), 0x100);
}

#[test]
fn pc_write_marks_jump_but_raw_write_does_not() {
    let (mut regs, signals) = regs();
    regs.write_raw(15, 0x40);
    assert!(!signals.jumped());
    regs.write(15, 0x80);
    assert!(signals.jumped());
    assert_eq!(regs.pc(), 0x80);
}

// ══════════════════════════════════════════════════════════
// 4. Status registers
// ══════════════════════════════════════════════════════════

#[test]
fn malformed_mode_is_rejected_and_cpsr_kept() {
    let (mut regs, _) = regs();
    let before = regs.cpsr();
    let err = regs.set_cpsr(Psr(0x15)).unwrap_err();
    assert_eq!(err, CoreError::InvalidMode { bits: 0x15 });
    assert_eq!(regs.cpsr(), before);
}

#[test]
fn spsr_is_unavailable_in_user_and_system() {
    let (mut regs, _) = regs();
    for mode in [ProcessorMode::User, ProcessorMode::System] {
        switch(&mut regs, mode);
        assert_eq!(regs.spsr().unwrap_err(), CoreError::NoSpsr { mode });
        assert!(regs.set_spsr(Psr(0x10)).is_err());
    }
}

#[test]
fn each_exception_mode_has_its_own_spsr() {
    let (mut regs, _) = regs();
    let privileged = [
        ProcessorMode::Fiq,
        ProcessorMode::Irq,
        ProcessorMode::Supervisor,
        ProcessorMode::Abort,
        ProcessorMode::Undefined,
    ];
    for (i, mode) in privileged.iter().enumerate() {
        switch(&mut regs, *mode);
        regs.set_spsr(Psr(0x10 | (i as u32) << 28)).expect("spsr");
    }
    for (i, mode) in privileged.iter().enumerate() {
        switch(&mut regs, *mode);
        assert_eq!(regs.spsr().expect("spsr").bits(), 0x10 | (i as u32) << 28);
    }
}
