//! RAM bus tests: little-endian layout, probing and the read-only window.

use armsim_core::common::{AccessSize, PhysAddr};
use armsim_core::config::Config;
use armsim_core::soc::traits::Bus;
use armsim_core::soc::{Ram, System};

#[test]
fn words_are_little_endian() {
    let mut ram = Ram::new(0, 64);
    ram.write32(PhysAddr::new(8), 0x1122_3344);
    assert_eq!(ram.read8(PhysAddr::new(8)), 0x44);
    assert_eq!(ram.read8(PhysAddr::new(11)), 0x11);
    assert_eq!(ram.read16(PhysAddr::new(10)), 0x1122);
}

#[test]
fn probes_respect_base_and_size() {
    let ram = Ram::new(0x1000, 0x100);
    assert!(ram.try_read(PhysAddr::new(0x1000), AccessSize::Word));
    assert!(ram.try_read(PhysAddr::new(0x10FC), AccessSize::Word));
    assert!(!ram.try_read(PhysAddr::new(0x10FE), AccessSize::Word));
    assert!(ram.try_read(PhysAddr::new(0x10FF), AccessSize::Byte));
    assert!(!ram.try_read(PhysAddr::new(0x0FFF), AccessSize::Byte));
    assert!(!ram.try_read(PhysAddr::new(0x1100), AccessSize::Byte));
}

#[test]
fn read_only_window_fails_write_probes_only() {
    let mut ram = Ram::new(0, 0x100);
    ram.set_read_only(0x40);
    assert!(ram.try_read(PhysAddr::new(0x20), AccessSize::Word));
    assert!(!ram.try_write(PhysAddr::new(0x20), AccessSize::Word));
    assert!(ram.try_write(PhysAddr::new(0x40), AccessSize::Word));
}

#[test]
fn load_ignores_read_only_and_rejects_overflow() {
    let mut ram = Ram::new(0, 16);
    ram.set_read_only(16);
    assert!(ram.load_words(0, &[0xDEAD_BEEF, 0x0BAD_F00D]));
    assert_eq!(ram.read32(PhysAddr::new(4)), 0x0BAD_F00D);
    assert!(!ram.load(12, &[0; 8]));
    assert_eq!(ram.read32(PhysAddr::new(12)), 0);
}

#[test]
fn system_builds_ram_from_config() {
    let mut config = Config::default();
    config.memory.ram_base = 0x2000_0000;
    config.memory.ram_size = 0x1000;
    config.memory.rom_size = 0x100;
    let mut system = System::new(&config);
    assert_eq!(system.ram.base(), 0x2000_0000);
    assert_eq!(system.ram.size(), 0x1000);
    assert!(!system.ram.try_write(PhysAddr::new(0x2000_0000), AccessSize::Byte));
    assert!(system.load_binary_at(&[1, 2, 3, 4], 0x2000_0010));
    assert_eq!(system.ram.read32(PhysAddr::new(0x2000_0010)), 0x0403_0201);
    assert!(!system.load_binary_at(&[0; 4], 0x1000_0000));
}
