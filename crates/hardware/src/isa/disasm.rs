//! Instruction disassembler.
//!
//! Turns an operation tag and its instruction word into a mnemonic and an operand string
//! for instruction tracing and diagnostics. This is the side-effect-free path of the
//! executor: `execute(op, insn, commit = false)` returns exactly what [`disassemble`]
//! produces.
//!
//! # Usage
//!
//! ```
//! use armsim_core::isa::disasm::disassemble_word;
//! use armsim_core::isa::instruction::InstructionWord;
//!
//! let text = disassemble_word(InstructionWord::arm(0xE2810001), false, 0).unwrap();
//! assert_eq!(text.to_string(), "add r0, r1, #0x1");
//! ```

use std::fmt;

use super::abi::reg_name;
use super::condition::Condition;
use super::decode;
use super::instruction::{InstructionBits, InstructionWord};
use super::op::{ArmOp, OperationId, ShifterForm, Thumb2Op, ThumbOp};
use super::operands::{self, ShiftType};
use crate::common::error::CoreResult;

/// A disassembled instruction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Disassembly {
    /// Mnemonic including condition and `s` suffixes.
    pub mnemonic: String,
    /// Comma-separated operand list (may be empty).
    pub operands: String,
}

impl Disassembly {
    fn new(mnemonic: impl Into<String>, operands: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            operands: operands.into(),
        }
    }
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            f.write_str(&self.mnemonic)
        } else {
            write!(f, "{} {}", self.mnemonic, self.operands)
        }
    }
}

/// Decodes and disassembles an instruction word.
///
/// # Arguments
///
/// * `insn` - The instruction word.
/// * `thumb` - Whether the word is a Thumb encoding.
/// * `address` - Fetch address of the instruction (for branch targets).
///
/// # Errors
///
/// Propagates `CoreError::Unsupported` from the decoder.
pub fn disassemble_word(insn: InstructionWord, thumb: bool, address: u32) -> CoreResult<Disassembly> {
    decode::decode(insn, thumb).map(|op| disassemble(op, insn, address))
}

/// Disassembles a decoded instruction.
///
/// # Arguments
///
/// * `op` - The operation tag returned by the decoder.
/// * `insn` - The instruction word.
/// * `address` - Fetch address of the instruction (for branch targets).
pub fn disassemble(op: OperationId, insn: InstructionWord, address: u32) -> Disassembly {
    match op {
        OperationId::Arm(op) => arm(op, insn.word, address),
        OperationId::Thumb(op) => thumb(op, insn.word, address),
        OperationId::Thumb2(op) => thumb2(op, insn.word, address),
    }
}

fn cond(word: u32) -> &'static str {
    Condition::from_bits(word.cond()).suffix()
}

fn hex(value: u32) -> String {
    format!("#{value:#x}")
}

fn signed_hex(add: bool, value: u32) -> String {
    format!("#{}{value:#x}", if add { "" } else { "-" })
}

fn target(base: u32, offset: i32) -> String {
    format!("{:#x}", base.wrapping_add_signed(offset))
}

fn reg_list(list: u32) -> String {
    let names: Vec<&str> = (0..16)
        .filter(|i| list & (1 << i) != 0)
        .map(reg_name)
        .collect();
    format!("{{{}}}", names.join(", "))
}

fn shifted_register(word: u32) -> String {
    let rm = reg_name(word.rm());
    match operands::immediate_shift(word) {
        (ShiftType::Lsl, 0) => rm.to_string(),
        (ShiftType::Rrx, _) => format!("{rm}, rrx"),
        (kind, amount) => format!("{rm}, {} #{amount}", kind.name()),
    }
}

fn shifter_operand(word: u32, form: ShifterForm) -> String {
    match form {
        ShifterForm::Immediate => hex(operands::rotated_immediate(word).0),
        ShifterForm::ImmediateShift => shifted_register(word),
        ShifterForm::RegisterShift => format!(
            "{}, {} {}",
            reg_name(word.rm()),
            ShiftType::from_bits(word >> 5).name(),
            reg_name(word.rs())
        ),
    }
}

/// Formats `[rn, offset]`, `[rn, offset]!` or `[rn], offset`.
fn indexed(word: u32, offset: &str) -> String {
    let rn = reg_name(word.rn());
    let pre = word.bit(24);
    if !pre {
        format!("[{rn}], {offset}")
    } else if word.bit(21) {
        format!("[{rn}, {offset}]!")
    } else {
        format!("[{rn}, {offset}]")
    }
}

fn mode2_address(word: u32) -> String {
    let add = word.bit(23);
    let offset = if word.bit(25) {
        format!("{}{}", if add { "" } else { "-" }, shifted_register(word))
    } else {
        signed_hex(add, word.bits(11, 0))
    };
    indexed(word, &offset)
}

fn mode3_address(word: u32) -> String {
    let add = word.bit(23);
    let offset = if word.bit(22) {
        signed_hex(add, operands::split_immediate(word))
    } else {
        format!("{}{}", if add { "" } else { "-" }, reg_name(word.rm()))
    };
    indexed(word, &offset)
}

fn block_suffix(word: u32) -> &'static str {
    match (word.bit(24), word.bit(23)) {
        (false, true) => "ia",
        (true, true) => "ib",
        (false, false) => "da",
        (true, false) => "db",
    }
}

fn arm(op: ArmOp, word: u32, address: u32) -> Disassembly {
    let c = cond(word);
    let rd = reg_name(word.rd());
    let rn = reg_name(word.rn());
    let rm = reg_name(word.rm());
    let rs = reg_name(word.rs());
    let pc = address.wrapping_add(8);

    if let Some((alu, form)) = op.alu() {
        let s = if word.bit(20) && !alu.is_test() { "s" } else { "" };
        let op2 = shifter_operand(word, form);
        let operands = if alu.is_test() {
            format!("{rn}, {op2}")
        } else if alu.is_move() {
            format!("{rd}, {op2}")
        } else {
            format!("{rd}, {rn}, {op2}")
        };
        return Disassembly::new(format!("{}{c}{s}", alu.mnemonic()), operands);
    }

    let s = if word.bit(20) { "s" } else { "" };
    let xy = || {
        format!(
            "{}{}",
            if word.bit(5) { "t" } else { "b" },
            if word.bit(6) { "t" } else { "b" }
        )
    };
    let y = || if word.bit(6) { "t" } else { "b" };
    // Multiplies place Rd in bits 19:16 and Rn in bits 15:12.
    let (mul_rd, mul_rn) = (rn, rd);

    match op {
        ArmOp::Mul => Disassembly::new(format!("mul{c}{s}"), format!("{mul_rd}, {rm}, {rs}")),
        ArmOp::Mla => Disassembly::new(format!("mla{c}{s}"), format!("{mul_rd}, {rm}, {rs}, {mul_rn}")),
        ArmOp::Umull | ArmOp::Umlal | ArmOp::Smull | ArmOp::Smlal => {
            let name = match op {
                ArmOp::Umull => "umull",
                ArmOp::Umlal => "umlal",
                ArmOp::Smull => "smull",
                _ => "smlal",
            };
            Disassembly::new(format!("{name}{c}{s}"), format!("{rd}, {rn}, {rm}, {rs}"))
        }
        ArmOp::Smlaxy => Disassembly::new(format!("smla{}{c}", xy()), format!("{mul_rd}, {rm}, {rs}, {mul_rn}")),
        ArmOp::Smlawy => Disassembly::new(format!("smlaw{}{c}", y()), format!("{mul_rd}, {rm}, {rs}, {mul_rn}")),
        ArmOp::Smulwy => Disassembly::new(format!("smulw{}{c}", y()), format!("{mul_rd}, {rm}, {rs}")),
        ArmOp::Smlalxy => Disassembly::new(format!("smlal{}{c}", xy()), format!("{rd}, {rn}, {rm}, {rs}")),
        ArmOp::Smulxy => Disassembly::new(format!("smul{}{c}", xy()), format!("{mul_rd}, {rm}, {rs}")),
        ArmOp::Qadd | ArmOp::Qsub | ArmOp::Qdadd | ArmOp::Qdsub => {
            let name = match op {
                ArmOp::Qadd => "qadd",
                ArmOp::Qsub => "qsub",
                ArmOp::Qdadd => "qdadd",
                _ => "qdsub",
            };
            Disassembly::new(format!("{name}{c}"), format!("{rd}, {rm}, {rn}"))
        }
        ArmOp::Mrs => Disassembly::new(
            format!("mrs{c}"),
            format!("{rd}, {}", if word.bit(22) { "spsr" } else { "cpsr" }),
        ),
        ArmOp::MsrImm | ArmOp::MsrReg => {
            let psr = if word.bit(22) { "spsr" } else { "cpsr" };
            let fields: String = [(16, 'c'), (17, 'x'), (18, 's'), (19, 'f')]
                .into_iter()
                .filter(|&(bit, _)| word.bit(bit))
                .map(|(_, name)| name)
                .collect();
            let source = if op == ArmOp::MsrImm {
                hex(operands::rotated_immediate(word).0)
            } else {
                rm.to_string()
            };
            Disassembly::new(format!("msr{c}"), format!("{psr}_{fields}, {source}"))
        }
        ArmOp::Bx => Disassembly::new(format!("bx{c}"), rm),
        ArmOp::BlxReg => Disassembly::new(format!("blx{c}"), rm),
        ArmOp::BlxImm => Disassembly::new("blx", target(pc, operands::arm_blx_offset(word))),
        ArmOp::B => Disassembly::new(format!("b{c}"), target(pc, operands::arm_branch_offset(word))),
        ArmOp::Bl => Disassembly::new(format!("bl{c}"), target(pc, operands::arm_branch_offset(word))),
        ArmOp::Clz => Disassembly::new(format!("clz{c}"), format!("{rd}, {rm}")),
        ArmOp::Bkpt => Disassembly::new("bkpt", hex(operands::arm_bkpt_immediate(word))),
        ArmOp::LdrImm | ArmOp::LdrReg => Disassembly::new(format!("ldr{c}"), format!("{rd}, {}", mode2_address(word))),
        ArmOp::StrImm | ArmOp::StrReg => Disassembly::new(format!("str{c}"), format!("{rd}, {}", mode2_address(word))),
        ArmOp::LdrbImm | ArmOp::LdrbReg => {
            Disassembly::new(format!("ldr{c}b"), format!("{rd}, {}", mode2_address(word)))
        }
        ArmOp::StrbImm | ArmOp::StrbReg => {
            Disassembly::new(format!("str{c}b"), format!("{rd}, {}", mode2_address(word)))
        }
        ArmOp::Ldrt => Disassembly::new(format!("ldr{c}t"), format!("{rd}, {}", mode2_address(word))),
        ArmOp::Strt => Disassembly::new(format!("str{c}t"), format!("{rd}, {}", mode2_address(word))),
        ArmOp::Ldrbt => Disassembly::new(format!("ldr{c}bt"), format!("{rd}, {}", mode2_address(word))),
        ArmOp::Strbt => Disassembly::new(format!("str{c}bt"), format!("{rd}, {}", mode2_address(word))),
        ArmOp::LdrhImm | ArmOp::LdrhReg => Disassembly::new(format!("ldr{c}h"), format!("{rd}, {}", mode3_address(word))),
        ArmOp::StrhImm | ArmOp::StrhReg => Disassembly::new(format!("str{c}h"), format!("{rd}, {}", mode3_address(word))),
        ArmOp::LdrsbImm | ArmOp::LdrsbReg => {
            Disassembly::new(format!("ldr{c}sb"), format!("{rd}, {}", mode3_address(word)))
        }
        ArmOp::LdrshImm | ArmOp::LdrshReg => {
            Disassembly::new(format!("ldr{c}sh"), format!("{rd}, {}", mode3_address(word)))
        }
        ArmOp::LdrdImm | ArmOp::LdrdReg => Disassembly::new(format!("ldr{c}d"), format!("{rd}, {}", mode3_address(word))),
        ArmOp::StrdImm | ArmOp::StrdReg => Disassembly::new(format!("str{c}d"), format!("{rd}, {}", mode3_address(word))),
        ArmOp::Swp => Disassembly::new(format!("swp{c}"), format!("{rd}, {rm}, [{rn}]")),
        ArmOp::Swpb => Disassembly::new(format!("swp{c}b"), format!("{rd}, {rm}, [{rn}]")),
        ArmOp::Pld => Disassembly::new("pld", mode2_address(word)),
        ArmOp::Ldm | ArmOp::LdmUser | ArmOp::LdmException | ArmOp::Stm | ArmOp::StmUser => {
            let name = if word.bit(20) { "ldm" } else { "stm" };
            let writeback = if word.bit(21) { "!" } else { "" };
            let hat = if word.bit(22) { "^" } else { "" };
            Disassembly::new(
                format!("{name}{c}{}", block_suffix(word)),
                format!("{rn}{writeback}, {}{hat}", reg_list(word.reg_list())),
            )
        }
        ArmOp::Mcr | ArmOp::Mrc => Disassembly::new(
            format!("{}{c}", if op == ArmOp::Mcr { "mcr" } else { "mrc" }),
            format!(
                "p{}, {}, {rd}, c{}, c{}, {}",
                word.bits(11, 8),
                word.bits(23, 21),
                word.bits(19, 16),
                word.bits(3, 0),
                word.bits(7, 5)
            ),
        ),
        ArmOp::Cdp => Disassembly::new(
            format!("cdp{c}"),
            format!(
                "p{}, {}, c{}, c{}, c{}, {}",
                word.bits(11, 8),
                word.bits(23, 20),
                word.bits(15, 12),
                word.bits(19, 16),
                word.bits(3, 0),
                word.bits(7, 5)
            ),
        ),
        ArmOp::Ldc | ArmOp::Stc => Disassembly::new(
            format!("{}{c}", if op == ArmOp::Ldc { "ldc" } else { "stc" }),
            format!(
                "p{}, c{}, {}",
                word.bits(11, 8),
                word.bits(15, 12),
                indexed(word, &signed_hex(word.bit(23), word.bits(7, 0) << 2))
            ),
        ),
        ArmOp::Mcrr | ArmOp::Mrrc => Disassembly::new(
            format!("{}{c}", if op == ArmOp::Mcrr { "mcrr" } else { "mrrc" }),
            format!("p{}, {}, {rd}, {rn}, c{}", word.bits(11, 8), word.bits(7, 4), word.bits(3, 0)),
        ),
        ArmOp::Swi => Disassembly::new(format!("swi{c}"), hex(word.bits(23, 0))),
        _ => Disassembly::new("undefined", format!("{word:#010x}")),
    }
}

fn low(word: u32, lo: u32) -> &'static str {
    reg_name(word.bits(lo + 2, lo) as usize)
}

fn thumb(op: ThumbOp, word: u32, address: u32) -> Disassembly {
    let rd = low(word, 0);
    let rs = low(word, 3);
    let rn6 = low(word, 6);
    let rd8 = low(word, 8);
    let imm5 = word.bits(10, 6);
    let imm8 = word.bits(7, 0);
    let pc = address.wrapping_add(4);
    let hi_rd = reg_name(((word.bits(7, 7) << 3) | word.bits(2, 0)) as usize);
    let hi_rm = reg_name(word.bits(6, 3) as usize);

    let dp = |name: &str| Disassembly::new(name, format!("{rd}, {rs}"));

    match op {
        ThumbOp::LslImm => Disassembly::new("lsls", format!("{rd}, {rs}, #{imm5}")),
        ThumbOp::LsrImm => Disassembly::new("lsrs", format!("{rd}, {rs}, #{}", if imm5 == 0 { 32 } else { imm5 })),
        ThumbOp::AsrImm => Disassembly::new("asrs", format!("{rd}, {rs}, #{}", if imm5 == 0 { 32 } else { imm5 })),
        ThumbOp::AddReg => Disassembly::new("adds", format!("{rd}, {rs}, {rn6}")),
        ThumbOp::SubReg => Disassembly::new("subs", format!("{rd}, {rs}, {rn6}")),
        ThumbOp::AddImm3 => Disassembly::new("adds", format!("{rd}, {rs}, #{}", word.bits(8, 6))),
        ThumbOp::SubImm3 => Disassembly::new("subs", format!("{rd}, {rs}, #{}", word.bits(8, 6))),
        ThumbOp::MovImm => Disassembly::new("movs", format!("{rd8}, {}", hex(imm8))),
        ThumbOp::CmpImm => Disassembly::new("cmp", format!("{rd8}, {}", hex(imm8))),
        ThumbOp::AddImm8 => Disassembly::new("adds", format!("{rd8}, {}", hex(imm8))),
        ThumbOp::SubImm8 => Disassembly::new("subs", format!("{rd8}, {}", hex(imm8))),
        ThumbOp::And => dp("ands"),
        ThumbOp::Eor => dp("eors"),
        ThumbOp::LslReg => dp("lsls"),
        ThumbOp::LsrReg => dp("lsrs"),
        ThumbOp::AsrReg => dp("asrs"),
        ThumbOp::Adc => dp("adcs"),
        ThumbOp::Sbc => dp("sbcs"),
        ThumbOp::RorReg => dp("rors"),
        ThumbOp::Tst => dp("tst"),
        ThumbOp::Neg => dp("negs"),
        ThumbOp::CmpReg => dp("cmp"),
        ThumbOp::Cmn => dp("cmn"),
        ThumbOp::Orr => dp("orrs"),
        ThumbOp::Mul => dp("muls"),
        ThumbOp::Bic => dp("bics"),
        ThumbOp::Mvn => dp("mvns"),
        ThumbOp::AddHi => Disassembly::new("add", format!("{hi_rd}, {hi_rm}")),
        ThumbOp::CmpHi => Disassembly::new("cmp", format!("{hi_rd}, {hi_rm}")),
        ThumbOp::MovHi => Disassembly::new("mov", format!("{hi_rd}, {hi_rm}")),
        ThumbOp::Bx => Disassembly::new("bx", hi_rm),
        ThumbOp::BlxReg => Disassembly::new("blx", hi_rm),
        ThumbOp::LdrLiteral => Disassembly::new("ldr", format!("{rd8}, [pc, #{:#x}]", imm8 << 2)),
        ThumbOp::StrReg | ThumbOp::StrhReg | ThumbOp::StrbReg | ThumbOp::LdrsbReg | ThumbOp::LdrReg
        | ThumbOp::LdrhReg | ThumbOp::LdrbReg | ThumbOp::LdrshReg => {
            let name = match op {
                ThumbOp::StrReg => "str",
                ThumbOp::StrhReg => "strh",
                ThumbOp::StrbReg => "strb",
                ThumbOp::LdrsbReg => "ldrsb",
                ThumbOp::LdrReg => "ldr",
                ThumbOp::LdrhReg => "ldrh",
                ThumbOp::LdrbReg => "ldrb",
                _ => "ldrsh",
            };
            Disassembly::new(name, format!("{rd}, [{rs}, {rn6}]"))
        }
        ThumbOp::StrImm => Disassembly::new("str", format!("{rd}, [{rs}, #{:#x}]", imm5 << 2)),
        ThumbOp::LdrImm => Disassembly::new("ldr", format!("{rd}, [{rs}, #{:#x}]", imm5 << 2)),
        ThumbOp::StrbImm => Disassembly::new("strb", format!("{rd}, [{rs}, #{imm5:#x}]")),
        ThumbOp::LdrbImm => Disassembly::new("ldrb", format!("{rd}, [{rs}, #{imm5:#x}]")),
        ThumbOp::StrhImm => Disassembly::new("strh", format!("{rd}, [{rs}, #{:#x}]", imm5 << 1)),
        ThumbOp::LdrhImm => Disassembly::new("ldrh", format!("{rd}, [{rs}, #{:#x}]", imm5 << 1)),
        ThumbOp::StrSp => Disassembly::new("str", format!("{rd8}, [sp, #{:#x}]", imm8 << 2)),
        ThumbOp::LdrSp => Disassembly::new("ldr", format!("{rd8}, [sp, #{:#x}]", imm8 << 2)),
        ThumbOp::AddPc => Disassembly::new("add", format!("{rd8}, pc, #{:#x}", imm8 << 2)),
        ThumbOp::AddSpReg => Disassembly::new("add", format!("{rd8}, sp, #{:#x}", imm8 << 2)),
        ThumbOp::AddSpImm => Disassembly::new("add", format!("sp, #{:#x}", word.bits(6, 0) << 2)),
        ThumbOp::SubSpImm => Disassembly::new("sub", format!("sp, #{:#x}", word.bits(6, 0) << 2)),
        ThumbOp::Push => {
            let list = word.bits(7, 0) | if word.bit(8) { 1 << 14 } else { 0 };
            Disassembly::new("push", reg_list(list))
        }
        ThumbOp::Pop => {
            let list = word.bits(7, 0) | if word.bit(8) { 1 << 15 } else { 0 };
            Disassembly::new("pop", reg_list(list))
        }
        ThumbOp::Bkpt => Disassembly::new("bkpt", hex(imm8)),
        ThumbOp::Stmia => Disassembly::new("stmia", format!("{rd8}!, {}", reg_list(imm8))),
        ThumbOp::Ldmia => Disassembly::new("ldmia", format!("{rd8}!, {}", reg_list(imm8))),
        ThumbOp::BCond => Disassembly::new(
            format!("b{}", Condition::from_bits(word.bits(11, 8)).suffix()),
            target(pc, operands::thumb_cond_branch_offset(word)),
        ),
        ThumbOp::Swi => Disassembly::new("swi", hex(imm8)),
        ThumbOp::B => Disassembly::new("b", target(pc, operands::thumb_branch_offset(word))),
        ThumbOp::Undefined => Disassembly::new("undefined", format!("{word:#06x}")),
    }
}

fn thumb2(op: Thumb2Op, word: u32, address: u32) -> Disassembly {
    let pc = address.wrapping_add(4);
    match op {
        Thumb2Op::BCond => Disassembly::new(
            format!("b{}.w", Condition::from_bits((word >> 22) & 0xF).suffix()),
            target(pc, operands::thumb2_cond_branch_offset(word)),
        ),
        Thumb2Op::B => Disassembly::new("b.w", target(pc, operands::thumb2_branch_offset(word))),
        Thumb2Op::Bl => Disassembly::new("bl", target(pc, operands::thumb2_branch_offset(word))),
        Thumb2Op::BlxImm => Disassembly::new("blx", target(pc & !3, operands::thumb2_branch_offset(word))),
        Thumb2Op::Smc => Disassembly::new("smc", hex((word >> 16) & 0xF)),
        Thumb2Op::Udf => Disassembly::new("udf.w", hex((((word >> 16) & 0xF) << 12) | (word & 0xFFF))),
    }
}
