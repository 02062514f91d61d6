//! Operation identifiers.
//!
//! The decoder maps every instruction word to exactly one tag from a closed set. Tags
//! carry no operands; the executor and the disassembler re-read fields from the word.

/// Data-processing opcodes (bits 24:21 of an ARM data-processing instruction).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Rd = Rn AND op2.
    And = 0x0,
    /// Rd = Rn EOR op2.
    Eor = 0x1,
    /// Rd = Rn - op2.
    Sub = 0x2,
    /// Rd = op2 - Rn.
    Rsb = 0x3,
    /// Rd = Rn + op2.
    Add = 0x4,
    /// Rd = Rn + op2 + C.
    Adc = 0x5,
    /// Rd = Rn - op2 - !C.
    Sbc = 0x6,
    /// Rd = op2 - Rn - !C.
    Rsc = 0x7,
    /// Flags from Rn AND op2.
    Tst = 0x8,
    /// Flags from Rn EOR op2.
    Teq = 0x9,
    /// Flags from Rn - op2.
    Cmp = 0xA,
    /// Flags from Rn + op2.
    Cmn = 0xB,
    /// Rd = Rn OR op2.
    Orr = 0xC,
    /// Rd = op2.
    Mov = 0xD,
    /// Rd = Rn AND NOT op2.
    Bic = 0xE,
    /// Rd = NOT op2.
    Mvn = 0xF,
}

impl AluOp {
    /// Decodes bits 24:21.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0xF {
            0x0 => Self::And,
            0x1 => Self::Eor,
            0x2 => Self::Sub,
            0x3 => Self::Rsb,
            0x4 => Self::Add,
            0x5 => Self::Adc,
            0x6 => Self::Sbc,
            0x7 => Self::Rsc,
            0x8 => Self::Tst,
            0x9 => Self::Teq,
            0xA => Self::Cmp,
            0xB => Self::Cmn,
            0xC => Self::Orr,
            0xD => Self::Mov,
            0xE => Self::Bic,
            _ => Self::Mvn,
        }
    }

    /// Returns `true` for TST, TEQ, CMP and CMN, which write no register.
    pub const fn is_test(self) -> bool {
        matches!(self, Self::Tst | Self::Teq | Self::Cmp | Self::Cmn)
    }

    /// Returns `true` for MOV and MVN, which ignore Rn.
    pub const fn is_move(self) -> bool {
        matches!(self, Self::Mov | Self::Mvn)
    }

    /// Lower-case mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Eor => "eor",
            Self::Sub => "sub",
            Self::Rsb => "rsb",
            Self::Add => "add",
            Self::Adc => "adc",
            Self::Sbc => "sbc",
            Self::Rsc => "rsc",
            Self::Tst => "tst",
            Self::Teq => "teq",
            Self::Cmp => "cmp",
            Self::Cmn => "cmn",
            Self::Orr => "orr",
            Self::Mov => "mov",
            Self::Bic => "bic",
            Self::Mvn => "mvn",
        }
    }
}

/// How the second operand of a data-processing instruction is formed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShifterForm {
    /// 8-bit immediate rotated right by twice a 4-bit amount.
    Immediate,
    /// Register shifted by a 5-bit immediate (includes RRX).
    ImmediateShift,
    /// Register shifted by the bottom byte of another register.
    RegisterShift,
}

macro_rules! alu_ops {
    ($($name:ident: $imm:ident, $reg:ident, $rsr:ident;)*) => {
        /// ARM (32-bit) operation tags.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum ArmOp {
            $(
                #[doc = concat!("`", stringify!($name), "` with a rotated immediate.")]
                $imm,
                #[doc = concat!("`", stringify!($name), "` with an immediate-shifted register.")]
                $reg,
                #[doc = concat!("`", stringify!($name), "` with a register-shifted register.")]
                $rsr,
            )*
            /// Multiply.
            Mul,
            /// Multiply-accumulate.
            Mla,
            /// Unsigned 32x32->64 multiply.
            Umull,
            /// Unsigned 64-bit multiply-accumulate.
            Umlal,
            /// Signed 32x32->64 multiply.
            Smull,
            /// Signed 64-bit multiply-accumulate.
            Smlal,
            /// Signed 16x16 multiply-accumulate.
            Smlaxy,
            /// Signed 32x16 multiply-accumulate.
            Smlawy,
            /// Signed 32x16 multiply.
            Smulwy,
            /// Signed 16x16 multiply with 64-bit accumulate.
            Smlalxy,
            /// Signed 16x16 multiply.
            Smulxy,
            /// Saturating add.
            Qadd,
            /// Saturating subtract.
            Qsub,
            /// Saturating double-and-add.
            Qdadd,
            /// Saturating double-and-subtract.
            Qdsub,
            /// Move status register to register.
            Mrs,
            /// Move immediate to status register.
            MsrImm,
            /// Move register to status register.
            MsrReg,
            /// Branch and exchange.
            Bx,
            /// Branch with link and exchange to a register target.
            BlxReg,
            /// Branch with link and exchange to an immediate target (unconditional space).
            BlxImm,
            /// Branch.
            B,
            /// Branch with link.
            Bl,
            /// Count leading zeros.
            Clz,
            /// Software breakpoint.
            Bkpt,
            /// Load word, immediate offset.
            LdrImm,
            /// Load word, register offset.
            LdrReg,
            /// Store word, immediate offset.
            StrImm,
            /// Store word, register offset.
            StrReg,
            /// Load byte, immediate offset.
            LdrbImm,
            /// Load byte, register offset.
            LdrbReg,
            /// Store byte, immediate offset.
            StrbImm,
            /// Store byte, register offset.
            StrbReg,
            /// Load word with user-mode translation.
            Ldrt,
            /// Store word with user-mode translation.
            Strt,
            /// Load byte with user-mode translation.
            Ldrbt,
            /// Store byte with user-mode translation.
            Strbt,
            /// Load halfword, immediate offset.
            LdrhImm,
            /// Load halfword, register offset.
            LdrhReg,
            /// Store halfword, immediate offset.
            StrhImm,
            /// Store halfword, register offset.
            StrhReg,
            /// Load signed byte, immediate offset.
            LdrsbImm,
            /// Load signed byte, register offset.
            LdrsbReg,
            /// Load signed halfword, immediate offset.
            LdrshImm,
            /// Load signed halfword, register offset.
            LdrshReg,
            /// Load doubleword, immediate offset.
            LdrdImm,
            /// Load doubleword, register offset.
            LdrdReg,
            /// Store doubleword, immediate offset.
            StrdImm,
            /// Store doubleword, register offset.
            StrdReg,
            /// Swap word.
            Swp,
            /// Swap byte.
            Swpb,
            /// Preload hint.
            Pld,
            /// Load multiple (variant 1).
            Ldm,
            /// Load multiple user-bank registers (variant 2).
            LdmUser,
            /// Load multiple with PC and SPSR restore (variant 3).
            LdmException,
            /// Store multiple (variant 1).
            Stm,
            /// Store multiple user-bank registers (variant 2).
            StmUser,
            /// Move register to coprocessor.
            Mcr,
            /// Move coprocessor to register.
            Mrc,
            /// Coprocessor data operation.
            Cdp,
            /// Load coprocessor.
            Ldc,
            /// Store coprocessor.
            Stc,
            /// Move two registers to coprocessor.
            Mcrr,
            /// Move coprocessor to two registers.
            Mrrc,
            /// Software interrupt.
            Swi,
            /// Undefined instruction.
            Undefined,
        }

        impl ArmOp {
            /// Maps a data-processing tag to its opcode and operand form.
            pub const fn alu(self) -> Option<(AluOp, ShifterForm)> {
                match self {
                    $(
                        Self::$imm => Some((AluOp::$name, ShifterForm::Immediate)),
                        Self::$reg => Some((AluOp::$name, ShifterForm::ImmediateShift)),
                        Self::$rsr => Some((AluOp::$name, ShifterForm::RegisterShift)),
                    )*
                    _ => None,
                }
            }

            /// Builds the data-processing tag for an opcode and operand form.
            pub const fn from_alu(op: AluOp, form: ShifterForm) -> Self {
                match (op, form) {
                    $(
                        (AluOp::$name, ShifterForm::Immediate) => Self::$imm,
                        (AluOp::$name, ShifterForm::ImmediateShift) => Self::$reg,
                        (AluOp::$name, ShifterForm::RegisterShift) => Self::$rsr,
                    )*
                }
            }
        }
    };
}

alu_ops! {
    And: AndImm, AndReg, AndRsr;
    Eor: EorImm, EorReg, EorRsr;
    Sub: SubImm, SubReg, SubRsr;
    Rsb: RsbImm, RsbReg, RsbRsr;
    Add: AddImm, AddReg, AddRsr;
    Adc: AdcImm, AdcReg, AdcRsr;
    Sbc: SbcImm, SbcReg, SbcRsr;
    Rsc: RscImm, RscReg, RscRsr;
    Tst: TstImm, TstReg, TstRsr;
    Teq: TeqImm, TeqReg, TeqRsr;
    Cmp: CmpImm, CmpReg, CmpRsr;
    Cmn: CmnImm, CmnReg, CmnRsr;
    Orr: OrrImm, OrrReg, OrrRsr;
    Mov: MovImm, MovReg, MovRsr;
    Bic: BicImm, BicReg, BicRsr;
    Mvn: MvnImm, MvnReg, MvnRsr;
}

impl ArmOp {
    /// Returns `true` for forms from the `cond == 0b1111` space, which ignore the condition.
    pub const fn is_unconditional(self) -> bool {
        matches!(self, Self::BlxImm | Self::Pld)
    }
}

/// Thumb (16-bit) operation tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThumbOp {
    /// Logical shift left by immediate.
    LslImm,
    /// Logical shift right by immediate.
    LsrImm,
    /// Arithmetic shift right by immediate.
    AsrImm,
    /// Add two low registers.
    AddReg,
    /// Subtract two low registers.
    SubReg,
    /// Add 3-bit immediate.
    AddImm3,
    /// Subtract 3-bit immediate.
    SubImm3,
    /// Move 8-bit immediate.
    MovImm,
    /// Compare 8-bit immediate.
    CmpImm,
    /// Add 8-bit immediate.
    AddImm8,
    /// Subtract 8-bit immediate.
    SubImm8,
    /// Bitwise AND.
    And,
    /// Bitwise exclusive OR.
    Eor,
    /// Logical shift left by register.
    LslReg,
    /// Logical shift right by register.
    LsrReg,
    /// Arithmetic shift right by register.
    AsrReg,
    /// Add with carry.
    Adc,
    /// Subtract with carry.
    Sbc,
    /// Rotate right by register.
    RorReg,
    /// Test bits.
    Tst,
    /// Negate.
    Neg,
    /// Compare registers.
    CmpReg,
    /// Compare negative.
    Cmn,
    /// Bitwise OR.
    Orr,
    /// Multiply.
    Mul,
    /// Bit clear.
    Bic,
    /// Move NOT.
    Mvn,
    /// Add with a high register operand.
    AddHi,
    /// Compare with a high register operand.
    CmpHi,
    /// Move with a high register operand.
    MovHi,
    /// Branch and exchange.
    Bx,
    /// Branch with link and exchange to a register.
    BlxReg,
    /// PC-relative load.
    LdrLiteral,
    /// Store word, register offset.
    StrReg,
    /// Store halfword, register offset.
    StrhReg,
    /// Store byte, register offset.
    StrbReg,
    /// Load signed byte, register offset.
    LdrsbReg,
    /// Load word, register offset.
    LdrReg,
    /// Load halfword, register offset.
    LdrhReg,
    /// Load byte, register offset.
    LdrbReg,
    /// Load signed halfword, register offset.
    LdrshReg,
    /// Store word, immediate offset.
    StrImm,
    /// Load word, immediate offset.
    LdrImm,
    /// Store byte, immediate offset.
    StrbImm,
    /// Load byte, immediate offset.
    LdrbImm,
    /// Store halfword, immediate offset.
    StrhImm,
    /// Load halfword, immediate offset.
    LdrhImm,
    /// Store word, SP-relative.
    StrSp,
    /// Load word, SP-relative.
    LdrSp,
    /// Form a PC-relative address.
    AddPc,
    /// Form an SP-relative address.
    AddSpReg,
    /// Increment SP.
    AddSpImm,
    /// Decrement SP.
    SubSpImm,
    /// Push registers.
    Push,
    /// Pop registers.
    Pop,
    /// Software breakpoint.
    Bkpt,
    /// Store multiple, increment after.
    Stmia,
    /// Load multiple, increment after.
    Ldmia,
    /// Conditional branch.
    BCond,
    /// Software interrupt.
    Swi,
    /// Unconditional branch.
    B,
    /// Undefined instruction.
    Undefined,
}

/// Thumb-2 (32-bit) operation tags. Only the branch and control forms are decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Thumb2Op {
    /// Conditional branch (encoding T3).
    BCond,
    /// Unconditional branch (encoding T4).
    B,
    /// Branch with link.
    Bl,
    /// Branch with link and exchange to ARM.
    BlxImm,
    /// Secure monitor call.
    Smc,
    /// Permanently undefined.
    Udf,
}

/// The operation identifier returned by the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationId {
    /// ARM instruction.
    Arm(ArmOp),
    /// 16-bit Thumb instruction.
    Thumb(ThumbOp),
    /// 32-bit Thumb-2 instruction.
    Thumb2(Thumb2Op),
}

impl OperationId {
    /// Returns `true` for tags that raise the undefined instruction exception.
    pub const fn is_undefined(self) -> bool {
        matches!(
            self,
            Self::Arm(ArmOp::Undefined) | Self::Thumb(ThumbOp::Undefined) | Self::Thumb2(Thumb2Op::Udf)
        )
    }
}
