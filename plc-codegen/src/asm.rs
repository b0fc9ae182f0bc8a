//! Target Instruction Definitions
//!
//! This module defines the instruction set and register model of the
//! load/store target machine. Labels stay symbolic; resolving them is
//! the assembler's job.

use std::fmt;

/// Number of the first scratch register
pub const SCRATCH_BASE: u32 = 3;

/// Target register set
///
/// - `x0`: hard-wired zero
/// - `x1`: frame register (also the stack pointer)
/// - `x2`: link register
/// - `x3` and up: expression scratch registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    Zero,
    Sp,
    Link,
    X(u32),
}

impl Reg {
    pub fn number(&self) -> u32 {
        match self {
            Reg::Zero => 0,
            Reg::Sp => 1,
            Reg::Link => 2,
            Reg::X(n) => *n,
        }
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.number())
    }
}

/// Target instructions
#[derive(Debug, Clone, PartialEq)]
pub enum AsmInst {
    // Arithmetic
    Add(Reg, Reg, Reg),           // rd = rs + rt
    Sub(Reg, Reg, Reg),           // rd = rs - rt
    Mul(Reg, Reg, Reg),           // rd = rs * rt
    Div(Reg, Reg, Reg),           // rd = rs / rt
    Rem(Reg, Reg, Reg),           // rd = rs % rt (machine sign rules)
    AddI(Reg, Reg, i32),          // rd = rs + imm

    // Comparison, 0 or 1
    Seq(Reg, Reg, Reg),           // rd = rs == rt
    Sne(Reg, Reg, Reg),           // rd = rs != rt
    Slt(Reg, Reg, Reg),           // rd = rs < rt

    // Bitwise
    And(Reg, Reg, Reg),
    Or(Reg, Reg, Reg),
    Xor(Reg, Reg, Reg),
    Not(Reg, Reg),                // rd = !rs (all bits)

    // Memory
    Li(Reg, i32),                 // rd = immediate
    La(Reg, String),              // rd = address of label
    Load(Reg, Reg, i32),          // rd = memory[rs + imm]
    Store(Reg, Reg, i32),         // memory[rs + imm] = rv

    // Control flow
    Jump(String),                 // unconditional jump
    Beqz(Reg, String),            // branch if rs == 0
    Call(String),                 // jump to label, return address into link
    Ret,                          // jump through link

    // Environment
    Read(Reg),
    Write(Reg),
    Halt,

    // Assembly pseudo-instructions
    Label(String),
    Data(u32),                    // reserve N zero words
    Comment(String),
}

impl AsmInst {
    /// Labels sit at column 0 in the emitted text
    pub fn is_label(&self) -> bool {
        matches!(self, AsmInst::Label(_))
    }
}

impl fmt::Display for AsmInst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Arithmetic
            AsmInst::Add(rd, rs, rt) => write!(f, "add {} {} {}", rd, rs, rt),
            AsmInst::Sub(rd, rs, rt) => write!(f, "sub {} {} {}", rd, rs, rt),
            AsmInst::Mul(rd, rs, rt) => write!(f, "mul {} {} {}", rd, rs, rt),
            AsmInst::Div(rd, rs, rt) => write!(f, "div {} {} {}", rd, rs, rt),
            AsmInst::Rem(rd, rs, rt) => write!(f, "rem {} {} {}", rd, rs, rt),
            AsmInst::AddI(rd, rs, imm) => write!(f, "addi {} {} {}", rd, rs, imm),

            // Comparison
            AsmInst::Seq(rd, rs, rt) => write!(f, "seq {} {} {}", rd, rs, rt),
            AsmInst::Sne(rd, rs, rt) => write!(f, "sne {} {} {}", rd, rs, rt),
            AsmInst::Slt(rd, rs, rt) => write!(f, "slt {} {} {}", rd, rs, rt),

            // Bitwise
            AsmInst::And(rd, rs, rt) => write!(f, "and {} {} {}", rd, rs, rt),
            AsmInst::Or(rd, rs, rt) => write!(f, "or {} {} {}", rd, rs, rt),
            AsmInst::Xor(rd, rs, rt) => write!(f, "xor {} {} {}", rd, rs, rt),
            AsmInst::Not(rd, rs) => write!(f, "not {} {}", rd, rs),

            // Memory
            AsmInst::Li(rd, imm) => write!(f, "li {} {}", rd, imm),
            AsmInst::La(rd, label) => write!(f, "li {} {}", rd, label),
            AsmInst::Load(rd, rs, imm) => write!(f, "lw {} {} {}", rd, rs, imm),
            AsmInst::Store(rv, rs, imm) => write!(f, "sw {} {} {}", rv, rs, imm),

            // Control flow
            AsmInst::Jump(label) => write!(f, "jal {} {}", Reg::Zero, label),
            AsmInst::Beqz(rs, label) => write!(f, "beqz {} {}", rs, label),
            AsmInst::Call(label) => write!(f, "jal {} {}", Reg::Link, label),
            AsmInst::Ret => write!(f, "jalr {} {}", Reg::Zero, Reg::Link),

            // Environment
            AsmInst::Read(rd) => write!(f, "eread {}", rd),
            AsmInst::Write(rs) => write!(f, "ewrite {}", rs),
            AsmInst::Halt => write!(f, "ehlt"),

            // Pseudo
            AsmInst::Label(label) => write!(f, "{}:", label),
            AsmInst::Data(words) => write!(f, "data 0 {}", words),
            AsmInst::Comment(text) => write!(f, "; {}", text),
        }
    }
}
