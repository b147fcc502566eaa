//! 68000 Assembly Instruction Definitions
//!
//! This module defines the slice of the 68000 instruction set the SubC
//! generator emits, and how each instruction renders as a line of
//! EASy68K-style assembly text.
//!
//! Register model: two data registers serve as expression scratch (D0
//! holds every result, D1 the right operand), A6 is the frame pointer
//! and A7 the stack pointer. A0 is touched only to take the address of
//! a string constant. Those fixed address registers never vary, so they
//! appear directly in the rendered operand text rather than in the
//! instruction variants.

use std::fmt;

/// The two scratch data registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataReg {
    D0,
    D1,
}

impl fmt::Display for DataReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataReg::D0 => write!(f, "D0"),
            DataReg::D1 => write!(f, "D1"),
        }
    }
}

/// Branch conditions, one per SubC relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cond {
    Lt, // BLT
    Le, // BLE
    Eq, // BEQ
    Ne, // BNE
    Ge, // BGE
    Gt, // BGT
}

impl Cond {
    /// The branch mnemonic for this condition
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Cond::Lt => "BLT",
            Cond::Le => "BLE",
            Cond::Eq => "BEQ",
            Cond::Ne => "BNE",
            Cond::Ge => "BGE",
            Cond::Gt => "BGT",
        }
    }
}

/// 68000 instructions and directives emitted by the SubC generator
///
/// Each variant renders as one output line: instructions as
/// `<tab><mnemonic><tab><operands>`, labels as `<name>:`.
#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    // Data movement
    LoadFrame(i32, DataReg), // MOVE.L (off,A6), Dn
    LoadImm(i32, DataReg),   // MOVE.L #imm, Dn
    StoreFrame(DataReg, i32), // MOVE.L Dn, (off,A6)
    Clr(DataReg),            // CLR.L Dn

    // Argument pushes
    PushFrame(i32), // MOVE.L (off,A6), -(A7)
    PushImm(i32),   // MOVE.L #imm, -(A7)
    PushAddr,       // MOVE.L A0, -(A7)
    Lea(String),    // LEA label, A0

    // Arithmetic and comparison (D1 combined into D0)
    Add, // ADD.L D1, D0
    Sub, // SUB.L D1, D0
    Mul, // MULS D1, D0
    Cmp, // CMP.L D1, D0
    CmpZero(DataReg), // CMPI.L #0, Dn

    // Control flow
    Branch(Cond, String), // Bcc label
    Bra(String),          // BRA label
    Bsr(String),          // BSR label
    Rts,                  // RTS
    Halt,                 // SIMHALT

    // Frame management
    SaveFp,          // MOVE.L A6, -(A7)
    NewFp,           // MOVEA.L A7, A6
    AllocLocals(i32), // SUBA.L #bytes, A7
    FreeLocals,      // MOVEA.L A6, A7
    RestoreFp,       // MOVEA.L (A6), A6
    AdjustSp(i32),   // ADDA.L #bytes, A7

    // Labels and directives
    Label(String),        // label:
    Include(String),      // INCLUDE path
    End(String),          // END entry
    DefineString(String), // DC.B 'text',0
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::LoadFrame(off, reg) => write!(f, "\tMOVE.L\t({off},A6), {reg}"),
            Inst::LoadImm(imm, reg) => write!(f, "\tMOVE.L\t#{imm}, {reg}"),
            Inst::StoreFrame(reg, off) => write!(f, "\tMOVE.L\t{reg}, ({off},A6)"),
            Inst::Clr(reg) => write!(f, "\tCLR.L\t{reg}"),

            Inst::PushFrame(off) => write!(f, "\tMOVE.L\t({off},A6), -(A7)"),
            Inst::PushImm(imm) => write!(f, "\tMOVE.L\t#{imm}, -(A7)"),
            Inst::PushAddr => write!(f, "\tMOVE.L\tA0, -(A7)"),
            Inst::Lea(label) => write!(f, "\tLEA\t{label}, A0"),

            Inst::Add => write!(f, "\tADD.L\tD1, D0"),
            Inst::Sub => write!(f, "\tSUB.L\tD1, D0"),
            Inst::Mul => write!(f, "\tMULS\tD1, D0"),
            Inst::Cmp => write!(f, "\tCMP.L\tD1, D0"),
            Inst::CmpZero(reg) => write!(f, "\tCMPI.L\t#0, {reg}"),

            Inst::Branch(cond, label) => write!(f, "\t{}\t{label}", cond.mnemonic()),
            Inst::Bra(label) => write!(f, "\tBRA\t{label}"),
            Inst::Bsr(label) => write!(f, "\tBSR\t{label}"),
            Inst::Rts => write!(f, "\tRTS"),
            Inst::Halt => write!(f, "\tSIMHALT"),

            Inst::SaveFp => write!(f, "\tMOVE.L\tA6, -(A7)"),
            Inst::NewFp => write!(f, "\tMOVEA.L\tA7, A6"),
            Inst::AllocLocals(bytes) => write!(f, "\tSUBA.L\t#{bytes}, A7"),
            Inst::FreeLocals => write!(f, "\tMOVEA.L\tA6, A7"),
            Inst::RestoreFp => write!(f, "\tMOVEA.L\t(A6), A6"),
            Inst::AdjustSp(bytes) => write!(f, "\tADDA.L\t#{bytes}, A7"),

            Inst::Label(name) => write!(f, "{name}:"),
            Inst::Include(path) => write!(f, "\tINCLUDE\t{path}"),
            Inst::End(entry) => write!(f, "\tEND\t{entry}"),
            // EASy68K escapes a quote inside a string by doubling it
            Inst::DefineString(text) => {
                write!(f, "\tDC.B\t'{}',0", text.replace('\'', "''"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_display() {
        assert_eq!(format!("{}", DataReg::D0), "D0");
        assert_eq!(format!("{}", DataReg::D1), "D1");
    }

    #[test]
    fn test_instruction_display() {
        assert_eq!(
            format!("{}", Inst::LoadFrame(-4, DataReg::D0)),
            "\tMOVE.L\t(-4,A6), D0"
        );
        assert_eq!(
            format!("{}", Inst::LoadImm(42, DataReg::D1)),
            "\tMOVE.L\t#42, D1"
        );
        assert_eq!(
            format!("{}", Inst::StoreFrame(DataReg::D0, 8)),
            "\tMOVE.L\tD0, (8,A6)"
        );
        assert_eq!(format!("{}", Inst::Mul), "\tMULS\tD1, D0");
        assert_eq!(
            format!("{}", Inst::Branch(Cond::Lt, "L20".to_string())),
            "\tBLT\tL20"
        );
        assert_eq!(format!("{}", Inst::Label("add2".to_string())), "add2:");
    }

    #[test]
    fn test_push_display() {
        assert_eq!(
            format!("{}", Inst::PushFrame(-12)),
            "\tMOVE.L\t(-12,A6), -(A7)"
        );
        assert_eq!(format!("{}", Inst::PushImm(5)), "\tMOVE.L\t#5, -(A7)");
    }

    #[test]
    fn test_string_data_display() {
        assert_eq!(
            format!("{}", Inst::DefineString("hello".to_string())),
            "\tDC.B\t'hello',0"
        );
        assert_eq!(
            format!("{}", Inst::DefineString("it's".to_string())),
            "\tDC.B\t'it''s',0"
        );
    }

    #[test]
    fn test_frame_management_display() {
        assert_eq!(format!("{}", Inst::SaveFp), "\tMOVE.L\tA6, -(A7)");
        assert_eq!(format!("{}", Inst::NewFp), "\tMOVEA.L\tA7, A6");
        assert_eq!(format!("{}", Inst::AllocLocals(12)), "\tSUBA.L\t#12, A7");
        assert_eq!(format!("{}", Inst::AdjustSp(4)), "\tADDA.L\t#4, A7");
    }
}
