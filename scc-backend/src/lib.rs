//! SubC Compiler - Code Generation Backend
//!
//! This crate handles the final phase of compilation: generating 68000
//! assembly from the SubC AST. It includes:
//!
//! - Target instruction definitions and rendering
//! - The two-stream (code/data) emission buffer
//! - Branch label allocation
//! - Stack frame layout
//! - The AST-walking code generator and calling convention

pub mod asm;
pub mod codegen;
pub mod emit;
pub mod labels;
pub mod layout;

#[cfg(test)]
mod tests;

pub use asm::{Cond, DataReg, Inst};
pub use codegen::CodeGen;
pub use emit::Emit;
pub use labels::LabelAllocator;
pub use layout::{Layout, Slot, SymbolKind};

use scc_common::CompilerError;
use scc_frontend::Program;
use thiserror::Error;

/// Errors raised during code generation
///
/// Every variant signals a bug upstream of the generator (a name the
/// parser let through without a declaration, a sentinel operator in the
/// tree), not a recoverable condition. The run aborts on the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("unknown symbol '{symbol}' in function '{function}'")]
    UnknownSymbol { function: String, symbol: String },

    #[error("invalid binary operator in function '{function}'")]
    InvalidOperator { function: String },
}

impl From<CodegenError> for CompilerError {
    fn from(err: CodegenError) -> Self {
        CompilerError::codegen_error(err.to_string())
    }
}

/// Main entry point for code generation
pub fn generate_assembly(program: &Program) -> Result<String, CodegenError> {
    let emit = CodeGen::new().generate(program)?;
    Ok(emit.program_text())
}
