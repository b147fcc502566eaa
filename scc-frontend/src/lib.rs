//! SubC Compiler - Frontend
//!
//! This crate provides the frontend components for the SubC compiler:
//! - Lexer: tokenizes SubC source code
//! - Parser: builds the AST from tokens
//! - AST: abstract syntax tree definitions

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Arg, AssignRhs, Block, Bop, Call, Expr, Function, Operand, Program, Stmt};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

use scc_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse SubC source code into an AST
    pub fn parse_source(source: &str) -> Result<Program, CompilerError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;

        let mut parser = Parser::new(tokens);
        parser.parse_program()
    }
}
