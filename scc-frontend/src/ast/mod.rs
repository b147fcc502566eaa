//! Abstract Syntax Tree definitions for SubC
//!
//! The AST is built by the parser and consumed read-only by the code
//! generator. Every node category is a closed enum, so lowering code
//! matches exhaustively and an unhandled variant fails to compile.

pub mod ops;

pub use ops::Bop;

use serde::{Deserialize, Serialize};

/// A whole SubC program: functions in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

/// A function definition
///
/// Parameters and locals are plain names; SubC has a single `int` type,
/// so declarations carry no type information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub locals: Vec<String>,
    pub body: Vec<Stmt>,
}

/// A braced statement sequence
pub type Block = Vec<Stmt>;

/// SubC statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `target = expr;` or `target = call(...);`
    Assign { target: String, rhs: AssignRhs },

    /// `return expr;` (the expression may be empty)
    Return(Expr),

    /// `if (cond) { ... }` — SubC has no else branch
    If { cond: Expr, body: Block },

    /// `while (cond) { ... }`
    While { cond: Expr, body: Block },
}

/// The right-hand side of an assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignRhs {
    Expr(Expr),
    Call(Call),
}

/// An expression: at most one binary operation
///
/// `lhs` alone is a bare value. An expression with no `lhs` is the
/// empty expression (an omitted return value) and lowers to nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub lhs: Option<Operand>,
    pub op: Option<Bop>,
    pub rhs: Option<Operand>,
}

impl Expr {
    /// The empty expression
    pub fn empty() -> Self {
        Self {
            lhs: None,
            op: None,
            rhs: None,
        }
    }

    /// A bare value
    pub fn value(lhs: Operand) -> Self {
        Self {
            lhs: Some(lhs),
            op: None,
            rhs: None,
        }
    }

    /// A binary operation
    pub fn binary(lhs: Operand, op: Bop, rhs: Operand) -> Self {
        Self {
            lhs: Some(lhs),
            op: Some(op),
            rhs: Some(rhs),
        }
    }
}

/// An expression operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    /// Reference to a parameter or local
    Name(String),
    /// Integer literal
    Number(i32),
}

/// A function call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub callee: String,
    pub args: Vec<Arg>,
}

/// A call argument
///
/// String literals occur only here; they exist for the built-in `says`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Arg {
    Name(String),
    Number(i32),
    Text(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_constructors() {
        assert_eq!(Expr::empty().lhs, None);

        let bare = Expr::value(Operand::Number(7));
        assert_eq!(bare.op, None);
        assert_eq!(bare.rhs, None);

        let bin = Expr::binary(Operand::Name("a".to_string()), Bop::Lt, Operand::Number(5));
        assert_eq!(bin.op, Some(Bop::Lt));
    }
}
