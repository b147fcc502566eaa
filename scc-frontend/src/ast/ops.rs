//! Operator definitions for SubC

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operators
///
/// SubC has three arithmetic operators and six relational operators.
/// `Bad` is the invalid sentinel: it never comes out of a successful
/// parse, and reaching code generation with it is an internal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bop {
    // Arithmetic
    Add,
    Sub,
    Mul,

    // Relational
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,

    // Invalid sentinel
    Bad,
}

impl Bop {
    /// True for `< <= == != >= >`
    pub fn is_relational(&self) -> bool {
        matches!(self, Bop::Lt | Bop::Le | Bop::Eq | Bop::Ne | Bop::Ge | Bop::Gt)
    }
}

impl fmt::Display for Bop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op_str = match self {
            Bop::Add => "+",
            Bop::Sub => "-",
            Bop::Mul => "*",
            Bop::Lt => "<",
            Bop::Le => "<=",
            Bop::Eq => "==",
            Bop::Ne => "!=",
            Bop::Ge => ">=",
            Bop::Gt => ">",
            Bop::Bad => "<bad>",
        };
        write!(f, "{}", op_str)
    }
}
