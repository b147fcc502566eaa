//! SubC code generator
//!
//! Walks the AST once, front to back, and emits 68000 assembly into
//! the emission buffer: one traversal method per node kind, plus the
//! calling convention (prolog, epilog, argument marshalling).
//!
//! Expression results always land in D0. A relational operator leaves
//! 1 (true) or 0 (false) there; for `a < 5` the generator emits:
//!
//! ```text
//!     MOVE.L  (8,A6), D0
//!     MOVE.L  #5, D1
//!     CMP.L   D1, D0
//!     BLT     L20
//!     CLR.L   D0
//!     BRA     L30
//! L20:
//!     MOVE.L  #1, D0
//! L30:
//! ```
//!
//! Calls push their arguments right to left, so the leftmost argument
//! sits nearest the top of stack at the branch; the caller pops all of
//! them afterwards.

use crate::asm::{Cond, DataReg, Inst};
use crate::emit::Emit;
use crate::labels::LabelAllocator;
use crate::layout::Layout;
use crate::CodegenError;
use log::{debug, trace};
use scc_frontend::{Arg, AssignRhs, Bop, Call, Expr, Function, Operand, Program, Stmt};

/// The function that receives control at program start; it halts
/// instead of returning
const ENTRY_FUNCTION: &str = "main";

/// Runtime support module pulled in by the preamble (I/O routines)
const IO_INCLUDE: &str = "io.X68";

/// Code generator for one compilation run
///
/// Owns the run's layout table, emission buffer, and label allocator.
/// A new `CodeGen` starts every service from scratch, so generating
/// the same program twice yields byte-identical output.
#[derive(Debug)]
pub struct CodeGen {
    layout: Layout,
    emit: Emit,
    labels: LabelAllocator,
}

impl Default for CodeGen {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGen {
    /// Create a generator with fresh services
    pub fn new() -> Self {
        Self {
            layout: Layout::new(),
            emit: Emit::new(),
            labels: LabelAllocator::new(),
        }
    }

    /// Generate code for a whole program, consuming the generator and
    /// returning the filled emission buffer
    pub fn generate(mut self, program: &Program) -> Result<Emit, CodegenError> {
        self.gen_program(program)?;
        Ok(self.emit)
    }

    /// Prog => Fun+
    fn gen_program(&mut self, program: &Program) -> Result<(), CodegenError> {
        self.emit.emit_code(Inst::Include(IO_INCLUDE.to_string()));
        self.layout.seed_intrinsics();

        for fun in &program.functions {
            self.gen_function(fun)?;
        }

        self.emit.emit_code(Inst::End(ENTRY_FUNCTION.to_string()));
        Ok(())
    }

    /// Fun => "int" Nam "(" Pars ")" Body
    fn gen_function(&mut self, fun: &Function) -> Result<(), CodegenError> {
        debug!(
            "lowering {} ({} params, {} locals)",
            fun.name,
            fun.params.len(),
            fun.locals.len()
        );

        self.layout.build(fun);
        self.emit.emit_code(Inst::Label(fun.name.clone()));
        self.gen_prolog();
        self.gen_stmts(fun, &fun.body)
    }

    /// Save the caller's frame pointer, establish the new frame, and
    /// reserve the local-variable area
    fn gen_prolog(&mut self) {
        self.emit.emit_code(Inst::SaveFp);
        self.emit.emit_code(Inst::NewFp);

        let locals = self.layout.frame_bytes();
        if locals > 0 {
            self.emit.emit_code(Inst::AllocLocals(locals));
        }
    }

    /// Release the frame and leave the function. `main` has no caller,
    /// so it halts the simulator instead of returning.
    fn gen_epilog(&mut self, fun: &Function) {
        self.emit.emit_code(Inst::FreeLocals);
        self.emit.emit_code(Inst::RestoreFp);
        self.emit.emit_code(Inst::AdjustSp(4));

        if fun.name == ENTRY_FUNCTION {
            self.emit.emit_code(Inst::Halt);
        } else {
            self.emit.emit_code(Inst::Rts);
        }
    }

    /// Stms => Stm+
    fn gen_stmts(&mut self, fun: &Function, stmts: &[Stmt]) -> Result<(), CodegenError> {
        for stmt in stmts {
            self.gen_stmt(fun, stmt)?;
        }
        Ok(())
    }

    /// Stm => Asg | Ret | If | While
    fn gen_stmt(&mut self, fun: &Function, stmt: &Stmt) -> Result<(), CodegenError> {
        match stmt {
            Stmt::Assign { target, rhs } => {
                match rhs {
                    AssignRhs::Call(call) => self.gen_call(fun, call)?,
                    AssignRhs::Expr(expr) => self.gen_expr(fun, expr)?,
                }

                // The result is in D0 either way; store it to the target
                let slot = self.layout.lookup(&fun.name, target)?;
                self.emit
                    .emit_code(Inst::StoreFrame(DataReg::D0, slot.offset));
                Ok(())
            }
            Stmt::Return(expr) => {
                self.gen_expr(fun, expr)?;
                self.gen_epilog(fun);
                Ok(())
            }
            Stmt::If { cond, body } => self.gen_if(fun, cond, body),
            Stmt::While { cond, body } => self.gen_while(fun, cond, body),
        }
    }

    /// If => "if" "(" Exp ")" Block
    ///
    /// Same test as the while loop, without the back edge: a false
    /// condition branches past the block.
    fn gen_if(&mut self, fun: &Function, cond: &Expr, body: &[Stmt]) -> Result<(), CodegenError> {
        let exit_label = self.labels.fresh();

        self.gen_expr(fun, cond)?;
        self.emit.emit_code(Inst::CmpZero(DataReg::D0));
        self.emit
            .emit_code(Inst::Branch(Cond::Eq, exit_label.clone()));

        self.gen_stmts(fun, body)?;

        self.emit.emit_code(Inst::Label(exit_label));
        Ok(())
    }

    /// While => "while" "(" Exp ")" Block
    ///
    /// Pre-test loop: the condition runs before every iteration,
    /// including the first, so a false entry test skips the body
    /// entirely.
    fn gen_while(
        &mut self,
        fun: &Function,
        cond: &Expr,
        body: &[Stmt],
    ) -> Result<(), CodegenError> {
        let start_label = self.labels.fresh();
        self.emit.emit_code(Inst::Label(start_label.clone()));

        let exit_label = self.labels.fresh();

        self.gen_expr(fun, cond)?;
        self.emit.emit_code(Inst::CmpZero(DataReg::D0));
        self.emit
            .emit_code(Inst::Branch(Cond::Eq, exit_label.clone()));

        self.gen_stmts(fun, body)?;

        self.emit.emit_code(Inst::Bra(start_label));
        self.emit.emit_code(Inst::Label(exit_label));
        Ok(())
    }

    /// Exp => NamNum | NamNum Bop NamNum
    ///
    /// An expression with no left operand is empty (an omitted return
    /// value) and emits nothing. Otherwise the left operand lands in
    /// D0; with a right operand present it lands in D1 and the
    /// operator combines them.
    fn gen_expr(&mut self, fun: &Function, expr: &Expr) -> Result<(), CodegenError> {
        let Some(lhs) = &expr.lhs else {
            return Ok(());
        };
        self.gen_operand(fun, lhs, DataReg::D0)?;

        let Some(rhs) = &expr.rhs else {
            return Ok(());
        };
        self.gen_operand(fun, rhs, DataReg::D1)?;

        self.gen_bop(fun, expr.op.unwrap_or(Bop::Bad))
    }

    /// Load one operand into `reg`: a name from its frame slot, a
    /// number as an immediate
    fn gen_operand(
        &mut self,
        fun: &Function,
        operand: &Operand,
        reg: DataReg,
    ) -> Result<(), CodegenError> {
        match operand {
            Operand::Name(name) => {
                let slot = self.layout.lookup(&fun.name, name)?;
                self.emit.emit_code(Inst::LoadFrame(slot.offset, reg));
            }
            Operand::Number(value) => {
                self.emit.emit_code(Inst::LoadImm(*value, reg));
            }
        }
        Ok(())
    }

    /// Combine D1 into D0 according to the operator. Arithmetic is one
    /// instruction; a relational operator compares and then
    /// materializes 0 or 1 into D0.
    fn gen_bop(&mut self, fun: &Function, op: Bop) -> Result<(), CodegenError> {
        let cond = match op {
            Bop::Add => {
                self.emit.emit_code(Inst::Add);
                return Ok(());
            }
            Bop::Sub => {
                self.emit.emit_code(Inst::Sub);
                return Ok(());
            }
            Bop::Mul => {
                self.emit.emit_code(Inst::Mul);
                return Ok(());
            }
            Bop::Lt => Cond::Lt,
            Bop::Le => Cond::Le,
            Bop::Eq => Cond::Eq,
            Bop::Ne => Cond::Ne,
            Bop::Ge => Cond::Ge,
            Bop::Gt => Cond::Gt,
            Bop::Bad => {
                return Err(CodegenError::InvalidOperator {
                    function: fun.name.clone(),
                });
            }
        };

        self.emit.emit_code(Inst::Cmp);
        self.gen_bool(cond);
        Ok(())
    }

    /// Materialize a comparison result as an integer: branch to the
    /// true label on `cond`, otherwise clear D0 and skip to the exit
    fn gen_bool(&mut self, cond: Cond) {
        let true_label = self.labels.fresh();
        self.emit.emit_code(Inst::Branch(cond, true_label.clone()));
        self.emit.emit_code(Inst::Clr(DataReg::D0));

        let exit_label = self.labels.fresh();
        self.emit.emit_code(Inst::Bra(exit_label.clone()));

        self.emit.emit_code(Inst::Label(true_label));
        self.emit.emit_code(Inst::LoadImm(1, DataReg::D0));
        self.emit.emit_code(Inst::Label(exit_label));
    }

    /// Call => Nam "(" Args ")"
    ///
    /// Arguments are pushed right to left, then the branch, then the
    /// caller pops one word per argument. Whether the argument count
    /// matches the callee's parameter list is deliberately not checked.
    fn gen_call(&mut self, fun: &Function, call: &Call) -> Result<(), CodegenError> {
        if self.layout.is_intrinsic(&call.callee) {
            trace!("call to built-in {}", call.callee);
        }

        for arg in call.args.iter().rev() {
            match arg {
                Arg::Name(name) => {
                    let slot = self.layout.lookup(&fun.name, name)?;
                    self.emit.emit_code(Inst::PushFrame(slot.offset));
                }
                Arg::Number(value) => {
                    self.emit.emit_code(Inst::PushImm(*value));
                }
                Arg::Text(text) => {
                    let data_label = self.labels.fresh();
                    self.emit.emit_data(Inst::Label(data_label.clone()));
                    self.emit.emit_data(Inst::DefineString(text.clone()));

                    self.emit.emit_code(Inst::Lea(data_label));
                    self.emit.emit_code(Inst::PushAddr);
                }
            }
        }

        self.emit.emit_code(Inst::Bsr(call.callee.clone()));

        let arg_bytes = crate::layout::WORD_BYTES * call.args.len() as i32;
        if arg_bytes > 0 {
            self.emit.emit_code(Inst::AdjustSp(arg_bytes));
        }

        Ok(())
    }
}
