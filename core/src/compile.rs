//! Translation from [`crate::ast`] to [`crate::ir`].
//!
//! The ast is fine for parsing and for display, but poorly suited for
//! execution: sequencing is just `Vec` order, and branch bodies are not
//! linked to their continuation. This module makes each statement a
//! node in a directed graph instead, with an optional assignment, zero
//! or more guarded continuations, and zero or one unguarded
//! continuation.
//!
//! The difficulty is linking the end of an `if`/`do` body to whatever
//! follows it. That's threaded through the recursion as two pieces of
//! context: `skipto` (where falling off the end of the current block
//! goes) and `breakto` (where a `break` inside it goes). A `do` loop
//! additionally needs to loop its body back to its own head — the step
//! id for that head is reserved up front and filled in once the whole
//! node is built, via [`StepBuilder`].

use crate::ast::{Assign, BinOp, Branch, Check, Expr, Proc, Prog, Stmt, UnOp, Variable};
use crate::error::CompileError;
use crate::ir::{RAssign, RCheck, RExpr, RGuard, RProc, RProg, RStep, StepId, VarId};

/// An arena of steps under construction. Ids are handed out with
/// [`reserve`](StepBuilder::reserve) before the step's contents are
/// known, which is what makes `do`'s self-referencing back-edge
/// possible without a `Cell`/`RefCell` or post-hoc patching pass.
struct StepBuilder {
    steps: Vec<Option<RStep>>,
}

impl StepBuilder {
    fn new() -> Self {
        Self { steps: Vec::new() }
    }

    fn reserve(&mut self) -> StepId {
        let id = StepId(self.steps.len() as u32);
        self.steps.push(None);
        id
    }

    fn fill(&mut self, id: StepId, step: RStep) {
        self.steps[id.0 as usize] = Some(step);
    }

    fn finish(self) -> Vec<RStep> {
        self.steps
            .into_iter()
            .enumerate()
            .map(|(i, s)| s.unwrap_or_else(|| panic!("step {i} reserved but never filled")))
            .collect()
    }
}

/// Resolves variable names within the scope currently being compiled:
/// the enclosing procedure's locals first, then globals.
struct CompileCtx<'a> {
    locals: &'a [Variable],
    globals: &'a [Variable],
    scope: &'a str,
}

impl<'a> CompileCtx<'a> {
    fn resolve(&self, name: &str) -> Result<VarId, CompileError> {
        self.locals
            .iter()
            .chain(self.globals.iter())
            .find(|v| v.name == name)
            .map(|v| VarId(v.id))
            .ok_or_else(|| CompileError::UndeclaredVariable {
                name: name.to_string(),
                scope: self.scope.to_string(),
            })
    }

    fn compile_expr(&self, expr: &Expr) -> Result<RExpr, CompileError> {
        Ok(match expr {
            Expr::Ident(name) => RExpr::Var(self.resolve(name)?),
            Expr::Val(n) => RExpr::Val(*n),
            Expr::Bin(op, lhs, rhs) => {
                let l = Box::new(self.compile_expr(lhs)?);
                let r = Box::new(self.compile_expr(rhs)?);
                match op {
                    BinOp::Lt => RExpr::Lt(l, r),
                    BinOp::Gt => RExpr::Gt(l, r),
                    BinOp::Leq => RExpr::Leq(l, r),
                    BinOp::Geq => RExpr::Geq(l, r),
                    BinOp::Eq => RExpr::Eq(l, r),
                    BinOp::And => RExpr::And(l, r),
                    BinOp::Or => RExpr::Or(l, r),
                    BinOp::Add => RExpr::Add(l, r),
                    BinOp::Sub => RExpr::Sub(l, r),
                    BinOp::Mul => RExpr::Mul(l, r),
                    BinOp::Div => RExpr::Div(l, r),
                    BinOp::Mod => RExpr::Mod(l, r),
                    BinOp::Range => RExpr::Range(l, r),
                }
            }
            Expr::Un(op, sub) => {
                let e = Box::new(self.compile_expr(sub)?);
                match op {
                    UnOp::Not => RExpr::Not(e),
                    UnOp::Neg => RExpr::Neg(e),
                }
            }
        })
    }
}

/// Compile a whole program: resolve every variable, translate every
/// procedure body and every check.
pub fn compile_prog(prog: &Prog) -> Result<RProg, CompileError> {
    let mut var_names = vec![String::new(); prog.nbvar as usize];
    for v in &prog.globals {
        var_names[v.id as usize] = v.name.clone();
    }
    for p in &prog.procs {
        for v in &p.locals {
            var_names[v.id as usize] = v.name.clone();
        }
    }

    let mut builder = StepBuilder::new();

    let procs = prog
        .procs
        .iter()
        .map(|p| compile_proc(p, &prog.globals, &mut builder))
        .collect::<Result<Vec<_>, _>>()?;

    let check_ctx = CompileCtx {
        locals: &[],
        globals: &prog.globals,
        scope: "reachability checks",
    };
    let checks = prog
        .checks
        .iter()
        .map(|c| compile_check(c, &check_ctx))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RProg {
        nbvar: prog.nbvar,
        var_names,
        globals: prog.globals.iter().map(|v| VarId(v.id)).collect(),
        procs,
        checks,
        steps: builder.finish(),
    })
}

fn compile_check(check: &Check, ctx: &CompileCtx) -> Result<RCheck, CompileError> {
    Ok(RCheck {
        cond: ctx.compile_expr(&check.cond)?,
    })
}

fn compile_proc(
    proc: &Proc,
    globals: &[Variable],
    builder: &mut StepBuilder,
) -> Result<RProc, CompileError> {
    let ctx = CompileCtx {
        locals: &proc.locals,
        globals,
        scope: &proc.name,
    };
    let entry = compile_block(&proc.body, &ctx, None, None, true, builder)?;
    Ok(RProc {
        name: proc.name.clone(),
        nb_locals: proc.locals.len() as u32,
        entry: Some(entry),
    })
}

/// Compile a statement block, returning the step that enters it. An
/// empty block degenerates to a single `skip`, so every block — even
/// one with no statements written — yields a concrete step.
fn compile_block(
    stmts: &[Stmt],
    ctx: &CompileCtx,
    skipto: Option<StepId>,
    breakto: Option<StepId>,
    advance: bool,
    builder: &mut StepBuilder,
) -> Result<StepId, CompileError> {
    match stmts.split_first() {
        Some((first, rest)) => compile_stmt(first, rest, ctx, skipto, breakto, advance, builder),
        None => compile_stmt(&Stmt::Skip, &[], ctx, skipto, breakto, advance, builder),
    }
}

fn compile_stmt(
    stmt: &Stmt,
    rest: &[Stmt],
    ctx: &CompileCtx,
    skipto: Option<StepId>,
    breakto: Option<StepId>,
    advance: bool,
    builder: &mut StepBuilder,
) -> Result<StepId, CompileError> {
    match stmt {
        Stmt::Assign(Assign { target, value }) => {
            let assign = RAssign {
                target: ctx.resolve(target)?,
                expr: ctx.compile_expr(value)?,
            };
            compile_leaf(Some(assign), rest, ctx, skipto, breakto, advance, false, builder)
        }
        Stmt::Skip => compile_leaf(None, rest, ctx, skipto, breakto, advance, false, builder),
        Stmt::Break => compile_leaf(None, rest, ctx, skipto, breakto, advance, true, builder),
        Stmt::If(branches) => compile_if(branches, rest, ctx, skipto, breakto, advance, builder),
        Stmt::Do(branches) => compile_do(branches, rest, ctx, skipto, breakto, advance, builder),
    }
}

/// Shared shape of `assign`/`skip`/`break`: if another statement
/// follows in this block, fall through to it (always forward
/// progress); otherwise a `break` goes to `breakto`, anything else
/// goes to `skipto` carrying the incoming `advance` bit.
#[allow(clippy::too_many_arguments)]
fn compile_leaf(
    assign: Option<RAssign>,
    rest: &[Stmt],
    ctx: &CompileCtx,
    skipto: Option<StepId>,
    breakto: Option<StepId>,
    advance: bool,
    is_break: bool,
    builder: &mut StepBuilder,
) -> Result<StepId, CompileError> {
    let id = builder.reserve();
    let (unguarded, step_advance) = if !rest.is_empty() {
        let next = compile_block(rest, ctx, skipto, breakto, advance, builder)?;
        (Some(next), true)
    } else if is_break {
        (breakto, true)
    } else {
        (skipto, advance)
    };
    builder.fill(
        id,
        RStep {
            id,
            assign,
            guarded: Vec::new(),
            unguarded,
            advance: step_advance,
        },
    );
    Ok(id)
}

fn compile_if(
    branches: &[Branch],
    rest: &[Stmt],
    ctx: &CompileCtx,
    skipto: Option<StepId>,
    breakto: Option<StepId>,
    advance: bool,
    builder: &mut StepBuilder,
) -> Result<StepId, CompileError> {
    let id = builder.reserve();
    let (branch_skipto, branch_advance) = if !rest.is_empty() {
        let next = compile_block(rest, ctx, skipto, breakto, advance, builder)?;
        (Some(next), true)
    } else {
        (skipto, advance)
    };
    let (guarded, unguarded) =
        compile_branch_list(branches, ctx, branch_skipto, breakto, branch_advance, builder)?;
    builder.fill(
        id,
        RStep {
            id,
            assign: None,
            guarded,
            unguarded,
            advance: true,
        },
    );
    Ok(id)
}

fn compile_do(
    branches: &[Branch],
    rest: &[Stmt],
    ctx: &CompileCtx,
    skipto: Option<StepId>,
    breakto: Option<StepId>,
    advance: bool,
    builder: &mut StepBuilder,
) -> Result<StepId, CompileError> {
    let id = builder.reserve();
    let body_breakto = if !rest.is_empty() {
        Some(compile_block(rest, ctx, skipto, breakto, advance, builder)?)
    } else {
        skipto
    };
    // Inside a `do`, falling off a branch body loops back to this
    // step (`skipto = id`); breaking leaves the loop to `body_breakto`.
    // Skipping does not by itself advance the computation.
    let (guarded, unguarded) =
        compile_branch_list(branches, ctx, Some(id), body_breakto, false, builder)?;
    builder.fill(
        id,
        RStep {
            id,
            assign: None,
            guarded,
            unguarded,
            advance: true,
        },
    );
    Ok(id)
}

/// Compile the arms of an `if`/`do`. At most one arm may be an `else`
/// (no condition), and it must be last; its compiled entry becomes the
/// unguarded successor.
fn compile_branch_list(
    branches: &[Branch],
    ctx: &CompileCtx,
    skipto: Option<StepId>,
    breakto: Option<StepId>,
    advance: bool,
    builder: &mut StepBuilder,
) -> Result<(Vec<RGuard>, Option<StepId>), CompileError> {
    let mut guarded = Vec::with_capacity(branches.len());
    let mut unguarded = None;
    for branch in branches {
        if unguarded.is_some() {
            return Err(CompileError::ElseNotLast);
        }
        let next = compile_block(&branch.body, ctx, skipto, breakto, advance, builder)?;
        match &branch.cond {
            Some(cond) => {
                let cond = ctx.compile_expr(cond)?;
                guarded.push(RGuard { cond, next });
            }
            None => unguarded = Some(next),
        }
    }
    Ok((guarded, unguarded))
}
