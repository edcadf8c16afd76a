//! Internal representation, compiler and expression evaluator for the
//! guarded-command checker.
//!
//! `ast` is what a front end hands us; `compile` turns it into the step
//! graph defined by `ir`; `eval` gives that graph its dynamic semantics.

pub mod ast;
pub mod compile;
pub mod error;
pub mod eval;
pub mod ir;

pub use error::CompileError;
pub use eval::EvalValue;
pub use ir::{RAssign, RCheck, RExpr, RGuard, RProc, RProg, RStep, StepId, VarId};
