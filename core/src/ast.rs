//! Parser output: the statement tree a front end builds from source text.
//!
//! This tree is convenient for parsing and for pretty-printing, but poor
//! for execution — sequencing is just `Vec` order and branch bodies are
//! not linked to what follows them. [`crate::compile`] turns it into the
//! step graph used everywhere else.

/// A declared variable. `id` is a dense, program-wide index assigned by
/// the front end as declarations are encountered (globals first, then
/// each procedure's locals) — it is also the offset into every `Env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub id: u32,
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Lt,
    Gt,
    Leq,
    Geq,
    Eq,
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Range,
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Not,
    Neg,
}

/// An expression as written by the user: variables are referenced by
/// name and resolved to an id only during compilation.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Val(i32),
    Bin(BinOp, Box<Expr>, Box<Expr>),
    Un(UnOp, Box<Expr>),
}

/// An assignment statement, `target := value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: String,
    pub value: Expr,
}

/// A statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign(Assign),
    Skip,
    Break,
    If(Vec<Branch>),
    Do(Vec<Branch>),
}

/// One arm of an `if`/`do`. `cond = None` marks the trailing `else` arm;
/// at most one branch in a list may be else, and it must be last.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub cond: Option<Expr>,
    pub body: Vec<Stmt>,
}

/// A process definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Proc {
    pub name: String,
    pub locals: Vec<Variable>,
    pub body: Vec<Stmt>,
}

/// A `reach?` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub cond: Expr,
}

/// A whole program as produced by the front end.
#[derive(Debug, Clone, PartialEq)]
pub struct Prog {
    pub globals: Vec<Variable>,
    pub procs: Vec<Proc>,
    pub checks: Vec<Check>,
    pub nbvar: u32,
}
