//! Pretty-printers for the parser's syntax tree and the compiler's
//! internal graph representation, ported from the reference's `pp_*`
//! family: `VAR [name]`, `PROC {name} { ... }`, `CHOICE`/`LOOP` blocks,
//! `SET [x] <- expr`, and parenthesized prefix expressions.

use std::fmt::Write as _;

use rc_core::ast::{BinOp, Branch, Expr, Proc, Prog, Stmt, UnOp, Variable};
use rc_core::ir::{RExpr, RProg, RStep, StepId};

const RESET: &str = "\x1b[0m";
const KEYWORD: &str = "\x1b[1;34m"; // bold blue
const OP: &str = "\x1b[33m"; // yellow
const IDENT: &str = "\x1b[32m"; // green

/// Either emits ANSI escapes or passes text through, depending on
/// `--no-color`.
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Painter { color }
    }

    fn wrap(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn keyword(&self, text: &str) -> String {
        self.wrap(KEYWORD, text)
    }

    fn op(&self, text: &str) -> String {
        self.wrap(OP, text)
    }

    fn ident(&self, text: &str) -> String {
        self.wrap(IDENT, text)
    }
}

fn indent(out: &mut String, depth: u32) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn binop_name(op: BinOp) -> &'static str {
    match op {
        BinOp::Lt => "Lt",
        BinOp::Gt => "Gt",
        BinOp::Leq => "Leq",
        BinOp::Geq => "Geq",
        BinOp::Eq => "Eq",
        BinOp::And => "And",
        BinOp::Or => "Or",
        BinOp::Add => "Add",
        BinOp::Sub => "Sub",
        BinOp::Mul => "Mul",
        BinOp::Div => "Div",
        BinOp::Mod => "Mod",
        BinOp::Range => "Range",
    }
}

fn unop_name(op: UnOp) -> &'static str {
    match op {
        UnOp::Not => "Not",
        UnOp::Neg => "Neg",
    }
}

// -- ast printer --

pub fn pp_prog(p: &Painter, prog: &Prog) -> String {
    let mut out = String::new();
    for v in &prog.globals {
        pp_var(p, &mut out, 0, v);
    }
    for proc in &prog.procs {
        pp_proc(p, &mut out, proc);
    }
    for check in &prog.checks {
        let _ = writeln!(out, "{} {}", p.keyword("REACH?"), pp_expr(p, &check.cond));
    }
    out
}

fn pp_var(p: &Painter, out: &mut String, depth: u32, var: &Variable) {
    indent(out, depth);
    let _ = writeln!(out, "{} [{}]", p.keyword("VAR"), p.ident(&var.name));
}

fn pp_expr(p: &Painter, expr: &Expr) -> String {
    match expr {
        Expr::Ident(name) => format!("({})", p.ident(name)),
        Expr::Val(n) => format!("({n})"),
        Expr::Bin(op, lhs, rhs) => format!(
            "({} {} {})",
            p.op(binop_name(*op)),
            pp_expr(p, lhs),
            pp_expr(p, rhs)
        ),
        Expr::Un(op, sub) => format!("({} {})", p.op(unop_name(*op)), pp_expr(p, sub)),
    }
}

fn pp_branch(p: &Painter, out: &mut String, depth: u32, branch: &Branch) {
    indent(out, depth);
    match &branch.cond {
        Some(cond) => {
            let _ = writeln!(out, "{} {}", p.keyword("WHEN"), pp_expr(p, cond));
        }
        None => {
            let _ = writeln!(out, "{} {}", p.keyword("WHEN"), p.keyword("Else"));
        }
    }
    for stmt in &branch.body {
        pp_stmt(p, out, depth + 1, stmt);
    }
}

fn pp_stmt(p: &Painter, out: &mut String, depth: u32, stmt: &Stmt) {
    match stmt {
        Stmt::If(branches) => {
            indent(out, depth);
            let _ = writeln!(out, "{} {{", p.keyword("CHOICE"));
            for b in branches {
                pp_branch(p, out, depth + 1, b);
            }
            indent(out, depth);
            out.push_str("}\n");
        }
        Stmt::Do(branches) => {
            indent(out, depth);
            let _ = writeln!(out, "{} {{", p.keyword("LOOP"));
            for b in branches {
                pp_branch(p, out, depth + 1, b);
            }
            indent(out, depth);
            out.push_str("}\n");
        }
        Stmt::Assign(a) => {
            indent(out, depth);
            let _ = writeln!(
                out,
                "{} [{}] <- {}",
                p.keyword("SET"),
                p.ident(&a.target),
                pp_expr(p, &a.value)
            );
        }
        Stmt::Break => {
            indent(out, depth);
            let _ = writeln!(out, "{}", p.keyword("BREAK"));
        }
        Stmt::Skip => {
            indent(out, depth);
            let _ = writeln!(out, "{}", p.keyword("SKIP"));
        }
    }
}

fn pp_proc(p: &Painter, out: &mut String, proc: &Proc) {
    out.push('\n');
    let _ = writeln!(out, "{} {{{}}} {{", p.keyword("PROC"), p.ident(&proc.name));
    for v in &proc.locals {
        pp_var(p, out, 1, v);
    }
    for stmt in &proc.body {
        pp_stmt(p, out, 1, stmt);
    }
    out.push_str("}\n");
}

// -- ir printer --

pub fn pp_rprog(p: &Painter, prog: &RProg) -> String {
    let mut out = String::new();
    for (i, name) in prog.var_names.iter().enumerate() {
        let _ = writeln!(out, "ref [{i}] as '{}'", p.ident(name));
    }
    for proc in &prog.procs {
        let _ = writeln!(
            out,
            "{} '{}' entrypoint {}",
            p.keyword("thread"),
            p.ident(&proc.name),
            fmt_step_ref(proc.entry)
        );
        if let Some(entry) = proc.entry {
            pp_rstep(p, &mut out, prog, 1, entry, &mut vec![false; prog.nbstep()]);
        } else {
            out.push_str("  <END>\n");
        }
        out.push_str("end\n");
    }
    for check in &prog.checks {
        let _ = writeln!(out, "{} {}", p.keyword("reach?"), pp_rexpr(p, &check.cond));
    }
    out
}

fn fmt_step_ref(step: Option<StepId>) -> String {
    match step {
        Some(s) => format!("[{}]", s.0),
        None => "[end]".to_string(),
    }
}

pub fn pp_rexpr(p: &Painter, expr: &RExpr) -> String {
    match expr {
        RExpr::Var(v) => format!("{{{}}}", v.0),
        RExpr::Val(n) => format!("({n})"),
        RExpr::Lt(l, r) => bin(p, "Lt", l, r),
        RExpr::Gt(l, r) => bin(p, "Gt", l, r),
        RExpr::Leq(l, r) => bin(p, "Leq", l, r),
        RExpr::Geq(l, r) => bin(p, "Geq", l, r),
        RExpr::Eq(l, r) => bin(p, "Eq", l, r),
        RExpr::And(l, r) => bin(p, "And", l, r),
        RExpr::Or(l, r) => bin(p, "Or", l, r),
        RExpr::Add(l, r) => bin(p, "Add", l, r),
        RExpr::Sub(l, r) => bin(p, "Sub", l, r),
        RExpr::Mul(l, r) => bin(p, "Mul", l, r),
        RExpr::Div(l, r) => bin(p, "Div", l, r),
        RExpr::Mod(l, r) => bin(p, "Mod", l, r),
        RExpr::Range(l, r) => bin(p, "Range", l, r),
        RExpr::Not(e) => format!("({} {})", p.op("Not"), pp_rexpr(p, e)),
        RExpr::Neg(e) => format!("({} {})", p.op("Neg"), pp_rexpr(p, e)),
    }
}

fn bin(p: &Painter, name: &str, l: &RExpr, r: &RExpr) -> String {
    format!("({} {} {})", p.op(name), pp_rexpr(p, l), pp_rexpr(p, r))
}

/// Walks the step graph depth-first, stopping at a loop back-edge
/// (`seen`) so a `do` body doesn't recurse forever.
fn pp_rstep(
    p: &Painter,
    out: &mut String,
    prog: &RProg,
    depth: u32,
    id: StepId,
    seen: &mut [bool],
) {
    if seen[id.0 as usize] {
        indent(out, depth);
        let _ = writeln!(out, "...back to [{}] (loop)", id.0);
        return;
    }
    seen[id.0 as usize] = true;
    let step: &RStep = prog.step(id);
    indent(out, depth);
    if let Some(a) = &step.assign {
        let _ = write!(
            out,
            "<{}> {{{}}} <- {} then {}",
            id.0,
            a.target.0,
            pp_rexpr(p, &a.expr),
            fmt_step_ref(step.unguarded)
        );
        if step.advance {
            out.push('\n');
            if let Some(next) = step.unguarded {
                pp_rstep(p, out, prog, depth, next, seen);
            }
        } else {
            out.push_str(" (loop)\n");
        }
    } else if !step.guarded.is_empty() {
        let _ = writeln!(out, "<{}> ?{}", id.0, step.guarded.len());
        for g in &step.guarded {
            indent(out, depth + 1);
            let _ = write!(out, "when {} jump to {}", pp_rexpr(p, &g.cond), fmt_step_ref(Some(g.next)));
            if step.advance {
                out.push('\n');
                pp_rstep(p, out, prog, depth + 1, g.next, seen);
            } else {
                out.push_str(" (loop)\n");
            }
        }
        if let Some(u) = step.unguarded {
            indent(out, depth + 1);
            let _ = writeln!(out, "else jump to {}", fmt_step_ref(Some(u)));
        }
        indent(out, depth);
        out.push_str("</>\n");
    } else {
        let _ = write!(out, "skip to {}", fmt_step_ref(step.unguarded));
        if step.advance {
            out.push('\n');
            if let Some(next) = step.unguarded {
                pp_rstep(p, out, prog, depth, next, seen);
            }
        } else {
            out.push_str(" (loop)\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_core::ast::{Assign, Check};

    #[test]
    fn plain_printer_has_no_escapes() {
        let p = Painter::new(false);
        let prog = Prog {
            globals: vec![Variable {
                name: "x".to_string(),
                id: 0,
            }],
            procs: vec![],
            checks: vec![Check {
                cond: Expr::Bin(BinOp::Eq, Box::new(Expr::Ident("x".to_string())), Box::new(Expr::Val(1))),
            }],
            nbvar: 1,
        };
        let rendered = pp_prog(&p, &prog);
        assert!(!rendered.contains('\x1b'));
        assert!(rendered.contains("VAR [x]"));
        assert!(rendered.contains("REACH?"));
    }

    #[test]
    fn colored_printer_wraps_keywords() {
        let p = Painter::new(true);
        let prog = Prog {
            globals: vec![],
            procs: vec![Proc {
                name: "P".to_string(),
                locals: vec![],
                body: vec![Stmt::Assign(Assign {
                    target: "x".to_string(),
                    value: Expr::Val(1),
                })],
            }],
            checks: vec![],
            nbvar: 1,
        };
        let rendered = pp_prog(&p, &prog);
        assert!(rendered.contains('\x1b'));
    }
}
