//! Expression evaluation.
//!
//! The original encoded "this expression has no defined value" (division
//! or modulo by zero, an empty `lo..hi` range) as `INT_MIN`, which
//! collides with a legitimate result for any expression that happens to
//! compute `i32::MIN`. [`EvalValue`] makes the two cases genuinely
//! distinct instead.
//!
//! Two evaluators share these semantics. [`eval`] draws one concrete
//! value per `Range` from an `Rng`, the right model for a single random
//! simulation step. [`eval_all`] instead enumerates every value a
//! `Range` subexpression could draw, which is what the exhaustive
//! engine needs: a `do { x := lo..hi }`-style nondeterministic
//! assignment must be treated as branching to every possible outcome,
//! not sampled once, or BFS would silently miss reachable states.

use std::collections::HashSet;

use rand::Rng;

use crate::ir::RExpr;

/// The result of evaluating an [`RExpr`]: either a definite integer, or
/// "undefined" (propagates through every operator; treated as a failing
/// guard wherever it is consumed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvalValue {
    Definite(i32),
    Partial,
}

impl EvalValue {
    pub fn is_partial(self) -> bool {
        matches!(self, EvalValue::Partial)
    }

    /// Truthiness used by guards and checks: a definite non-zero value
    /// is satisfied; partial or zero is not.
    pub fn is_satisfied(self) -> bool {
        matches!(self, EvalValue::Definite(n) if n != 0)
    }

    fn int(self) -> Option<i32> {
        match self {
            EvalValue::Definite(n) => Some(n),
            EvalValue::Partial => None,
        }
    }
}

fn bool_val(b: bool) -> EvalValue {
    EvalValue::Definite(if b { 1 } else { 0 })
}

/// Evaluate `expr` over `env` (indexed by `VarId`). `rng` supplies the
/// draw for `Range`.
pub fn eval<R: Rng + ?Sized>(expr: &RExpr, env: &[i32], rng: &mut R) -> EvalValue {
    match expr {
        RExpr::Var(v) => EvalValue::Definite(env[v.0 as usize]),
        RExpr::Val(n) => EvalValue::Definite(*n),
        RExpr::Not(e) => match eval(e, env, rng).int() {
            Some(n) => bool_val(n == 0),
            None => EvalValue::Partial,
        },
        RExpr::Neg(e) => match eval(e, env, rng).int() {
            Some(n) => EvalValue::Definite(n.wrapping_neg()),
            None => EvalValue::Partial,
        },
        RExpr::Lt(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a < b)),
        RExpr::Gt(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a > b)),
        RExpr::Leq(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a <= b)),
        RExpr::Geq(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a >= b)),
        RExpr::Eq(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a == b)),
        RExpr::And(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a != 0 && b != 0)),
        RExpr::Or(l, r) => eval_bin(l, r, env, rng, |a, b| bool_val(a != 0 || b != 0)),
        RExpr::Add(l, r) => eval_bin(l, r, env, rng, |a, b| EvalValue::Definite(a.wrapping_add(b))),
        RExpr::Sub(l, r) => eval_bin(l, r, env, rng, |a, b| EvalValue::Definite(a.wrapping_sub(b))),
        RExpr::Mul(l, r) => eval_bin(l, r, env, rng, |a, b| EvalValue::Definite(a.wrapping_mul(b))),
        RExpr::Div(l, r) => eval_bin(l, r, env, rng, |a, b| {
            if b == 0 {
                EvalValue::Partial
            } else {
                EvalValue::Definite(a.wrapping_div(b))
            }
        }),
        RExpr::Mod(l, r) => eval_bin(l, r, env, rng, |a, b| {
            if b == 0 {
                EvalValue::Partial
            } else {
                EvalValue::Definite(a.wrapping_rem(b))
            }
        }),
        RExpr::Range(lo, hi) => {
            let lo = eval(lo, env, rng);
            let hi = eval(hi, env, rng);
            match (lo.int(), hi.int()) {
                (Some(a), Some(b)) if a <= b => EvalValue::Definite(rng.gen_range(a..=b)),
                (Some(_), Some(_)) => EvalValue::Partial,
                _ => EvalValue::Partial,
            }
        }
    }
}

fn eval_bin<R: Rng + ?Sized>(
    lhs: &RExpr,
    rhs: &RExpr,
    env: &[i32],
    rng: &mut R,
    f: impl FnOnce(i32, i32) -> EvalValue,
) -> EvalValue {
    let l = eval(lhs, env, rng);
    let r = eval(rhs, env, rng);
    match (l.int(), r.int()) {
        (Some(a), Some(b)) => f(a, b),
        _ => EvalValue::Partial,
    }
}

fn dedup(values: Vec<EvalValue>) -> Vec<EvalValue> {
    let mut seen = HashSet::with_capacity(values.len());
    values.into_iter().filter(|v| seen.insert(*v)).collect()
}

/// Enumerate every distinct value `expr` could produce over `env`,
/// branching at each `Range` subexpression instead of sampling it.
/// Used by the exhaustive engine so nondeterministic assignments and
/// guards are explored completely rather than once per random draw.
pub fn eval_all(expr: &RExpr, env: &[i32]) -> Vec<EvalValue> {
    match expr {
        RExpr::Var(v) => vec![EvalValue::Definite(env[v.0 as usize])],
        RExpr::Val(n) => vec![EvalValue::Definite(*n)],
        RExpr::Not(e) => unary_all(e, env, |n| bool_val(n == 0)),
        RExpr::Neg(e) => unary_all(e, env, |n| EvalValue::Definite(n.wrapping_neg())),
        RExpr::Lt(l, r) => binary_all(l, r, env, |a, b| bool_val(a < b)),
        RExpr::Gt(l, r) => binary_all(l, r, env, |a, b| bool_val(a > b)),
        RExpr::Leq(l, r) => binary_all(l, r, env, |a, b| bool_val(a <= b)),
        RExpr::Geq(l, r) => binary_all(l, r, env, |a, b| bool_val(a >= b)),
        RExpr::Eq(l, r) => binary_all(l, r, env, |a, b| bool_val(a == b)),
        RExpr::And(l, r) => binary_all(l, r, env, |a, b| bool_val(a != 0 && b != 0)),
        RExpr::Or(l, r) => binary_all(l, r, env, |a, b| bool_val(a != 0 || b != 0)),
        RExpr::Add(l, r) => binary_all(l, r, env, |a, b| EvalValue::Definite(a.wrapping_add(b))),
        RExpr::Sub(l, r) => binary_all(l, r, env, |a, b| EvalValue::Definite(a.wrapping_sub(b))),
        RExpr::Mul(l, r) => binary_all(l, r, env, |a, b| EvalValue::Definite(a.wrapping_mul(b))),
        RExpr::Div(l, r) => binary_all(l, r, env, |a, b| {
            if b == 0 {
                EvalValue::Partial
            } else {
                EvalValue::Definite(a.wrapping_div(b))
            }
        }),
        RExpr::Mod(l, r) => binary_all(l, r, env, |a, b| {
            if b == 0 {
                EvalValue::Partial
            } else {
                EvalValue::Definite(a.wrapping_rem(b))
            }
        }),
        RExpr::Range(lo, hi) => {
            let los = eval_all(lo, env);
            let his = eval_all(hi, env);
            let mut out = Vec::new();
            for lv in &los {
                for hv in &his {
                    match (lv.int(), hv.int()) {
                        (Some(a), Some(b)) if a <= b => out.extend((a..=b).map(EvalValue::Definite)),
                        _ => out.push(EvalValue::Partial),
                    }
                }
            }
            dedup(out)
        }
    }
}

fn unary_all(e: &RExpr, env: &[i32], f: impl Fn(i32) -> EvalValue) -> Vec<EvalValue> {
    let values = eval_all(e, env)
        .into_iter()
        .map(|v| match v.int() {
            Some(n) => f(n),
            None => EvalValue::Partial,
        })
        .collect();
    dedup(values)
}

fn binary_all(lhs: &RExpr, rhs: &RExpr, env: &[i32], f: impl Fn(i32, i32) -> EvalValue) -> Vec<EvalValue> {
    let ls = eval_all(lhs, env);
    let rs = eval_all(rhs, env);
    let mut out = Vec::with_capacity(ls.len() * rs.len());
    for l in &ls {
        for r in &rs {
            match (l.int(), r.int()) {
                (Some(a), Some(b)) => out.push(f(a, b)),
                _ => out.push(EvalValue::Partial),
            }
        }
    }
    dedup(out)
}
