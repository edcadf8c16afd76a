//! The two search strategies: random simulation and exhaustive
//! breadth-first exploration of the interleaved state space.

use std::rc::Rc;

use rand::Rng;
use tracing::{debug, trace};

use rc_core::eval::{eval, eval_all};
use rc_core::ir::{RAssign, RProg, RStep, StepId, VarId};

use crate::compute::{Compute, DiffNode, Sat};
use crate::hashset::{StateHashSet, DEFAULT_BUCKETS};
use crate::state::{Env, State};
use crate::workqueue::WorkQueue;

/// Episode/step budget for the random engine.
#[derive(Debug, Clone, Copy)]
pub struct SearchBudget {
    pub episodes: u32,
    pub steps_per_episode: u32,
}

impl Default for SearchBudget {
    fn default() -> Self {
        SearchBudget {
            episodes: 100,
            steps_per_episode: 100,
        }
    }
}

/// Sizing for the exhaustive engine's seen-state hash set.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveBudget {
    pub buckets: usize,
}

impl Default for ExhaustiveBudget {
    fn default() -> Self {
        ExhaustiveBudget {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

fn exec_assign<R: Rng + ?Sized>(
    assign: &RAssign,
    env: &mut Env,
    rng: &mut R,
) -> Option<(VarId, i32)> {
    match eval(&assign.expr, &env.0, rng) {
        rc_core::EvalValue::Definite(v) => {
            env.set(assign.target.0 as usize, v);
            Some((assign.target, v))
        }
        rc_core::EvalValue::Partial => None,
    }
}

fn satisfied_guards<R: Rng + ?Sized>(step: &RStep, env: &Env, rng: &mut R) -> Vec<StepId> {
    step.guarded
        .iter()
        .filter(|g| eval(&g.cond, &env.0, rng).is_satisfied())
        .map(|g| g.next)
        .collect()
}

fn entry_state(prog: &RProg) -> Vec<Option<StepId>> {
    prog.procs.iter().map(|p| p.entry).collect()
}

/// Record witnesses for the random engine: one rng draw per check,
/// shorter diff wins if the slot is already filled.
fn update_sat_random<R: Rng + ?Sized>(
    sat: &mut Sat,
    prog: &RProg,
    env: &Env,
    diff: &Rc<DiffNode>,
    rng: &mut R,
) {
    for (k, check) in prog.checks.iter().enumerate() {
        if !eval(&check.cond, &env.0, rng).is_satisfied() {
            continue;
        }
        match &sat[k] {
            None => sat[k] = Some(Rc::clone(diff)),
            Some(existing) if diff.depth < existing.depth => {
                sat[k] = Some(Rc::clone(diff));
            }
            _ => {}
        }
    }
}

/// Record witnesses for the exhaustive engine: a check is reachable
/// from this configuration if *any* value it could enumerate to is
/// satisfied (a check may itself embed a `Range`). BFS order means the
/// first recording is already a shortest witness, so never overwrite.
fn update_sat_exhaustive(sat: &mut Sat, prog: &RProg, env: &Env, diff: &Rc<DiffNode>) {
    for (k, check) in prog.checks.iter().enumerate() {
        if sat[k].is_some() {
            continue;
        }
        if eval_all(&check.cond, &env.0).iter().any(|v| v.is_satisfied()) {
            sat[k] = Some(Rc::clone(diff));
        }
    }
}

/// Execute one process's current step against `env`, advancing or
/// blocking it. Returns the new step (`None` if the process has
/// finished) and whatever it assigned.
fn step_once<R: Rng + ?Sized>(
    step_id: StepId,
    prog: &RProg,
    env: &mut Env,
    rng: &mut R,
) -> (Option<StepId>, Option<(VarId, i32)>) {
    let step = prog.step(step_id);
    let mut assigned = None;
    if let Some(a) = &step.assign {
        match exec_assign(a, env, rng) {
            Some(pair) => assigned = Some(pair),
            // blocked by a partial-valued assignment: stay put
            None => return (Some(step_id), None),
        }
    }
    let new_step = if step.guarded.is_empty() {
        step.unguarded
    } else {
        let satisfied = satisfied_guards(step, env, rng);
        if satisfied.is_empty() {
            step.unguarded.or(Some(step_id))
        } else {
            Some(satisfied[rng.gen_range(0..satisfied.len())])
        }
    };
    (new_step, assigned)
}

/// Run `budget.episodes` independent random simulations, each
/// `budget.steps_per_episode` steps long, recording the shortest
/// witness seen for every check.
pub fn exec_random<R: Rng + ?Sized>(prog: &RProg, budget: &SearchBudget, rng: &mut R) -> Sat {
    let mut sat: Sat = vec![None; prog.nbcheck()];
    for episode in 0..budget.episodes {
        let mut env = Env::blank(prog.nbvar);
        let mut state = State::init(&entry_state(prog));
        let mut diff = DiffNode::root();
        for _ in 0..budget.steps_per_episode {
            update_sat_random(&mut sat, prog, &env, &diff, rng);
            if prog.nbproc() == 0 {
                break;
            }
            let pid = rng.gen_range(0..prog.nbproc());
            let old_step = state.get(pid);
            let Some(step_id) = old_step else { continue };
            let mut child = DiffNode::child(&diff);
            child.pid_advance = Some(pid);
            let (new_step, assigned) = step_once(step_id, prog, &mut env, rng);
            child.new_step = new_step;
            child.assigned = assigned;
            if new_step == old_step {
                // blocked: no progress, discard the diff so the chain
                // never records an empty step
                continue;
            }
            state.set(pid, new_step);
            diff = Rc::new(child);
        }
        trace!(episode, depth = diff.depth, "episode finished");
    }
    sat
}

/// Every distinct next-step this step can transition to, given `env`.
/// A guard's achievable truth value is computed independently of its
/// sibling guards — their `Range` draws, if any, are independent random
/// choices — so the reachable outcomes are: every guard that can ever
/// be satisfied contributes its `next` as one outcome, and `unguarded`
/// is reachable too as long as every guard can *also* come up false at
/// once (trivially true when none of them are random).
fn step_successors(step: &RStep, env: &Env) -> Vec<Option<StepId>> {
    if step.guarded.is_empty() {
        return vec![step.unguarded];
    }
    let mut successors = Vec::new();
    let mut all_can_be_false = true;
    for g in &step.guarded {
        let values = eval_all(&g.cond, &env.0);
        if values.iter().any(|v| v.is_satisfied()) {
            successors.push(Some(g.next));
        }
        if values.iter().all(|v| v.is_satisfied()) {
            all_can_be_false = false;
        }
    }
    if all_can_be_false {
        if let Some(u) = step.unguarded {
            successors.push(Some(u));
        }
    }
    successors
}

/// Every `(env, assignment)` world this step's entry assignment can
/// produce. No assignment (or one that evaluates to a single definite
/// value) yields exactly one world; a `Range`-valued assignment yields
/// one world per value in the range. A partial-valued draw blocks that
/// particular world (it contributes nothing), matching §4 step
/// semantics.
fn assign_worlds(step: &RStep, env: &Env) -> Vec<(Env, Option<(VarId, i32)>)> {
    match &step.assign {
        None => vec![(env.clone(), None)],
        Some(a) => eval_all(&a.expr, &env.0)
            .into_iter()
            .filter_map(|v| match v {
                rc_core::EvalValue::Definite(n) => {
                    let mut next_env = env.clone();
                    next_env.set(a.target.0 as usize, n);
                    Some((next_env, Some((a.target, n))))
                }
                rc_core::EvalValue::Partial => None,
            })
            .collect(),
    }
}

fn explore_process(pid: usize, comp: &Compute, prog: &RProg, seen: &mut StateHashSet, queue: &mut WorkQueue) {
    let Some(step_id) = comp.state.get(pid) else {
        return;
    };
    let step = prog.step(step_id);
    for (env, assigned) in assign_worlds(step, &comp.env) {
        let mut child = DiffNode::child(&comp.diff);
        child.pid_advance = Some(pid);
        child.assigned = assigned;
        for succ in step_successors(step, &env) {
            let mut new_state = comp.state.clone();
            new_state.set(pid, succ);
            if seen.try_insert(&env, &new_state) {
                let mut d = child.clone();
                d.new_step = succ;
                queue.enqueue(Compute {
                    env: env.clone(),
                    state: new_state,
                    diff: Rc::new(d),
                });
            }
        }
    }
}

/// Explore the full interleaved state space breadth-first. Since BFS
/// dequeues in the order it enqueued, the first diff chain recorded for
/// a check is already a shortest witness — no need to compare depths.
pub fn exec_exhaustive(prog: &RProg, budget: &ExhaustiveBudget) -> Sat {
    let mut sat: Sat = vec![None; prog.nbcheck()];
    let mut seen = StateHashSet::new(budget.buckets);
    let mut queue = WorkQueue::new();

    let root = Compute::blank(prog.nbvar, &entry_state(prog));
    seen.try_insert(&root.env, &root.state);
    queue.enqueue(root);

    let mut explored = 0u64;
    while let Some(comp) = queue.dequeue() {
        explored += 1;
        update_sat_exhaustive(&mut sat, prog, &comp.env, &comp.diff);
        for pid in 0..prog.nbproc() {
            explore_process(pid, &comp, prog, &mut seen, &mut queue);
        }
    }
    debug!(explored, seen = seen.len(), "exhaustive search complete");
    sat
}
