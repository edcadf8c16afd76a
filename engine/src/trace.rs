//! Turning a witness diff chain back into a readable sequence of steps.

use std::rc::Rc;

use rc_core::{RProg, StepId, VarId};

use crate::compute::DiffNode;
use crate::state::Env;

/// One entry of a reconstructed witness, in the order it happened.
#[derive(Debug, Clone)]
pub struct TraceEntry {
    pub pid: usize,
    pub new_step: Option<StepId>,
    pub assigned: Option<(VarId, i32)>,
}

/// A replayable witness: the ordered entries plus the environment they
/// lead to.
#[derive(Debug, Clone)]
pub struct Trace {
    pub entries: Vec<TraceEntry>,
    pub final_env: Env,
}

/// Walk a diff chain from the satisfying leaf back to the root, then
/// reverse it into execution order, replaying assignments to rebuild
/// the environment along the way.
pub fn reconstruct(prog: &RProg, diff: &Rc<DiffNode>) -> Trace {
    let mut rev = Vec::new();
    let mut cur = Some(Rc::clone(diff));
    while let Some(node) = cur {
        if let Some(pid) = node.pid_advance {
            rev.push(TraceEntry {
                pid,
                new_step: node.new_step,
                assigned: node.assigned,
            });
        }
        cur = node.parent.clone();
    }
    rev.reverse();

    let mut env = Env::blank(prog.nbvar);
    for entry in &rev {
        if let Some((var, val)) = entry.assigned {
            env.set(var.0 as usize, val);
        }
    }
    Trace {
        entries: rev,
        final_env: env,
    }
}
