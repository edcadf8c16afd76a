//! A computation: one point in the interleaved global state space, plus
//! the chain of choices that reached it.

use std::rc::Rc;

use rc_core::{StepId, VarId};

use crate::state::{Env, State};

/// One link in a witness chain: "process `pid_advance` moved to
/// `new_step`, and (if it assigned) `assigned` holds the variable and
/// value it wrote." The root diff has `parent = None`, `pid_advance =
/// None`, and `depth = 0`.
///
/// Sharing this via `Rc` rather than a manual registry/arena is the
/// idiomatic substitute for the original's hand-managed allocation list:
/// a diff node is freed the moment nothing — no live `Compute`, no
/// recorded witness — still points to it.
#[derive(Debug, Clone)]
pub struct DiffNode {
    pub parent: Option<Rc<DiffNode>>,
    pub pid_advance: Option<usize>,
    pub new_step: Option<StepId>,
    pub assigned: Option<(VarId, i32)>,
    pub depth: u32,
}

impl DiffNode {
    pub fn root() -> Rc<DiffNode> {
        Rc::new(DiffNode {
            parent: None,
            pid_advance: None,
            new_step: None,
            assigned: None,
            depth: 0,
        })
    }

    pub fn child(parent: &Rc<DiffNode>) -> DiffNode {
        DiffNode {
            parent: Some(Rc::clone(parent)),
            pid_advance: None,
            new_step: None,
            assigned: None,
            depth: parent.depth + 1,
        }
    }
}

/// One witness slot per `reach?` clause: `None` until some computation
/// is found that satisfies the clause.
pub type Sat = Vec<Option<Rc<DiffNode>>>;

/// A snapshot of the interleaved search: current data state, current
/// control state, and the diff chain that reached it.
#[derive(Debug, Clone)]
pub struct Compute {
    pub env: Env,
    pub state: State,
    pub diff: Rc<DiffNode>,
}

impl Compute {
    pub fn blank(nbvar: u32, entries: &[Option<StepId>]) -> Self {
        Compute {
            env: Env::blank(nbvar),
            state: State::init(entries),
            diff: DiffNode::root(),
        }
    }
}
