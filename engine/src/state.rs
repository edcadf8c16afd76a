//! The data (`Env`) and control (`State`) halves of a global
//! configuration.

use rc_core::StepId;

/// The current value of every variable, indexed by `VarId`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Env(pub Vec<i32>);

impl Env {
    pub fn blank(nbvar: u32) -> Self {
        Env(vec![0; nbvar as usize])
    }

    pub fn get(&self, idx: usize) -> i32 {
        self.0[idx]
    }

    pub fn set(&mut self, idx: usize, val: i32) {
        self.0[idx] = val;
    }
}

/// The current step of every process. `None` means that process has
/// permanently blocked or finished.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State(pub Vec<Option<StepId>>);

impl State {
    pub fn init(entries: &[Option<StepId>]) -> Self {
        State(entries.to_vec())
    }

    pub fn get(&self, pid: usize) -> Option<StepId> {
        self.0[pid]
    }

    pub fn set(&mut self, pid: usize, step: Option<StepId>) {
        self.0[pid] = step;
    }
}
