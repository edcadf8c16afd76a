//! Structural hash set over `(Env, State)` pairs, used by the
//! exhaustive engine to avoid re-exploring a configuration it has
//! already queued.
//!
//! Each bucket is a plain `Vec` of records — the idiomatic rendering of
//! a chained hash table once there's no reason to hand-link individual
//! nodes. Hashing mixes every environment slot and every process's
//! current step id through a linear-congruential step, same constants
//! as the reference mixer, deliberately hashing more state than the
//! bucket count needs so that structural comparisons stay rare.
//!
//! Equality compares every element of `env`/`state`, not a truncated
//! byte count — a config with a later differing slot must never be
//! treated as a duplicate of one it isn't.

use crate::state::{Env, State};

const MOD: u64 = 0x1000_0000;
const MUL: u64 = 1_103_515_245;
const ADD: u64 = 12345;
const INIT: u64 = 42;

fn mix(h: u64, x: u64) -> u64 {
    (h.wrapping_add(x).wrapping_mul(MUL).wrapping_add(ADD)) % MOD
}

pub fn hash(env: &Env, state: &State) -> u64 {
    let mut h = INIT;
    for &v in &env.0 {
        // sign-extend so negative values still mix distinctly
        h = mix(h, v as i64 as u64);
    }
    for slot in &state.0 {
        if let Some(step) = slot {
            h = mix(h, step.0 as u64);
        }
    }
    h
}

pub const DEFAULT_BUCKETS: usize = 200;

/// A set of previously-seen `(Env, State)` configurations.
pub struct StateHashSet {
    buckets: Vec<Vec<(u64, Env, State)>>,
}

impl StateHashSet {
    pub fn new(nb_buckets: usize) -> Self {
        let nb_buckets = nb_buckets.max(1);
        StateHashSet {
            buckets: (0..nb_buckets).map(|_| Vec::new()).collect(),
        }
    }

    fn bucket_of(&self, hashed: u64) -> usize {
        (hashed % self.buckets.len() as u64) as usize
    }

    pub fn query(&self, env: &Env, state: &State, hashed: u64) -> bool {
        self.buckets[self.bucket_of(hashed)]
            .iter()
            .any(|(h, e, s)| *h == hashed && e == env && s == state)
    }

    pub fn insert(&mut self, env: Env, state: State, hashed: u64) {
        let idx = self.bucket_of(hashed);
        self.buckets[idx].push((hashed, env, state));
    }

    /// Insert `(env, state)` if absent. Returns `true` iff it was not
    /// already present (i.e. the caller should continue exploring it).
    pub fn try_insert(&mut self, env: &Env, state: &State) -> bool {
        let hashed = hash(env, state);
        if self.query(env, state, hashed) {
            false
        } else {
            self.insert(env.clone(), state.clone(), hashed);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
