//! Search engine — state hash set, work queue, and the random and
//! exhaustive reachability searches.
//!
//! The checker itself is single-threaded: concurrency in the *checked*
//! program is simulated by interleaving one process step per scheduler
//! tick, never driven by actual OS threads.

pub mod compute;
pub mod engine;
pub mod hashset;
pub mod state;
pub mod trace;
pub mod workqueue;

pub use compute::{Compute, DiffNode, Sat};
pub use engine::{exec_exhaustive, exec_random, ExhaustiveBudget, SearchBudget};
pub use state::{Env, State};
pub use trace::{reconstruct, Trace};
