use rc_core::StepId;
use rc_engine::{Env, State};
use rc_engine::hashset::StateHashSet;

#[test]
fn bucket_count_does_not_affect_membership() {
    let env = Env(vec![1, -2, 3]);
    let state = State(vec![Some(StepId(4)), None]);
    for buckets in [1usize, 2, 7, 200] {
        let mut set = StateHashSet::new(buckets);
        assert!(set.try_insert(&env, &state));
        assert!(!set.try_insert(&env, &state), "buckets={buckets}");
    }
}

#[test]
fn negative_values_hash_without_panicking() {
    let mut set = StateHashSet::new(4);
    let env = Env(vec![i32::MIN, -1, 0]);
    let state = State(vec![None]);
    assert!(set.try_insert(&env, &state));
    assert_eq!(set.len(), 1);
}

#[test]
fn a_config_with_no_live_processes_is_still_a_distinct_key() {
    let mut set = StateHashSet::new(8);
    let a = State(vec![None, None]);
    let b = State(vec![Some(StepId(0)), None]);
    let env = Env(vec![]);
    assert!(set.try_insert(&env, &a));
    assert!(set.try_insert(&env, &b));
    assert_eq!(set.len(), 2);
}
